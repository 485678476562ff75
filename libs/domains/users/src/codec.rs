use sha2::{Digest, Sha512};

/// Turns a secret into the digest stored and compared by the directory.
///
/// Implementations must be deterministic: the same secret always yields the
/// same digest, since verification is a plain equality check.
pub trait CredentialCodec: Send + Sync {
    fn digest(&self, secret: &str) -> String;
}

/// SHA-512 over the UTF-8 bytes, lowercase hex encoded (128 characters).
///
/// Unsalted and fast. Clients that want more must salt before calling.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha512Codec;

impl CredentialCodec for Sha512Codec {
    fn digest(&self, secret: &str) -> String {
        const_hex::encode(Sha512::digest(secret.as_bytes()))
    }
}
