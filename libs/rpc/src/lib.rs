//! Protobuf and gRPC bindings for the login service
//!
//! `src/gen` is produced by `buf generate` from `proto/login.proto` and
//! checked in so consumers do not need `protoc`. Do not edit it by hand.

pub mod login {
    include!("gen/login.rs");
    // login.tonic.rs is included by login.rs
}
