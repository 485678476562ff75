//! Seed Admin
//!
//! One-shot tool that creates the first account of the login directory with
//! a fixed id. Running it again with the same id does nothing.
//!
//! ```text
//! DATABASE_URL=postgres://... seed-admin 1 admin 'initial password'
//! ```

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
use domain_users::{CredentialCodec, DirectoryService, PgUserRepository, SeedOutcome, Sha512Codec};
use eyre::{Result, WrapErr};
use migration::Migrator;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "seed-admin")]
#[command(about = "Create the initial admin account if no user has the given id")]
struct Cli {
    /// Id of the admin account
    #[arg(value_parser = clap::value_parser!(u64).range(1..=i64::MAX as u64))]
    id: u64,

    /// Login of the admin account
    login: String,

    /// Password; only its SHA-512 digest is stored
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();

    let config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;

    info!("Connecting to database...");
    let db = connect_from_config_with_retry(config, None)
        .await
        .wrap_err("Failed to connect to database")?;

    run_migrations::<Migrator>(&db, "seed-admin")
        .await
        .wrap_err("Failed to apply migrations")?;

    let service = DirectoryService::new(PgUserRepository::new(db));
    let digest = Sha512Codec.digest(&cli.password);

    match service
        .seed(cli.id, &cli.login, &digest)
        .await
        .wrap_err("Failed to seed admin account")?
    {
        SeedOutcome::Created(user) => {
            info!(user_id = user.id, login = %user.login, "Admin account created");
        }
        SeedOutcome::AlreadyPresent => {
            info!(user_id = cli.id, "A user with this id already exists, nothing to do");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_positionals() {
        let cli = Cli::try_parse_from(["seed-admin", "1", "admin", "s3cret"]).unwrap();
        assert_eq!(cli.id, 1);
        assert_eq!(cli.login, "admin");
        assert_eq!(cli.password, "s3cret");
    }

    #[test]
    fn test_cli_rejects_bad_ids() {
        assert!(Cli::try_parse_from(["seed-admin", "abc", "admin", "pw"]).is_err());
        assert!(Cli::try_parse_from(["seed-admin", "0", "admin", "pw"]).is_err());
        assert!(Cli::try_parse_from(["seed-admin", "9223372036854775808", "admin", "pw"]).is_err());
    }

    #[test]
    fn test_cli_requires_all_arguments() {
        assert!(Cli::try_parse_from(["seed-admin", "1", "admin"]).is_err());
    }
}
