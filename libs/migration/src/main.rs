//! Schema CLI for the login directory (`migration up`, `migration status`, ...)
//!
//! Reads `DATABASE_URL` like the server does.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
