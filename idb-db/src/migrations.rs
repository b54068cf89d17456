use crate::{PostgresConfigError, QueryError};
use diesel::sql_types::BigInt;
use diesel::{Connection, ConnectionError, PgConnection, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{info, warn};
use miette::Diagnostic;
use std::error::Error;
use thiserror::Error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");
const MIGRATION_LOCK_ID: i64 = 19_141_876;

#[derive(Debug, Error, Diagnostic)]
pub enum MigrationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] PostgresConfigError),

    #[error("couldn't connect to database")]
    FailedToConnectToDatabase(#[source] ConnectionError),

    #[error("error acquiring migrations lock")]
    FailedToAcquireMigrationsLock(#[source] QueryError),

    #[error("error running migrations")]
    FailedToRunMigrations(#[source] Box<dyn Error + Send + Sync>),
}

/// Applies any migrations `conn` hasn't seen yet. Does not take the
/// migrations lock; see [`run_migrations`].
pub fn run_pending_migrations(conn: &mut PgConnection) -> Result<(), MigrationError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(MigrationError::FailedToRunMigrations)?;

    for version in applied {
        info!("Applied migration {version}");
    }

    Ok(())
}

/// Connects with the environment's postgres settings and migrates the
/// schema. The app and the importer may start together, so this holds an
/// advisory lock while it works.
pub fn run_migrations() -> Result<(), MigrationError> {
    let url = crate::postgres_url_from_environment()?;

    let mut conn =
        PgConnection::establish(&url).map_err(MigrationError::FailedToConnectToDatabase)?;

    info!("Acquiring migrations lock");
    diesel::sql_query("select pg_advisory_lock($1);")
        .bind::<BigInt, _>(MIGRATION_LOCK_ID)
        .execute(&mut conn)
        .map_err(MigrationError::FailedToAcquireMigrationsLock)?;

    info!("Running any pending migrations");
    let result = run_pending_migrations(&mut conn);

    let unlock_result = diesel::sql_query("select pg_advisory_unlock($1);")
        .bind::<BigInt, _>(MIGRATION_LOCK_ID)
        .execute(&mut conn);

    if let Err(e) = unlock_result {
        warn!(
            "Failed to unlock migrations lock. It will be unlocked when the connection is \
            dropped. Error: {:?}",
            e,
        );
    }

    result?;
    info!("Migrations finished");
    Ok(())
}
