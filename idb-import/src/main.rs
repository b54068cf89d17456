mod config;
mod import;
mod seed;

use diesel::{Connection, PgConnection};
use log::info;
use miette::{Context, IntoDiagnostic};

use config::ImportConfig;
use seed::Seed;

fn main() -> miette::Result<()> {
    env_logger::init();

    let config = ImportConfig::config(std::env::args_os().nth(1).map(Into::into)).into_diagnostic()?;

    if config.run_migrations {
        idb_db::run_migrations()?;
    }

    let contents = std::fs::read_to_string(&config.seed_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("couldn't read seed file {}", config.seed_path.display()))?;
    let seed: Seed = serde_json::from_str(&contents)
        .into_diagnostic()
        .wrap_err_with(|| format!("couldn't parse seed file {}", config.seed_path.display()))?;

    // Catch mistakes before opening a connection
    import::validate(&seed)?;

    let url = idb_db::postgres_url_from_environment()?;
    let mut conn = PgConnection::establish(&url).into_diagnostic()?;

    info!("Importing {}", config.seed_path.display());
    let counts = conn.transaction(|conn| import::import_seed(conn, &seed))?;
    info!("Import finished: {counts:?}");

    Ok(())
}
