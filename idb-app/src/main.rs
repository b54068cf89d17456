mod api;
mod error;
mod web;

use log::error;
use rocket::fairing::{self, AdHoc};
use rocket::figment::{Figment, map};
use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;
use rocket_sync_db_pools::diesel::PgConnection;

#[database("idb")]
pub struct Db(PgConnection);

async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    match tokio::task::spawn_blocking(idb_db::run_migrations).await {
        Ok(Ok(())) => Ok(rocket),
        Ok(Err(err)) => {
            error!("{:?}", miette::Report::new(err));
            Err(rocket)
        }
        Err(err) => {
            error!("Migrations task failed: {err}");
            Err(rocket)
        }
    }
}

fn get_figment_with_constructed_db_url() -> Result<Figment, idb_db::PostgresConfigError> {
    let url = idb_db::postgres_url_from_environment()?;
    Ok(rocket::Config::figment().merge(("databases", map!["idb" => map!["url" => url]])))
}

fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount("/", web::routes())
        .mount("/api", api::routes())
        .register("/", rocket::catchers![error::not_found, error::fallback])
        .attach(Db::fairing())
        .attach(AdHoc::try_on_ignite("Migrations", run_migrations))
}

#[rocket::main]
async fn main() -> miette::Result<()> {
    let figment = get_figment_with_constructed_db_url()?;

    build(figment)
        .launch()
        .await
        .map_err(|err| miette::miette!("server failed: {err}"))?;

    Ok(())
}
