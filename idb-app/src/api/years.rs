use idb_db::db;
use idb_db::{Record, record};
use rocket::get;
use rocket::serde::json::Json;
use serde_json::{Map, Value};

use crate::Db;
use crate::error::{AppError, OrNotFound};

#[get("/years?<q>")]
pub async fn years(q: Option<String>, db: Db) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let years = db
        .run(move |conn| match q {
            Some(q) => db::search_years(conn, &q),
            None => db::all_years(conn),
        })
        .await?;

    Ok(Json(record::to_records(&years)))
}

#[get("/years/<year>")]
pub async fn year(year: String, db: Db) -> Result<Json<Map<String, Value>>, AppError> {
    let year = db
        .run(move |conn| db::year(conn, &year).or_not_found(|| format!("year {year}")))
        .await?;

    Ok(Json(year.to_record()))
}
