use idb_db::db::{self, PlayerSeason};
use idb_db::{Record, record};
use rocket::get;
use rocket::serde::json::Json;
use serde_json::{Map, Value};

use crate::Db;
use crate::error::{AppError, OrNotFound};

#[get("/players?<q>")]
pub async fn players(q: Option<String>, db: Db) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let players = db
        .run(move |conn| match q {
            Some(q) => db::search_players(conn, &q),
            None => db::all_players(conn),
        })
        .await?;

    Ok(Json(record::to_records(&players)))
}

#[get("/players/<player_id>")]
pub async fn player(player_id: i64, db: Db) -> Result<Json<Map<String, Value>>, AppError> {
    let player = db
        .run(move |conn| {
            db::player(conn, player_id).or_not_found(|| format!("player {player_id}"))
        })
        .await?;

    Ok(Json(player.to_record()))
}

#[get("/players/<player_id>/years")]
pub async fn player_years(player_id: i64, db: Db) -> Result<Json<Vec<PlayerSeason>>, AppError> {
    let seasons = db
        .run(move |conn| -> Result<_, AppError> {
            // An unknown player is a 404, not an empty list
            db::player(conn, player_id).or_not_found(|| format!("player {player_id}"))?;
            Ok(db::player_seasons(conn, player_id)?)
        })
        .await?;

    Ok(Json(seasons))
}

#[get("/players/<player_id>/years/<year>")]
pub async fn player_year(
    player_id: i64,
    year: String,
    db: Db,
) -> Result<Json<Vec<PlayerSeason>>, AppError> {
    let seasons = {
        let year = year.clone();
        db.run(move |conn| db::player_seasons_in_year(conn, player_id, &year))
            .await?
    };

    if seasons.is_empty() {
        return Err(AppError::NotFound(format!("{year} season for player {player_id}")));
    }

    Ok(Json(seasons))
}
