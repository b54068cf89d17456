use idb_db::db::{self, TeamSeason};
use idb_db::{Record, record};
use rocket::get;
use rocket::serde::json::Json;
use serde_json::{Map, Value};

use crate::Db;
use crate::error::{AppError, OrNotFound};

#[get("/teams?<q>")]
pub async fn teams(q: Option<String>, db: Db) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let teams = db
        .run(move |conn| match q {
            Some(q) => db::search_teams(conn, &q),
            None => db::all_teams(conn),
        })
        .await?;

    Ok(Json(record::to_records(&teams)))
}

#[get("/teams/<team_id>")]
pub async fn team(team_id: i64, db: Db) -> Result<Json<Map<String, Value>>, AppError> {
    let team = db
        .run(move |conn| db::team(conn, team_id).or_not_found(|| format!("team {team_id}")))
        .await?;

    Ok(Json(team.to_record()))
}

#[get("/teams/<team_id>/years")]
pub async fn team_years(team_id: i64, db: Db) -> Result<Json<Vec<TeamSeason>>, AppError> {
    let seasons = db
        .run(move |conn| -> Result<_, AppError> {
            db::team(conn, team_id).or_not_found(|| format!("team {team_id}"))?;
            Ok(db::team_seasons(conn, team_id)?)
        })
        .await?;

    Ok(Json(seasons))
}

#[get("/teams/<team_id>/years/<year>")]
pub async fn team_year(team_id: i64, year: String, db: Db) -> Result<Json<TeamSeason>, AppError> {
    let season = db
        .run(move |conn| {
            db::team_season(conn, team_id, &year)
                .or_not_found(|| format!("{year} season for team {team_id}"))
        })
        .await?;

    Ok(Json(season))
}
