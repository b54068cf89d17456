use idb_db::db::{self, PlayerSeason, Standing, TeamSeason};
use idb_db::models::{DbPlayerImage, DbTeam, DbTeamImage, DbYearImage};
use idb_db::{Record, record};
use rocket::serde::json::Json;
use rocket::{get, uri};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::Db;
use crate::error::{AppError, OrNotFound};

#[derive(Serialize)]
pub struct IndexContext {
    players_url: String,
    teams_url: String,
    years_url: String,
}

#[derive(Serialize)]
pub struct SearchContext {
    query: Option<String>,
    count: usize,
    results: Vec<Map<String, Value>>,
}

impl SearchContext {
    fn new<R: Record>(query: Option<String>, items: &[R]) -> Self {
        Self {
            query,
            count: items.len(),
            results: record::to_records(items),
        }
    }
}

#[derive(Serialize)]
pub struct PlayerContext {
    player: Map<String, Value>,
    seasons: Vec<PlayerSeason>,
    images: Vec<DbPlayerImage>,
}

#[derive(Serialize)]
pub struct TeamContext {
    team: Map<String, Value>,
    seasons: Vec<TeamSeason>,
    images: Vec<DbTeamImage>,
}

#[derive(Serialize)]
pub struct YearContext {
    year: Map<String, Value>,
    standings: Vec<Standing>,
    images: Vec<DbYearImage>,
}

#[get("/")]
pub async fn index_page() -> Json<IndexContext> {
    Json(IndexContext {
        players_url: uri!(players_page(_)).to_string(),
        teams_url: uri!(teams_page(_)).to_string(),
        years_url: uri!(years_page(_)).to_string(),
    })
}

#[get("/players?<q>")]
pub async fn players_page(q: Option<String>, db: Db) -> Result<Json<SearchContext>, AppError> {
    let query = q.clone();
    let players = db
        .run(move |conn| match q {
            Some(q) => db::search_players(conn, &q),
            None => db::all_players(conn),
        })
        .await?;

    Ok(Json(SearchContext::new(query, &players)))
}

#[get("/players/<player_id>")]
pub async fn player_page(player_id: i64, db: Db) -> Result<Json<PlayerContext>, AppError> {
    let (player, seasons, images) = db
        .run(move |conn| -> Result<_, AppError> {
            let player =
                db::player(conn, player_id).or_not_found(|| format!("player {player_id}"))?;
            let seasons = db::player_seasons(conn, player_id)?;
            let images = db::player_images(conn, &player)?;
            Ok((player, seasons, images))
        })
        .await?;

    Ok(Json(PlayerContext {
        player: player.to_record(),
        seasons,
        images,
    }))
}

#[get("/teams?<q>")]
pub async fn teams_page(q: Option<String>, db: Db) -> Result<Json<SearchContext>, AppError> {
    let query = q.clone();
    let teams = db
        .run(move |conn| match q {
            Some(q) => db::search_teams(conn, &q),
            None => db::all_teams(conn),
        })
        .await?;

    Ok(Json(SearchContext::new(query, &teams)))
}

enum TeamKey {
    Id(i64),
    Abbr(String),
}

async fn team_context(key: TeamKey, db: Db) -> Result<Json<TeamContext>, AppError> {
    let (team, seasons, images) = db
        .run(move |conn| -> Result<_, AppError> {
            let team: DbTeam = match key {
                TeamKey::Id(id) => db::team(conn, id).or_not_found(|| format!("team {id}"))?,
                TeamKey::Abbr(abbr) => {
                    db::team_by_abbr(conn, &abbr).or_not_found(|| format!("team {abbr}"))?
                }
            };
            let seasons = db::team_seasons(conn, team.id)?;
            let images = db::team_images(conn, &team)?;
            Ok((team, seasons, images))
        })
        .await?;

    Ok(Json(TeamContext {
        team: team.to_record(),
        seasons,
        images,
    }))
}

#[get("/teams/<team_id>")]
pub async fn team_page(team_id: i64, db: Db) -> Result<Json<TeamContext>, AppError> {
    team_context(TeamKey::Id(team_id), db).await
}

// Numeric ids take the route above; anything else is tried as an abbr
#[get("/teams/<abbr>", rank = 2)]
pub async fn team_abbr_page(abbr: String, db: Db) -> Result<Json<TeamContext>, AppError> {
    team_context(TeamKey::Abbr(abbr), db).await
}

#[get("/years?<q>")]
pub async fn years_page(q: Option<String>, db: Db) -> Result<Json<SearchContext>, AppError> {
    let query = q.clone();
    let years = db
        .run(move |conn| match q {
            Some(q) => db::search_years(conn, &q),
            None => db::all_years(conn),
        })
        .await?;

    Ok(Json(SearchContext::new(query, &years)))
}

#[get("/years/<year>")]
pub async fn year_page(year: String, db: Db) -> Result<Json<YearContext>, AppError> {
    let (year, standings, images) = db
        .run(move |conn| -> Result<_, AppError> {
            let year = db::year(conn, &year).or_not_found(|| format!("year {year}"))?;
            let standings = db::standings(conn, year.id)?;
            let images = db::year_images(conn, &year)?;
            Ok((year, standings, images))
        })
        .await?;

    Ok(Json(YearContext {
        year: year.to_record(),
        standings,
        images,
    }))
}
