use diesel::{PgConnection, prelude::*};
use log::info;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    DbPlayer, DbPlayerImage, DbPlayerYear, DbTeam, DbTeamImage, DbTeamYear, DbYear, DbYearImage,
    ModelError, NewPlayer, NewPlayerImage, NewPlayerYear, NewTeam, NewTeamImage, NewTeamYear,
    NewYear, NewYearImage, PlayerYear,
};
use crate::schema::{
    player_images, player_years, players, team_images, team_years, teams, year_images, years,
};

pub use crate::search::{search_players, search_teams, search_years};

#[derive(Debug, Error, Diagnostic)]
pub enum QueryConvertError {
    #[error(transparent)]
    Query(#[from] diesel::result::Error),

    #[error(transparent)]
    Convert(#[from] ModelError),
}

/// A player's season along with the natural keys of the season and team
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeason {
    #[serde(flatten)]
    pub record: PlayerYear,
    pub year: String,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeason {
    #[serde(flatten)]
    pub record: DbTeamYear,
    pub year: String,
}

/// One row of a season's standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    #[serde(flatten)]
    pub record: DbTeamYear,
    pub team: String,
    pub team_name: String,
}

pub fn all_players(conn: &mut PgConnection) -> QueryResult<Vec<DbPlayer>> {
    players::table
        .order_by(players::id)
        .select(DbPlayer::as_select())
        .get_results(conn)
}

pub fn all_teams(conn: &mut PgConnection) -> QueryResult<Vec<DbTeam>> {
    teams::table
        .order_by(teams::abbr)
        .select(DbTeam::as_select())
        .get_results(conn)
}

pub fn all_years(conn: &mut PgConnection) -> QueryResult<Vec<DbYear>> {
    years::table
        .order_by(years::year)
        .select(DbYear::as_select())
        .get_results(conn)
}

pub fn player(conn: &mut PgConnection, player_id: i64) -> QueryResult<DbPlayer> {
    players::table
        .find(player_id)
        .select(DbPlayer::as_select())
        .get_result(conn)
}

pub fn team(conn: &mut PgConnection, team_id: i64) -> QueryResult<DbTeam> {
    teams::table
        .find(team_id)
        .select(DbTeam::as_select())
        .get_result(conn)
}

/// Abbreviations are stored upper case, so lookups are too.
pub fn team_by_abbr(conn: &mut PgConnection, abbr: &str) -> QueryResult<DbTeam> {
    teams::table
        .filter(teams::abbr.eq(abbr.to_uppercase()))
        .select(DbTeam::as_select())
        .get_result(conn)
}

pub fn year(conn: &mut PgConnection, year: &str) -> QueryResult<DbYear> {
    years::table
        .filter(years::year.eq(year))
        .select(DbYear::as_select())
        .get_result(conn)
}

fn into_player_seasons(
    rows: Vec<(DbPlayerYear, String, String)>,
) -> Result<Vec<PlayerSeason>, QueryConvertError> {
    rows.into_iter()
        .map(|(row, year, team)| -> Result<PlayerSeason, QueryConvertError> {
            Ok(PlayerSeason {
                record: row.try_into()?,
                year,
                team,
            })
        })
        .collect()
}

pub fn player_seasons(
    conn: &mut PgConnection,
    player_id: i64,
) -> Result<Vec<PlayerSeason>, QueryConvertError> {
    let rows = player_years::table
        .inner_join(team_years::table.inner_join(teams::table))
        .inner_join(years::table)
        .filter(player_years::player_id.eq(player_id))
        .order_by((years::year.asc(), player_years::id.asc()))
        .select((DbPlayerYear::as_select(), years::year, teams::abbr))
        .get_results(conn)?;

    into_player_seasons(rows)
}

/// A player can have more than one season per year if they changed teams
/// mid-season.
pub fn player_seasons_in_year(
    conn: &mut PgConnection,
    player_id: i64,
    year: &str,
) -> Result<Vec<PlayerSeason>, QueryConvertError> {
    let rows = player_years::table
        .inner_join(team_years::table.inner_join(teams::table))
        .inner_join(years::table)
        .filter(player_years::player_id.eq(player_id))
        .filter(years::year.eq(year))
        .order_by(player_years::id.asc())
        .select((DbPlayerYear::as_select(), years::year, teams::abbr))
        .get_results(conn)?;

    into_player_seasons(rows)
}

pub fn team_seasons(conn: &mut PgConnection, team_id: i64) -> QueryResult<Vec<TeamSeason>> {
    team_years::table
        .inner_join(years::table)
        .filter(team_years::team_id.eq(team_id))
        .order_by(years::year.asc())
        .select((DbTeamYear::as_select(), years::year))
        .get_results::<(DbTeamYear, String)>(conn)
        .map(|rows| {
            rows.into_iter()
                .map(|(record, year)| TeamSeason { record, year })
                .collect()
        })
}

pub fn team_season(conn: &mut PgConnection, team_id: i64, year: &str) -> QueryResult<TeamSeason> {
    let (record, year) = team_years::table
        .inner_join(years::table)
        .filter(team_years::team_id.eq(team_id))
        .filter(years::year.eq(year))
        .select((DbTeamYear::as_select(), years::year))
        .get_result::<(DbTeamYear, String)>(conn)?;

    Ok(TeamSeason { record, year })
}

pub fn standings(conn: &mut PgConnection, year_id: i64) -> QueryResult<Vec<Standing>> {
    team_years::table
        .inner_join(teams::table)
        .filter(team_years::year_id.eq(year_id))
        .order_by((team_years::standing.asc(), teams::abbr.asc()))
        .select((DbTeamYear::as_select(), teams::abbr, teams::name))
        .get_results::<(DbTeamYear, String, String)>(conn)
        .map(|rows| {
            rows.into_iter()
                .map(|(record, team, team_name)| Standing {
                    record,
                    team,
                    team_name,
                })
                .collect()
        })
}

pub fn player_images(conn: &mut PgConnection, player: &DbPlayer) -> QueryResult<Vec<DbPlayerImage>> {
    DbPlayerImage::belonging_to(player)
        .order_by(player_images::id)
        .select(DbPlayerImage::as_select())
        .get_results(conn)
}

pub fn team_images(conn: &mut PgConnection, team: &DbTeam) -> QueryResult<Vec<DbTeamImage>> {
    DbTeamImage::belonging_to(team)
        .order_by(team_images::id)
        .select(DbTeamImage::as_select())
        .get_results(conn)
}

pub fn year_images(conn: &mut PgConnection, year: &DbYear) -> QueryResult<Vec<DbYearImage>> {
    DbYearImage::belonging_to(year)
        .order_by(year_images::id)
        .select(DbYearImage::as_select())
        .get_results(conn)
}

pub fn insert_player(conn: &mut PgConnection, new: &NewPlayer) -> QueryResult<i64> {
    diesel::insert_into(players::table)
        .values(new)
        .returning(players::id)
        .get_result(conn)
}

pub fn insert_team(conn: &mut PgConnection, new: &NewTeam) -> QueryResult<i64> {
    diesel::insert_into(teams::table)
        .values(new)
        .returning(teams::id)
        .get_result(conn)
}

pub fn insert_year(conn: &mut PgConnection, new: &NewYear) -> QueryResult<i64> {
    diesel::insert_into(years::table)
        .values(new)
        .returning(years::id)
        .get_result(conn)
}

pub fn insert_team_year(conn: &mut PgConnection, new: &NewTeamYear) -> QueryResult<i64> {
    diesel::insert_into(team_years::table)
        .values(new)
        .returning(team_years::id)
        .get_result(conn)
}

pub fn insert_player_year(conn: &mut PgConnection, new: &NewPlayerYear) -> QueryResult<i64> {
    diesel::insert_into(player_years::table)
        .values(new)
        .returning(player_years::id)
        .get_result(conn)
}

pub fn insert_player_images(conn: &mut PgConnection, new: &[NewPlayerImage]) -> QueryResult<usize> {
    if new.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(player_images::table)
        .values(new)
        .execute(conn)
}

pub fn insert_team_images(conn: &mut PgConnection, new: &[NewTeamImage]) -> QueryResult<usize> {
    if new.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(team_images::table)
        .values(new)
        .execute(conn)
}

pub fn insert_year_images(conn: &mut PgConnection, new: &[NewYearImage]) -> QueryResult<usize> {
    if new.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(year_images::table)
        .values(new)
        .execute(conn)
}

// Dependent seasons and images go with the parent through the foreign
// keys' `on delete cascade`.

pub fn delete_player(conn: &mut PgConnection, player_id: i64) -> QueryResult<usize> {
    let deleted = diesel::delete(players::table.find(player_id)).execute(conn)?;
    info!("Deleted {deleted} player(s) with id {player_id}");
    Ok(deleted)
}

pub fn delete_team(conn: &mut PgConnection, team_id: i64) -> QueryResult<usize> {
    let deleted = diesel::delete(teams::table.find(team_id)).execute(conn)?;
    info!("Deleted {deleted} team(s) with id {team_id}");
    Ok(deleted)
}

pub fn delete_year(conn: &mut PgConnection, year_id: i64) -> QueryResult<usize> {
    let deleted = diesel::delete(years::table.find(year_id)).execute(conn)?;
    info!("Deleted {deleted} year(s) with id {year_id}");
    Ok(deleted)
}
