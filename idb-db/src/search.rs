use diesel::{PgConnection, prelude::*, sql_query, sql_types::Text};
use itertools::Itertools;
use log::debug;

use crate::models::{DbPlayer, DbTeam, DbYear};

// Every column a free-text query is matched against. Non-text columns are
// compared through their text representation.
const PLAYER_SEARCH_COLUMNS: &[&str] = &[
    "name", "number", "position", "bats", "throws", "height", "weight", "school", "social",
];
const TEAM_SEARCH_COLUMNS: &[&str] = &[
    "name", "abbr", "city", "state", "park", "div", "mgr", "social",
];
const YEAR_SEARCH_COLUMNS: &[&str] = &["year", "champion", "al_mvp", "nl_mvp", "nl_cy", "al_cy"];

/// Turns `query` into an ILIKE pattern matching any value that contains it.
/// LIKE metacharacters in the query match literally.
pub fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn search_sql(table: &str, columns: &[&str]) -> String {
    let predicate = columns
        .iter()
        .map(|column| format!("cast({column} as text) ilike $1"))
        .join(" or ");

    format!("select * from {table} where {predicate}")
}

pub fn search_players(conn: &mut PgConnection, query: &str) -> QueryResult<Vec<DbPlayer>> {
    debug!("Searching players for {query:?}");
    sql_query(search_sql("players", PLAYER_SEARCH_COLUMNS))
        .bind::<Text, _>(contains_pattern(query))
        .load(conn)
}

pub fn search_teams(conn: &mut PgConnection, query: &str) -> QueryResult<Vec<DbTeam>> {
    debug!("Searching teams for {query:?}");
    sql_query(search_sql("teams", TEAM_SEARCH_COLUMNS))
        .bind::<Text, _>(contains_pattern(query))
        .load(conn)
}

pub fn search_years(conn: &mut PgConnection, query: &str) -> QueryResult<Vec<DbYear>> {
    debug!("Searching years for {query:?}");
    sql_query(search_sql("years", YEAR_SEARCH_COLUMNS))
        .bind::<Text, _>(contains_pattern(query))
        .load(conn)
}
