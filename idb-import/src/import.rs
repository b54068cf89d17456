use diesel::PgConnection;
use hashbrown::{HashMap, HashSet};
use idb_db::QueryError;
use idb_db::db;
use idb_db::models::{
    NewPlayerImage, NewPlayerYear, NewTeamImage, NewTeamYear, NewYearImage, PlayerKind,
};
use itertools::Itertools;
use log::{debug, info};
use miette::Diagnostic;
use thiserror::Error;

use crate::seed::Seed;

#[derive(Debug, Error, Diagnostic)]
pub enum ImportError {
    #[error(transparent)]
    Db(#[from] QueryError),

    #[error("team abbreviation {0:?} must be three letters")]
    InvalidAbbr(String),

    #[error("year {0:?} must be four digits")]
    InvalidYear(String),

    #[error("{0} appears more than once in the seed")]
    Duplicate(String),

    #[error("{context} refers to unknown team {abbr:?}")]
    UnknownTeam { context: String, abbr: String },

    #[error("{context} refers to unknown year {year:?}")]
    UnknownYear { context: String, year: String },

    #[error("player {player:?} has a {kind} season for {team} in {year} with stats that don't belong to it: {fields}")]
    #[diagnostic(help("a season carries either hitting or pitching stats, chosen by `kind`"))]
    UnexpectedStats {
        player: String,
        team: String,
        year: String,
        kind: PlayerKind,
        fields: String,
    },

    #[error("player {player:?} played for {team} in {year}, but {team} has no {year} season")]
    #[diagnostic(help("add a team_seasons entry for {team} {year}"))]
    UnknownTeamSeason {
        player: String,
        team: String,
        year: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportCounts {
    pub teams: usize,
    pub years: usize,
    pub team_seasons: usize,
    pub players: usize,
    pub player_seasons: usize,
    pub images: usize,
}

fn normalize_abbr(abbr: &str) -> String {
    abbr.to_ascii_uppercase()
}

fn check_abbr(abbr: &str) -> Result<(), ImportError> {
    if abbr.len() == 3 && abbr.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ImportError::InvalidAbbr(abbr.to_string()))
    }
}

fn check_year(year: &str) -> Result<(), ImportError> {
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ImportError::InvalidYear(year.to_string()))
    }
}

/// Checks key formats and that every reference in the seed resolves to
/// something else in the seed, without touching the database.
pub fn validate(seed: &Seed) -> Result<(), ImportError> {
    let mut teams = HashSet::new();
    for team in &seed.teams {
        check_abbr(&team.abbr)?;
        if !teams.insert(normalize_abbr(&team.abbr)) {
            return Err(ImportError::Duplicate(format!("team {}", team.abbr)));
        }
    }

    let mut years = HashSet::new();
    for year in &seed.years {
        check_year(&year.year)?;
        if !years.insert(year.year.as_str()) {
            return Err(ImportError::Duplicate(format!("year {}", year.year)));
        }
    }

    let mut team_seasons = HashSet::new();
    for season in &seed.team_seasons {
        let team = normalize_abbr(&season.team);
        let context = format!("team season {} {}", season.team, season.year);
        if !teams.contains(&team) {
            return Err(ImportError::UnknownTeam { context, abbr: season.team.clone() });
        }
        if !years.contains(season.year.as_str()) {
            return Err(ImportError::UnknownYear { context, year: season.year.clone() });
        }
        if !team_seasons.insert((team, season.year.as_str())) {
            return Err(ImportError::Duplicate(context));
        }
    }

    for player in &seed.players {
        for season in &player.seasons {
            let team = normalize_abbr(&season.team);
            if !team_seasons.contains(&(team, season.year.as_str())) {
                return Err(ImportError::UnknownTeamSeason {
                    player: player.name.clone(),
                    team: season.team.clone(),
                    year: season.year.clone(),
                });
            }

            let fields = season.unexpected_stats();
            if !fields.is_empty() {
                return Err(ImportError::UnexpectedStats {
                    player: player.name.clone(),
                    team: season.team.clone(),
                    year: season.year.clone(),
                    kind: season.kind,
                    fields: fields.join(", "),
                });
            }
        }
    }

    Ok(())
}

/// Inserts the whole seed. Callers should run this inside a transaction so
/// a failure part way through leaves nothing behind.
pub fn import_seed(conn: &mut PgConnection, seed: &Seed) -> Result<ImportCounts, ImportError> {
    validate(seed)?;
    let mut counts = ImportCounts::default();

    let mut team_ids = HashMap::new();
    for team in &seed.teams {
        let abbr = normalize_abbr(&team.abbr);
        let team_id = db::insert_team(conn, &team.as_new(&abbr))?;
        debug!("Inserted team {abbr} as {team_id}");

        let images = team
            .images
            .iter()
            .map(|i| NewTeamImage { team_id, image: &i.image, kind: i.kind.as_deref() })
            .collect_vec();
        counts.images += db::insert_team_images(conn, &images)?;
        team_ids.insert(abbr, team_id);
    }
    counts.teams = team_ids.len();

    let mut year_ids = HashMap::new();
    for year in &seed.years {
        let year_id = db::insert_year(conn, &year.as_new())?;

        let images = year
            .images
            .iter()
            .map(|i| NewYearImage { year_id, image: &i.image, kind: i.kind.as_deref() })
            .collect_vec();
        counts.images += db::insert_year_images(conn, &images)?;
        year_ids.insert(year.year.as_str(), year_id);
    }
    counts.years = year_ids.len();

    let mut team_season_ids = HashMap::new();
    for season in &seed.team_seasons {
        let abbr = normalize_abbr(&season.team);
        let context = || format!("team season {} {}", season.team, season.year);
        let team_id = *team_ids.get(&abbr).ok_or_else(|| ImportError::UnknownTeam {
            context: context(),
            abbr: season.team.clone(),
        })?;
        let year_id = *year_ids.get(season.year.as_str()).ok_or_else(|| ImportError::UnknownYear {
            context: context(),
            year: season.year.clone(),
        })?;

        let team_year_id = db::insert_team_year(conn, &NewTeamYear {
            team_id,
            year_id,
            wins: season.wins,
            losses: season.losses,
            standing: season.standing,
            playoffs: &season.playoffs,
            attend: season.attend,
            payroll: season.payroll,
        })?;
        team_season_ids.insert((abbr, season.year.as_str()), (team_year_id, year_id));
    }
    counts.team_seasons = team_season_ids.len();

    for player in &seed.players {
        let player_id = db::insert_player(conn, &player.as_new())?;
        counts.players += 1;

        let images = player
            .images
            .iter()
            .map(|i| NewPlayerImage { player_id, image: &i.image, kind: i.kind.as_deref() })
            .collect_vec();
        counts.images += db::insert_player_images(conn, &images)?;

        for season in &player.seasons {
            let key = (normalize_abbr(&season.team), season.year.as_str());
            let &(team_year_id, year_id) =
                team_season_ids.get(&key).ok_or_else(|| ImportError::UnknownTeamSeason {
                    player: player.name.clone(),
                    team: season.team.clone(),
                    year: season.year.clone(),
                })?;

            db::insert_player_year(
                conn,
                &NewPlayerYear::new(player_id, team_year_id, year_id, season.games, &season.stats()),
            )?;
            counts.player_seasons += 1;
        }
    }

    info!(
        "Imported {} teams, {} years, {} team seasons, {} players, {} player seasons and {} images",
        counts.teams,
        counts.years,
        counts.team_seasons,
        counts.players,
        counts.player_seasons,
        counts.images,
    );

    Ok(counts)
}
