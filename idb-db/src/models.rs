use diesel::prelude::*;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("player_years row {row_id} has unknown kind {kind:?}")]
    UnknownPlayerKind { row_id: i64, kind: String },
}

/// Static player facts. Anything that varies by season lives in
/// [`DbPlayerYear`].
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbPlayer {
    pub id: i64,
    pub name: String,
    pub number: i32,
    pub position: String,
    pub bats: String,
    pub throws: String,
    pub height: i32,
    pub weight: i32,
    pub school: String,
    pub social: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::players)]
pub struct NewPlayer<'a> {
    pub name: &'a str,
    pub number: i32,
    pub position: &'a str,
    pub bats: &'a str,
    pub throws: &'a str,
    pub height: i32,
    pub weight: i32,
    pub school: &'a str,
    pub social: &'a str,
}

/// Static team facts. `abbr` doubles as the team's public key.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbTeam {
    pub id: i64,
    pub name: String,
    pub abbr: String,
    pub city: String,
    pub state: String,
    pub park: String,
    pub div: String,
    pub mgr: String,
    pub social: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam<'a> {
    pub name: &'a str,
    pub abbr: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub park: &'a str,
    pub div: &'a str,
    pub mgr: &'a str,
    pub social: &'a str,
}

/// A season and its award winners.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::years)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbYear {
    pub id: i64,
    pub year: String,
    pub champion: String,
    pub al_mvp: String,
    pub nl_mvp: String,
    pub nl_cy: String,
    pub al_cy: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::years)]
pub struct NewYear<'a> {
    pub year: &'a str,
    pub champion: &'a str,
    pub al_mvp: &'a str,
    pub nl_mvp: &'a str,
    pub nl_cy: &'a str,
    pub al_cy: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(DbTeam, foreign_key = team_id))]
#[diesel(belongs_to(DbYear, foreign_key = year_id))]
#[diesel(table_name = crate::schema::team_years)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbTeamYear {
    pub id: i64,
    pub team_id: i64,
    pub year_id: i64,
    pub wins: i32,
    pub losses: i32,
    pub standing: i32,
    pub playoffs: String,
    pub attend: i32,
    pub payroll: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::team_years)]
pub struct NewTeamYear<'a> {
    pub team_id: i64,
    pub year_id: i64,
    pub wins: i32,
    pub losses: i32,
    pub standing: i32,
    pub playoffs: &'a str,
    pub attend: i32,
    pub payroll: i64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Hitter,
    Pitcher,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HittingStats {
    pub pa: Option<i32>,
    pub avg: Option<f64>,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    pub hr: Option<i32>,
    pub rbi: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchingStats {
    pub w: Option<i32>,
    pub l: Option<i32>,
    pub era: Option<f64>,
    pub gs: Option<i32>,
    pub s: Option<i32>,
    pub ip: Option<i32>,
    pub whip: Option<f64>,
}

/// The stat group a season carries. Serializes with a `kind` tag of
/// `hitter` or `pitcher` alongside that group's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StatLine {
    Hitter(HittingStats),
    Pitcher(PitchingStats),
}

impl StatLine {
    pub fn kind(&self) -> PlayerKind {
        match self {
            StatLine::Hitter(_) => PlayerKind::Hitter,
            StatLine::Pitcher(_) => PlayerKind::Pitcher,
        }
    }
}

/// Raw `player_years` row. Both stat groups are present as columns; use
/// [`PlayerYear`] for the typed view.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(DbPlayer, foreign_key = player_id))]
#[diesel(belongs_to(DbTeamYear, foreign_key = team_year_id))]
#[diesel(belongs_to(DbYear, foreign_key = year_id))]
#[diesel(table_name = crate::schema::player_years)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbPlayerYear {
    pub id: i64,
    pub player_id: i64,
    pub team_year_id: i64,
    pub year_id: i64,
    pub games: i32,
    pub kind: String,
    pub pa: Option<i32>,
    pub avg: Option<f64>,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    pub hr: Option<i32>,
    pub rbi: Option<i32>,
    pub w: Option<i32>,
    pub l: Option<i32>,
    pub era: Option<f64>,
    pub gs: Option<i32>,
    pub s: Option<i32>,
    pub ip: Option<i32>,
    pub whip: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerYear {
    pub id: i64,
    pub player_id: i64,
    pub team_year_id: i64,
    pub year_id: i64,
    pub games: i32,
    #[serde(flatten)]
    pub stats: StatLine,
}

impl TryFrom<DbPlayerYear> for PlayerYear {
    type Error = ModelError;

    fn try_from(row: DbPlayerYear) -> Result<Self, Self::Error> {
        let kind = PlayerKind::from_str(&row.kind).map_err(|_| ModelError::UnknownPlayerKind {
            row_id: row.id,
            kind: row.kind.clone(),
        })?;

        let stats = match kind {
            PlayerKind::Hitter => StatLine::Hitter(HittingStats {
                pa: row.pa,
                avg: row.avg,
                obp: row.obp,
                slg: row.slg,
                hr: row.hr,
                rbi: row.rbi,
            }),
            PlayerKind::Pitcher => StatLine::Pitcher(PitchingStats {
                w: row.w,
                l: row.l,
                era: row.era,
                gs: row.gs,
                s: row.s,
                ip: row.ip,
                whip: row.whip,
            }),
        };

        Ok(PlayerYear {
            id: row.id,
            player_id: row.player_id,
            team_year_id: row.team_year_id,
            year_id: row.year_id,
            games: row.games,
            stats,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::player_years)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewPlayerYear {
    pub player_id: i64,
    pub team_year_id: i64,
    pub year_id: i64,
    pub games: i32,
    pub kind: &'static str,
    pub pa: Option<i32>,
    pub avg: Option<f64>,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    pub hr: Option<i32>,
    pub rbi: Option<i32>,
    pub w: Option<i32>,
    pub l: Option<i32>,
    pub era: Option<f64>,
    pub gs: Option<i32>,
    pub s: Option<i32>,
    pub ip: Option<i32>,
    pub whip: Option<f64>,
}

impl NewPlayerYear {
    /// Only the columns of `stats`' group are filled; the other group is
    /// left null.
    pub fn new(player_id: i64, team_year_id: i64, year_id: i64, games: i32, stats: &StatLine) -> Self {
        let mut new = NewPlayerYear {
            player_id,
            team_year_id,
            year_id,
            games,
            kind: stats.kind().into(),
            pa: None,
            avg: None,
            obp: None,
            slg: None,
            hr: None,
            rbi: None,
            w: None,
            l: None,
            era: None,
            gs: None,
            s: None,
            ip: None,
            whip: None,
        };

        match stats {
            StatLine::Hitter(h) => {
                new.pa = h.pa;
                new.avg = h.avg;
                new.obp = h.obp;
                new.slg = h.slg;
                new.hr = h.hr;
                new.rbi = h.rbi;
            }
            StatLine::Pitcher(p) => {
                new.w = p.w;
                new.l = p.l;
                new.era = p.era;
                new.gs = p.gs;
                new.s = p.s;
                new.ip = p.ip;
                new.whip = p.whip;
            }
        }

        new
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(DbPlayer, foreign_key = player_id))]
#[diesel(table_name = crate::schema::player_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbPlayerImage {
    pub id: i64,
    pub player_id: i64,
    pub image: String,
    pub kind: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::player_images)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewPlayerImage<'a> {
    pub player_id: i64,
    pub image: &'a str,
    pub kind: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(DbTeam, foreign_key = team_id))]
#[diesel(table_name = crate::schema::team_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbTeamImage {
    pub id: i64,
    pub team_id: i64,
    pub image: String,
    pub kind: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::team_images)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewTeamImage<'a> {
    pub team_id: i64,
    pub image: &'a str,
    pub kind: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(DbYear, foreign_key = year_id))]
#[diesel(table_name = crate::schema::year_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DbYearImage {
    pub id: i64,
    pub year_id: i64,
    pub image: String,
    pub kind: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::year_images)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewYearImage<'a> {
    pub year_id: i64,
    pub image: &'a str,
    pub kind: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_year_row(kind: &str) -> DbPlayerYear {
        DbPlayerYear {
            id: 11,
            player_id: 1,
            team_year_id: 2,
            year_id: 3,
            games: 150,
            kind: kind.to_string(),
            pa: Some(640),
            avg: Some(0.287),
            obp: Some(0.354),
            slg: None,
            hr: Some(32),
            rbi: Some(101),
            w: None,
            l: None,
            era: None,
            gs: None,
            s: None,
            ip: None,
            whip: None,
        }
    }

    #[test]
    fn hitter_row_becomes_hitting_stats() {
        let year = PlayerYear::try_from(player_year_row("hitter")).unwrap();

        assert_eq!(year.games, 150);
        assert_eq!(
            year.stats,
            StatLine::Hitter(HittingStats {
                pa: Some(640),
                avg: Some(0.287),
                obp: Some(0.354),
                slg: None,
                hr: Some(32),
                rbi: Some(101),
            })
        );
    }

    #[test]
    fn pitcher_row_ignores_hitting_columns() {
        let mut row = player_year_row("pitcher");
        row.w = Some(18);
        row.era = Some(2.41);

        let year = PlayerYear::try_from(row).unwrap();
        assert_eq!(
            year.stats,
            StatLine::Pitcher(PitchingStats {
                w: Some(18),
                era: Some(2.41),
                ..Default::default()
            })
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = PlayerYear::try_from(player_year_row("catcher")).unwrap_err();
        let ModelError::UnknownPlayerKind { row_id, kind } = err;
        assert_eq!(row_id, 11);
        assert_eq!(kind, "catcher");
    }

    #[test]
    fn new_player_year_leaves_other_group_null() {
        let stats = StatLine::Pitcher(PitchingStats {
            w: Some(12),
            l: Some(9),
            era: Some(3.5),
            gs: Some(30),
            s: Some(0),
            ip: Some(190),
            whip: Some(1.18),
        });

        let new = NewPlayerYear::new(1, 2, 3, 31, &stats);
        assert_eq!(new.kind, "pitcher");
        assert_eq!(new.w, Some(12));
        assert_eq!(new.whip, Some(1.18));
        assert!(new.pa.is_none() && new.avg.is_none() && new.obp.is_none());
        assert!(new.slg.is_none() && new.hr.is_none() && new.rbi.is_none());
    }

    #[test]
    fn player_year_serializes_kind_tag_and_nulls() {
        let year = PlayerYear::try_from(player_year_row("hitter")).unwrap();
        let value = serde_json::to_value(&year).unwrap();

        assert_eq!(value["kind"], "hitter");
        assert_eq!(value["hr"], 32);
        assert!(value["slg"].is_null());
        assert!(value.get("era").is_none());
    }

    #[test]
    fn stat_line_deserializes_from_tagged_object() {
        let stats: StatLine = serde_json::from_str(r#"{"kind": "hitter", "hr": 40}"#).unwrap();
        assert_eq!(
            stats,
            StatLine::Hitter(HittingStats {
                hr: Some(40),
                ..Default::default()
            })
        );
    }
}
