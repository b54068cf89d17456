//! The JSON document the importer reads. Teams, years and team seasons
//! are keyed by their natural keys (abbr and four-digit year), which
//! players' seasons refer back to.

use idb_db::models::{
    HittingStats, NewPlayer, NewTeam, NewYear, PitchingStats, PlayerKind, StatLine,
};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub teams: Vec<SeedTeam>,
    pub years: Vec<SeedYear>,
    pub team_seasons: Vec<SeedTeamSeason>,
    pub players: Vec<SeedPlayer>,
}

#[derive(Debug, Deserialize)]
pub struct SeedImage {
    pub image: String,
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedTeam {
    pub name: String,
    pub abbr: String,
    pub city: String,
    pub state: String,
    pub park: String,
    pub div: String,
    pub mgr: String,
    pub social: String,
    #[serde(default)]
    pub images: Vec<SeedImage>,
}

impl SeedTeam {
    pub fn as_new<'a>(&'a self, abbr: &'a str) -> NewTeam<'a> {
        NewTeam {
            name: &self.name,
            abbr,
            city: &self.city,
            state: &self.state,
            park: &self.park,
            div: &self.div,
            mgr: &self.mgr,
            social: &self.social,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeedYear {
    pub year: String,
    pub champion: String,
    #[serde(rename = "AL_MVP")]
    pub al_mvp: String,
    #[serde(rename = "NL_MVP")]
    pub nl_mvp: String,
    #[serde(rename = "NL_CY")]
    pub nl_cy: String,
    #[serde(rename = "AL_CY")]
    pub al_cy: String,
    #[serde(default)]
    pub images: Vec<SeedImage>,
}

impl SeedYear {
    pub fn as_new(&self) -> NewYear<'_> {
        NewYear {
            year: &self.year,
            champion: &self.champion,
            al_mvp: &self.al_mvp,
            nl_mvp: &self.nl_mvp,
            nl_cy: &self.nl_cy,
            al_cy: &self.al_cy,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SeedTeamSeason {
    pub team: String,
    pub year: String,
    pub wins: i32,
    pub losses: i32,
    pub standing: i32,
    pub playoffs: String,
    pub attend: i32,
    pub payroll: i64,
}

#[derive(Debug, Deserialize)]
pub struct SeedPlayer {
    pub name: String,
    pub number: i32,
    pub position: String,
    pub bats: String,
    pub throws: String,
    pub height: i32,
    pub weight: i32,
    pub school: String,
    pub social: String,
    #[serde(default)]
    pub images: Vec<SeedImage>,
    #[serde(default)]
    pub seasons: Vec<SeedPlayerSeason>,
}

impl SeedPlayer {
    pub fn as_new(&self) -> NewPlayer<'_> {
        NewPlayer {
            name: &self.name,
            number: self.number,
            position: &self.position,
            bats: &self.bats,
            throws: &self.throws,
            height: self.height,
            weight: self.weight,
            school: &self.school,
            social: &self.social,
        }
    }
}

/// Both stat groups are read whatever the `kind`, and keys that belong to
/// neither land in `unknown`, so nothing in the document is dropped
/// unseen. See [`SeedPlayerSeason::unexpected_stats`].
#[derive(Debug, Deserialize)]
pub struct SeedPlayerSeason {
    pub team: String,
    pub year: String,
    pub games: i32,
    pub kind: PlayerKind,
    #[serde(flatten)]
    pub hitting: HittingStats,
    #[serde(flatten)]
    pub pitching: PitchingStats,
    // Must stay last: it only sees keys the groups above didn't take
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

fn present(fields: &[(&'static str, bool)]) -> impl Iterator<Item = String> {
    fields
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name.to_string())
}

impl SeedPlayerSeason {
    pub fn stats(&self) -> StatLine {
        match self.kind {
            PlayerKind::Hitter => StatLine::Hitter(self.hitting.clone()),
            PlayerKind::Pitcher => StatLine::Pitcher(self.pitching.clone()),
        }
    }

    /// Non-null stats from the group `kind` doesn't select, then any key
    /// that isn't a stat at all.
    pub fn unexpected_stats(&self) -> Vec<String> {
        let h = &self.hitting;
        let p = &self.pitching;
        let other = match self.kind {
            PlayerKind::Hitter => present(&[
                ("w", p.w.is_some()),
                ("l", p.l.is_some()),
                ("era", p.era.is_some()),
                ("gs", p.gs.is_some()),
                ("s", p.s.is_some()),
                ("ip", p.ip.is_some()),
                ("whip", p.whip.is_some()),
            ])
            .collect::<Vec<_>>(),
            PlayerKind::Pitcher => present(&[
                ("pa", h.pa.is_some()),
                ("avg", h.avg.is_some()),
                ("obp", h.obp.is_some()),
                ("slg", h.slg.is_some()),
                ("hr", h.hr.is_some()),
                ("rbi", h.rbi.is_some()),
            ])
            .collect(),
        };

        other.into_iter().chain(self.unknown.keys().cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idb_db::models::{HittingStats, PitchingStats};

    const SEED: &str = r#"{
        "teams": [{
            "name": "Rangers", "abbr": "tex", "city": "Arlington", "state": "TX",
            "park": "Globe Life Park", "div": "AL West", "mgr": "Ron Washington",
            "social": "@Rangers",
            "images": [{"image": "https://example.com/tex.png", "kind": "logo"}]
        }],
        "years": [{
            "year": "2011", "champion": "Cardinals", "AL_MVP": "Justin Verlander",
            "NL_MVP": "Ryan Braun", "NL_CY": "Clayton Kershaw", "AL_CY": "Justin Verlander"
        }],
        "team_seasons": [{
            "team": "TEX", "year": "2011", "wins": 96, "losses": 66, "standing": 1,
            "playoffs": "Lost World Series", "attend": 2946949, "payroll": 92299264
        }],
        "players": [{
            "name": "Elvis Andrus", "number": 1, "position": "SS", "bats": "R",
            "throws": "R", "height": 72, "weight": 200, "school": "None",
            "social": "@ElvisAndrus",
            "seasons": [
                {"team": "TEX", "year": "2011", "games": 150, "kind": "hitter",
                 "pa": 665, "avg": 0.279, "hr": 5}
            ]
        }, {
            "name": "C.J. Wilson", "number": 36, "position": "P", "bats": "L",
            "throws": "L", "height": 73, "weight": 210, "school": "Loyola Marymount",
            "social": "@str8edgeracer",
            "seasons": [
                {"team": "TEX", "year": "2011", "games": 34, "kind": "pitcher",
                 "w": 16, "l": 7, "era": 2.94}
            ]
        }]
    }"#;

    #[test]
    fn parses_full_seed() {
        let seed: Seed = serde_json::from_str(SEED).unwrap();

        assert_eq!(seed.teams.len(), 1);
        assert_eq!(seed.teams[0].images.len(), 1);
        assert_eq!(seed.years[0].al_mvp, "Justin Verlander");
        assert_eq!(seed.team_seasons[0].payroll, 92299264);
        assert!(seed.years[0].images.is_empty());
    }

    #[test]
    fn seasons_are_tagged_by_kind() {
        let seed: Seed = serde_json::from_str(SEED).unwrap();

        assert_eq!(
            seed.players[0].seasons[0].stats(),
            StatLine::Hitter(HittingStats {
                pa: Some(665),
                avg: Some(0.279),
                hr: Some(5),
                ..Default::default()
            })
        );
        assert_eq!(
            seed.players[1].seasons[0].stats(),
            StatLine::Pitcher(PitchingStats {
                w: Some(16),
                l: Some(7),
                era: Some(2.94),
                ..Default::default()
            })
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed: Seed = serde_json::from_str(r#"{"teams": []}"#).unwrap();
        assert!(seed.years.is_empty() && seed.team_seasons.is_empty() && seed.players.is_empty());
    }

    #[test]
    fn clean_seed_has_no_unexpected_stats() {
        let seed: Seed = serde_json::from_str(SEED).unwrap();
        for player in &seed.players {
            assert!(player.seasons[0].unexpected_stats().is_empty(), "{}", player.name);
        }
    }

    #[test]
    fn stray_and_misspelled_stats_are_kept() {
        let season: SeedPlayerSeason = serde_json::from_str(
            r#"{"team": "TEX", "year": "2011", "games": 1, "kind": "hitter",
                "pa": 10, "era": 2.94, "w": 16, "hrs": 40}"#,
        )
        .unwrap();

        assert_eq!(
            season.stats(),
            StatLine::Hitter(HittingStats { pa: Some(10), ..Default::default() })
        );
        assert_eq!(season.unexpected_stats(), ["w", "era", "hrs"]);
    }

    #[test]
    fn null_stats_from_the_other_group_are_fine() {
        let season: SeedPlayerSeason = serde_json::from_str(
            r#"{"team": "TEX", "year": "2011", "games": 1, "kind": "pitcher",
                "w": 3, "pa": null}"#,
        )
        .unwrap();
        assert!(season.unexpected_stats().is_empty());
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let result = serde_json::from_str::<SeedPlayerSeason>(
            r#"{"team": "TEX", "year": "2011", "games": 1, "kind": "catcher"}"#,
        );
        assert!(result.is_err());
    }
}
