use serde_json::{Map, Value};

use crate::models::{DbPlayer, DbTeam, DbYear};

/// A top-level entity that can be handed to clients as a flat map of its
/// fields plus a canonical `link`.
pub trait Record {
    fn link(&self) -> String;

    fn to_record(&self) -> Map<String, Value>;
}

macro_rules! record {
    ($($key:literal => $value:expr),* $(,)?) => {{
        let mut map = Map::new();
        $( map.insert($key.to_string(), Value::from($value)); )*
        map
    }};
}

impl Record for DbPlayer {
    fn link(&self) -> String {
        format!("/players/{}", self.id)
    }

    fn to_record(&self) -> Map<String, Value> {
        record! {
            "name" => self.name.as_str(),
            "number" => self.number,
            "position" => self.position.as_str(),
            "bats" => self.bats.as_str(),
            "throws" => self.throws.as_str(),
            "height" => self.height,
            "weight" => self.weight,
            "school" => self.school.as_str(),
            "social" => self.social.as_str(),
            "link" => self.link(),
        }
    }
}

impl Record for DbTeam {
    // abbr, not id
    fn link(&self) -> String {
        format!("/teams/{}", self.abbr)
    }

    fn to_record(&self) -> Map<String, Value> {
        record! {
            "name" => self.name.as_str(),
            "abbr" => self.abbr.as_str(),
            "city" => self.city.as_str(),
            "state" => self.state.as_str(),
            "park" => self.park.as_str(),
            "div" => self.div.as_str(),
            "mgr" => self.mgr.as_str(),
            "social" => self.social.as_str(),
            "link" => self.link(),
        }
    }
}

impl Record for DbYear {
    fn link(&self) -> String {
        format!("/years/{}", self.year)
    }

    fn to_record(&self) -> Map<String, Value> {
        record! {
            "year" => self.year.as_str(),
            "champion" => self.champion.as_str(),
            "AL_MVP" => self.al_mvp.as_str(),
            "NL_MVP" => self.nl_mvp.as_str(),
            "NL_CY" => self.nl_cy.as_str(),
            "AL_CY" => self.al_cy.as_str(),
            "link" => self.link(),
        }
    }
}

pub fn to_records<'a, R: Record + 'a>(items: impl IntoIterator<Item = &'a R>) -> Vec<Map<String, Value>> {
    items.into_iter().map(Record::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> DbPlayer {
        DbPlayer {
            id: 42,
            name: "Test Player".to_string(),
            number: 7,
            position: "SS".to_string(),
            bats: "R".to_string(),
            throws: "R".to_string(),
            height: 73,
            weight: 185,
            school: "Rice".to_string(),
            social: "@testplayer".to_string(),
        }
    }

    fn team() -> DbTeam {
        DbTeam {
            id: 3,
            name: "Yankees".to_string(),
            abbr: "NYY".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            park: "Yankee Stadium".to_string(),
            div: "AL East".to_string(),
            mgr: "Joe Girardi".to_string(),
            social: "@Yankees".to_string(),
        }
    }

    fn year() -> DbYear {
        DbYear {
            id: 9,
            year: "2014".to_string(),
            champion: "Giants".to_string(),
            al_mvp: "Mike Trout".to_string(),
            nl_mvp: "Clayton Kershaw".to_string(),
            nl_cy: "Clayton Kershaw".to_string(),
            al_cy: "Corey Kluber".to_string(),
        }
    }

    #[test]
    fn player_link_uses_id() {
        let record = player().to_record();
        assert_eq!(record["link"], "/players/42");
    }

    #[test]
    fn team_link_uses_abbr() {
        let record = team().to_record();
        assert_eq!(record["link"], "/teams/NYY");
    }

    #[test]
    fn year_link_uses_year() {
        let record = year().to_record();
        assert_eq!(record["link"], "/years/2014");
    }

    #[test]
    fn player_record_matches_fields() {
        let p = player();
        let record = p.to_record();

        assert_eq!(record.len(), 10);
        assert!(record.get("id").is_none());
        assert_eq!(record["name"], p.name.as_str());
        assert_eq!(record["number"], p.number);
        assert_eq!(record["position"], p.position.as_str());
        assert_eq!(record["bats"], p.bats.as_str());
        assert_eq!(record["throws"], p.throws.as_str());
        assert_eq!(record["height"], p.height);
        assert_eq!(record["weight"], p.weight);
        assert_eq!(record["school"], p.school.as_str());
        assert_eq!(record["social"], p.social.as_str());
    }

    #[test]
    fn team_record_matches_fields() {
        let t = team();
        let record = t.to_record();

        assert_eq!(record.len(), 9);
        for (key, value) in [
            ("name", &t.name),
            ("abbr", &t.abbr),
            ("city", &t.city),
            ("state", &t.state),
            ("park", &t.park),
            ("div", &t.div),
            ("mgr", &t.mgr),
            ("social", &t.social),
        ] {
            assert_eq!(record[key], value.as_str(), "field {key}");
        }
    }

    #[test]
    fn year_record_uses_award_keys() {
        let y = year();
        let record = y.to_record();

        assert_eq!(record.len(), 7);
        assert!(record.get("id").is_none());
        assert_eq!(record["year"], "2014");
        assert_eq!(record["champion"], "Giants");
        assert_eq!(record["AL_MVP"], "Mike Trout");
        assert_eq!(record["NL_MVP"], "Clayton Kershaw");
        assert_eq!(record["NL_CY"], "Clayton Kershaw");
        assert_eq!(record["AL_CY"], "Corey Kluber");
    }

    #[test]
    fn to_records_keeps_order() {
        let mut second = player();
        second.id = 43;

        let records = to_records(&[player(), second]);
        assert_eq!(records[0]["link"], "/players/42");
        assert_eq!(records[1]["link"], "/players/43");
    }
}
