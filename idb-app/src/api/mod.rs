mod players;
mod teams;
mod years;

#[rocket::get("/")]
pub async fn index() -> &'static str {
    "This is the baseball database API. Players, teams and years live under \
    /api/players, /api/teams and /api/years; add ?q=... to search."
}

pub fn routes() -> Vec<rocket::Route> {
    rocket::routes![
        index,
        players::players,
        players::player,
        players::player_years,
        players::player_year,
        teams::teams,
        teams::team,
        teams::team_years,
        teams::team_year,
        years::years,
        years::year,
    ]
}
