mod pages;

pub fn routes() -> Vec<rocket::Route> {
    rocket::routes![
        pages::index_page,
        pages::players_page,
        pages::player_page,
        pages::teams_page,
        pages::team_page,
        pages::team_abbr_page,
        pages::years_page,
        pages::year_page,
    ]
}
