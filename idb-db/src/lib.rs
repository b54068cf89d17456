mod url;
mod migrations;
mod schema;
mod search;
pub mod db;
pub mod models;
pub mod record;

pub use db::QueryConvertError;
pub use migrations::{MigrationError, run_migrations, run_pending_migrations};
pub use models::ModelError;
pub use record::Record;
pub use url::*;

pub use diesel::{Connection, PgConnection};

pub type QueryError = diesel::result::Error;
