use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct ImportConfig {
    pub seed_path: PathBuf,
    pub run_migrations: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from("seed.json"),
            run_migrations: true,
        }
    }
}

impl ImportConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("IDB.toml"))
            .merge(Env::prefixed("IDB_"))
    }

    /// A seed path given on the command line wins over every other source.
    pub fn config(seed_path: Option<PathBuf>) -> figment::Result<Self> {
        let mut figment = Self::figment();
        if let Some(path) = seed_path {
            figment = figment.merge(("seed_path", path));
        }
        figment.extract()
    }
}
