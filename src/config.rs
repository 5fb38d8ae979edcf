use std::path::PathBuf;

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file holding the roles, groups, users and overrides snapshot.
    pub snapshot_path: PathBuf,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let snapshot_path = std::env::var("SNAPSHOT_PATH")
            .map_err(|_| AppError::configuration("SNAPSHOT_PATH not set"))?;
        let port = std::env::var("APP_PORT")
            .map(|val| val.parse::<u16>())
            .unwrap_or(Ok(DEFAULT_PORT))
            .map_err(|_| AppError::configuration("APP_PORT must be a valid port number"))?;

        Ok(Self {
            snapshot_path: PathBuf::from(snapshot_path),
            port,
        })
    }
}

/// Load `.env` from the working directory, falling back to the crate directory.
pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}
