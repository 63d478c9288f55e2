mod config;
pub mod events_db;

pub use config::AppConfig;
pub use events_db::EventsDb;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// 1. `COGLOAD_DATA_DIR` -- used verbatim (test isolation),
/// 2. `~/.config/cogload-dev/` when `COGLOAD_ENV=dev`,
/// 3. `~/.config/cogload/` otherwise.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var("COGLOAD_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("COGLOAD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cogload-dev")
            } else {
                base_dir.join("cogload")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
