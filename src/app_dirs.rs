use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("vokab"),
            )
        } else {
            ProjectDirs::from("", "", "vokab").map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vokab").map(|pd| pd.config_dir().to_path_buf())
    }

    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("history.db"))
    }

    pub fn session_log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("sessions.csv"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn credentials_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("credentials.json"))
    }
}
