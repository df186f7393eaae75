use directories::ProjectDirs;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "data.db";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// The text store lives next to the installed binary; fall back to the
    /// platform data dir when the executable location is unknown.
    pub fn db_path() -> Option<PathBuf> {
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        {
            Some(dir.join(DB_FILE_NAME))
        } else {
            ProjectDirs::from("", "", "keyclass")
                .map(|proj_dirs| proj_dirs.data_local_dir().join(DB_FILE_NAME))
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "keyclass").map(|pd| pd.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_is_named_data_db() {
        let path = AppDirs::db_path().unwrap();
        assert_eq!(path.file_name().unwrap(), DB_FILE_NAME);
    }
}
