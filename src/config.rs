use std::path::PathBuf;

use crate::error::Result;
use crate::materialize::DEFAULT_DOCUMENT_NAME;
use crate::outline::Outline;

pub const CREDENTIALS_PATH: &str = "credentials.json";
pub const TOKEN_PATH: &str = "token.json";

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub credentials_path: PathBuf,
    pub token_path: PathBuf,
    /// `None` selects the built-in course outline.
    pub outline_path: Option<PathBuf>,
    pub root_name: Option<String>,
    pub document_name: String,
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(CREDENTIALS_PATH),
            token_path: PathBuf::from(TOKEN_PATH),
            outline_path: None,
            root_name: None,
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            dry_run: false,
        }
    }
}

impl RunConfig {
    /// Loads the outline and applies the root name override.
    pub fn load_outline(&self) -> Result<Outline> {
        let mut outline = match &self.outline_path {
            Some(path) => Outline::from_file(path)?,
            None => Outline::builtin()?,
        };

        if let Some(root_name) = &self.root_name {
            outline.root_name = root_name.clone();
            outline.validate()?;
        }

        Ok(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults_point_at_working_directory_files() {
        let config = RunConfig::default();
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(config.token_path, PathBuf::from("token.json"));
        assert_eq!(config.document_name, "script");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_root_name_override() {
        let config = RunConfig {
            root_name: Some("NextJS course (2nd run)".to_string()),
            ..RunConfig::default()
        };

        let outline = config.load_outline().unwrap();
        assert_eq!(outline.root_name, "NextJS course (2nd run)");
        assert_eq!(outline.modules.len(), 10);
    }

    #[test]
    fn test_blank_root_name_override_is_rejected() {
        let config = RunConfig {
            root_name: Some("   ".to_string()),
            ..RunConfig::default()
        };

        assert!(matches!(config.load_outline(), Err(Error::Outline(_))));
    }

    #[test]
    fn test_outline_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outline.json");
        std::fs::write(
            &path,
            r#"{"root_name":"Rust course","modules":[{"name":"Ownership","sections":[{"name":"Borrowing"}]}]}"#,
        )
        .unwrap();

        let config = RunConfig {
            outline_path: Some(path),
            ..RunConfig::default()
        };

        let outline = config.load_outline().unwrap();
        assert_eq!(outline.root_name, "Rust course");
        assert_eq!(outline.folder_count(), 3);
    }
}
