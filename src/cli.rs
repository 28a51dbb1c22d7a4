use crate::config::{RunConfig, CREDENTIALS_PATH, TOKEN_PATH};
use crate::drive_api::{FileTokenStore, TokenStore};
use crate::error::Result;
use crate::materialize::DEFAULT_DOCUMENT_NAME;
use clap::Parser;
use std::path::PathBuf;

/// Create a course outline as a folder tree on Google Drive.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// OAuth client secret file (the `installed` application JSON).
    #[clap(long, value_name = "PATH", default_value = CREDENTIALS_PATH)]
    pub credentials: PathBuf,

    /// Where the access token is cached between runs.
    #[clap(long, value_name = "PATH", default_value = TOKEN_PATH)]
    pub token: PathBuf,

    /// JSON outline to create instead of the built-in course.
    #[clap(long, value_name = "PATH")]
    pub outline: Option<PathBuf>,

    /// Name of the top-level folder, overriding the outline's.
    #[clap(long, value_name = "NAME")]
    pub root_name: Option<String>,

    /// Name of the placeholder document put in every section.
    #[clap(long, value_name = "NAME", default_value = DEFAULT_DOCUMENT_NAME)]
    pub document_name: String,

    /// Walk the outline without authenticating or touching Drive.
    #[clap(long)]
    pub dry_run: bool,

    /// Delete the cached token and exit.
    #[clap(long)]
    pub clear_token: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            credentials_path: self.credentials.clone(),
            token_path: self.token.clone(),
            outline_path: self.outline.clone(),
            root_name: self.root_name.clone(),
            document_name: self.document_name.clone(),
            dry_run: self.dry_run,
        }
    }
}

pub fn handle_token_clear(token_path: &std::path::Path) -> Result<()> {
    let store = FileTokenStore::new(token_path);

    if store.clear()? {
        println!("Removed cached token {}. Exiting.", token_path.display());
    } else {
        println!("No cached token at {}. Exiting.", token_path.display());
    }
    Ok(())
}
