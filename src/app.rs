use tracing::info;

use crate::config::RunConfig;
use crate::drive_api::{obtain_credential, DriveApi, DriveClient, DryRunDrive};
use crate::error::Result;
use crate::materialize::{MaterializeReport, Materializer};

pub const SUCCESS_MESSAGE: &str = "Folder and file structure created successfully.";

/// Authenticate (unless dry-running), then create the whole tree.
pub async fn run(config: &RunConfig) -> Result<MaterializeReport> {
    // Outline problems surface before the operator is asked for anything
    let outline = config.load_outline()?;

    let drive: Box<dyn DriveApi> = if config.dry_run {
        info!("Dry run: no authentication, no Drive calls");
        Box::new(DryRunDrive::new())
    } else {
        let credential = obtain_credential(&config.credentials_path, &config.token_path).await?;
        Box::new(DriveClient::new(reqwest::Client::new(), credential))
    };

    let report = Materializer::new(drive.as_ref())
        .with_document_name(config.document_name.clone())
        .materialize(&outline)
        .await?;

    info!(
        root_id = %report.root_id,
        folders = report.folders_created,
        documents = report.documents_created,
        "Tree created"
    );

    Ok(report)
}
