use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

use super::auth::CredentialHandle;
use crate::error::{Error, Result};
use crate::types::{ApiErrorResponse, CreatedFile, FileId, FileKind, FileMetadata};

pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// The two Drive operations the walk needs.
///
/// Every call must complete before the next one is issued: children can only
/// be created once their parent's id has come back.
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Unconditionally creates a folder; duplicates of an existing name are allowed.
    async fn create_folder(&self, name: &str, parent: Option<&FileId>) -> Result<FileId>;

    async fn create_document(&self, name: &str, parent: &FileId) -> Result<FileId>;
}

pub struct DriveClient {
    client: reqwest::Client,
    credential: CredentialHandle,
}

impl DriveClient {
    pub fn new(client: reqwest::Client, credential: CredentialHandle) -> Self {
        Self {
            client,
            credential,
        }
    }

    async fn create_file(&self, metadata: FileMetadata) -> Result<FileId> {
        let token = self.credential.access_token()?;

        let response = self
            .client
            .post(DRIVE_FILES_URL)
            .query(&[("fields", "id")])
            .bearer_auth(token)
            .json(&metadata)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let created: CreatedFile = response.json().await?;
            Ok(FileId::new(created.id))
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(remote_error(status, &body))
        }
    }
}

#[async_trait]
impl DriveApi for DriveClient {
    async fn create_folder(&self, name: &str, parent: Option<&FileId>) -> Result<FileId> {
        self.create_file(FileMetadata::new(name, FileKind::Folder, parent))
            .await
    }

    async fn create_document(&self, name: &str, parent: &FileId) -> Result<FileId> {
        self.create_file(FileMetadata::new(name, FileKind::Document, Some(parent)))
            .await
    }
}

// Prefer the API's own message; fall back to the raw body
fn remote_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    let message = match status {
        StatusCode::UNAUTHORIZED => format!(
            "{} (the cached token may have expired; run with --clear-token to re-authorize)",
            message
        ),
        _ => message,
    };

    Error::Remote {
        status: status.as_u16(),
        message,
    }
}

/// Offline stand-in used by `--dry-run`: logs each call and hands out
/// made-up ids.
pub struct DryRunDrive {
    run_id: String,
    counter: AtomicUsize,
}

impl DryRunDrive {
    pub fn new() -> Self {
        let run_id = uuid::Uuid::new_v4().simple().to_string();
        Self {
            run_id: run_id[..8].to_string(),
            counter: AtomicUsize::new(0),
        }
    }

    fn next_id(&self, kind: FileKind) -> FileId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        FileId::new(format!("dry-{}-{}-{}", self.run_id, kind, n))
    }

    pub fn calls(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Default for DryRunDrive {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriveApi for DryRunDrive {
    async fn create_folder(&self, name: &str, parent: Option<&FileId>) -> Result<FileId> {
        let id = self.next_id(FileKind::Folder);
        match parent {
            Some(parent) => info!(%id, %parent, "[dry-run] create folder '{}'", name),
            None => info!(%id, "[dry-run] create root folder '{}'", name),
        }
        Ok(id)
    }

    async fn create_document(&self, name: &str, parent: &FileId) -> Result<FileId> {
        let id = self.next_id(FileKind::Document);
        debug!(%id, %parent, "[dry-run] create document '{}'", name);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_uses_api_message() {
        let body = r#"{"error":{"code":403,"message":"The user has exceeded their Drive storage quota"}}"#;
        match remote_error(StatusCode::FORBIDDEN, body) {
            Error::Remote { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "The user has exceeded their Drive storage quota");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_remote_error_falls_back_to_body() {
        match remote_error(StatusCode::BAD_GATEWAY, "  upstream timeout\n") {
            Error::Remote { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream timeout");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_hints_at_clearing_token() {
        let body = r#"{"error":{"code":401,"message":"Invalid Credentials"}}"#;
        let err = remote_error(StatusCode::UNAUTHORIZED, body);
        assert!(err.to_string().contains("Invalid Credentials"));
        assert!(err.to_string().contains("--clear-token"));
    }

    #[tokio::test]
    async fn test_dry_run_ids_are_unique_per_call() {
        let drive = DryRunDrive::new();

        let root = drive.create_folder("root", None).await.unwrap();
        let child = drive.create_folder("child", Some(&root)).await.unwrap();
        let doc = drive.create_document("script", &child).await.unwrap();

        assert_ne!(root, child);
        assert_ne!(child, doc);
        assert!(doc.as_str().contains("document"));
        assert_eq!(drive.calls(), 3);
    }
}
