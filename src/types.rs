use serde::{Deserialize, Serialize};
use std::fmt;

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// Opaque identifier the Drive API hands back for a created file or folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    Document,
}

impl FileKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            FileKind::Folder => FOLDER_MIME_TYPE,
            FileKind::Document => DOCUMENT_MIME_TYPE,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Folder => f.write_str("folder"),
            FileKind::Document => f.write_str("document"),
        }
    }
}

/// Request body for `files.create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub name: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
}

impl FileMetadata {
    pub fn new(name: &str, kind: FileKind, parent: Option<&FileId>) -> Self {
        Self {
            name: name.to_string(),
            mime_type: kind.mime_type().to_string(),
            parents: parent.map(|p| vec![p.as_str().to_string()]),
        }
    }
}

/// Response of `files.create` when requested with `fields=id`.
#[derive(Debug, Deserialize)]
pub struct CreatedFile {
    pub id: String,
}

/// Error body returned by Google APIs.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
