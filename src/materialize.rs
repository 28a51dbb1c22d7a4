//! Depth-first walk that mirrors an [`Outline`] as folders on Drive.
//!
//! Calls are issued strictly one at a time, in declaration order: the root
//! folder, then per module its folder, then per section its folder, its
//! placeholder document and, for each subsection, a folder plus a document.
//! The first failing call aborts the walk. Whatever was created before it is
//! left in place, and a second run builds a fresh (duplicate) tree.

use tracing::{debug, info};

use crate::drive_api::DriveApi;
use crate::error::Result;
use crate::outline::{Outline, Section};
use crate::types::FileId;

pub const DEFAULT_DOCUMENT_NAME: &str = "script";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub root_id: FileId,
    pub folders_created: usize,
    pub documents_created: usize,
}

pub struct Materializer<'a, D: DriveApi + ?Sized> {
    drive: &'a D,
    document_name: String,
    folders_created: usize,
    documents_created: usize,
}

impl<'a, D: DriveApi + ?Sized> Materializer<'a, D> {
    pub fn new(drive: &'a D) -> Self {
        Self {
            drive,
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            folders_created: 0,
            documents_created: 0,
        }
    }

    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    pub async fn materialize(mut self, outline: &Outline) -> Result<MaterializeReport> {
        info!(
            root = %outline.root_name,
            folders = outline.folder_count(),
            documents = outline.document_count(),
            "Creating course tree"
        );

        let root_id = self.folder(&outline.root_name, None).await?;

        for module in &outline.modules {
            info!(module = %module.name, "Creating module");
            let module_id = self.folder(&module.name, Some(&root_id)).await?;

            for section in &module.sections {
                self.section(section, &module_id).await?;
            }
        }

        Ok(MaterializeReport {
            root_id,
            folders_created: self.folders_created,
            documents_created: self.documents_created,
        })
    }

    // The section keeps its own document even when it has subsections
    async fn section(&mut self, section: &Section, module_id: &FileId) -> Result<()> {
        let section_id = self.folder(&section.name, Some(module_id)).await?;
        self.document(&section_id).await?;

        for subsection in &section.subsections {
            let subsection_id = self.folder(&subsection.name, Some(&section_id)).await?;
            self.document(&subsection_id).await?;
        }

        Ok(())
    }

    async fn folder(&mut self, name: &str, parent: Option<&FileId>) -> Result<FileId> {
        let id = self.drive.create_folder(name, parent).await?;
        self.folders_created += 1;
        debug!(%id, parent = ?parent.map(FileId::as_str), "Created folder '{}'", name);
        Ok(id)
    }

    async fn document(&mut self, parent: &FileId) -> Result<()> {
        let id = self.drive.create_document(&self.document_name, parent).await?;
        self.documents_created += 1;
        debug!(%id, %parent, "Created document '{}'", self.document_name);
        Ok(())
    }
}

/// Convenience wrapper using the default placeholder document name.
pub async fn materialize<D: DriveApi + ?Sized>(
    drive: &D,
    outline: &Outline,
) -> Result<MaterializeReport> {
    Materializer::new(drive).materialize(outline).await
}
