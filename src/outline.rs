//! Outline schema: the module → section → subsection tree that gets
//! materialized as folders on Drive.
//!
//! The outline is read-only once loaded. Sibling order in the source is the
//! order in which the walk creates them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_ROOT_NAME: &str = "NextJS course";

const BUILTIN_OUTLINE: &str = include_str!("../outline/nextjs-course.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default = "default_root_name")]
    pub root_name: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub name: String,
}

fn default_root_name() -> String {
    DEFAULT_ROOT_NAME.to_string()
}

impl Outline {
    /// The course outline shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_OUTLINE)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let outline: Outline = serde_json::from_str(json)
            .map_err(|e| Error::Outline(format!("Failed to parse outline: {}", e)))?;
        outline.validate()?;
        Ok(outline)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Outline(format!("Failed to read outline {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Rejects blank names, reporting the path of the first offending node.
    pub fn validate(&self) -> Result<()> {
        if self.root_name.trim().is_empty() {
            return Err(Error::Outline("Root folder name is blank".to_string()));
        }

        for (m, module) in self.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(Error::Outline(format!("Module #{} has a blank name", m + 1)));
            }
            for (s, section) in module.sections.iter().enumerate() {
                if section.name.trim().is_empty() {
                    return Err(Error::Outline(format!(
                        "Section #{} of '{}' has a blank name",
                        s + 1,
                        module.name
                    )));
                }
                for (ss, subsection) in section.subsections.iter().enumerate() {
                    if subsection.name.trim().is_empty() {
                        return Err(Error::Outline(format!(
                            "Subsection #{} of '{}' / '{}' has a blank name",
                            ss + 1,
                            module.name,
                            section.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn section_count(&self) -> usize {
        self.modules.iter().map(|m| m.sections.len()).sum()
    }

    pub fn subsection_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| m.sections.iter())
            .map(|s| s.subsections.len())
            .sum()
    }

    /// Number of folders a full walk creates, the root included.
    pub fn folder_count(&self) -> usize {
        1 + self.modules.len() + self.section_count() + self.subsection_count()
    }

    /// Every section and every subsection gets exactly one placeholder document.
    pub fn document_count(&self) -> usize {
        self.section_count() + self.subsection_count()
    }
}
