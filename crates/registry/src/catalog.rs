use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use showroom_types::Section;
use thiserror::Error;
use tracing::debug;

/// Registration data compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Error surfaced when registration data cannot become a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("section at position {0} has an empty name")]
    EmptySectionName(usize),
    #[error("duplicate section name '{0}'")]
    DuplicateSection(String),
    #[error("duplicate use case '{use_case}' in section '{section}'")]
    DuplicateUseCase { section: String, use_case: String },
}

/// Accepts either `{ sections: [...] }` or a bare list of sections.
#[derive(Deserialize)]
#[serde(untagged)]
enum Registration {
    Wrapped { sections: Vec<Section> },
    Bare(Vec<Section>),
}

impl From<Registration> for Vec<Section> {
    fn from(registration: Registration) -> Self {
        match registration {
            Registration::Wrapped { sections } | Registration::Bare(sections) => sections,
        }
    }
}

/// The ordered, immutable set of demo sections.
///
/// Built once at startup and shared behind an `Arc`; every surface (drawer
/// menu, section list, card grid) reads from the same instance.
#[derive(Debug, Clone, Default)]
pub struct DemoCatalog {
    sections: Vec<Section>,
    /// Lower-cased section name to the first section carrying it.
    by_lowercase_name: IndexMap<String, usize>,
}

impl DemoCatalog {
    /// Builds a catalog from in-memory sections, validating name uniqueness.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self, CatalogError> {
        let mut seen = IndexSet::with_capacity(sections.len());
        let mut by_lowercase_name = IndexMap::with_capacity(sections.len());

        for (index, section) in sections.iter().enumerate() {
            if section.name.trim().is_empty() {
                return Err(CatalogError::EmptySectionName(index));
            }
            if !seen.insert(section.name.as_str()) {
                return Err(CatalogError::DuplicateSection(section.name.clone()));
            }
            let mut use_cases = IndexSet::with_capacity(section.items.len());
            for item in &section.items {
                if !use_cases.insert(item.name.as_str()) {
                    return Err(CatalogError::DuplicateUseCase {
                        section: section.name.clone(),
                        use_case: item.name.clone(),
                    });
                }
            }
            by_lowercase_name.entry(section.name.to_lowercase()).or_insert(index);
        }

        debug!(sections = sections.len(), "built demo catalog");
        Ok(Self {
            sections,
            by_lowercase_name,
        })
    }

    /// Loads the catalog bundled with the binary.
    pub fn from_embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let registration: Registration = serde_yaml::from_str(source)?;
        Self::from_sections(registration.into())
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let registration: Registration = serde_json::from_str(source)?;
        Self::from_sections(registration.into())
    }

    /// Loads registration data from disk; `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Use-case names of a section in order; empty for an unknown index.
    pub fn use_case_names(&self, section_index: usize) -> Vec<&str> {
        self.section(section_index)
            .map(|section| section.items.iter().map(|item| item.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Split point used to lay sections out in two rows: `ceil(n / 2)`.
    pub fn midpoint(&self) -> usize {
        self.sections.len().div_ceil(2)
    }

    pub(crate) fn index_of_lowercase(&self, lowered: &str) -> Option<usize> {
        self.by_lowercase_name.get(lowered).copied()
    }
}
