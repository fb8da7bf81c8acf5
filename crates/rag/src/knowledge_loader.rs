//! Knowledge base loading
//!
//! The knowledge base is a versioned list of curated Q&A entries grouped by
//! category. It is read-only once loaded. A Dutch default base is embedded
//! in the binary; deployments can point `knowledge_base_path` at their own
//! YAML or JSON file with the same shape:
//!
//! ```yaml
//! version: "2024.1"
//! categories:
//!   - category: pricing
//!     entries:
//!       - id: pricing_cost
//!         question: "Wat kost het platform?"
//!         keywords: [prijs, kosten, pricing]
//!         answer: "..."
//!         related_modules: []
//!         cta: { label: "Bereken je besparing", target: "/calculator" }
//! ```

use engagement_core::{CallToAction, KnowledgeCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::RagError;

const EMBEDDED_KNOWLEDGE_BASE: &str = include_str!("../data/knowledge_base.yaml");

/// One curated question/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    /// Canonical phrasing of the question
    pub question: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub answer: String,
    pub category: KnowledgeCategory,
    /// Module ids this answer is about
    #[serde(default)]
    pub related_modules: Vec<String>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

/// Entry as written in a file; the category comes from the enclosing group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub related_modules: Vec<String>,
    #[serde(default)]
    pub cta: Option<CallToAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeGroup {
    pub category: KnowledgeCategory,
    #[serde(default)]
    pub title: Option<String>,
    pub entries: Vec<KnowledgeRecord>,
}

/// Knowledge base file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeFile {
    pub version: String,
    pub categories: Vec<KnowledgeGroup>,
}

/// Flattened, validated knowledge base
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    version: String,
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build from loose entries, rejecting duplicate ids and empty entries
    pub fn new(version: impl Into<String>, entries: Vec<KnowledgeEntry>) -> Result<Self, RagError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(RagError::Invalid(format!("duplicate entry id '{}'", entry.id)));
            }
            if entry.keywords.is_empty() && entry.question.trim().is_empty() {
                return Err(RagError::Invalid(format!(
                    "entry '{}' has neither keywords nor a question",
                    entry.id
                )));
            }
        }

        Ok(Self {
            version: version.into(),
            entries,
        })
    }

    /// The default Dutch knowledge base shipped with the crate
    pub fn embedded() -> Result<Self, RagError> {
        Self::from_yaml(EMBEDDED_KNOWLEDGE_BASE)
    }

    pub fn from_yaml(content: &str) -> Result<Self, RagError> {
        let file: KnowledgeFile =
            serde_yaml::from_str(content).map_err(|e| RagError::Parse(e.to_string()))?;
        file.try_into()
    }

    pub fn from_json(content: &str) -> Result<Self, RagError> {
        let file: KnowledgeFile =
            serde_json::from_str(content).map_err(|e| RagError::Parse(e.to_string()))?;
        file.try_into()
    }

    /// Load a YAML (`.yaml`/`.yml`) or JSON (`.json`) knowledge file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, RagError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RagError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| RagError::Io(format!("{}: {}", path.display(), e)))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let base = match extension {
            "json" => Self::from_json(&content)?,
            "yaml" | "yml" => Self::from_yaml(&content)?,
            other => {
                return Err(RagError::Parse(format!(
                    "unsupported knowledge file extension '{}'",
                    other
                )))
            },
        };

        tracing::info!(
            file = %path.display(),
            version = %base.version,
            entries = base.entries.len(),
            "Loaded knowledge base"
        );

        Ok(base)
    }

    /// Configured file if set, otherwise the embedded base
    pub fn load_or_embedded(path: Option<&str>) -> Result<Self, RagError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::embedded(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<KnowledgeFile> for KnowledgeBase {
    type Error = RagError;

    fn try_from(file: KnowledgeFile) -> Result<Self, Self::Error> {
        let entries = file
            .categories
            .into_iter()
            .flat_map(|group| {
                let category = group.category;
                group.entries.into_iter().map(move |record| KnowledgeEntry {
                    id: record.id,
                    question: record.question,
                    keywords: record.keywords,
                    answer: record.answer,
                    category,
                    related_modules: record.related_modules,
                    cta: record.cta,
                })
            })
            .collect();

        KnowledgeBase::new(file.version, entries)
    }
}
