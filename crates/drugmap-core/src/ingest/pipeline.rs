use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::drugs::DrugExtractor;
use super::extractor::{ExtractionError, Extractor};
use super::pathways::PathwayExtractor;
use super::products::ProductExtractor;
use super::reader::{DocumentReader, ParseError, XmlDocument};
use super::targets::{target_element_count, TargetExtractor};
use crate::config::ExtractionConfig;
use crate::drug::Drug;
use crate::pathway::Pathway;
use crate::product::ProductListing;
use crate::target::Target;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

impl IngestError {
    /// Condition name reported to the user.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::MalformedDocument { .. }) => "MalformedDocument",
            Self::Parse(ParseError::Io(_)) => "Io",
            Self::Extraction(ExtractionError::MissingRequiredField { .. }) => {
                "MissingRequiredField"
            }
            Self::Extraction(ExtractionError::InvalidValue { .. }) => "InvalidValue",
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Where a catalog came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub path: Option<PathBuf>,
    pub content_hash: String,
    pub loaded_at: DateTime<Utc>,
}

impl SourceDocument {
    fn new(path: Option<PathBuf>, content: &[u8]) -> Self {
        Self {
            path,
            content_hash: compute_hash(content),
            loaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub drugs: usize,
    pub targets: usize,
    pub skipped_targets: usize,
    pub pathways: usize,
    pub products: usize,
    pub duration_ms: u64,
}

impl IngestStats {
    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.drugs + self.targets + self.pathways + self.products
    }
}

/// Every entity extracted from one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub source: SourceDocument,
    pub drugs: Vec<Drug>,
    pub targets: Vec<Target>,
    pub pathways: Vec<Pathway>,
    pub products: Vec<ProductListing>,
    pub stats: IngestStats,
}

/// Reads a document and runs the four extractors over it. Any failure aborts
/// the run; a partial catalog is never returned.
pub struct IngestPipeline {
    reader: DocumentReader,
    drugs: Box<dyn Extractor<Output = Drug>>,
    targets: Box<dyn Extractor<Output = Target>>,
    pathways: Box<dyn Extractor<Output = Pathway>>,
    products: Box<dyn Extractor<Output = ProductListing>>,
}

impl IngestPipeline {
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            targets: Box::new(TargetExtractor::new(&config)),
            reader: DocumentReader::new(config),
            drugs: Box::new(DrugExtractor::new()),
            pathways: Box::new(PathwayExtractor::new()),
            products: Box::new(ProductExtractor::new()),
        }
    }

    pub fn load_file(&self, path: &Path) -> IngestResult<Catalog> {
        let start = std::time::Instant::now();
        let (document, bytes) = self.reader.read_file(path)?;
        let source = SourceDocument::new(Some(path.to_path_buf()), &bytes);

        self.build(&document, source, start)
    }

    pub fn load_str(&self, xml: &str) -> IngestResult<Catalog> {
        let start = std::time::Instant::now();
        let document = self.reader.read_str(xml)?;
        let source = SourceDocument::new(None, xml.as_bytes());

        self.build(&document, source, start)
    }

    /// Extracts from an already parsed document.
    pub fn ingest(&self, document: &XmlDocument) -> IngestResult<Catalog> {
        let source = SourceDocument::new(None, &[]);
        self.build(document, source, std::time::Instant::now())
    }

    fn build(
        &self,
        document: &XmlDocument,
        source: SourceDocument,
        start: std::time::Instant,
    ) -> IngestResult<Catalog> {
        let drugs = self.drugs.extract(document)?;
        let targets = self.targets.extract(document)?;
        let pathways = self.pathways.extract(document)?;
        let products = self.products.extract(document)?;

        let stats = IngestStats {
            drugs: drugs.len(),
            targets: targets.len(),
            skipped_targets: target_element_count(document).saturating_sub(targets.len()),
            pathways: pathways.len(),
            products: products.len(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            path = ?source.path,
            drugs = stats.drugs,
            targets = stats.targets,
            skipped_targets = stats.skipped_targets,
            pathways = stats.pathways,
            products = stats.products,
            duration_ms = stats.duration_ms,
            "Ingest complete"
        );

        Ok(Catalog {
            source,
            drugs,
            targets,
            pathways,
            products,
            stats,
        })
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

fn compute_hash(content: &[u8]) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
