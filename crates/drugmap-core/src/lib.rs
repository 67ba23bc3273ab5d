#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod config;
pub mod drug;
pub mod error;
pub mod ingest;
pub mod pathway;
pub mod product;
pub mod record;
pub mod target;

pub use config::ExtractionConfig;
pub use drug::{Drug, DrugFields, DrugInteraction, DrugType};
pub use error::{Error, Result};
pub use ingest::{
    Catalog, DocumentReader, DrugExtractor, ExtractionError, Extractor, IngestError,
    IngestPipeline, IngestResult, IngestStats, ParseError, PathwayExtractor, ProductExtractor,
    SourceDocument, TargetExtractor, XmlDocument, XmlElement,
};
pub use pathway::Pathway;
pub use product::{Product, ProductListing};
pub use record::{Record, ToRecord, PLACEHOLDER};
pub use target::{Polypeptide, Target};
