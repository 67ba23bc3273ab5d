mod drugs;
mod extractor;
mod pathways;
mod pipeline;
mod products;
mod reader;
mod targets;

pub use drugs::DrugExtractor;
pub use extractor::{ExtractionError, ExtractionResult, Extractor};
pub use pathways::PathwayExtractor;
pub use pipeline::{Catalog, IngestError, IngestPipeline, IngestResult, IngestStats, SourceDocument};
pub use products::ProductExtractor;
pub use reader::{DocumentReader, ParseError, ParseResult, XmlDocument, XmlElement};
pub use targets::{target_element_count, TargetExtractor};
