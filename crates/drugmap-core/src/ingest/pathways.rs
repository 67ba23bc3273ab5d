use tracing::debug;

use super::extractor::{drug_elements, primary_drug_id, ExtractionResult, Extractor, Scope};
use super::reader::{XmlDocument, XmlElement};
use crate::pathway::Pathway;

/// One [`Pathway`] per `<pathway>` element. A pathway listed under several
/// drugs is emitted once per listing; see `analysis::tables::unique_pathways`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathwayExtractor;

impl PathwayExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_pathway(scope: Scope<'_>) -> ExtractionResult<Pathway> {
        let drugs = scope
            .element
            .find_all("drugs/drug")
            .into_iter()
            .map(|drug| scope.nested(drug).required_text("drugbank-id"))
            .collect::<ExtractionResult<Vec<_>>>()?;

        Ok(Pathway::new(
            scope.required_text("smpdb-id")?,
            scope.required_text("name")?,
            scope.required_text("category")?,
        )
        .with_drugs(drugs.into_iter().filter(|id| !id.is_empty()).collect())
        .with_enzymes(scope.texts("enzymes/uniprot-id")))
    }

    fn pathway_elements(drug: &XmlElement) -> Vec<&XmlElement> {
        drug.find_all("pathways/pathway")
    }
}

impl Extractor for PathwayExtractor {
    type Output = Pathway;

    fn entity(&self) -> &'static str {
        "pathway"
    }

    fn extract(&self, document: &XmlDocument) -> ExtractionResult<Vec<Pathway>> {
        let mut pathways = Vec::new();

        for drug in drug_elements(document) {
            let elements = Self::pathway_elements(drug);
            if elements.is_empty() {
                continue;
            }

            let drug_id = primary_drug_id(drug)?;
            let scope = Scope::new(drug, Some(drug_id.as_str()));
            for element in elements {
                pathways.push(Self::parse_pathway(scope.nested(element))?);
            }
        }

        debug!(count = pathways.len(), "Extracted pathways");
        Ok(pathways)
    }
}
