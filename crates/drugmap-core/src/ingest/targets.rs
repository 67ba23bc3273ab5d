use tracing::debug;

use super::extractor::{drug_elements, primary_drug_id, ExtractionResult, Extractor, Scope};
use super::reader::{XmlDocument, XmlElement};
use crate::config::{ExtractionConfig, DEFAULT_GENATLAS_RESOURCE};
use crate::target::{Polypeptide, Target};

/// Builds a [`Target`] for every `<target>` that carries a `<polypeptide>`.
/// Targets without one are skipped; that is normal in DrugBank exports.
#[derive(Debug, Clone)]
pub struct TargetExtractor {
    genatlas_resource: String,
}

impl TargetExtractor {
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            genatlas_resource: config.genatlas_resource.clone(),
        }
    }

    fn parse_target(
        &self,
        element: &XmlElement,
        drug_id: &str,
    ) -> ExtractionResult<Option<Target>> {
        let scope = Scope::new(element, Some(drug_id));
        let id = scope.required_text("id")?;

        let Some(polypeptide) = element.child("polypeptide") else {
            debug!(drug_id, target_id = %id, "Skipping target without polypeptide");
            return Ok(None);
        };

        let polypeptide = self.parse_polypeptide(scope.nested(polypeptide))?;
        let name = scope.required_text("name")?;

        Ok(Some(Target::new(id, name, drug_id.to_string(), polypeptide)))
    }

    fn parse_polypeptide(&self, scope: Scope<'_>) -> ExtractionResult<Polypeptide> {
        Ok(Polypeptide {
            id: scope.required_attribute("id")?,
            source: scope.required_attribute("source")?,
            name: scope.required_text("name")?,
            gene_name: scope.required_text("gene-name")?,
            genatlas_id: self.genatlas_id(scope.element),
            chromosome_location: scope.required_text("chromosome-location")?,
            cellular_location: scope.required_text("cellular-location")?,
            molecular_weight: scope.optional_text("molecular-weight"),
        })
    }

    /// First external identifier, in document order, whose resource matches.
    fn genatlas_id(&self, polypeptide: &XmlElement) -> Option<String> {
        polypeptide
            .find_all("external-identifiers/external-identifier")
            .into_iter()
            .find(|ext| {
                ext.child("resource").map(XmlElement::text) == Some(self.genatlas_resource.as_str())
            })
            .and_then(|ext| ext.child("identifier"))
            .map(|identifier| identifier.text().to_string())
            .filter(|identifier| !identifier.is_empty())
    }
}

impl Default for TargetExtractor {
    fn default() -> Self {
        Self {
            genatlas_resource: DEFAULT_GENATLAS_RESOURCE.to_string(),
        }
    }
}

impl Extractor for TargetExtractor {
    type Output = Target;

    fn entity(&self) -> &'static str {
        "target"
    }

    fn extract(&self, document: &XmlDocument) -> ExtractionResult<Vec<Target>> {
        let mut targets = Vec::new();

        for drug in drug_elements(document) {
            let drug_id = primary_drug_id(drug)?;
            for element in drug.find_all("targets/target") {
                if let Some(target) = self.parse_target(element, &drug_id)? {
                    targets.push(target);
                }
            }
        }

        debug!(count = targets.len(), "Extracted targets");
        Ok(targets)
    }
}

/// Number of `<target>` elements in the document, with or without polypeptide.
#[must_use]
pub fn target_element_count(document: &XmlDocument) -> usize {
    drug_elements(document)
        .map(|drug| drug.find_all("targets/target").len())
        .sum()
}
