use tracing::debug;

use super::extractor::{drug_elements, primary_drug_id, ExtractionResult, Extractor, Scope};
use super::reader::XmlDocument;
use crate::product::{Product, ProductListing};

pub(crate) fn parse_product(scope: Scope<'_>) -> ExtractionResult<Product> {
    Ok(Product {
        name: scope.required_text("name")?,
        producer: scope.required_text("labeller")?,
        ndc: scope.required_text("ndc-product-code")?,
        form: scope.required_text("dosage-form")?,
        application: scope.required_text("route")?,
        dosage: scope.required_text("strength")?,
        country: scope.required_text("country")?,
        agency: scope.required_text("source")?,
    })
}

/// One [`ProductListing`] per `<product>` element, every listing kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductExtractor;

impl ProductExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ProductExtractor {
    type Output = ProductListing;

    fn entity(&self) -> &'static str {
        "product"
    }

    fn extract(&self, document: &XmlDocument) -> ExtractionResult<Vec<ProductListing>> {
        let mut listings = Vec::new();

        for drug in drug_elements(document) {
            let drug_id = primary_drug_id(drug)?;
            let scope = Scope::new(drug, Some(drug_id.as_str()));

            for element in drug.find_all("products/product") {
                let product = parse_product(scope.nested(element))?;
                listings.push(ProductListing::new(drug_id.clone(), product));
            }
        }

        debug!(count = listings.len(), "Extracted product listings");
        Ok(listings)
    }
}
