use indexmap::IndexSet;
use tracing::debug;

use super::extractor::{
    drug_elements, primary_drug_id, ExtractionResult, Extractor, Scope,
};
use super::products::parse_product;
use super::reader::{XmlDocument, XmlElement};
use crate::drug::{Drug, DrugFields, DrugInteraction, DrugType};
use crate::product::Product;

/// Builds one [`Drug`] per top-level `<drug>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrugExtractor;

impl DrugExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_drug(element: &XmlElement) -> ExtractionResult<Drug> {
        let drug_id = primary_drug_id(element)?;
        let scope = Scope::new(element, Some(drug_id.as_str()));

        let drug_type: DrugType = scope.required_attribute("type")?.parse()?;

        let fields = DrugFields {
            drug_id: drug_id.clone(),
            name: scope.required_text("name")?,
            drug_type,
            description: scope.required_text("description")?,
            state: scope.required_text("state")?,
            indication: scope.required_text("indication")?,
            mechanism_of_action: scope.required_text("mechanism-of-action")?,
        };

        let products = Self::parse_products(scope)?;

        Ok(Drug::new(fields)
            .with_food_interactions(scope.texts("food-interactions/food-interaction"))
            .with_drug_interactions(Self::parse_interactions(scope)?)
            .with_synonyms(scope.texts("synonyms/synonym"))
            .with_groups(scope.texts("groups/group"))
            .with_products(products))
    }

    fn parse_interactions(scope: Scope<'_>) -> ExtractionResult<Vec<DrugInteraction>> {
        let mut interactions = Vec::new();

        for element in scope.element.find_all("drug-interactions/drug-interaction") {
            let inner = scope.nested(element);
            let mut interaction =
                DrugInteraction::new(inner.required_text("name")?, inner.required_text("description")?);
            if let Some(id) = inner.optional_text("drugbank-id") {
                interaction = interaction.with_drug_id(id);
            }
            interactions.push(interaction);
        }

        Ok(interactions)
    }

    fn parse_products(scope: Scope<'_>) -> ExtractionResult<IndexSet<Product>> {
        let mut products = IndexSet::new();

        for element in scope.element.find_all("products/product") {
            let product = parse_product(scope.nested(element))?;
            if !products.insert(product) {
                debug!(drug_id = scope.drug_id, "Dropped duplicate product listing");
            }
        }

        Ok(products)
    }
}

impl Extractor for DrugExtractor {
    type Output = Drug;

    fn entity(&self) -> &'static str {
        "drug"
    }

    fn extract(&self, document: &XmlDocument) -> ExtractionResult<Vec<Drug>> {
        let drugs = drug_elements(document)
            .map(Self::parse_drug)
            .collect::<ExtractionResult<Vec<_>>>()?;

        debug!(count = drugs.len(), "Extracted drugs");
        Ok(drugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::extractor::ExtractionError;
    use crate::ingest::reader::DocumentReader;

    fn extract(body: &str) -> ExtractionResult<Vec<Drug>> {
        let xml = format!(r#"<drugbank xmlns="http://www.drugbank.ca">{body}</drugbank>"#);
        let doc = DocumentReader::default().read_str(&xml).unwrap();
        DrugExtractor::new().extract(&doc)
    }

    fn drug_xml(id: &str, extra: &str) -> String {
        format!(
            r#"<drug type="small molecule">
                <drugbank-id primary="true">{id}</drugbank-id>
                <name>Drug {id}</name>
                <description>Description</description>
                <state>solid</state>
                <indication>Indication</indication>
                <mechanism-of-action>Mechanism</mechanism-of-action>
                {extra}
            </drug>"#
        )
    }

    fn product_xml(name: &str) -> String {
        format!(
            r"<product>
                <name>{name}</name>
                <labeller>Labeller</labeller>
                <ndc-product-code>0001-0001</ndc-product-code>
                <dosage-form>Tablet</dosage-form>
                <route>Oral</route>
                <strength>10 mg</strength>
                <country>US</country>
                <source>FDA NDC</source>
            </product>"
        )
    }

    #[test]
    fn test_scalar_fields() {
        let drugs = extract(&drug_xml("DB0001", "")).unwrap();

        assert_eq!(drugs.len(), 1);
        let drug = &drugs[0];
        assert_eq!(drug.drug_id, "DB0001");
        assert_eq!(drug.name, "Drug DB0001");
        assert_eq!(drug.drug_type, DrugType::SmallMolecule);
        assert_eq!(drug.state, "solid");
        assert_eq!(drug.mechanism_of_action, "Mechanism");
    }

    #[test]
    fn test_absent_groups_become_placeholder() {
        let drug = &extract(&drug_xml("DB0001", "")).unwrap()[0];

        assert_eq!(drug.food_interactions, vec!["None"]);
        assert_eq!(drug.synonyms, vec!["None"]);
        assert_eq!(drug.groups, vec!["None"]);
        assert!(drug.drug_interactions.is_empty());
    }

    #[test]
    fn test_repeated_groups_collected() {
        let extra = r"
            <food-interactions><food-interaction>Take with food.</food-interaction></food-interactions>
            <synonyms><synonym>Alpha</synonym><synonym>Beta</synonym></synonyms>
            <groups><group>approved</group><group>investigational</group></groups>";
        let drug = &extract(&drug_xml("DB0001", extra)).unwrap()[0];

        assert_eq!(drug.food_interactions, vec!["Take with food."]);
        assert_eq!(drug.synonyms, vec!["Alpha", "Beta"]);
        assert_eq!(drug.groups, vec!["approved", "investigational"]);
    }

    #[test]
    fn test_interactions_scoped_per_drug() {
        let interactions = r"<drug-interactions>
            <drug-interaction><drugbank-id>DB0009</drugbank-id><name>Warfarin</name><description>Bleeding risk.</description></drug-interaction>
            <drug-interaction><name>Warfarin</name><description>Second mechanism.</description></drug-interaction>
        </drug-interactions>";
        let body = format!("{}{}", drug_xml("DB0001", interactions), drug_xml("DB0002", ""));
        let drugs = extract(&body).unwrap();

        assert_eq!(drugs[0].drug_interactions.len(), 2);
        assert_eq!(drugs[0].drug_interactions[0].drug_id.as_deref(), Some("DB0009"));
        assert_eq!(drugs[0].drug_interactions[1].description, "Second mechanism.");
        assert!(drugs[1].drug_interactions.is_empty());
    }

    #[test]
    fn test_products_deduplicated_not_overwritten() {
        let products = format!(
            "<products>{}{}{}</products>",
            product_xml("First"),
            product_xml("Second"),
            product_xml("First")
        );
        let drug = &extract(&drug_xml("DB0001", &products)).unwrap()[0];

        let names: Vec<_> = drug.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_missing_scalar_aborts() {
        let body = r#"<drug type="biotech">
            <drugbank-id primary="true">DB0001</drugbank-id>
            <name>Broken</name>
        </drug>"#;
        let err = extract(body).unwrap_err();

        match err {
            ExtractionError::MissingRequiredField { field, drug_id, .. } => {
                assert_eq!(field, "description");
                assert_eq!(drug_id.as_deref(), Some("DB0001"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let body = drug_xml("DB0001", "").replace("small molecule", "peptide");
        let err = extract(&body).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidValue { .. }));
    }

    #[test]
    fn test_idempotent() {
        let body = format!("{}{}", drug_xml("DB0001", ""), drug_xml("DB0002", ""));
        let xml = format!(r#"<drugbank xmlns="http://www.drugbank.ca">{body}</drugbank>"#);
        let doc = DocumentReader::default().read_str(&xml).unwrap();
        let extractor = DrugExtractor::new();

        assert_eq!(extractor.extract(&doc).unwrap(), extractor.extract(&doc).unwrap());
    }
}
