use serde::{Deserialize, Serialize};

/// A marketed product. Identity is the full attribute tuple, so identical
/// listings collapse when collected into a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub producer: String,
    pub ndc: String,
    pub form: String,
    pub application: String,
    pub dosage: String,
    pub country: String,
    pub agency: String,
}

/// One `<product>` element together with the drug that lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    pub drug_id: String,
    #[serde(flatten)]
    pub product: Product,
}

impl ProductListing {
    #[must_use]
    pub fn new(drug_id: String, product: Product) -> Self {
        Self { drug_id, product }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ToRecord;
    use std::collections::HashSet;

    fn product(name: &str) -> Product {
        Product {
            name: name.into(),
            producer: "Producer A".into(),
            ndc: "12345-678".into(),
            form: "Tablet".into(),
            application: "Oral".into(),
            dosage: "10 mg".into(),
            country: "US".into(),
            agency: "FDA".into(),
        }
    }

    #[test]
    fn test_identical_products_collapse() {
        let set: HashSet<Product> = [product("A"), product("A"), product("B")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_record_round_trip() {
        let original = product("Product A");
        let record = original.to_record().unwrap();

        assert_eq!(record["name"], "Product A");
        assert_eq!(record["producer"], "Producer A");
        assert_eq!(record["ndc"], "12345-678");
        assert_eq!(record["form"], "Tablet");
        assert_eq!(record["application"], "Oral");
        assert_eq!(record["dosage"], "10 mg");
        assert_eq!(record["country"], "US");
        assert_eq!(record["agency"], "FDA");

        let back: Product = serde_json::from_value(serde_json::Value::Object(record)).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_listing_record_is_flat() {
        let listing = ProductListing::new("DB00001".into(), product("A"));
        let record = listing.to_record().unwrap();

        assert_eq!(record["drug_id"], "DB00001");
        assert_eq!(record["name"], "A");
        assert_eq!(record.len(), 9);
    }
}
