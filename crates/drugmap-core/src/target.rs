use serde::{Deserialize, Serialize};

/// A protein chain backing a [`Target`]. `(id, source)` identifies it across
/// source databases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polypeptide {
    pub id: String,
    pub source: String,
    pub name: String,
    pub gene_name: String,
    pub genatlas_id: Option<String>,
    pub chromosome_location: String,
    pub cellular_location: String,
    /// Kept as the document text; see [`Polypeptide::molecular_weight_value`].
    pub molecular_weight: Option<String>,
}

impl Polypeptide {
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.id, &self.source)
    }

    /// `Ok(None)` when no weight was recorded.
    pub fn molecular_weight_value(&self) -> crate::Result<Option<f64>> {
        let Some(raw) = self.molecular_weight.as_deref() else {
            return Ok(None);
        };

        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(crate::Error::UnparsableNumericField {
                field: "molecular_weight",
                value: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    /// DrugBank ID of the drug whose target list holds this element.
    pub drug_id: String,
    pub polypeptide: Polypeptide,
}

impl Target {
    #[must_use]
    pub fn new(id: String, name: String, drug_id: String, polypeptide: Polypeptide) -> Self {
        Self {
            id,
            name,
            drug_id,
            polypeptide,
        }
    }

    #[must_use]
    pub fn gene_name(&self) -> &str {
        &self.polypeptide.gene_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ToRecord;

    fn polypeptide(weight: Option<&str>) -> Polypeptide {
        Polypeptide {
            id: "P001".into(),
            source: "Swiss-Prot".into(),
            name: "Polypeptide A".into(),
            gene_name: "GENEA".into(),
            genatlas_id: Some("GA001".into()),
            chromosome_location: "11".into(),
            cellular_location: "Nucleus".into(),
            molecular_weight: weight.map(String::from),
        }
    }

    #[test]
    fn test_molecular_weight_parse() {
        assert_eq!(
            polypeptide(Some("50000.0")).molecular_weight_value().unwrap(),
            Some(50000.0)
        );
        assert_eq!(polypeptide(None).molecular_weight_value().unwrap(), None);
    }

    #[test]
    fn test_molecular_weight_invalid() {
        let err = polypeptide(Some("heavy")).molecular_weight_value().unwrap_err();
        assert_eq!(err.kind(), "UnparsableNumericField");

        assert!(polypeptide(Some("NaN")).molecular_weight_value().is_err());
    }

    #[test]
    fn test_target_record_nests_polypeptide() {
        let target = Target::new(
            "T001".into(),
            "Target A".into(),
            "DB0001".into(),
            polypeptide(Some("1.5")),
        );
        let record = target.to_record().unwrap();

        assert_eq!(record["id"], "T001");
        assert_eq!(record["polypeptide"]["genatlas_id"], "GA001");
        assert_eq!(record["polypeptide"]["molecular_weight"], "1.5");
        assert_eq!(target.gene_name(), "GENEA");
        assert_eq!(target.polypeptide.key(), ("P001", "Swiss-Prot"));
    }
}
