use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::record::{is_placeholder, with_placeholder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrugType {
    #[serde(rename = "small molecule")]
    SmallMolecule,
    #[serde(rename = "biotech")]
    Biotech,
}

impl DrugType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallMolecule => "small molecule",
            Self::Biotech => "biotech",
        }
    }
}

impl std::fmt::Display for DrugType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DrugType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small molecule" => Ok(Self::SmallMolecule),
            "biotech" => Ok(Self::Biotech),
            _ => Err(crate::Error::InvalidDrugType(s.to_string())),
        }
    }
}

/// A documented interaction with another drug, referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugInteraction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_id: Option<String>,
    pub name: String,
    pub description: String,
}

impl DrugInteraction {
    #[must_use]
    pub fn new(name: String, description: String) -> Self {
        Self {
            drug_id: None,
            name,
            description,
        }
    }

    #[must_use]
    pub fn with_drug_id(mut self, drug_id: String) -> Self {
        self.drug_id = Some(drug_id);
        self
    }
}

/// One `<drug>` element. Multi-valued string groups are never empty: an absent
/// group holds the `["None"]` placeholder. Interactions and products are
/// simply empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub drug_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub drug_type: DrugType,
    pub description: String,
    pub state: String,
    pub indication: String,
    pub mechanism_of_action: String,
    pub food_interactions: Vec<String>,
    pub drug_interactions: Vec<DrugInteraction>,
    pub synonyms: Vec<String>,
    pub groups: Vec<String>,
    pub products: IndexSet<Product>,
}

/// Scalar fields of a drug; the multi-valued groups are attached with the
/// `with_*` builders on [`Drug`].
#[derive(Debug, Clone)]
pub struct DrugFields {
    pub drug_id: String,
    pub name: String,
    pub drug_type: DrugType,
    pub description: String,
    pub state: String,
    pub indication: String,
    pub mechanism_of_action: String,
}

impl Drug {
    #[must_use]
    pub fn new(fields: DrugFields) -> Self {
        Self {
            drug_id: fields.drug_id,
            name: fields.name,
            drug_type: fields.drug_type,
            description: fields.description,
            state: fields.state,
            indication: fields.indication,
            mechanism_of_action: fields.mechanism_of_action,
            food_interactions: with_placeholder(Vec::new()),
            drug_interactions: Vec::new(),
            synonyms: with_placeholder(Vec::new()),
            groups: with_placeholder(Vec::new()),
            products: IndexSet::new(),
        }
    }

    #[must_use]
    pub fn with_food_interactions(mut self, food_interactions: Vec<String>) -> Self {
        self.food_interactions = with_placeholder(food_interactions);
        self
    }

    #[must_use]
    pub fn with_drug_interactions(mut self, drug_interactions: Vec<DrugInteraction>) -> Self {
        self.drug_interactions = drug_interactions;
        self
    }

    #[must_use]
    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = with_placeholder(synonyms);
        self
    }

    #[must_use]
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = with_placeholder(groups);
        self
    }

    #[must_use]
    pub fn with_products(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        self.products = products.into_iter().collect();
        self
    }

    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        !is_placeholder(&self.groups) && self.groups.iter().any(|g| g == group)
    }

    /// Approved and not withdrawn.
    #[must_use]
    pub fn is_marketed(&self) -> bool {
        self.in_group("approved") && !self.in_group("withdrawn")
    }
}
