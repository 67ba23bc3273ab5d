use serde::{Deserialize, Serialize};

use crate::record::{present, with_placeholder};

/// A metabolic or signalling pathway. `drugs` holds DrugBank IDs, resolved
/// against [`crate::Drug`] only when a report needs the join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathway {
    pub id: String,
    pub name: String,
    pub category: String,
    pub drugs: Vec<String>,
    pub enzymes: Vec<String>,
}

impl Pathway {
    #[must_use]
    pub fn new(id: String, name: String, category: String) -> Self {
        Self {
            id,
            name,
            category,
            drugs: with_placeholder(Vec::new()),
            enzymes: with_placeholder(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_drugs(mut self, drugs: Vec<String>) -> Self {
        self.drugs = with_placeholder(drugs);
        self
    }

    #[must_use]
    pub fn with_enzymes(mut self, enzymes: Vec<String>) -> Self {
        self.enzymes = with_placeholder(enzymes);
        self
    }

    pub fn drug_ids(&self) -> impl Iterator<Item = &str> {
        present(&self.drugs)
    }

    pub fn enzyme_ids(&self) -> impl Iterator<Item = &str> {
        present(&self.enzymes)
    }
}
