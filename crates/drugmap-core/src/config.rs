use serde::{Deserialize, Serialize};

pub const DEFAULT_NAMESPACE: &str = "http://www.drugbank.ca";
pub const DEFAULT_GENATLAS_RESOURCE: &str = "GenAtlas";

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Namespace the document is expected to use; a mismatch is logged, not rejected
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// External-identifier resource label selected as the GenAtlas ID
    #[serde(default = "default_genatlas_resource")]
    pub genatlas_resource: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_genatlas_resource() -> String {
    DEFAULT_GENATLAS_RESOURCE.to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            genatlas_resource: default_genatlas_resource(),
        }
    }
}

impl ExtractionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            namespace: non_empty("DRUGMAP_NAMESPACE").unwrap_or_else(default_namespace),
            genatlas_resource: non_empty("DRUGMAP_GENATLAS_RESOURCE")
                .unwrap_or_else(default_genatlas_resource),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_genatlas_resource(mut self, resource: impl Into<String>) -> Self {
        self.genatlas_resource = resource.into();
        self
    }
}
