use thiserror::Error;

use super::reader::{XmlDocument, XmlElement};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Missing required field <{field}> in <{element}>{}", drug_suffix(.drug_id.as_deref()))]
    MissingRequiredField {
        element: String,
        field: String,
        drug_id: Option<String>,
    },
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}

fn drug_suffix(drug_id: Option<&str>) -> String {
    drug_id.map(|id| format!(" (drug {id})")).unwrap_or_default()
}

impl From<crate::Error> for ExtractionError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::InvalidDrugType(value) => Self::InvalidValue {
                field: "type".into(),
                value,
            },
            crate::Error::UnparsableNumericField { field, value } => Self::InvalidValue {
                field: field.into(),
                value,
            },
            crate::Error::Serialization(e) => Self::InvalidValue {
                field: "record".into(),
                value: e.to_string(),
            },
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Converts a parsed document into an ordered sequence of one entity type.
/// Implementations hold no state between calls; each call re-walks the tree.
pub trait Extractor: Send + Sync {
    type Output;

    fn entity(&self) -> &'static str;

    fn extract(&self, document: &XmlDocument) -> ExtractionResult<Vec<Self::Output>>;
}

/// Where a field lookup happens, for error messages.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub element: &'a XmlElement,
    pub drug_id: Option<&'a str>,
}

impl<'a> Scope<'a> {
    #[must_use]
    pub fn new(element: &'a XmlElement, drug_id: Option<&'a str>) -> Self {
        Self { element, drug_id }
    }

    #[must_use]
    pub fn nested(&self, element: &'a XmlElement) -> Self {
        Self {
            element,
            drug_id: self.drug_id,
        }
    }

    fn missing(&self, field: &str) -> ExtractionError {
        ExtractionError::MissingRequiredField {
            element: self.element.name().to_string(),
            field: field.to_string(),
            drug_id: self.drug_id.map(String::from),
        }
    }

    pub fn required_text(&self, field: &str) -> ExtractionResult<String> {
        self.element
            .child(field)
            .map(|child| child.text().to_string())
            .ok_or_else(|| self.missing(field))
    }

    pub fn required_attribute(&self, attribute: &str) -> ExtractionResult<String> {
        self.element
            .attribute(attribute)
            .map(String::from)
            .ok_or_else(|| self.missing(&format!("@{attribute}")))
    }

    #[must_use]
    pub fn optional_text(&self, field: &str) -> Option<String> {
        self.element
            .child(field)
            .map(|child| child.text().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Text of every element reached by `path`, empty entries dropped.
    #[must_use]
    pub fn texts(&self, path: &str) -> Vec<String> {
        self.element
            .find_all(path)
            .into_iter()
            .map(XmlElement::text)
            .filter(|text| !text.is_empty())
            .map(String::from)
            .collect()
    }
}

/// The `<drugbank-id primary="true">` of a drug element.
pub fn primary_drug_id(drug: &XmlElement) -> ExtractionResult<String> {
    drug.children_named("drugbank-id")
        .find(|id| id.attribute("primary") == Some("true"))
        .map(|id| id.text().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Scope::new(drug, None).missing("drugbank-id[@primary]"))
}

pub fn drug_elements(document: &XmlDocument) -> impl Iterator<Item = &XmlElement> {
    document.elements("drug")
}
