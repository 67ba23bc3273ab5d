use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ExtractionConfig;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed document at byte {position}: {message}")]
    MalformedDocument { position: u64, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            position,
            message: message.into(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// An element of the parsed document. Children are matched by local name
/// within the element's own namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn open(start: &BytesStart<'_>, namespace: Option<String>) -> Result<Self, String> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let local = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            attributes.push((local, value.into_owned()));
        }

        Ok(Self {
            name,
            namespace,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct character content, whitespace-trimmed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    /// Children with the given local name. The iterator borrows only `self`.
    pub fn children_named(&self, name: &str) -> impl Iterator<Item = &Self> + '_ {
        let name = name.to_owned();
        self.children
            .iter()
            .filter(move |child| child.name == name && child.namespace == self.namespace)
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children_named(name).next()
    }

    /// First element reached by a `/`-separated path of local names.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Self> {
        self.find_all(path).into_iter().next()
    }

    /// Every element reached by a `/`-separated path, in document order.
    #[must_use]
    pub fn find_all(&self, path: &str) -> Vec<&Self> {
        let mut current = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|el| el.children_named(step))
                .collect();
        }
        current
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// A fully parsed, read-only document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    #[must_use]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// The namespace shared by the document's elements.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.root.namespace()
    }

    /// Top-level elements with the given local name, in document order.
    pub fn elements(&self, name: &str) -> impl Iterator<Item = &XmlElement> + '_ {
        self.root.children_named(name)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.root.count()
    }
}

/// Loads a whole document into memory. Not well-formed input yields
/// [`ParseError::MalformedDocument`]; nothing is validated beyond that.
pub struct DocumentReader {
    config: ExtractionConfig,
}

impl DocumentReader {
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Reads and parses a file, returning the raw bytes alongside the tree.
    pub fn read_file(&self, path: &Path) -> ParseResult<(XmlDocument, Vec<u8>)> {
        let start = std::time::Instant::now();
        let bytes = std::fs::read(path)?;
        let document = self.read_bytes(&bytes)?;

        info!(
            path = %path.display(),
            elements = document.element_count(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Loaded document"
        );

        Ok((document, bytes))
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> ParseResult<XmlDocument> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ParseError::malformed(e.valid_up_to() as u64, format!("invalid UTF-8: {e}"))
        })?;
        self.read_str(text)
    }

    pub fn read_str(&self, xml: &str) -> ParseResult<XmlDocument> {
        let root = parse_tree(xml)?;
        let document = XmlDocument { root };

        if document.namespace() != Some(self.config.namespace.as_str()) {
            warn!(
                expected = %self.config.namespace,
                found = document.namespace().unwrap_or("<none>"),
                "Document namespace differs from configuration"
            );
        }

        Ok(document)
    }
}

impl Default for DocumentReader {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

fn parse_tree(xml: &str) -> ParseResult<XmlElement> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = offset(&reader);
        let (namespace, event) = match reader.read_resolved_event() {
            Ok((resolved, event)) => (resolved_namespace(&resolved), event),
            Err(e) => return Err(ParseError::malformed(position, e.to_string())),
        };

        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                let namespace = namespace.map_err(|m| ParseError::malformed(position, m))?;
                if root.is_some() {
                    return Err(ParseError::malformed(position, "multiple root elements"));
                }
                let element = XmlElement::open(start, namespace)
                    .map_err(|m| ParseError::malformed(position, m))?;

                if matches!(event, Event::Start(_)) {
                    stack.push(element);
                } else {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::malformed(position, "unexpected closing tag"))?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(ref text) => {
                let content = text
                    .unescape()
                    .map_err(|e| ParseError::malformed(position, e.to_string()))?;
                append_text(&mut stack, &content, position)?;
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                append_text(&mut stack, &content, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::malformed(
            offset(&reader),
            format!("unexpected end of document: <{}> is not closed", open.name),
        ));
    }

    root.ok_or_else(|| ParseError::malformed(offset(&reader), "no root element"))
}

fn offset(reader: &NsReader<&[u8]>) -> u64 {
    reader.buffer_position().try_into().unwrap_or(u64::MAX)
}

fn resolved_namespace(resolved: &ResolveResult<'_>) -> Result<Option<String>, String> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(format!(
            "unknown namespace prefix '{}'",
            String::from_utf8_lossy(prefix)
        )),
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(stack: &mut [XmlElement], content: &str, position: u64) -> ParseResult<()> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(ParseError::malformed(position, "text outside the root element")),
    }
}
