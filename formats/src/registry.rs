//! Lookup of the RDF codecs by media type.

use rdfio_api::codec::RdfCodec;
use rdfio_api::error::UnsupportedFormatError;
use rdfio_api::formatter::GraphSerializer;
use rdfio_api::namespace::NamespaceMappings;
use rdfio_api::parser::GraphParser;
use rdfio_jsonld::JsonLdCodec;
use rdfio_turtle::TurtleCodec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maps media types to [`RdfCodec`]s.
///
/// Media types are matched ASCII case-insensitively and their parameters are ignored:
/// `Text/Turtle; charset=utf-8` finds the Turtle codec.
///
/// ```
/// use rdfio::registry::FormatRegistry;
///
/// let registry = FormatRegistry::with_standard_formats();
/// assert_eq!(
///     registry.get("Text/Turtle; charset=utf-8").map(|c| c.primary_content_type()),
///     Some("text/turtle")
/// );
/// assert!(registry.get("application/rdf+xml").is_none());
/// ```
#[derive(Clone, Default)]
pub struct FormatRegistry {
    by_content_type: HashMap<String, Arc<dyn RdfCodec>>,
    // registration order
    codecs: Vec<Arc<dyn RdfCodec>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with Turtle and JSON-LD using the default namespace mappings.
    pub fn with_standard_formats() -> Self {
        Self::with_namespace_mappings(NamespaceMappings::default())
    }

    /// A registry with Turtle and JSON-LD whose codecs use `mappings`.
    pub fn with_namespace_mappings(mappings: NamespaceMappings) -> Self {
        let mut registry = Self::new();
        registry.register(TurtleCodec::new(mappings.clone()));
        registry.register(JsonLdCodec::new(mappings));
        registry
    }

    /// Adds a codec for all its media types, replacing the codecs previously registered for them.
    pub fn register(&mut self, codec: impl RdfCodec + 'static) {
        let codec: Arc<dyn RdfCodec> = Arc::new(codec);
        for content_type in codec.content_types() {
            let content_type = normalize_content_type(content_type);
            if let Some(previous) = self.by_content_type.insert(content_type.clone(), codec.clone()) {
                warn!(
                    content_type = content_type.as_str(),
                    previous = previous.primary_content_type(),
                    "replacing the RDF codec registered for a content type"
                );
            }
        }
        debug!(
            content_type = codec.primary_content_type(),
            "registered RDF codec"
        );
        self.codecs.push(codec);
        // Codecs that lost all their media types are not used for detection anymore
        let by_content_type = &self.by_content_type;
        self.codecs
            .retain(|codec| by_content_type.values().any(|c| Arc::ptr_eq(c, codec)));
    }

    /// The codec registered for `content_type`.
    pub fn get(&self, content_type: &str) -> Option<&dyn RdfCodec> {
        self.by_content_type
            .get(&normalize_content_type(content_type))
            .map(Arc::as_ref)
    }

    /// The codec that recognizes `input`. Codecs registered last are asked first.
    pub fn detect(&self, input: &str) -> Option<&dyn RdfCodec> {
        self.codecs
            .iter()
            .rev()
            .find(|codec| codec.can_parse(input))
            .map(Arc::as_ref)
    }

    pub fn get_parser(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn GraphParser>, UnsupportedFormatError> {
        self.get(content_type)
            .map(|codec| codec.parser())
            .ok_or_else(|| UnsupportedFormatError::new(content_type))
    }

    pub fn get_serializer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn GraphSerializer>, UnsupportedFormatError> {
        self.get(content_type)
            .map(|codec| codec.serializer())
            .ok_or_else(|| UnsupportedFormatError::new(content_type))
    }

    /// The registered media types, sorted.
    pub fn content_types(&self) -> Vec<&str> {
        let mut content_types: Vec<&str> =
            self.by_content_type.keys().map(String::as_str).collect();
        content_types.sort_unstable();
        content_types
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("content_types", &self.content_types())
            .finish()
    }
}

/// `Text/Turtle; charset=utf-8` -> `text/turtle`
fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
