//! Parsing and serialization of RDF graphs by media type.
//!
//! [`RdfCore`] is the entry point: it looks the codec up in a [`FormatRegistry`]
//! holding [Turtle](https://www.w3.org/TR/turtle/) and [JSON-LD](https://www.w3.org/TR/json-ld/) by default.
//!
//! ```
//! use rdfio::RdfCore;
//! use std::collections::HashMap;
//!
//! let core = RdfCore::new();
//! let graph = core.parse(
//!     "<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\"@en .",
//!     Some("text/turtle"),
//!     None,
//! )?;
//! let json = core.serialize(&graph, Some("application/ld+json"), None, &HashMap::new())?;
//! assert_eq!(core.parse(&json, None, None)?, graph);
//! # Result::<_, rdfio_api::error::RdfError>::Ok(())
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

pub mod registry;

pub use rdfio_api::error::RdfError;
pub use rdfio_api::graph::Graph;
pub use registry::FormatRegistry;

use rdfio_api::error::UnsupportedFormatError;
use rdfio_api::formatter::GraphSerializer;
use rdfio_api::parser::GraphParser;
use std::collections::HashMap;
use tracing::debug;

/// The media type used by [`RdfCore::serialize`] when none is given.
pub const DEFAULT_CONTENT_TYPE: &str = "text/turtle";

/// Parses and serializes graphs with the codecs of a [`FormatRegistry`].
#[derive(Debug, Clone)]
pub struct RdfCore {
    registry: FormatRegistry,
}

impl RdfCore {
    /// A facade over [`FormatRegistry::with_standard_formats`].
    pub fn new() -> Self {
        Self::with_registry(FormatRegistry::with_standard_formats())
    }

    pub fn with_registry(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FormatRegistry {
        &mut self.registry
    }

    /// Parses `input` with the codec registered for `content_type`.
    ///
    /// Without a content type, the syntax is guessed from the input.
    pub fn parse(
        &self,
        input: &str,
        content_type: Option<&str>,
        document_url: Option<&str>,
    ) -> Result<Graph, RdfError> {
        let codec = match content_type {
            Some(content_type) => self
                .registry
                .get(content_type)
                .ok_or_else(|| UnsupportedFormatError::new(content_type))?,
            None => self
                .registry
                .detect(input)
                .ok_or_else(|| UnsupportedFormatError::new("*/*"))?,
        };
        let graph = codec.parser().parse(input, document_url)?;
        debug!(
            content_type = codec.primary_content_type(),
            detected = content_type.is_none(),
            triples = graph.len(),
            "parsed RDF document"
        );
        Ok(graph)
    }

    /// Writes `graph` with the codec registered for `content_type`, Turtle by default.
    pub fn serialize(
        &self,
        graph: &Graph,
        content_type: Option<&str>,
        base_uri: Option<&str>,
        custom_prefixes: &HashMap<String, String>,
    ) -> Result<String, RdfError> {
        let content_type = content_type.unwrap_or(DEFAULT_CONTENT_TYPE);
        let output = self
            .registry
            .get_serializer(content_type)?
            .write(graph, base_uri, custom_prefixes)?;
        debug!(
            content_type,
            triples = graph.len(),
            bytes = output.len(),
            "serialized RDF document"
        );
        Ok(output)
    }

    pub fn get_parser(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn GraphParser>, UnsupportedFormatError> {
        self.registry.get_parser(content_type)
    }

    pub fn get_serializer(
        &self,
        content_type: &str,
    ) -> Result<Box<dyn GraphSerializer>, UnsupportedFormatError> {
        self.registry.get_serializer(content_type)
    }
}

impl Default for RdfCore {
    fn default() -> Self {
        Self::new()
    }
}
