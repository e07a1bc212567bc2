//! Implementation of a [Turtle](https://www.w3.org/TR/turtle/) tokenizer, parser and serializer working on [`Graph`](rdfio_api::graph::Graph)s.
//!
//! Parse a document and write it back:
//! ```
//! use rdfio_turtle::{TurtleParser, TurtleSerializer};
//! use std::collections::HashMap;
//!
//! let graph = TurtleParser::default().parse(
//!     "@prefix ex: <http://example.org/> . ex:alice foaf:knows [ foaf:name \"Bob\" ] .",
//!     None,
//! )?;
//! let mut prefixes = HashMap::new();
//! prefixes.insert("ex".to_owned(), "http://example.org/".to_owned());
//! let turtle = TurtleSerializer::default().write(&graph, None, &prefixes)?;
//! assert_eq!(turtle, "@prefix ex: <http://example.org/> .
//! @prefix foaf: <http://xmlns.com/foaf/0.1/> .
//!
//! ex:alice foaf:knows _:b0 .
//! _:b0 foaf:name \"Bob\" .
//! ");
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

mod formatter;
pub mod lexer;
mod parser;
mod utils;

pub use formatter::TurtleSerializer;
pub use parser::TurtleParser;

use rdfio_api::codec::RdfCodec;
use rdfio_api::formatter::GraphSerializer;
use rdfio_api::namespace::NamespaceMappings;
use rdfio_api::parser::GraphParser;

/// The [Turtle](https://www.w3.org/TR/turtle/) syntax, for the format registry.
#[derive(Debug, Clone, Default)]
pub struct TurtleCodec {
    mappings: NamespaceMappings,
}

impl TurtleCodec {
    /// A codec whose parsers and serializers use `mappings`.
    pub fn new(mappings: NamespaceMappings) -> Self {
        Self { mappings }
    }
}

impl RdfCodec for TurtleCodec {
    fn primary_content_type(&self) -> &'static str {
        "text/turtle"
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["text/turtle", "application/x-turtle"]
    }

    fn parser(&self) -> Box<dyn GraphParser> {
        Box::new(TurtleParser::new(self.mappings.clone()))
    }

    fn serializer(&self) -> Box<dyn GraphSerializer> {
        Box::new(TurtleSerializer::new(self.mappings.clone()))
    }

    fn can_parse(&self, input: &str) -> bool {
        // JSON documents are the only thing starting with '{'
        !input.trim_start().starts_with('{')
    }
}
