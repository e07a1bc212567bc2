//! Implementation of a [JSON-LD](https://www.w3.org/TR/json-ld/) parser and serializer working on [`Graph`](rdfio_api::graph::Graph)s.
//!
//! Only inline contexts are supported: they map terms to IRIs and may coerce the values of a term
//! to IRIs or to a datatype.
//!
//! ```
//! use rdfio_jsonld::{JsonLdParser, JsonLdSerializer};
//! use std::collections::HashMap;
//!
//! let graph = JsonLdParser::new().parse(
//!     r#"{
//!         "@context": {"ex": "http://example.org/", "name": "http://xmlns.com/foaf/0.1/name"},
//!         "@id": "ex:alice",
//!         "name": "Alice"
//!     }"#,
//!     None,
//! )?;
//! let mut prefixes = HashMap::new();
//! prefixes.insert("ex".to_owned(), "http://example.org/".to_owned());
//! let json = JsonLdSerializer::default().write(&graph, None, &prefixes)?;
//! assert_eq!(json, r#"{
//!   "@context": {
//!     "ex": "http://example.org/",
//!     "foaf": "http://xmlns.com/foaf/0.1/"
//!   },
//!   "@id": "ex:alice",
//!   "foaf:name": "Alice"
//! }"#);
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

mod context;
mod formatter;
mod parser;

pub use formatter::JsonLdSerializer;
pub use parser::JsonLdParser;

use rdfio_api::codec::RdfCodec;
use rdfio_api::formatter::GraphSerializer;
use rdfio_api::namespace::NamespaceMappings;
use rdfio_api::parser::GraphParser;
use serde_json::Value;

/// The [JSON-LD](https://www.w3.org/TR/json-ld/) syntax, for the format registry.
#[derive(Debug, Clone, Default)]
pub struct JsonLdCodec {
    mappings: NamespaceMappings,
    compact_output: bool,
}

impl JsonLdCodec {
    /// A codec whose serializers compact IRIs with `mappings`.
    pub fn new(mappings: NamespaceMappings) -> Self {
        Self {
            mappings,
            compact_output: false,
        }
    }

    /// Serializers write single-line documents.
    pub fn compact_output(mut self) -> Self {
        self.compact_output = true;
        self
    }
}

impl RdfCodec for JsonLdCodec {
    fn primary_content_type(&self) -> &'static str {
        "application/ld+json"
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["application/ld+json", "application/json+ld"]
    }

    fn parser(&self) -> Box<dyn GraphParser> {
        Box::new(JsonLdParser::new())
    }

    fn serializer(&self) -> Box<dyn GraphSerializer> {
        let serializer = JsonLdSerializer::new(self.mappings.clone());
        Box::new(if self.compact_output {
            serializer.compact_output()
        } else {
            serializer
        })
    }

    fn can_parse(&self, input: &str) -> bool {
        let input = input.trim_start();
        // A Turtle document may also start with '[' but is not valid JSON
        input.starts_with('{')
            || (input.starts_with('[') && serde_json::from_str::<Value>(input).is_ok())
    }
}
