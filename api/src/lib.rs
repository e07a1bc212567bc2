//! This crate provides the RDF data model and the interfaces shared by the RDF syntaxes.
//!
//! It is used by the [`rdfio_turtle`](https://docs.rs/rdfio_turtle/) and [`rdfio_jsonld`](https://docs.rs/rdfio_jsonld/) crates.
//!
//! ```
//! use rdfio_api::graph::Graph;
//! use rdfio_api::model::{IriTerm, LiteralTerm, Triple};
//!
//! let mut graph = Graph::new();
//! graph.insert(Triple::new(
//!     IriTerm::new("http://example.org/alice")?,
//!     IriTerm::new("http://xmlns.com/foaf/0.1/name")?,
//!     LiteralTerm::language_tagged("Alice", "en")?,
//! ));
//! assert_eq!(
//!     graph.to_string(),
//!     "<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\"@en .\n"
//! );
//! # Result::<_, rdfio_api::error::ValidationError>::Ok(())
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

pub mod codec;
pub mod compact;
pub mod error;
pub mod formatter;
pub mod graph;
pub mod model;
pub mod namespace;
pub mod parser;
pub mod vocab;
