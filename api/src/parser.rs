//! Interfaces for RDF parsers.

use crate::error::RdfError;
use crate::graph::Graph;

/// A parser reading a complete document into a [`Graph`].
///
/// A parse either returns the complete graph or fails: no partial graph is ever returned.
pub trait GraphParser: Send + Sync {
    /// Parses `input`.
    ///
    /// `document_url` is the IRI the document was retrieved from.
    /// It is the default base IRI used to resolve relative IRIs.
    fn parse(&self, input: &str, document_url: Option<&str>) -> Result<Graph, RdfError>;
}
