//! Interfaces for RDF formatters.

use crate::error::RdfError;
use crate::graph::Graph;
use std::collections::HashMap;

/// A serializer writing a complete [`Graph`] as a document.
pub trait GraphSerializer: Send + Sync {
    /// Writes `graph`.
    ///
    /// If `base_uri` is set, it is declared in the document and IRIs are written relative to it when possible.
    /// `custom_prefixes` maps prefixes to namespace IRIs and takes priority over the serializer's namespace mappings.
    /// Only the prefixes actually used are declared in the output.
    fn write(
        &self,
        graph: &Graph,
        base_uri: Option<&str>,
        custom_prefixes: &HashMap<String, String>,
    ) -> Result<String, RdfError>;
}
