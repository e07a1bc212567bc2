//! A pairing of a parser and a serializer for one RDF syntax.

use crate::formatter::GraphSerializer;
use crate::parser::GraphParser;

/// An RDF syntax, identified by its media types.
///
/// Codecs are stateless factories: each call to [`RdfCodec::parser`] or [`RdfCodec::serializer`]
/// returns an independent instance.
pub trait RdfCodec: Send + Sync {
    /// The media type written in `Content-Type` headers, e.g. `text/turtle`.
    fn primary_content_type(&self) -> &'static str;

    /// All the media types this codec handles, the primary one included. Lowercase, without parameters.
    fn content_types(&self) -> &'static [&'static str];

    fn parser(&self) -> Box<dyn GraphParser>;

    fn serializer(&self) -> Box<dyn GraphSerializer>;

    /// A cheap check that `input` looks like a document of this syntax.
    ///
    /// It does not validate the document: a `true` answer may still lead to a parse error.
    fn can_parse(&self, input: &str) -> bool;
}
