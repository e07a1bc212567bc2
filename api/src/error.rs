//! Errors raised while building terms, reading or writing RDF documents.
//!
//! Each kind of failure has its own type so that callers that only deal with one stage
//! (e.g. term construction) do not have to match on the others.
//! [`RdfError`] is the union returned by the codec traits.

use std::fmt;
use thiserror::Error;

/// A position in a text document.
///
/// Lines and columns both start at 1. Columns count Unicode scalar values, not bytes.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// A term could not be built from the given parts.
///
/// ```
/// use rdfio_api::model::IriTerm;
///
/// assert!(IriTerm::new("").is_err());
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The lexical scanner met input it cannot turn into a token.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
#[error("{message} on {position}")]
pub struct TokenizerError {
    message: String,
    position: TextPosition,
}

impl TokenizerError {
    pub fn new(message: impl Into<String>, position: TextPosition) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> TextPosition {
        self.position
    }
}

/// The document is lexically fine but violates the grammar or the RDF data model.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
#[error("{message}{}", .position.map(|p| format!(" on {}", p)).unwrap_or_default())]
pub struct ParserError {
    message: String,
    position: Option<TextPosition>,
}

impl ParserError {
    pub fn new(message: impl Into<String>, position: Option<TextPosition>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn at(message: impl Into<String>, position: TextPosition) -> Self {
        Self::new(message, Some(position))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<TextPosition> {
        self.position
    }
}

/// A graph holds data that the target syntax cannot represent.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
#[error("{message}")]
pub struct SerializationError {
    message: String,
}

impl SerializationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// No codec is registered for a content type.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
#[error("no RDF format registered for content type '{content_type}'")]
pub struct UnsupportedFormatError {
    content_type: String,
}

impl UnsupportedFormatError {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Any error returned by the parsers, serializers and the format registry.
#[derive(Eq, PartialEq, Debug, Clone, Error)]
pub enum RdfError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),
}

impl RdfError {
    /// The position in the source document, if the error comes from parsing.
    pub fn textual_position(&self) -> Option<TextPosition> {
        match self {
            RdfError::Tokenizer(e) => Some(e.position()),
            RdfError::Parser(e) => e.position(),
            _ => None,
        }
    }
}
