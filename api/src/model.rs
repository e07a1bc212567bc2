//! Data structures for [RDF 1.1 Concepts](https://www.w3.org/TR/rdf11-concepts/) like IRI, literal or triples.
//!
//! All the types own their data and are cheap to compare and hash.
//! The default string formatters return an N-Triples compatible representation.

use crate::error::ValidationError;
use crate::vocab::{rdf, xsd};
use oxilangtag::LanguageTag;
use oxiri::IriRef;
use std::borrow::Cow;
use std::fmt;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// Relative IRI references are accepted: they are what a parser returns when a document
/// without base IRI uses them.
///
/// ```
/// use rdfio_api::model::IriTerm;
///
/// let iri = IriTerm::new("http://example.com/foo")?;
/// assert_eq!("<http://example.com/foo>", iri.to_string());
/// assert_eq!(iri, IriTerm::prevalidated("http://example.com/foo"));
/// # Result::<_, rdfio_api::error::ValidationError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct IriTerm {
    iri: Cow<'static, str>,
}

impl IriTerm {
    /// Validates `iri` and builds the term.
    ///
    /// Fails on the empty string and on anything that is not an
    /// [RFC 3987](https://www.ietf.org/rfc/rfc3987) IRI reference (whitespace, control characters, bad escapes...).
    pub fn new(iri: impl Into<String>) -> Result<Self, ValidationError> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(ValidationError::new("an IRI cannot be empty"));
        }
        if let Some(c) = iri.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::new(format!(
                "the IRI '{}' contains the forbidden character {:?}",
                iri, c
            )));
        }
        IriRef::parse(iri.as_str()).map_err(|error| {
            ValidationError::new(format!("invalid IRI '{}': {}", iri, error))
        })?;
        Ok(Self { iri: iri.into() })
    }

    /// Builds the term from a compile-time constant without any check.
    ///
    /// Only meant for vocabulary tables: the caller guarantees that `iri` is a valid IRI.
    pub const fn prevalidated(iri: &'static str) -> Self {
        Self {
            iri: Cow::Borrowed(iri),
        }
    }

    /// Builds the term from an IRI that was already validated, e.g. by a parser resolving it against a base.
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self {
            iri: Cow::Owned(iri.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.iri
    }

    pub fn into_string(self) -> String {
        self.iri.into_owned()
    }
}

impl fmt::Display for IriTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

impl AsRef<str> for IriTerm {
    fn as_ref(&self) -> &str {
        &self.iri
    }
}

static BLANK_NODE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// A blank node is only identified by an opaque token handed out by [`BlankNodeTerm::new`].
/// Two blank nodes built by two calls are never equal.
/// Labels like `_:b0` are chosen by serializers, separately for each output document.
///
/// ```
/// use rdfio_api::model::BlankNodeTerm;
///
/// let a = BlankNodeTerm::new();
/// assert_eq!(a, a);
/// assert_ne!(a, BlankNodeTerm::new());
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct BlankNodeTerm {
    id: u64,
}

impl BlankNodeTerm {
    pub fn new() -> Self {
        Self {
            id: BLANK_NODE_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl Default for BlankNodeTerm {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNodeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:n{}", self.id)
    }
}

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// Every literal has a datatype: `xsd:string` when none is given, `rdf:langString` when it has a language tag.
/// Language tags are lowercased when the literal is built so that `"a"@EN` and `"a"@en` are the same literal.
///
/// ```
/// use rdfio_api::model::{IriTerm, LiteralTerm};
///
/// assert_eq!(
///     "\"foo\\nbar\"",
///     LiteralTerm::simple("foo\nbar").to_string()
/// );
///
/// assert_eq!(
///     "\"1999-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
///     LiteralTerm::typed("1999-01-01", IriTerm::prevalidated("http://www.w3.org/2001/XMLSchema#date")).to_string()
/// );
///
/// assert_eq!(
///     "\"foo\"@en",
///     LiteralTerm::language_tagged("foo", "EN")?.to_string()
/// );
/// # Result::<_, rdfio_api::error::ValidationError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct LiteralTerm {
    value: String,
    datatype: IriTerm,
    language: Option<String>,
}

impl LiteralTerm {
    /// Builds a literal from its lexical form and at most one of a datatype or a language tag.
    ///
    /// `rdf:langString` is the only datatype allowed together with a language tag, and it requires one.
    pub fn new(
        value: impl Into<String>,
        datatype: Option<IriTerm>,
        language: Option<&str>,
    ) -> Result<Self, ValidationError> {
        match (datatype, language) {
            (None, None) => Ok(Self::simple(value)),
            (Some(datatype), None) => {
                if datatype == rdf::LANG_STRING {
                    Err(ValidationError::new(
                        "a literal with datatype rdf:langString must have a language tag",
                    ))
                } else {
                    Ok(Self::typed(value, datatype))
                }
            }
            (Some(datatype), Some(_)) if datatype != rdf::LANG_STRING => {
                Err(ValidationError::new(format!(
                    "a literal cannot have both the datatype {} and a language tag",
                    datatype
                )))
            }
            (_, Some(language)) => Self::language_tagged(value, language),
        }
    }

    /// A literal with datatype `xsd:string`.
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: xsd::STRING,
            language: None,
        }
    }

    /// A literal with an explicit datatype.
    pub fn typed(value: impl Into<String>, datatype: IriTerm) -> Self {
        Self {
            value: value.into(),
            datatype,
            language: None,
        }
    }

    /// A [language-tagged string](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tagged-string).
    ///
    /// The tag must be a valid [BCP47](https://tools.ietf.org/html/bcp47) language tag.
    pub fn language_tagged(
        value: impl Into<String>,
        language: &str,
    ) -> Result<Self, ValidationError> {
        LanguageTag::parse(language).map_err(|error| {
            ValidationError::new(format!("invalid language tag '{}': {}", language, error))
        })?;
        Ok(Self {
            value: value.into(),
            datatype: rdf::LANG_STRING,
            language: Some(language.to_ascii_lowercase()),
        })
    }

    /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The [datatype IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-datatype-iri).
    pub fn datatype(&self) -> &IriTerm {
        &self.datatype
    }

    /// The lowercased [language tag](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tag).
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Is the datatype `xsd:string`?
    pub fn is_plain(&self) -> bool {
        self.language.is_none() && self.datatype == xsd::STRING
    }
}

impl fmt::Display for LiteralTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        escape(&self.value).try_for_each(|c| f.write_char(c))?;
        f.write_char('"')?;
        if let Some(language) = &self.language {
            write!(f, "@{}", language)
        } else if self.datatype == xsd::STRING {
            Ok(())
        } else {
            write!(f, "^^{}", self.datatype)
        }
    }
}

/// The union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri) and [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Subject {
    Iri(IriTerm),
    BlankNode(BlankNodeTerm),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Iri(node) => node.fmt(f),
            Subject::BlankNode(node) => node.fmt(f),
        }
    }
}

impl From<IriTerm> for Subject {
    fn from(node: IriTerm) -> Self {
        Subject::Iri(node)
    }
}

impl From<BlankNodeTerm> for Subject {
    fn from(node: BlankNodeTerm) -> Self {
        Subject::BlankNode(node)
    }
}

impl TryFrom<Term> for Subject {
    type Error = ValidationError;

    fn try_from(term: Term) -> Result<Self, ValidationError> {
        match term {
            Term::Iri(node) => Ok(Subject::Iri(node)),
            Term::BlankNode(node) => Ok(Subject::BlankNode(node)),
            Term::Literal(literal) => Err(ValidationError::new(format!(
                "the literal {} cannot be the subject of a triple",
                literal
            ))),
        }
    }
}

/// An RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term).
///
/// It is the union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri), [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node) and [literals](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Term {
    Iri(IriTerm),
    BlankNode(BlankNodeTerm),
    Literal(LiteralTerm),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(node) => node.fmt(f),
            Term::BlankNode(node) => node.fmt(f),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

impl From<IriTerm> for Term {
    fn from(node: IriTerm) -> Self {
        Term::Iri(node)
    }
}

impl From<BlankNodeTerm> for Term {
    fn from(node: BlankNodeTerm) -> Self {
        Term::BlankNode(node)
    }
}

impl From<LiteralTerm> for Term {
    fn from(literal: LiteralTerm) -> Self {
        Term::Literal(literal)
    }
}

impl From<Subject> for Term {
    fn from(resource: Subject) -> Self {
        match resource {
            Subject::Iri(node) => Term::Iri(node),
            Subject::BlankNode(node) => Term::BlankNode(node),
        }
    }
}

impl PartialEq<Term> for Subject {
    fn eq(&self, other: &Term) -> bool {
        match (self, other) {
            (Subject::Iri(a), Term::Iri(b)) => a == b,
            (Subject::BlankNode(a), Term::BlankNode(b)) => a == b,
            _ => false,
        }
    }
}

/// A [RDF triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple).
///
/// ```
/// use rdfio_api::model::{IriTerm, Triple};
///
/// let foo = IriTerm::prevalidated("http://example.com/foo");
/// assert_eq!(
///     "<http://example.com/foo> <http://schema.org/sameAs> <http://example.com/foo> .",
///     Triple::new(foo.clone(), IriTerm::prevalidated("http://schema.org/sameAs"), foo).to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Triple {
    pub subject: Subject,
    pub predicate: IriTerm,
    pub object: Term,
}

impl Triple {
    pub fn new(
        subject: impl Into<Subject>,
        predicate: IriTerm,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Escapes a string for use between double quotes in N-Triples and Turtle.
pub fn escape(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(EscapeRDF::new)
}

/// A customized version of EscapeDefault of the Rust standard library
struct EscapeRDF {
    state: EscapeRdfState,
}

enum EscapeRdfState {
    Done,
    Char(char),
    Backslash(char),
}

impl EscapeRDF {
    fn new(c: char) -> Self {
        Self {
            state: match c {
                '\n' => EscapeRdfState::Backslash('n'),
                '\r' => EscapeRdfState::Backslash('r'),
                '\t' => EscapeRdfState::Backslash('t'),
                '\u{8}' => EscapeRdfState::Backslash('b'),
                '\u{c}' => EscapeRdfState::Backslash('f'),
                '"' => EscapeRdfState::Backslash('"'),
                '\\' => EscapeRdfState::Backslash('\\'),
                c => EscapeRdfState::Char(c),
            },
        }
    }
}

impl Iterator for EscapeRDF {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self.state {
            EscapeRdfState::Backslash(c) => {
                self.state = EscapeRdfState::Char(c);
                Some('\\')
            }
            EscapeRdfState::Char(c) => {
                self.state = EscapeRdfState::Done;
                Some(c)
            }
            EscapeRdfState::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }

    fn count(self) -> usize {
        self.len()
    }
}

impl ExactSizeIterator for EscapeRDF {
    fn len(&self) -> usize {
        match self.state {
            EscapeRdfState::Done => 0,
            EscapeRdfState::Char(_) => 1,
            EscapeRdfState::Backslash(_) => 2,
        }
    }
}
