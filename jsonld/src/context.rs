//! Processing of local `@context` definitions.
//!
//! A context maps terms to IRIs, optionally with a coercion rule for the term's string values,
//! and carries the `@base` and `@vocab` used to expand the remaining keys and values.

use oxiri::Iri;
use rdfio_api::error::ParserError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::trace;

/// How the string values of a term are read.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Coercion {
    /// `"@type": "@id"`: IRIs relative to the base, or blank node identifiers.
    Id,
    /// `"@type": "@vocab"`: like [`Coercion::Id`], terms and `@vocab` apply first.
    Vocab,
    /// Literals of the given datatype.
    Datatype(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TermDefinition {
    pub iri: String,
    pub coercion: Option<Coercion>,
}

/// The active context of a document.
#[derive(Debug, Clone, Default)]
pub struct JsonLdContext {
    document_base: Option<Iri<String>>,
    base: Option<Iri<String>>,
    vocab: Option<String>,
    terms: HashMap<String, TermDefinition>,
}

impl JsonLdContext {
    /// An empty context whose base is the document IRI.
    pub fn new(document_base: Option<Iri<String>>) -> Self {
        Self {
            base: document_base.clone(),
            document_base,
            vocab: None,
            terms: HashMap::new(),
        }
    }

    /// Applies the value of a `@context` key on top of this context.
    pub fn process(&mut self, context: &Value) -> Result<(), ParserError> {
        match context {
            Value::Null => {
                *self = Self::new(self.document_base.take());
                Ok(())
            }
            Value::Object(definitions) => self.process_definitions(definitions),
            Value::Array(contexts) => {
                for context in contexts {
                    if context.is_array() {
                        return Err(context_error("nested @context arrays are not supported"));
                    }
                    self.process(context)?;
                }
                Ok(())
            }
            Value::String(url) => Err(context_error(format!(
                "remote context '{}' cannot be loaded, only inline contexts are supported",
                url
            ))),
            _ => Err(context_error(format!("invalid @context value {}", context))),
        }
    }

    fn process_definitions(&mut self, definitions: &Map<String, Value>) -> Result<(), ParserError> {
        for key in definitions.keys() {
            if key.starts_with('@') && !matches!(key.as_str(), "@base" | "@vocab" | "@version") {
                return Err(context_error(format!(
                    "the context keyword {} is not supported",
                    key
                )));
            }
        }
        match definitions.get("@base") {
            None => (),
            Some(Value::Null) => self.base = None,
            Some(Value::String(base)) => {
                let base = self.resolve(base)?;
                trace!(base = base.as_str(), "JSON-LD @base");
                self.base = Some(base);
            }
            Some(base) => return Err(context_error(format!("invalid @base value {}", base))),
        }
        match definitions.get("@vocab") {
            None => (),
            Some(Value::Null) => self.vocab = None,
            Some(Value::String(vocab)) => {
                let vocab = if vocab.contains(':') {
                    self.expand_definition_iri(vocab, definitions, &mut Vec::new())?
                } else {
                    self.resolve(vocab)?.into_inner()
                };
                trace!(vocab = vocab.as_str(), "JSON-LD @vocab");
                self.vocab = Some(vocab);
            }
            Some(vocab) => return Err(context_error(format!("invalid @vocab value {}", vocab))),
        }

        // Definitions may refer to each other, so they are all expanded before any is added
        let mut defined = Vec::new();
        for (term, value) in definitions {
            if term.starts_with('@') {
                continue;
            }
            if value.is_null() {
                defined.push((term, None));
            } else {
                let definition = self.define(term, definitions, &mut Vec::new())?;
                trace!(term = term.as_str(), iri = definition.iri.as_str(), "JSON-LD term");
                defined.push((term, Some(definition)));
            }
        }
        for (term, definition) in defined {
            match definition {
                Some(definition) => self.terms.insert(term.clone(), definition),
                None => self.terms.remove(term),
            };
        }
        Ok(())
    }

    fn define(
        &self,
        term: &str,
        definitions: &Map<String, Value>,
        visiting: &mut Vec<String>,
    ) -> Result<TermDefinition, ParserError> {
        if term.is_empty() || term.starts_with("_:") {
            return Err(context_error(format!("'{}' cannot be defined as a term", term)));
        }
        if visiting.iter().any(|t| t == term) {
            return Err(context_error(format!(
                "the definition of the term '{}' is cyclic",
                term
            )));
        }
        visiting.push(term.to_owned());
        let (id, coercion) = match &definitions[term] {
            Value::String(id) => (Some(id.as_str()), None),
            Value::Object(definition) => {
                if let Some(key) = definition.keys().find(|k| *k != "@id" && *k != "@type") {
                    return Err(context_error(format!(
                        "{} is not supported in the definition of the term '{}'",
                        key, term
                    )));
                }
                let id = match definition.get("@id") {
                    None => None,
                    Some(Value::String(id)) => Some(id.as_str()),
                    Some(id) => {
                        return Err(context_error(format!(
                            "invalid @id {} for the term '{}'",
                            id, term
                        )))
                    }
                };
                let coercion = match definition.get("@type") {
                    None => None,
                    Some(Value::String(datatype)) => Some(match datatype.as_str() {
                        "@id" => Coercion::Id,
                        "@vocab" => Coercion::Vocab,
                        datatype => Coercion::Datatype(self.expand_definition_iri(
                            datatype,
                            definitions,
                            visiting,
                        )?),
                    }),
                    Some(datatype) => {
                        return Err(context_error(format!(
                            "invalid @type {} for the term '{}'",
                            datatype, term
                        )))
                    }
                };
                (id, coercion)
            }
            value => {
                return Err(context_error(format!(
                    "invalid definition {} for the term '{}'",
                    value, term
                )))
            }
        };
        let iri = match id {
            Some(id) if id.starts_with('@') => {
                return Err(context_error(format!(
                    "the keyword alias '{}' for {} is not supported",
                    term, id
                )))
            }
            Some(id) => self.expand_definition_iri(id, definitions, visiting)?,
            None if term.contains(':') => self.expand_definition_iri(term, definitions, visiting)?,
            None => match &self.vocab {
                Some(vocab) => format!("{}{}", vocab, term),
                None => {
                    return Err(context_error(format!(
                        "the term '{}' has no @id and there is no @vocab",
                        term
                    )))
                }
            },
        };
        visiting.pop();
        Ok(TermDefinition { iri, coercion })
    }

    /// Expands an IRI written inside the context being processed.
    fn expand_definition_iri(
        &self,
        value: &str,
        definitions: &Map<String, Value>,
        visiting: &mut Vec<String>,
    ) -> Result<String, ParserError> {
        let is_pending = |term: &str| definitions.get(term).map_or(false, |v| !v.is_null());
        if let Some((prefix, local)) = split_compact_iri(value) {
            if is_pending(prefix) {
                let prefix = self.define(prefix, definitions, visiting)?;
                return Ok(format!("{}{}", prefix.iri, local));
            }
            if let Some(prefix) = self.terms.get(prefix) {
                return Ok(format!("{}{}", prefix.iri, local));
            }
            return Ok(value.to_owned());
        }
        if value.contains(':') {
            return Ok(value.to_owned());
        }
        if is_pending(value) {
            return Ok(self.define(value, definitions, visiting)?.iri);
        }
        if let Some(definition) = self.terms.get(value) {
            return Ok(definition.iri.clone());
        }
        match &self.vocab {
            Some(vocab) => Ok(format!("{}{}", vocab, value)),
            None => Err(context_error(format!(
                "'{}' is neither an IRI nor a defined term",
                value
            ))),
        }
    }

    /// Expands a node object key to a property IRI.
    ///
    /// Tries in order: a defined term, a compact IRI whose prefix is a defined term,
    /// an absolute IRI and `@vocab`.
    pub fn expand_property(&self, key: &str) -> Option<(String, Option<&Coercion>)> {
        if let Some(definition) = self.terms.get(key) {
            return Some((definition.iri.clone(), definition.coercion.as_ref()));
        }
        if let Some((prefix, local)) = split_compact_iri(key) {
            if let Some(prefix) = self.terms.get(prefix) {
                return Some((format!("{}{}", prefix.iri, local), None));
            }
        }
        if key.starts_with("_:") {
            return None;
        }
        if is_absolute_key(key) {
            return Some((key.to_owned(), None));
        }
        self.vocab
            .as_ref()
            .map(|vocab| (format!("{}{}", vocab, key), None))
    }

    /// Expands an IRI value.
    ///
    /// `@type` values and `@vocab` coerced strings are vocabulary relative: terms and `@vocab`
    /// apply to them. Other values are only resolved against the base.
    pub fn expand_iri(&self, value: &str, vocab_relative: bool) -> Result<String, ParserError> {
        if vocab_relative {
            if let Some(definition) = self.terms.get(value) {
                return Ok(definition.iri.clone());
            }
        }
        if let Some((prefix, local)) = split_compact_iri(value) {
            if let Some(prefix) = self.terms.get(prefix) {
                return Ok(format!("{}{}", prefix.iri, local));
            }
        }
        if Iri::parse(value).is_ok() {
            return Ok(value.to_owned());
        }
        if vocab_relative {
            if let Some(vocab) = &self.vocab {
                return Ok(format!("{}{}", vocab, value));
            }
        }
        match self.base {
            Some(_) => Ok(self.resolve(value)?.into_inner()),
            // without a base, relative references are kept as written
            None => Ok(value.to_owned()),
        }
    }

    fn resolve(&self, value: &str) -> Result<Iri<String>, ParserError> {
        let iri = match &self.base {
            Some(base) => base.resolve(value),
            None => Iri::parse(value.to_owned()),
        };
        iri.map_err(|error| ParserError::new(format!("invalid IRI '{}': {}", value, error), None))
    }
}

/// Splits `prefix:local`, rejecting blank node identifiers and `scheme://` IRIs.
fn split_compact_iri(value: &str) -> Option<(&str, &str)> {
    let (prefix, local) = value.split_once(':')?;
    if prefix.is_empty() || prefix == "_" || prefix.contains('/') || local.starts_with("//") {
        None
    } else {
        Some((prefix, local))
    }
}

/// Any absolute IRI is a valid key, whatever its scheme: `http://...`, `urn:...`, `tag:...`.
///
/// Compact IRIs with a defined prefix are expanded before this is checked.
pub fn is_absolute_key(key: &str) -> bool {
    !key.starts_with("_:") && Iri::parse(key).is_ok()
}

fn context_error(message: impl Into<String>) -> ParserError {
    ParserError::new(message, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> Result<JsonLdContext, ParserError> {
        let mut context = JsonLdContext::default();
        context.process(&value)?;
        Ok(context)
    }

    #[test]
    fn prefixes_and_terms() -> Result<(), ParserError> {
        let context = context(json!({
            "foaf": "http://xmlns.com/foaf/0.1/",
            "name": "foaf:name",
            "knows": {"@id": "foaf:knows", "@type": "@id"},
            "age": {"@id": "http://example.org/age", "@type": "xsd:integer"},
            "xsd": "http://www.w3.org/2001/XMLSchema#"
        }))?;
        assert_eq!(
            context.expand_property("name"),
            Some(("http://xmlns.com/foaf/0.1/name".to_owned(), None))
        );
        assert_eq!(
            context.expand_property("knows"),
            Some(("http://xmlns.com/foaf/0.1/knows".to_owned(), Some(&Coercion::Id)))
        );
        assert_eq!(
            context.expand_property("age").and_then(|(_, coercion)| coercion.cloned()),
            Some(Coercion::Datatype(
                "http://www.w3.org/2001/XMLSchema#integer".to_owned()
            ))
        );
        assert_eq!(
            context.expand_property("foaf:mbox"),
            Some(("http://xmlns.com/foaf/0.1/mbox".to_owned(), None))
        );
        Ok(())
    }

    #[test]
    fn key_resolution_order() -> Result<(), ParserError> {
        let context = context(json!({"@vocab": "http://example.org/vocab#"}))?;
        assert_eq!(
            context.expand_property("http://example.org/p"),
            Some(("http://example.org/p".to_owned(), None))
        );
        assert_eq!(
            context.expand_property("urn:isbn:123"),
            Some(("urn:isbn:123".to_owned(), None))
        );
        assert_eq!(
            context.expand_property("label"),
            Some(("http://example.org/vocab#label".to_owned(), None))
        );
        assert_eq!(JsonLdContext::default().expand_property("label"), None);
        assert_eq!(JsonLdContext::default().expand_property("_:label"), None);
        assert_eq!(
            JsonLdContext::default().expand_property("ex:label"),
            Some(("ex:label".to_owned(), None))
        );
        Ok(())
    }

    #[test]
    fn arrays_are_processed_in_order() -> Result<(), ParserError> {
        let context = context(json!([
            {"ex": "http://example.org/", "gone": "http://example.org/gone"},
            {"ex": "http://example.com/", "gone": null}
        ]))?;
        assert_eq!(
            context.expand_property("ex:x"),
            Some(("http://example.com/x".to_owned(), None))
        );
        assert_eq!(context.expand_property("gone"), None);
        Ok(())
    }

    #[test]
    fn base_is_resolved_against_document() -> Result<(), Box<dyn std::error::Error>> {
        let mut context =
            JsonLdContext::new(Some(Iri::parse("http://example.org/a/doc".to_owned())?));
        context.process(&json!({"@base": "../b/"}))?;
        assert_eq!(
            context.expand_iri("alice", false)?,
            "http://example.org/b/alice"
        );
        context.process(&Value::Null)?;
        assert_eq!(context.expand_iri("alice", false)?, "http://example.org/a/alice");
        Ok(())
    }

    #[test]
    fn relative_iris_are_kept_without_base() -> Result<(), ParserError> {
        let context = JsonLdContext::default();
        assert_eq!(context.expand_iri("alice", false)?, "alice");
        assert_eq!(context.expand_iri("#me", false)?, "#me");
        assert_eq!(context.expand_iri("Person", true)?, "Person");
        Ok(())
    }

    #[test]
    fn unsupported_contexts() {
        assert!(context(json!("http://schema.org/")).is_err());
        assert!(context(json!({"@language": "en"})).is_err());
        assert!(context(json!({"list": {"@id": "http://example.org/l", "@container": "@list"}})).is_err());
        assert!(context(json!({"id": "@id"})).is_err());
        assert!(context(json!({"a": "b:x", "b": "a:y"})).is_err());
        assert!(context(json!({"term": "relative"})).is_err());
        assert!(context(json!(42)).is_err());
    }

    #[test]
    fn absolute_keys() {
        assert!(is_absolute_key("http://example.org/p"));
        assert!(is_absolute_key("urn:x"));
        assert!(is_absolute_key("tag:example.org,2020:p"));
        assert!(is_absolute_key("mailto:someone@example.org"));
        assert!(is_absolute_key("did:example:p"));
        assert!(!is_absolute_key("1http://x"));
        assert!(!is_absolute_key("name"));
        assert!(!is_absolute_key("_:b0"));
    }
}
