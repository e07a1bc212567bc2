//! Parser for [JSON-LD](https://www.w3.org/TR/json-ld/) documents with inline contexts.

use crate::context::{Coercion, JsonLdContext};
use oxiri::Iri;
use rdfio_api::error::{ParserError, RdfError, TextPosition};
use rdfio_api::graph::Graph;
use rdfio_api::model::*;
use rdfio_api::parser::GraphParser;
use rdfio_api::vocab::{rdf, xsd};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use tracing::debug;

/// A [JSON-LD](https://www.w3.org/TR/json-ld/) parser.
///
/// It reads a node object, a `{"@graph": [...]}` object or an array of node objects.
/// `@context` may map terms to IRIs or to definitions with `@id` and `@type` coercion,
/// and may set `@base` and `@vocab`. Remote contexts, `@list`, `@set` and the other
/// JSON-LD 1.1 keywords are rejected.
///
/// ```
/// use rdfio_api::model::{IriTerm, LiteralTerm, Term};
/// use rdfio_jsonld::JsonLdParser;
///
/// let graph = JsonLdParser::new().parse(
///     r#"{
///         "@context": {"foaf": "http://xmlns.com/foaf/0.1/"},
///         "@id": "http://example.org/alice",
///         "@type": "foaf:Person",
///         "foaf:name": {"@value": "Alice", "@language": "en"}
///     }"#,
///     None,
/// )?;
/// assert_eq!(graph.len(), 2);
/// let names = graph.find_triples(None, Some(&IriTerm::new("http://xmlns.com/foaf/0.1/name")?), None);
/// assert_eq!(names[0].object, Term::from(LiteralTerm::language_tagged("Alice", "en")?));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLdParser;

impl JsonLdParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `input`, resolving relative IRIs against `document_url` unless the document sets `@base`.
    pub fn parse(&self, input: &str, document_url: Option<&str>) -> Result<Graph, RdfError> {
        let document: Value = serde_json::from_str(input).map_err(syntax_error)?;
        let document_base = document_url
            .map(|url| {
                Iri::parse(url.to_owned()).map_err(|error| {
                    ParserError::new(format!("invalid document IRI '{}': {}", url, error), None)
                })
            })
            .transpose()?;
        let mut reader = JsonLdReader {
            bnodes: HashMap::new(),
            graph: Graph::new(),
        };
        let context = JsonLdContext::new(document_base);
        match &document {
            Value::Object(object) => reader.read_top_level_object(object, &context)?,
            Value::Array(objects) => {
                for object in objects {
                    match object {
                        Value::Object(object) => reader.read_top_level_object(object, &context)?,
                        value => return Err(structure_error(format!(
                            "expecting a node object in the top-level array, found {}",
                            value
                        ))
                        .into()),
                    }
                }
            }
            value => {
                return Err(structure_error(format!(
                    "a JSON-LD document must be an object or an array, found {}",
                    value
                ))
                .into())
            }
        }
        debug!(
            triples = reader.graph.len(),
            blank_nodes = reader.bnodes.len(),
            "parsed JSON-LD document"
        );
        Ok(reader.graph)
    }
}

impl GraphParser for JsonLdParser {
    fn parse(&self, input: &str, document_url: Option<&str>) -> Result<Graph, RdfError> {
        JsonLdParser::parse(self, input, document_url)
    }
}

struct JsonLdReader {
    bnodes: HashMap<String, BlankNodeTerm>,
    graph: Graph,
}

impl JsonLdReader {
    /// A document object: a node object or a `@graph` container, with its own `@context`.
    fn read_top_level_object(
        &mut self,
        object: &Map<String, Value>,
        parent_context: &JsonLdContext,
    ) -> Result<(), ParserError> {
        let mut local_context;
        let context = match object.get("@context") {
            Some(local) => {
                local_context = parent_context.clone();
                local_context.process(local)?;
                &local_context
            }
            None => parent_context,
        };
        let Some(graph) = object.get("@graph") else {
            self.read_node(object, context)?;
            return Ok(());
        };
        if let Some(key) = object.keys().find(|k| *k != "@context" && *k != "@graph") {
            return Err(structure_error(format!(
                "{} next to a top-level @graph is not supported, named graphs are not supported",
                key
            )));
        }
        match graph {
            Value::Array(nodes) => {
                for node in nodes {
                    self.read_graph_member(node, context)?;
                }
                Ok(())
            }
            node => self.read_graph_member(node, context),
        }
    }

    fn read_graph_member(&mut self, node: &Value, context: &JsonLdContext) -> Result<(), ParserError> {
        match node {
            Value::Object(node) => {
                if node.contains_key("@context") {
                    return Err(structure_error(
                        "nested @context definitions are not supported",
                    ));
                }
                self.read_node(node, context)?;
                Ok(())
            }
            value => Err(structure_error(format!(
                "expecting a node object in @graph, found {}",
                value
            ))),
        }
    }

    /// Emits the triples of a node object and returns its subject.
    fn read_node(
        &mut self,
        node: &Map<String, Value>,
        context: &JsonLdContext,
    ) -> Result<Subject, ParserError> {
        let subject = match node.get("@id") {
            Some(Value::String(id)) => self.node_reference(id, context, false)?,
            Some(id) => return Err(structure_error(format!("@id must be a string, found {}", id))),
            None => BlankNodeTerm::new().into(),
        };
        for (key, value) in node {
            match key.as_str() {
                "@id" | "@context" => (),
                "@type" => {
                    let types = match value {
                        Value::Array(types) => types.as_slice(),
                        value => std::slice::from_ref(value),
                    };
                    for class in types {
                        let Value::String(class) = class else {
                            return Err(structure_error(format!(
                                "@type values must be strings, found {}",
                                class
                            )));
                        };
                        let class = self.node_reference(class, context, true)?;
                        self.graph
                            .insert(Triple::new(subject.clone(), rdf::TYPE, class));
                    }
                }
                "@graph" => {
                    return Err(structure_error(
                        "@graph inside a node object is not supported, named graphs are not supported",
                    ))
                }
                keyword if keyword.starts_with('@') => {
                    return Err(structure_error(format!(
                        "the keyword {} is not supported in node objects",
                        keyword
                    )))
                }
                key => {
                    let Some((predicate, coercion)) = context.expand_property(key) else {
                        return Err(structure_error(format!(
                            "the key '{}' is not a defined term, a compact IRI with a defined prefix or an absolute IRI",
                            key
                        )));
                    };
                    if let Err(error) = Iri::parse(predicate.as_str()) {
                        return Err(structure_error(format!(
                            "the property '{}' does not expand to an absolute IRI: {}",
                            key, error
                        )));
                    }
                    let predicate = IriTerm::new_unchecked(predicate);
                    self.read_values(&subject, &predicate, value, coercion, context)?;
                }
            }
        }
        Ok(subject)
    }

    fn read_values(
        &mut self,
        subject: &Subject,
        predicate: &IriTerm,
        value: &Value,
        coercion: Option<&Coercion>,
        context: &JsonLdContext,
    ) -> Result<(), ParserError> {
        let values = match value {
            Value::Array(values) => values.as_slice(),
            value => std::slice::from_ref(value),
        };
        for value in values {
            if value.is_array() {
                return Err(structure_error(format!(
                    "nested arrays are not supported, found one for {}",
                    predicate
                )));
            }
            if let Some(object) = self.read_value(value, coercion, context)? {
                self.graph
                    .insert(Triple::new(subject.clone(), predicate.clone(), object));
            }
        }
        Ok(())
    }

    fn read_value(
        &mut self,
        value: &Value,
        coercion: Option<&Coercion>,
        context: &JsonLdContext,
    ) -> Result<Option<Term>, ParserError> {
        Ok(Some(match value {
            Value::Null => return Ok(None),
            Value::String(value) => match coercion {
                Some(Coercion::Id) => self.node_reference(value, context, false)?.into(),
                Some(Coercion::Vocab) => self.node_reference(value, context, true)?.into(),
                Some(Coercion::Datatype(datatype)) => {
                    LiteralTerm::new(value.as_str(), Some(datatype_iri(datatype)?), None)
                        .map_err(|error| structure_error(error.message()))?
                        .into()
                }
                None => LiteralTerm::simple(value.as_str()).into(),
            },
            Value::Bool(value) => LiteralTerm::typed(value.to_string(), xsd::BOOLEAN).into(),
            Value::Number(value) => number_literal(value).into(),
            Value::Object(object) if object.contains_key("@value") => {
                match self.read_value_object(object, context)? {
                    Some(literal) => literal.into(),
                    None => return Ok(None),
                }
            }
            Value::Object(object) if object.len() == 1 && object.contains_key("@id") => {
                match &object["@id"] {
                    Value::String(id) => self.node_reference(id, context, false)?.into(),
                    id => return Err(structure_error(format!("@id must be a string, found {}", id))),
                }
            }
            Value::Object(node) => {
                if node.contains_key("@context") {
                    return Err(structure_error(
                        "nested @context definitions are not supported",
                    ));
                }
                self.read_node(node, context)?.into()
            }
            Value::Array(_) => return Err(structure_error("nested arrays are not supported")),
        }))
    }

    // {"@value": ..., "@language": ...} or {"@value": ..., "@type": ...}
    fn read_value_object(
        &mut self,
        object: &Map<String, Value>,
        context: &JsonLdContext,
    ) -> Result<Option<LiteralTerm>, ParserError> {
        if let Some(key) = object
            .keys()
            .find(|k| !matches!(k.as_str(), "@value" | "@language" | "@type"))
        {
            return Err(structure_error(format!(
                "{} is not allowed in a value object",
                key
            )));
        }
        let language = object.get("@language");
        let datatype = object.get("@type");
        if language.is_some() && datatype.is_some() {
            return Err(structure_error(
                "a value object cannot have both @language and @type",
            ));
        }
        let (lexical, implicit_datatype) = match &object["@value"] {
            Value::Null => return Ok(None),
            Value::String(value) => (value.clone(), xsd::STRING),
            Value::Bool(value) => (value.to_string(), xsd::BOOLEAN),
            Value::Number(value) => {
                let literal = number_literal(value);
                (literal.value().to_owned(), literal.datatype().clone())
            }
            value => {
                return Err(structure_error(format!(
                    "@value must be a string, a number or a boolean, found {}",
                    value
                )))
            }
        };
        if let Some(language) = language {
            let Value::String(language) = language else {
                return Err(structure_error(format!(
                    "@language must be a string, found {}",
                    language
                )));
            };
            if implicit_datatype != xsd::STRING {
                return Err(structure_error(format!(
                    "@language cannot be used with the non-string value {}",
                    lexical
                )));
            }
            return LiteralTerm::language_tagged(lexical, language)
                .map(Some)
                .map_err(|error| structure_error(error.message()));
        }
        Ok(Some(match datatype {
            Some(Value::String(datatype)) => {
                let datatype = context.expand_iri(datatype, true)?;
                LiteralTerm::new(lexical, Some(datatype_iri(&datatype)?), None)
                    .map_err(|error| structure_error(error.message()))?
            }
            Some(datatype) => {
                return Err(structure_error(format!(
                    "the @type of a value object must be a string, found {}",
                    datatype
                )))
            }
            None => LiteralTerm::typed(lexical, implicit_datatype),
        }))
    }

    /// An IRI or a `_:` blank node identifier.
    fn node_reference(
        &mut self,
        value: &str,
        context: &JsonLdContext,
        vocab_relative: bool,
    ) -> Result<Subject, ParserError> {
        if let Some(label) = value.strip_prefix("_:") {
            return Ok(Subject::from(
                *self
                    .bnodes
                    .entry(label.to_owned())
                    .or_insert_with(BlankNodeTerm::new),
            ));
        }
        let iri = context.expand_iri(value, vocab_relative)?;
        IriTerm::new(iri)
            .map(Subject::from)
            .map_err(|error| structure_error(format!("invalid IRI '{}': {}", value, error)))
    }
}

fn number_literal(number: &Number) -> LiteralTerm {
    if number.is_i64() || number.is_u64() {
        LiteralTerm::typed(number.to_string(), xsd::INTEGER)
    } else {
        LiteralTerm::typed(number.to_string(), xsd::DOUBLE)
    }
}

fn datatype_iri(datatype: &str) -> Result<IriTerm, ParserError> {
    IriTerm::new(datatype)
        .map_err(|error| structure_error(format!("invalid datatype '{}': {}", datatype, error)))
}

fn structure_error(message: impl Into<String>) -> ParserError {
    ParserError::new(message, None)
}

fn syntax_error(error: serde_json::Error) -> ParserError {
    let message = error.to_string();
    // serde_json appends the position to its messages
    let message = match message.rfind(" at line ") {
        Some(end) => &message[..end],
        None => message.as_str(),
    };
    if error.line() == 0 {
        ParserError::new(format!("invalid JSON: {}", message), None)
    } else {
        ParserError::at(
            format!("invalid JSON: {}", message),
            TextPosition::new(error.line(), error.column()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Graph, RdfError> {
        JsonLdParser::new().parse(input, None)
    }

    fn iri(value: &'static str) -> IriTerm {
        IriTerm::prevalidated(value)
    }

    fn objects(graph: &Graph, predicate: &'static str) -> Vec<Term> {
        graph
            .find_triples(None, Some(&iri(predicate)), None)
            .into_iter()
            .map(|t| t.object.clone())
            .collect()
    }

    #[test]
    fn node_object() -> Result<(), RdfError> {
        let graph = parse(
            r#"{
                "@context": {"foaf": "http://xmlns.com/foaf/0.1/"},
                "@id": "http://example.org/alice",
                "@type": ["foaf:Person", "http://example.org/Agent"],
                "foaf:name": "Alice",
                "foaf:knows": {"@id": "http://example.org/bob"}
            }"#,
        )?;
        let alice = Subject::from(iri("http://example.org/alice"));
        assert_eq!(graph.len(), 4);
        assert!(graph.has_triples(Some(&alice), Some(&rdf::TYPE), Some(&iri("http://xmlns.com/foaf/0.1/Person").into())));
        assert!(graph.has_triples(Some(&alice), Some(&rdf::TYPE), Some(&iri("http://example.org/Agent").into())));
        assert_eq!(
            objects(&graph, "http://xmlns.com/foaf/0.1/name"),
            vec![Term::from(LiteralTerm::simple("Alice"))]
        );
        assert_eq!(
            objects(&graph, "http://xmlns.com/foaf/0.1/knows"),
            vec![Term::from(iri("http://example.org/bob"))]
        );
        Ok(())
    }

    #[test]
    fn graph_container() -> Result<(), RdfError> {
        let graph = parse(
            r#"{
                "@context": {"ex": "http://example.org/"},
                "@graph": [
                    {"@id": "ex:a", "ex:p": "1"},
                    {"@id": "ex:b", "ex:p": "2"}
                ]
            }"#,
        )?;
        assert_eq!(graph.subjects().len(), 2);
        Ok(())
    }

    #[test]
    fn top_level_array() -> Result<(), RdfError> {
        let graph = parse(
            r#"[
                {"@context": {"ex": "http://example.org/"}, "@id": "ex:a", "ex:p": "1"},
                {"@id": "http://example.org/b", "http://example.org/p": "2"}
            ]"#,
        )?;
        assert_eq!(graph.len(), 2);
        // The context of an array member does not leak into the next one
        assert!(parse(
            r#"[
                {"@context": {"ex": "http://example.org/"}, "@id": "ex:a", "ex:p": "1"},
                {"ex:p": "2"}
            ]"#
        )
        .is_err());
        Ok(())
    }

    #[test]
    fn literal_values() -> Result<(), RdfError> {
        let graph = parse(
            r#"{
                "@context": {"ex": "http://example.org/", "xsd": "http://www.w3.org/2001/XMLSchema#"},
                "ex:int": 42,
                "ex:double": 1.5,
                "ex:bool": false,
                "ex:lang": {"@value": "chat", "@language": "FR"},
                "ex:date": {"@value": "2024-01-01", "@type": "xsd:date"},
                "ex:none": null,
                "ex:list": ["a", "b"]
            }"#,
        )?;
        assert_eq!(
            objects(&graph, "http://example.org/int"),
            vec![Term::from(LiteralTerm::typed("42", xsd::INTEGER))]
        );
        assert_eq!(
            objects(&graph, "http://example.org/double"),
            vec![Term::from(LiteralTerm::typed("1.5", xsd::DOUBLE))]
        );
        assert_eq!(
            objects(&graph, "http://example.org/bool"),
            vec![Term::from(LiteralTerm::typed("false", xsd::BOOLEAN))]
        );
        assert_eq!(
            objects(&graph, "http://example.org/lang"),
            vec![Term::from(LiteralTerm::language_tagged("chat", "fr")?)]
        );
        assert_eq!(
            objects(&graph, "http://example.org/date"),
            vec![Term::from(LiteralTerm::typed(
                "2024-01-01",
                iri("http://www.w3.org/2001/XMLSchema#date")
            ))]
        );
        assert!(objects(&graph, "http://example.org/none").is_empty());
        assert_eq!(objects(&graph, "http://example.org/list").len(), 2);
        Ok(())
    }

    #[test]
    fn term_definitions_and_coercion() -> Result<(), RdfError> {
        let graph = parse(
            r#"{
                "@context": {
                    "@vocab": "http://schema.org/",
                    "knows": {"@id": "http://xmlns.com/foaf/0.1/knows", "@type": "@id"},
                    "born": {"@id": "http://example.org/born", "@type": "http://www.w3.org/2001/XMLSchema#date"}
                },
                "@id": "http://example.org/alice",
                "knows": "http://example.org/bob",
                "born": "1990-05-01",
                "name": "Alice"
            }"#,
        )?;
        assert_eq!(
            objects(&graph, "http://xmlns.com/foaf/0.1/knows"),
            vec![Term::from(iri("http://example.org/bob"))]
        );
        assert_eq!(
            objects(&graph, "http://example.org/born"),
            vec![Term::from(LiteralTerm::typed(
                "1990-05-01",
                iri("http://www.w3.org/2001/XMLSchema#date")
            ))]
        );
        assert_eq!(objects(&graph, "http://schema.org/name").len(), 1);
        Ok(())
    }

    #[test]
    fn blank_nodes_and_embedded_nodes() -> Result<(), RdfError> {
        let graph = parse(
            r#"{
                "@context": {"ex": "http://example.org/"},
                "@graph": [
                    {"@id": "_:x", "ex:knows": {"@id": "_:y"}},
                    {"@id": "_:y", "ex:knows": {"ex:name": "anonymous"}}
                ]
            }"#,
        )?;
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.blank_nodes().len(), 3);
        let y = graph
            .find_triples(None, Some(&iri("http://example.org/knows")), None)[0]
            .object
            .clone();
        let y = Subject::try_from(y)?;
        assert!(graph.has_triples(Some(&y), None, None));
        Ok(())
    }

    #[test]
    fn relative_ids_use_the_base() -> Result<(), RdfError> {
        let graph = JsonLdParser::new().parse(
            r##"{"@id": "alice", "http://example.org/p": {"@id": "#me"}}"##,
            Some("http://example.org/people/"),
        )?;
        let triple = graph.iter().next().map(|t| t.to_string());
        assert_eq!(
            triple.as_deref(),
            Some("<http://example.org/people/alice> <http://example.org/p> <http://example.org/people/#me> .")
        );
        let graph = parse(
            r#"{"@context": {"@base": "http://example.com/"}, "@id": "a", "http://example.org/p": "x"}"#,
        )?;
        assert!(graph.has_triples(Some(&iri("http://example.com/a").into()), None, None));
        Ok(())
    }

    #[test]
    fn keys_with_any_scheme_are_absolute() -> Result<(), RdfError> {
        let graph = parse(
            r#"{
                "@context": {"ex": "http://example.org/"},
                "@id": "urn:isbn:0451450523",
                "tag:example.org,2020:p": "a",
                "mailto:someone@example.org": "b",
                "did:example:p": "c",
                "ex:p": "d"
            }"#,
        )?;
        for predicate in [
            "tag:example.org,2020:p",
            "mailto:someone@example.org",
            "did:example:p",
            "http://example.org/p",
        ] {
            assert!(
                graph.has_triples(None, Some(&IriTerm::new(predicate)?), None),
                "missing {}",
                predicate
            );
        }
        Ok(())
    }

    #[test]
    fn relative_ids_are_kept_without_base() -> Result<(), RdfError> {
        let graph = parse(r#"{"@id": "s", "http://example.org/p": {"@id": "o"}}"#)?;
        let triple = graph.iter().next().map(|t| t.to_string());
        assert_eq!(triple.as_deref(), Some("<s> <http://example.org/p> <o> ."));
        Ok(())
    }

    #[test]
    fn errors() {
        for input in [
            "{",
            "42",
            r#"{"unknown": "x"}"#,
            r#"{"_:p": "x"}"#,
            r#"{"@context": {"p": "a/b:c"}, "p": "x"}"#,
            r#"{"http://example.org/p": {"@value": "x", "@language": "en", "@type": "http://example.org/t"}}"#,
            r#"{"http://example.org/p": {"@value": ["x"]}}"#,
            r#"{"http://example.org/p": {"@list": ["x"]}}"#,
            r#"{"http://example.org/p": {"@set": ["x"]}}"#,
            r#"{"@reverse": {"http://example.org/p": "x"}}"#,
            r#"{"@id": 12, "http://example.org/p": "x"}"#,
            r#"{"@context": "http://schema.org/", "name": "x"}"#,
            r#"{"http://example.org/p": [["x"]]}"#,
            r#"{"http://example.org/p": {"@value": "x", "@language": "not a tag"}}"#,
        ] {
            assert!(parse(input).is_err(), "{} should not parse", input);
        }
    }

    #[test]
    fn syntax_errors_have_positions() {
        let error = parse("{\n  \"a\": }").unwrap_err();
        assert_eq!(error.textual_position().map(|p| p.line), Some(2));
        assert!(!error.to_string().contains(" at line "));
    }
}
