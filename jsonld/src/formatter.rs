//! Serializer for [JSON-LD](https://www.w3.org/TR/json-ld/) documents.

use crate::context::is_absolute_key;
use oxiri::Iri;
use rdfio_api::compact::{relativize, IriCompactor};
use rdfio_api::error::{RdfError, SerializationError};
use rdfio_api::formatter::GraphSerializer;
use rdfio_api::graph::{Graph, SubjectDescription};
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMappings;
use rdfio_api::vocab::{rdf, xsd};
use serde_json::{Map, Number, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A [JSON-LD](https://www.w3.org/TR/json-ld/) serializer.
///
/// The `@context` declares exactly the prefixes used in the document. A graph with a single
/// subject is written as one node object, otherwise the node objects are put in `@graph`.
///
/// ```
/// use rdfio_api::graph::Graph;
/// use rdfio_api::model::{IriTerm, LiteralTerm, Triple};
/// use rdfio_jsonld::JsonLdSerializer;
/// use std::collections::HashMap;
///
/// let graph = Graph::new().with_triple(Triple::new(
///     IriTerm::new("http://example.org/alice")?,
///     IriTerm::new("http://xmlns.com/foaf/0.1/age")?,
///     LiteralTerm::typed("42", rdfio_api::vocab::xsd::INTEGER),
/// ));
/// let json = JsonLdSerializer::default()
///     .compact_output()
///     .write(&graph, None, &HashMap::new())?;
/// assert_eq!(
///     json,
///     r#"{"@context":{"foaf":"http://xmlns.com/foaf/0.1/"},"@id":"http://example.org/alice","foaf:age":42}"#
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonLdSerializer {
    mappings: NamespaceMappings,
    pretty: bool,
}

impl JsonLdSerializer {
    pub fn new(mappings: NamespaceMappings) -> Self {
        Self {
            mappings,
            pretty: true,
        }
    }

    /// Writes the document on a single line instead of pretty-printing it.
    pub fn compact_output(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Writes `graph` as a JSON-LD document.
    ///
    /// Blank nodes get the identifiers `_:b0`, `_:b1`... in the order they are written.
    /// If `base_uri` is given, it is declared as `@base` and `@id`s below it are written relative.
    pub fn write(
        &self,
        graph: &Graph,
        base_uri: Option<&str>,
        custom_prefixes: &HashMap<String, String>,
    ) -> Result<String, RdfError> {
        let base_iri = base_uri
            .map(|base| {
                Iri::parse(base.to_owned()).map_err(|error| {
                    SerializationError::new(format!("invalid base IRI '{}': {}", base, error))
                })
            })
            .transpose()?;
        // A prefix named like the scheme of a written IRI would change how that IRI is read back
        let schemes = iri_schemes(graph);
        let mut writer = JsonLdWriter {
            compactor: IriCompactor::new(&self.mappings, custom_prefixes).retain_prefixes(
                |prefix| is_json_ld_prefix(prefix) && !schemes.contains(prefix),
            ),
            base_iri,
            bnode_labels: HashMap::new(),
        };
        let mut nodes = graph
            .describe_subjects()
            .iter()
            .map(|description| writer.node_object(description))
            .collect::<Result<Vec<_>, _>>()?;

        let document = if nodes.is_empty() {
            Map::new()
        } else {
            let mut context = Map::new();
            if let Some(base_iri) = &writer.base_iri {
                context.insert("@base".into(), base_iri.as_str().into());
            }
            for (prefix, namespace) in writer.compactor.used_prefixes() {
                context.insert(prefix.clone(), namespace.as_str().into());
            }
            let mut document = match nodes.pop() {
                Some(node) if nodes.is_empty() => node,
                last => {
                    nodes.extend(last);
                    let mut document = Map::new();
                    document.insert(
                        "@graph".into(),
                        Value::Array(nodes.into_iter().map(Value::Object).collect()),
                    );
                    document
                }
            };
            if !context.is_empty() {
                document.insert("@context".into(), Value::Object(context));
            }
            document
        };
        let document = Value::Object(document);
        let output = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(|error| SerializationError::new(error.to_string()))?;
        debug!(
            triples = graph.len(),
            prefixes = writer.compactor.used_prefixes().len(),
            blank_nodes = writer.bnode_labels.len(),
            "serialized JSON-LD document"
        );
        Ok(output)
    }
}

impl Default for JsonLdSerializer {
    fn default() -> Self {
        Self::new(NamespaceMappings::default())
    }
}

impl GraphSerializer for JsonLdSerializer {
    fn write(
        &self,
        graph: &Graph,
        base_uri: Option<&str>,
        custom_prefixes: &HashMap<String, String>,
    ) -> Result<String, RdfError> {
        JsonLdSerializer::write(self, graph, base_uri, custom_prefixes)
    }
}

struct JsonLdWriter {
    compactor: IriCompactor,
    base_iri: Option<Iri<String>>,
    bnode_labels: HashMap<BlankNodeTerm, String>,
}

impl JsonLdWriter {
    fn node_object(
        &mut self,
        description: &SubjectDescription<'_>,
    ) -> Result<Map<String, Value>, SerializationError> {
        let mut node = Map::new();
        node.insert("@id".into(), self.node_id(description.subject).into());
        let mut types = Vec::new();
        for (predicate, objects) in &description.properties {
            let mut values = Vec::with_capacity(objects.len());
            for object in objects {
                match object {
                    Term::Iri(class) if **predicate == rdf::TYPE => {
                        types.push(Value::String(self.compact_iri(class)))
                    }
                    object => values.push(self.value(object)?),
                }
            }
            if !values.is_empty() {
                node.insert(self.property_key(predicate)?, one_or_many(values));
            }
        }
        if !types.is_empty() {
            node.insert("@type".into(), one_or_many(types));
        }
        Ok(node)
    }

    fn node_id(&mut self, subject: &Subject) -> String {
        match subject {
            Subject::Iri(iri) => self.reference(iri),
            Subject::BlankNode(node) => self.blank_node_id(*node),
        }
    }

    /// `@id` values: compact IRI, then IRI relative to the base, then the IRI itself.
    fn reference(&mut self, iri: &IriTerm) -> String {
        if let Some(compact) = self.compactor.compact(iri.as_str(), is_json_ld_local) {
            return format!("{}:{}", compact.prefix, compact.local);
        }
        self.base_iri
            .as_ref()
            .and_then(|base_iri| relativize(base_iri, iri.as_str()))
            .unwrap_or(iri.as_str())
            .to_owned()
    }

    /// Keys, `@type` and datatypes are never written relative.
    fn compact_iri(&mut self, iri: &IriTerm) -> String {
        match self.compactor.compact(iri.as_str(), is_json_ld_local) {
            Some(compact) => format!("{}:{}", compact.prefix, compact.local),
            None => iri.as_str().to_owned(),
        }
    }

    fn property_key(&mut self, predicate: &IriTerm) -> Result<String, SerializationError> {
        let key = self.compact_iri(predicate);
        if key == predicate.as_str() && !is_absolute_key(&key) {
            return Err(SerializationError::new(format!(
                "the relative IRI <{}> cannot be used as a JSON-LD property",
                predicate.as_str()
            )));
        }
        Ok(key)
    }

    fn blank_node_id(&mut self, node: BlankNodeTerm) -> String {
        let next_label = self.bnode_labels.len();
        let label = self
            .bnode_labels
            .entry(node)
            .or_insert_with(|| format!("_:b{}", next_label));
        label.clone()
    }

    fn value(&mut self, object: &Term) -> Result<Value, SerializationError> {
        let id = match object {
            Term::Iri(iri) => self.reference(iri),
            Term::BlankNode(node) => self.blank_node_id(*node),
            Term::Literal(literal) => return self.literal(literal),
        };
        let mut reference = Map::new();
        reference.insert("@id".into(), id.into());
        Ok(Value::Object(reference))
    }

    fn literal(&mut self, literal: &LiteralTerm) -> Result<Value, SerializationError> {
        let value = literal.value();
        let mut object = Map::new();
        object.insert("@value".into(), value.into());
        if let Some(language) = literal.language() {
            object.insert("@language".into(), language.into());
            return Ok(Value::Object(object));
        }
        let datatype = literal.datatype();
        let native = if *datatype == rdf::LANG_STRING {
            return Err(SerializationError::new(format!(
                "the literal \"{}\" has the datatype rdf:langString but no language tag",
                value
            )));
        } else if *datatype == xsd::STRING {
            Some(Value::String(value.to_owned()))
        } else if *datatype == xsd::INTEGER {
            canonical_integer(value)
        } else if *datatype == xsd::DOUBLE || *datatype == xsd::DECIMAL {
            canonical_float(value)
        } else if *datatype == xsd::BOOLEAN {
            match value {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            }
        } else {
            None
        };
        if let Some(native) = native {
            return Ok(native);
        }
        object.insert("@type".into(), self.compact_iri(datatype).into());
        Ok(Value::Object(object))
    }
}

/// A JSON number if `value` is exactly how an `i64` is written.
fn canonical_integer(value: &str) -> Option<Value> {
    let number = value.parse::<i64>().ok()?;
    (number.to_string() == value).then(|| Value::Number(number.into()))
}

/// A JSON number if `value` is a finite float written the way JSON writes it back.
fn canonical_float(value: &str) -> Option<Value> {
    let number = Number::from_f64(value.parse::<f64>().ok()?)?;
    (number.to_string() == value).then_some(Value::Number(number))
}

fn iri_schemes(graph: &Graph) -> HashSet<&str> {
    graph
        .iter()
        .flat_map(|triple| {
            let subject = match &triple.subject {
                Subject::Iri(iri) => Some(iri),
                Subject::BlankNode(_) => None,
            };
            let object = match &triple.object {
                Term::Iri(iri) => Some(iri),
                Term::Literal(literal) => Some(literal.datatype()),
                Term::BlankNode(_) => None,
            };
            subject.into_iter().chain(Some(&triple.predicate)).chain(object)
        })
        .filter_map(|iri| iri.as_str().split_once(':').map(|(scheme, _)| scheme))
        .collect()
}

fn one_or_many(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

fn is_json_ld_prefix(prefix: &str) -> bool {
    prefix.chars().next().map_or(false, char::is_alphabetic)
        && !prefix.contains([':', '/', '#', '?'])
}

// "prefix://..." would be read back as an absolute IRI
fn is_json_ld_local(local: &str) -> bool {
    !local.starts_with("//")
}
