//! Serializer for [Turtle](https://www.w3.org/TR/turtle/) documents.

use crate::utils::{is_writable_pn_local, is_writable_pn_prefix};
use oxiri::Iri;
use rdfio_api::compact::{relativize, IriCompactor};
use rdfio_api::error::{RdfError, SerializationError};
use rdfio_api::formatter::GraphSerializer;
use rdfio_api::graph::Graph;
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMappings;
use rdfio_api::vocab::{rdf, xsd};
use std::collections::HashMap;
use tracing::debug;

/// A [Turtle](https://www.w3.org/TR/turtle/) serializer.
///
/// Triples are grouped by subject (`;`) and by predicate (`,`), `rdf:type` is written `a`,
/// and only the prefixes actually used are declared.
///
/// ```
/// use rdfio_api::graph::Graph;
/// use rdfio_api::model::{IriTerm, Triple};
/// use rdfio_api::vocab::rdf;
/// use rdfio_turtle::TurtleSerializer;
/// use std::collections::HashMap;
///
/// let graph = Graph::new().with_triple(Triple::new(
///     IriTerm::new("http://example.com/foo")?,
///     rdf::TYPE,
///     IriTerm::new("http://xmlns.com/foaf/0.1/Person")?,
/// ));
/// let turtle = TurtleSerializer::default().write(&graph, None, &HashMap::new())?;
/// assert_eq!(
///     turtle,
///     "@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n\n<http://example.com/foo> a foaf:Person .\n"
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurtleSerializer {
    mappings: NamespaceMappings,
}

impl TurtleSerializer {
    pub fn new(mappings: NamespaceMappings) -> Self {
        Self { mappings }
    }

    /// Writes `graph` as a complete Turtle document.
    ///
    /// Blank nodes get the labels `_:b0`, `_:b1`... in the order they are written.
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
        let mut writer = TurtleWriter {
            compactor: IriCompactor::new(&self.mappings, custom_prefixes)
                .retain_prefixes(is_writable_pn_prefix),
            base_iri,
            bnode_labels: HashMap::new(),
            body: String::new(),
        };
        for description in graph.describe_subjects() {
            writer.write_subject(description.subject);
            for (i, (predicate, objects)) in description.properties.iter().enumerate() {
                writer.body.push_str(if i == 0 { " " } else { " ;\n\t" });
                writer.write_predicate(predicate);
                for (j, object) in objects.iter().enumerate() {
                    writer.body.push_str(if j == 0 { " " } else { " , " });
                    writer.write_object(object)?;
                }
            }
            writer.body.push_str(" .\n");
        }

        let mut output = String::new();
        if let Some(base_iri) = &writer.base_iri {
            output.push_str("@base <");
            output.push_str(base_iri.as_str());
            output.push_str("> .\n");
        }
        let prefixes = writer.compactor.used_prefixes();
        for (prefix, namespace) in prefixes {
            output.push_str("@prefix ");
            output.push_str(prefix);
            output.push_str(": <");
            output.push_str(namespace);
            output.push_str("> .\n");
        }
        if !output.is_empty() && !writer.body.is_empty() {
            output.push('\n');
        }
        debug!(
            triples = graph.len(),
            prefixes = prefixes.len(),
            blank_nodes = writer.bnode_labels.len(),
            "serialized Turtle document"
        );
        output.push_str(&writer.body);
        Ok(output)
    }
}

impl GraphSerializer for TurtleSerializer {
    fn write(
        &self,
        graph: &Graph,
        base_uri: Option<&str>,
        custom_prefixes: &HashMap<String, String>,
    ) -> Result<String, RdfError> {
        TurtleSerializer::write(self, graph, base_uri, custom_prefixes)
    }
}

struct TurtleWriter {
    compactor: IriCompactor,
    base_iri: Option<Iri<String>>,
    bnode_labels: HashMap<BlankNodeTerm, String>,
    body: String,
}

impl TurtleWriter {
    fn write_subject(&mut self, subject: &Subject) {
        match subject {
            Subject::Iri(iri) => self.write_iri(iri),
            Subject::BlankNode(node) => self.write_blank_node(*node),
        }
    }

    fn write_predicate(&mut self, predicate: &IriTerm) {
        if *predicate == rdf::TYPE {
            self.body.push('a')
        } else {
            self.write_iri(predicate)
        }
    }

    fn write_object(&mut self, object: &Term) -> Result<(), SerializationError> {
        match object {
            Term::Iri(iri) => self.write_iri(iri),
            Term::BlankNode(node) => self.write_blank_node(*node),
            Term::Literal(literal) => self.write_literal(literal)?,
        }
        Ok(())
    }

    fn write_iri(&mut self, iri: &IriTerm) {
        if let Some(compact) = self.compactor.compact(iri.as_str(), is_writable_pn_local) {
            self.body.push_str(&compact.prefix);
            self.body.push(':');
            self.body.push_str(compact.local);
        } else {
            let relative = self
                .base_iri
                .as_ref()
                .and_then(|base_iri| relativize(base_iri, iri.as_str()));
            self.body.push('<');
            self.body.push_str(relative.unwrap_or(iri.as_str()));
            self.body.push('>');
        }
    }

    fn write_blank_node(&mut self, node: BlankNodeTerm) {
        let next_label = self.bnode_labels.len();
        let label = self
            .bnode_labels
            .entry(node)
            .or_insert_with(|| format!("b{}", next_label));
        self.body.push_str("_:");
        self.body.push_str(label);
    }

    fn write_literal(&mut self, literal: &LiteralTerm) -> Result<(), SerializationError> {
        let value = literal.value();
        if let Some(language) = literal.language() {
            self.write_quoted(value);
            self.body.push('@');
            self.body.push_str(language);
            return Ok(());
        }
        let datatype = literal.datatype();
        if *datatype == rdf::LANG_STRING {
            return Err(SerializationError::new(format!(
                "the literal \"{}\" has the datatype rdf:langString but no language tag",
                value
            )));
        }
        let is_shorthand = if *datatype == xsd::STRING {
            self.write_quoted(value);
            return Ok(());
        } else if *datatype == xsd::INTEGER {
            is_turtle_integer(value)
        } else if *datatype == xsd::DECIMAL {
            is_turtle_decimal(value)
        } else if *datatype == xsd::DOUBLE {
            is_turtle_double(value)
        } else if *datatype == xsd::BOOLEAN {
            value == "true" || value == "false"
        } else {
            false
        };
        if is_shorthand {
            self.body.push_str(value);
        } else {
            self.write_quoted(value);
            self.body.push_str("^^");
            self.write_iri(datatype);
        }
        Ok(())
    }

    fn write_quoted(&mut self, value: &str) {
        self.body.push('"');
        self.body.extend(escape(value));
        self.body.push('"');
    }
}

// [19] 	INTEGER 	::= 	[+-]? [0-9]+
fn is_turtle_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit())
}

// [20] 	DECIMAL 	::= 	[+-]? [0-9]* '.' [0-9]+
fn is_turtle_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    match unsigned.split_once('.') {
        Some((before, after)) => {
            before.bytes().all(|c| c.is_ascii_digit())
                && !after.is_empty()
                && after.bytes().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

// [21] 	DOUBLE 	::= 	[+-]? ([0-9]+ '.' [0-9]* EXPONENT | '.' [0-9]+ EXPONENT | [0-9]+ EXPONENT)
// [154s] 	EXPONENT 	::= 	[eE] [+-]? [0-9]+
fn is_turtle_double(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let Some((mantissa, exponent)) = unsigned.split_once(['e', 'E']) else {
        return false;
    };
    if !is_turtle_integer(exponent) {
        return false;
    }
    match mantissa.split_once('.') {
        Some((before, after)) => {
            (!before.is_empty() || !after.is_empty())
                && before.bytes().all(|c| c.is_ascii_digit())
                && after.bytes().all(|c| c.is_ascii_digit())
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|c| c.is_ascii_digit()),
    }
}
