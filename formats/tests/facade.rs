use rdfio::registry::FormatRegistry;
use rdfio::{RdfCore, RdfError};
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMappings;
use std::collections::HashMap;

const TURTLE: &str = r#"@prefix foaf: <http://xmlns.com/foaf/0.1/> .
<http://example.org/alice> a foaf:Person ;
    foaf:name "Alice"@en ;
    foaf:age 42 .
"#;

#[test]
fn parse_with_content_type() -> Result<(), RdfError> {
    let core = RdfCore::new();
    let graph = core.parse(TURTLE, Some("text/turtle; charset=utf-8"), None)?;
    assert_eq!(graph.len(), 3);
    assert!(matches!(
        core.parse(TURTLE, Some("application/ld+json"), None),
        Err(RdfError::Parser(_))
    ));
    Ok(())
}

#[test]
fn unknown_content_type() {
    let core = RdfCore::new();
    match core.parse(TURTLE, Some("application/rdf+xml"), None) {
        Err(RdfError::UnsupportedFormat(error)) => {
            assert_eq!(error.content_type(), "application/rdf+xml")
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert!(matches!(
        core.serialize(&rdfio::Graph::new(), Some("text/n3"), None, &HashMap::new()),
        Err(RdfError::UnsupportedFormat(_))
    ));
    assert!(core.get_parser("application/n-quads").is_err());
    assert!(core.get_serializer("application/n-quads").is_err());
}

#[test]
fn auto_detection() -> Result<(), RdfError> {
    let core = RdfCore::new();
    let from_turtle = core.parse(TURTLE, None, None)?;
    let json = core.serialize(&from_turtle, Some("application/ld+json"), None, &HashMap::new())?;
    let from_json = core.parse(&json, None, None)?;
    assert_eq!(from_json, from_turtle);

    let empty = RdfCore::with_registry(FormatRegistry::new());
    assert!(matches!(
        empty.parse(TURTLE, None, None),
        Err(RdfError::UnsupportedFormat(_))
    ));
    Ok(())
}

#[test]
fn serialize_defaults_to_turtle() -> Result<(), RdfError> {
    let core = RdfCore::new();
    let graph = core.parse(TURTLE, Some("text/turtle"), None)?;
    let turtle = core.serialize(&graph, None, None, &HashMap::new())?;
    assert!(turtle.starts_with("@prefix foaf: <http://xmlns.com/foaf/0.1/> ."));
    assert_eq!(core.parse(&turtle, Some("application/x-turtle"), None)?, graph);
    Ok(())
}

#[test]
fn parsers_and_serializers_by_content_type() -> Result<(), RdfError> {
    let core = RdfCore::new();
    let graph = core
        .get_parser("Application/LD+JSON")?
        .parse(r#"{"@id": "http://example.org/s", "http://example.org/p": true}"#, None)?;
    assert_eq!(
        graph.iter().next().map(|t| t.object.clone()),
        Some(Term::from(LiteralTerm::typed(
            "true",
            rdfio_api::vocab::xsd::BOOLEAN
        )))
    );
    let turtle = core
        .get_serializer("text/turtle")?
        .write(&graph, None, &HashMap::new())?;
    assert_eq!(turtle, "<http://example.org/s> <http://example.org/p> true .\n");
    Ok(())
}

#[test]
fn custom_namespace_mappings() -> Result<(), RdfError> {
    let mappings = NamespaceMappings::custom([("ex".to_owned(), "http://example.org/".to_owned())]);
    let core = RdfCore::with_registry(FormatRegistry::with_namespace_mappings(mappings));
    let graph = core.parse("ex:s ex:p ex:o .", Some("text/turtle"), None)?;
    let turtle = core.serialize(&graph, None, None, &HashMap::new())?;
    assert_eq!(turtle, "@prefix ex: <http://example.org/> .\n\nex:s ex:p ex:o .\n");
    Ok(())
}
