//! Test helpers for the rdfio codecs: graph isomorphism and generated sample graphs.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

mod isomorphism;

pub use isomorphism::are_graphs_isomorphic;

use rdfio_api::error::ValidationError;
use rdfio_api::graph::Graph;
use rdfio_api::model::*;
use rdfio_api::vocab::{rdf, xsd};

/// A FOAF-like graph with `people` persons, each with a name, an age, a blank node address
/// and a link to the next person.
pub fn sample_graph(people: usize) -> Result<Graph, ValidationError> {
    let person = IriTerm::prevalidated("http://xmlns.com/foaf/0.1/Person");
    let name = IriTerm::prevalidated("http://xmlns.com/foaf/0.1/name");
    let age = IriTerm::prevalidated("http://xmlns.com/foaf/0.1/age");
    let knows = IriTerm::prevalidated("http://xmlns.com/foaf/0.1/knows");
    let address = IriTerm::prevalidated("http://schema.org/address");
    let locality = IriTerm::prevalidated("https://schema.org/addressLocality");
    let id = |i: usize| IriTerm::new_unchecked(format!("http://example.com/people/{}", i));

    let mut graph = Graph::new();
    for i in 0..people {
        let subject = id(i);
        let place = BlankNodeTerm::new();
        graph.insert(Triple::new(subject.clone(), rdf::TYPE, person.clone()));
        graph.insert(Triple::new(
            subject.clone(),
            name.clone(),
            LiteralTerm::simple(format!("Person \"{}\"\n", i)),
        ));
        graph.insert(Triple::new(
            subject.clone(),
            age.clone(),
            LiteralTerm::typed((20 + i % 60).to_string(), xsd::INTEGER),
        ));
        graph.insert(Triple::new(subject.clone(), address.clone(), place));
        graph.insert(Triple::new(
            place,
            locality.clone(),
            LiteralTerm::language_tagged(format!("Ville {}", i), "fr")?,
        ));
        if i + 1 < people {
            graph.insert(Triple::new(subject, knows.clone(), id(i + 1)));
        }
    }
    Ok(graph)
}
