//! An in-memory [RDF graph](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-graph).

use crate::model::{BlankNodeTerm, IriTerm, Subject, Term, Triple};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A set of [`Triple`]s.
///
/// Inserting a triple that is already present does nothing.
/// Iteration follows the order in which triples were first inserted, but two graphs are equal
/// as soon as they contain the same triples.
///
/// A graph can be built in place with [`Graph::insert`] or as a value with [`Graph::with_triple`]:
/// ```
/// use rdfio_api::graph::Graph;
/// use rdfio_api::model::{IriTerm, LiteralTerm, Triple};
///
/// let alice = IriTerm::prevalidated("http://example.org/alice");
/// let name = IriTerm::prevalidated("http://xmlns.com/foaf/0.1/name");
/// let graph = Graph::new()
///     .with_triple(Triple::new(alice.clone(), name.clone(), LiteralTerm::simple("Alice")))
///     .with_triple(Triple::new(alice.clone(), name.clone(), LiteralTerm::simple("Alice")));
/// assert_eq!(graph.len(), 1);
/// assert_eq!(graph.find_triples(Some(&alice.into()), None, None).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        triples.into_iter().collect()
    }

    /// Adds a triple. Returns `false` if it was already in the graph.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Returns the graph with `triple` added.
    pub fn with_triple(mut self, triple: Triple) -> Self {
        self.insert(triple);
        self
    }

    /// Returns the graph with all `triples` added.
    pub fn with_triples(mut self, triples: impl IntoIterator<Item = Triple>) -> Self {
        self.extend(triples);
        self
    }

    /// The union of the two graphs. Triples of `self` come first.
    pub fn merge(&self, other: &Graph) -> Graph {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Triple> {
        self.triples.iter()
    }

    /// Returns the triples matching a pattern. `None` matches anything.
    pub fn find_triples(
        &self,
        subject: Option<&Subject>,
        predicate: Option<&IriTerm>,
        object: Option<&Term>,
    ) -> Vec<&Triple> {
        self.iter()
            .filter(|t| matches_pattern(t, subject, predicate, object))
            .collect()
    }

    /// Is there at least one triple matching the pattern?
    pub fn has_triples(
        &self,
        subject: Option<&Subject>,
        predicate: Option<&IriTerm>,
        object: Option<&Term>,
    ) -> bool {
        self.iter()
            .any(|t| matches_pattern(t, subject, predicate, object))
    }

    /// Returns a copy of the graph without the triples matching the pattern.
    pub fn without_matching(
        &self,
        subject: Option<&Subject>,
        predicate: Option<&IriTerm>,
        object: Option<&Term>,
    ) -> Graph {
        self.iter()
            .filter(|t| !matches_pattern(t, subject, predicate, object))
            .cloned()
            .collect()
    }

    /// The distinct subjects, in first-encounter order.
    pub fn subjects(&self) -> Vec<&Subject> {
        distinct(self.iter().map(|t| &t.subject))
    }

    /// The distinct predicates, in first-encounter order.
    pub fn predicates(&self) -> Vec<&IriTerm> {
        distinct(self.iter().map(|t| &t.predicate))
    }

    /// The distinct objects, in first-encounter order.
    pub fn objects(&self) -> Vec<&Term> {
        distinct(self.iter().map(|t| &t.object))
    }

    /// The distinct blank nodes used as subject or object, in first-encounter order.
    pub fn blank_nodes(&self) -> Vec<BlankNodeTerm> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for triple in &self.triples {
            if let Subject::BlankNode(node) = &triple.subject {
                if seen.insert(*node) {
                    nodes.push(*node);
                }
            }
            if let Term::BlankNode(node) = &triple.object {
                if seen.insert(*node) {
                    nodes.push(*node);
                }
            }
        }
        nodes
    }

    /// Groups the triples by subject, then by predicate, keeping first-encounter order at each level.
    ///
    /// This is the shape serializers write: one block per subject, one entry per predicate.
    pub fn describe_subjects(&self) -> Vec<SubjectDescription<'_>> {
        let mut descriptions: Vec<SubjectDescription<'_>> = Vec::new();
        let mut positions: HashMap<&Subject, usize> = HashMap::new();
        for triple in &self.triples {
            let position = *positions.entry(&triple.subject).or_insert_with(|| {
                descriptions.push(SubjectDescription {
                    subject: &triple.subject,
                    properties: Vec::new(),
                });
                descriptions.len() - 1
            });
            let properties = &mut descriptions[position].properties;
            match properties
                .iter_mut()
                .find(|(predicate, _)| **predicate == triple.predicate)
            {
                Some((_, objects)) => objects.push(&triple.object),
                None => properties.push((&triple.predicate, vec![&triple.object])),
            }
        }
        descriptions
    }
}

/// The triples of a [`Graph`] sharing one subject. See [`Graph::describe_subjects`].
#[derive(Debug, Clone)]
pub struct SubjectDescription<'a> {
    pub subject: &'a Subject,
    /// Each predicate with its objects.
    pub properties: Vec<(&'a IriTerm, Vec<&'a Term>)>,
}

fn matches_pattern(
    triple: &Triple,
    subject: Option<&Subject>,
    predicate: Option<&IriTerm>,
    object: Option<&Term>,
) -> bool {
    subject.map_or(true, |s| *s == triple.subject)
        && predicate.map_or(true, |p| *p == triple.predicate)
        && object.map_or(true, |o| *o == triple.object)
}

fn distinct<'a, T: Eq + std::hash::Hash + 'a>(values: impl Iterator<Item = &'a T>) -> Vec<&'a T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for Graph {}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = indexmap::set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{}", triple)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LiteralTerm;
    use crate::vocab::rdf;

    fn iri(value: &'static str) -> IriTerm {
        IriTerm::prevalidated(value)
    }

    fn example_graph() -> Graph {
        let alice = iri("http://example.org/alice");
        let bob = iri("http://example.org/bob");
        let knows = iri("http://xmlns.com/foaf/0.1/knows");
        let name = iri("http://xmlns.com/foaf/0.1/name");
        Graph::from_triples(vec![
            Triple::new(alice.clone(), name.clone(), LiteralTerm::simple("Alice")),
            Triple::new(alice.clone(), knows.clone(), bob.clone()),
            Triple::new(bob.clone(), name, LiteralTerm::simple("Bob")),
            Triple::new(bob, rdf::TYPE, iri("http://xmlns.com/foaf/0.1/Person")),
        ])
    }

    #[test]
    fn structural_equality() {
        let triple = Triple::new(
            iri("http://example.org/a"),
            iri("http://example.org/b"),
            iri("http://example.org/c"),
        );
        assert_eq!(
            Graph::from_triples(vec![triple.clone()]),
            Graph::from_triples(vec![triple.clone()])
        );
        let graph = Graph::new().with_triple(triple.clone()).with_triple(triple.clone());
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(&triple));
    }

    #[test]
    fn equality_ignores_order() {
        let graph = example_graph();
        let reversed: Graph = graph.iter().rev().cloned().collect();
        assert_eq!(graph, reversed);
        assert_ne!(graph, Graph::new());
    }

    #[test]
    fn merge_is_idempotent() {
        let graph = example_graph();
        assert_eq!(graph.merge(&graph), graph);
        assert_eq!(graph.merge(&graph).len(), graph.len());
    }

    #[test]
    fn merge_is_set_union() {
        let graph = example_graph();
        let extra = Triple::new(
            iri("http://example.org/carol"),
            iri("http://xmlns.com/foaf/0.1/name"),
            LiteralTerm::simple("Carol"),
        );
        let other = Graph::from_triples(vec![graph.iter().next().cloned().unwrap(), extra.clone()]);
        let merged = graph.merge(&other);
        assert_eq!(merged.len(), graph.len() + 1);
        assert!(merged.contains(&extra));
        assert!(graph.iter().all(|t| merged.contains(t)));
        assert_eq!(merged.iter().last(), Some(&extra));
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let graph = example_graph();
        let first = graph.iter().next().cloned().unwrap();
        let mut reinserted = graph.clone();
        assert!(!reinserted.insert(first.clone()));
        assert_eq!(reinserted.iter().next(), Some(&first));
        assert_eq!(
            reinserted.iter().collect::<Vec<_>>(),
            graph.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn find_with_wildcards_returns_everything_once() {
        let graph = example_graph();
        let all = graph.find_triples(None, None, None);
        assert_eq!(all.len(), graph.len());
        assert_eq!(all.into_iter().collect::<HashSet<_>>().len(), graph.len());
    }

    #[test]
    fn find_by_component() {
        let graph = example_graph();
        let alice = Subject::from(iri("http://example.org/alice"));
        let by_subject = graph.find_triples(Some(&alice), None, None);
        assert_eq!(by_subject.len(), 2);
        assert!(by_subject.iter().all(|t| t.subject == alice));

        let name = iri("http://xmlns.com/foaf/0.1/name");
        assert_eq!(graph.find_triples(None, Some(&name), None).len(), 2);

        let bob = Term::from(iri("http://example.org/bob"));
        assert_eq!(graph.find_triples(None, None, Some(&bob)).len(), 1);
        assert!(graph.has_triples(Some(&alice), None, Some(&bob)));
        assert!(!graph.has_triples(Some(&alice), Some(&rdf::TYPE), None));
    }

    #[test]
    fn found_triples_outlive_the_pattern() {
        let graph = example_graph();
        let found = {
            let alice = Subject::from(iri("http://example.org/alice"));
            let name = iri("http://xmlns.com/foaf/0.1/name");
            graph.find_triples(Some(&alice), Some(&name), None)
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].object, Term::from(LiteralTerm::simple("Alice")));
    }

    #[test]
    fn without_matching_removes_pattern() {
        let graph = example_graph();
        let name = iri("http://xmlns.com/foaf/0.1/name");
        let pruned = graph.without_matching(None, Some(&name), None);
        assert_eq!(pruned.len(), 2);
        assert!(!pruned.has_triples(None, Some(&name), None));
    }

    #[test]
    fn distinct_components() {
        let graph = example_graph();
        assert_eq!(graph.subjects().len(), 2);
        assert_eq!(graph.predicates().len(), 3);
        assert_eq!(graph.objects().len(), 4);
    }

    #[test]
    fn subject_descriptions_group_triples() {
        let graph = example_graph().with_triple(Triple::new(
            iri("http://example.org/alice"),
            iri("http://xmlns.com/foaf/0.1/name"),
            LiteralTerm::simple("Alicia"),
        ));
        let descriptions = graph.describe_subjects();
        assert_eq!(descriptions.len(), 2);
        assert_eq!(
            descriptions[0].subject,
            &Subject::from(iri("http://example.org/alice"))
        );
        let (predicate, objects) = &descriptions[0].properties[0];
        assert_eq!(*predicate, &iri("http://xmlns.com/foaf/0.1/name"));
        assert_eq!(objects.len(), 2);
        assert_eq!(descriptions[0].properties.len(), 2);
        assert_eq!(descriptions[1].properties.len(), 2);
    }

    #[test]
    fn blank_nodes_in_first_encounter_order() {
        let a = BlankNodeTerm::new();
        let b = BlankNodeTerm::new();
        let p = iri("http://example.org/p");
        let graph = Graph::from_triples(vec![
            Triple::new(b, p.clone(), a),
            Triple::new(a, p.clone(), LiteralTerm::simple("x")),
        ]);
        assert_eq!(graph.blank_nodes(), vec![b, a]);
    }
}
