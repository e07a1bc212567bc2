use permutohedron::LexicalPermutation;
use rdfio_api::graph::Graph;
use rdfio_api::model::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};

type BlankNodesByHash = HashMap<u64, Vec<BlankNodeTerm>>;

/// Are `a` and `b` the same graph up to a renaming of their blank nodes?
///
/// Blank nodes are first partitioned by a hash of their ground neighbourhood,
/// then the permutations inside each partition are tried.
///
/// ```
/// use rdfio_api::graph::Graph;
/// use rdfio_api::model::{BlankNodeTerm, IriTerm, Triple};
/// use rdfio_testsuite::are_graphs_isomorphic;
///
/// let p = IriTerm::new("http://example.org/p")?;
/// let graph = |node: BlankNodeTerm| Graph::new().with_triple(Triple::new(node, p.clone(), p.clone()));
/// let (a, b) = (graph(BlankNodeTerm::new()), graph(BlankNodeTerm::new()));
/// assert_ne!(a, b);
/// assert!(are_graphs_isomorphic(&a, &b));
/// # Result::<_, rdfio_api::error::ValidationError>::Ok(())
/// ```
pub fn are_graphs_isomorphic(a: &Graph, b: &Graph) -> bool {
    if a.len() != b.len() {
        return false;
    }

    // Ground triples must be in both graphs
    for (graph, other) in [(a, b), (b, a)] {
        for triple in graph.iter() {
            if !has_blank_node(triple) && !other.contains(triple) {
                return false;
            }
        }
    }

    let a_bnodes_by_hash = hash_blank_nodes(a);
    let b_bnodes_by_hash = hash_blank_nodes(b);

    // Hashes should have the same size everywhere
    if a_bnodes_by_hash.len() != b_bnodes_by_hash.len() {
        return false;
    }
    for (hash, nodes) in &a_bnodes_by_hash {
        if b_bnodes_by_hash.get(hash).map(Vec::len) != Some(nodes.len()) {
            return false;
        }
    }

    build_and_check_containment_from_hashes(
        &mut a_bnodes_by_hash.keys().copied().collect(),
        &a_bnodes_by_hash,
        &b_bnodes_by_hash,
        &mut HashMap::new(),
        a,
        b,
    )
}

fn has_blank_node(triple: &Triple) -> bool {
    matches!(triple.subject, Subject::BlankNode(_)) || matches!(triple.object, Term::BlankNode(_))
}

fn hash_blank_nodes(graph: &Graph) -> BlankNodesByHash {
    let mut bnodes_by_hash = BlankNodesByHash::new();

    // NB: the neighbourhood is sorted to get the same hash in both graphs
    for bnode in graph.blank_nodes() {
        let mut hasher = DefaultHasher::new();

        let subject = Subject::from(bnode);
        let outgoing: BTreeSet<(&IriTerm, &Term)> = graph
            .find_triples(Some(&subject), None, None)
            .into_iter()
            .filter(|t| !matches!(t.object, Term::BlankNode(_)))
            .map(|t| (&t.predicate, &t.object))
            .collect();
        outgoing.hash(&mut hasher);

        let object = Term::from(bnode);
        let incoming: BTreeSet<(&Subject, &IriTerm)> = graph
            .find_triples(None, None, Some(&object))
            .into_iter()
            .filter(|t| !matches!(t.subject, Subject::BlankNode(_)))
            .map(|t| (&t.subject, &t.predicate))
            .collect();
        incoming.hash(&mut hasher);

        bnodes_by_hash
            .entry(hasher.finish())
            .or_default()
            .push(bnode);
    }
    bnodes_by_hash
}

fn build_and_check_containment_from_hashes(
    hashes_to_see: &mut Vec<u64>,
    a_bnodes_by_hash: &BlankNodesByHash,
    b_bnodes_by_hash: &BlankNodesByHash,
    a_to_b_mapping: &mut HashMap<BlankNodeTerm, BlankNodeTerm>,
    a: &Graph,
    b: &Graph,
) -> bool {
    let Some(hash) = hashes_to_see.pop() else {
        return check_is_contained(a_to_b_mapping, a, b);
    };

    let a_nodes = a_bnodes_by_hash.get(&hash).map_or(&[][..], Vec::as_slice);
    let b_nodes = b_bnodes_by_hash.get(&hash).map_or(&[][..], Vec::as_slice);
    if a_nodes.len() != b_nodes.len() {
        hashes_to_see.push(hash);
        return false;
    }

    // All the permutations of a_nodes are zipped with b_nodes to try every pairing
    let mut a_nodes_permuted = a_nodes.to_vec();
    a_nodes_permuted.sort();
    let result = loop {
        for (a_node, b_node) in a_nodes_permuted.iter().zip(b_nodes) {
            a_to_b_mapping.insert(*a_node, *b_node);
        }
        if build_and_check_containment_from_hashes(
            hashes_to_see,
            a_bnodes_by_hash,
            b_bnodes_by_hash,
            a_to_b_mapping,
            a,
            b,
        ) {
            break true;
        }
        if !a_nodes_permuted.next_permutation() {
            break false;
        }
    };
    for a_node in &a_nodes_permuted {
        a_to_b_mapping.remove(a_node);
    }
    hashes_to_see.push(hash);
    result
}

fn check_is_contained(
    a_to_b_mapping: &HashMap<BlankNodeTerm, BlankNodeTerm>,
    a: &Graph,
    b: &Graph,
) -> bool {
    let map_subject = |subject: &Subject| match subject {
        Subject::BlankNode(node) => a_to_b_mapping.get(node).map(|n| Subject::from(*n)),
        subject => Some(subject.clone()),
    };
    let map_object = |object: &Term| match object {
        Term::BlankNode(node) => a_to_b_mapping.get(node).map(|n| Term::from(*n)),
        object => Some(object.clone()),
    };
    let mapped: HashSet<Triple> = a
        .iter()
        .filter(|t| has_blank_node(t))
        .filter_map(|t| {
            Some(Triple::new(
                map_subject(&t.subject)?,
                t.predicate.clone(),
                map_object(&t.object)?,
            ))
        })
        .collect();
    let expected = a.iter().filter(|t| has_blank_node(t)).count();
    mapped.len() == expected && mapped.iter().all(|t| b.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(value: &'static str) -> IriTerm {
        IriTerm::prevalidated(value)
    }

    fn chain(nodes: &[BlankNodeTerm]) -> Graph {
        let next = iri("http://example.org/next");
        nodes
            .windows(2)
            .map(|pair| Triple::new(pair[0], next.clone(), pair[1]))
            .collect()
    }

    #[test]
    fn ground_graphs() {
        let a = Graph::new().with_triple(Triple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            LiteralTerm::simple("o"),
        ));
        assert!(are_graphs_isomorphic(&a, &a.clone()));
        assert!(!are_graphs_isomorphic(&a, &Graph::new()));
        let b = Graph::new().with_triple(Triple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            LiteralTerm::simple("other"),
        ));
        assert!(!are_graphs_isomorphic(&a, &b));
    }

    #[test]
    fn blank_node_chains() {
        let fresh = |n| (0..n).map(|_| BlankNodeTerm::new()).collect::<Vec<_>>();
        let (a, b) = (fresh(4), fresh(4));
        assert!(are_graphs_isomorphic(&chain(&a), &chain(&b)));
        let reversed: Vec<_> = b.iter().rev().copied().collect();
        assert!(are_graphs_isomorphic(&chain(&a), &chain(&reversed)));

        // a 3-cycle is not a 3-chain plus a self loop
        let cycle = chain(&[a[0], a[1], a[2], a[0]]);
        let other = chain(&[b[0], b[1], b[2]]).with_triple(Triple::new(
            b[2],
            iri("http://example.org/next"),
            b[2],
        ));
        assert_eq!(cycle.len(), other.len());
        assert!(!are_graphs_isomorphic(&cycle, &other));
    }

    #[test]
    fn symmetric_blank_nodes() {
        let name = iri("http://example.org/name");
        let graph = |x: BlankNodeTerm, y: BlankNodeTerm, first: &str, second: &str| {
            Graph::new()
                .with_triple(Triple::new(x, name.clone(), LiteralTerm::simple(first)))
                .with_triple(Triple::new(y, name.clone(), LiteralTerm::simple(second)))
                .with_triple(Triple::new(x, iri("http://example.org/knows"), y))
        };
        let (a1, a2, b1, b2) = (
            BlankNodeTerm::new(),
            BlankNodeTerm::new(),
            BlankNodeTerm::new(),
            BlankNodeTerm::new(),
        );
        assert!(are_graphs_isomorphic(
            &graph(a1, a2, "x", "y"),
            &graph(b1, b2, "x", "y")
        ));
        assert!(!are_graphs_isomorphic(
            &graph(a1, a2, "x", "y"),
            &graph(b1, b2, "y", "x")
        ));
    }
}
