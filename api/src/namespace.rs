//! Prefix to namespace IRI tables used to write and read compact IRIs like `foaf:name`.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

const STANDARD_PREFIXES: [(&str, &str); 13] = [
    ("acl", "http://www.w3.org/ns/auth/acl#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("ldp", "http://www.w3.org/ns/ldp#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("schema", "https://schema.org/"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("solid", "http://www.w3.org/ns/solid/terms#"),
    ("vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

static STANDARD_MAPPINGS: LazyLock<Arc<BTreeMap<String, String>>> = LazyLock::new(|| {
    Arc::new(
        STANDARD_PREFIXES
            .iter()
            .map(|(prefix, namespace)| ((*prefix).to_owned(), (*namespace).to_owned()))
            .collect(),
    )
});

/// An immutable table from prefixes to namespace IRIs.
///
/// The default table contains well-known vocabularies (`rdf`, `rdfs`, `xsd`, `owl`, `foaf`, `schema`...).
/// [`NamespaceMappings::custom`] layers extra entries on top of it.
///
/// ```
/// use rdfio_api::namespace::NamespaceMappings;
///
/// let mappings = NamespaceMappings::custom([("ex", "http://example.org/"), ("foaf", "http://example.org/foaf/")]);
/// assert_eq!(mappings.lookup("ex"), Some("http://example.org/"));
/// assert_eq!(mappings.lookup("foaf"), Some("http://example.org/foaf/"));
/// assert_eq!(NamespaceMappings::default().lookup("foaf"), Some("http://xmlns.com/foaf/0.1/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMappings {
    mappings: Arc<BTreeMap<String, String>>,
}

impl NamespaceMappings {
    /// The standard prefixes extended by `entries`. Entries win over standard prefixes with the same name.
    ///
    /// The entries are copied: the returned table does not change if the caller's collection does.
    pub fn custom(
        entries: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut mappings = BTreeMap::clone(&STANDARD_MAPPINGS);
        for (prefix, namespace) in entries {
            mappings.insert(prefix.into(), namespace.into());
        }
        Self {
            mappings: Arc::new(mappings),
        }
    }

    /// A table without any entry.
    pub fn empty() -> Self {
        Self {
            mappings: Arc::default(),
        }
    }

    /// Returns the namespace IRI bound to `prefix`.
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        self.mappings.get(prefix).map(String::as_str)
    }

    pub fn contains_key(&self, prefix: &str) -> bool {
        self.mappings.contains_key(prefix)
    }

    /// Returns the prefix bound to exactly this namespace IRI.
    ///
    /// If several prefixes are bound to it, the smallest one is returned.
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(_, ns)| *ns == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// A read-only view of the table, e.g. to copy it and add entries.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.mappings
    }

    /// Iterates on `(prefix, namespace)` pairs, sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mappings
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }
}

impl Default for NamespaceMappings {
    fn default() -> Self {
        Self {
            mappings: Arc::clone(&STANDARD_MAPPINGS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_tables_are_equal() {
        assert_eq!(NamespaceMappings::default(), NamespaceMappings::default());
        assert_eq!(NamespaceMappings::default().len(), 13);
        assert!(NamespaceMappings::default().contains_key("rdf"));
        assert!(!NamespaceMappings::default().contains_key("ex"));
    }

    #[test]
    fn custom_entries_override_defaults() {
        let mappings = NamespaceMappings::custom([("rdf", "http://example.org/rdf#")]);
        assert_eq!(mappings.lookup("rdf"), Some("http://example.org/rdf#"));
        assert_eq!(mappings.len(), 13);
        assert_eq!(
            mappings.lookup("xsd"),
            Some("http://www.w3.org/2001/XMLSchema#")
        );
    }

    #[test]
    fn custom_mappings_are_copied() {
        let mut entries = HashMap::new();
        entries.insert("ex".to_owned(), "http://example.org/".to_owned());
        let mappings = NamespaceMappings::custom(entries.clone());
        entries.insert("ex".to_owned(), "http://example.com/".to_owned());
        entries.insert("other".to_owned(), "http://other.example/".to_owned());
        assert_eq!(mappings.lookup("ex"), Some("http://example.org/"));
        assert!(!mappings.contains_key("other"));
        assert_eq!(mappings.len(), 14);
    }

    #[test]
    fn view_can_be_extended() {
        let mut copy = NamespaceMappings::default().as_map().clone();
        copy.insert("ex".to_owned(), "http://example.org/".to_owned());
        assert_eq!(copy.len(), 14);
        assert_eq!(NamespaceMappings::default().len(), 13);
    }

    #[test]
    fn reverse_lookup() {
        let mappings = NamespaceMappings::default();
        assert_eq!(mappings.prefix_for("http://xmlns.com/foaf/0.1/"), Some("foaf"));
        assert_eq!(mappings.prefix_for("http://example.org/"), None);
        assert_eq!(NamespaceMappings::empty().lookup("rdf"), None);
    }
}
