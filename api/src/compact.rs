//! Prefix selection shared by the serializers.
//!
//! Serializers ask an [`IriCompactor`] for a compact form of every IRI they write and emit
//! prefix declarations for [`IriCompactor::used_prefixes`] afterwards, so the declarations list
//! exactly the prefixes used in the document.

use crate::namespace::NamespaceMappings;
use oxiri::Iri;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// A compacted IRI: `prefix:local`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CompactIri<'a> {
    pub prefix: String,
    pub local: &'a str,
}

/// Picks the prefix to write an IRI with.
///
/// Candidates come from a [`NamespaceMappings`] and caller-provided custom prefixes:
/// * a custom prefix replaces a standard prefix with the same name;
/// * when a namespace has both a custom and a standard prefix, the custom one is used;
/// * when several standard prefixes share a namespace, the smallest one is used;
/// * the longest namespace matching an IRI wins.
///
/// ```
/// use rdfio_api::compact::IriCompactor;
/// use rdfio_api::namespace::NamespaceMappings;
/// use std::collections::HashMap;
///
/// let custom: HashMap<String, String> = [
///     ("ex".to_owned(), "http://example.org/".to_owned()),
///     ("vocab".to_owned(), "http://example.org/vocab/".to_owned()),
/// ].into_iter().collect();
/// let mut compactor = IriCompactor::new(&NamespaceMappings::default(), &custom);
/// let compact = compactor.compact("http://example.org/vocab/x", |_| true).unwrap();
/// assert_eq!((compact.prefix.as_str(), compact.local), ("vocab", "x"));
/// ```
#[derive(Debug, Clone)]
pub struct IriCompactor {
    // (namespace, prefix), longest namespace first
    candidates: Vec<(String, String)>,
    used: BTreeMap<String, String>,
}

impl IriCompactor {
    pub fn new(mappings: &NamespaceMappings, custom_prefixes: &HashMap<String, String>) -> Self {
        let mut by_namespace: BTreeMap<&str, &str> = BTreeMap::new();
        // Standard entries in prefix order, so the first prefix seen for a namespace is the smallest
        for (prefix, namespace) in mappings.iter() {
            if custom_prefixes.contains_key(prefix) {
                continue;
            }
            by_namespace.entry(namespace).or_insert(prefix);
        }
        let mut custom: Vec<(&String, &String)> = custom_prefixes.iter().collect();
        custom.sort();
        let mut custom_namespaces = HashMap::new();
        for (prefix, namespace) in custom {
            if custom_namespaces.insert(namespace.as_str(), ()).is_none() {
                by_namespace.insert(namespace, prefix);
            }
        }

        let mut candidates: Vec<(String, String)> = by_namespace
            .into_iter()
            .filter(|(namespace, _)| !namespace.is_empty())
            .map(|(namespace, prefix)| (namespace.to_owned(), prefix.to_owned()))
            .collect();
        candidates.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self {
            candidates,
            used: BTreeMap::new(),
        }
    }

    /// Drops the candidate prefixes rejected by `keep`, e.g. the ones the target syntax cannot declare.
    pub fn retain_prefixes(mut self, keep: impl Fn(&str) -> bool) -> Self {
        self.candidates.retain(|(_, prefix)| keep(prefix));
        self
    }

    /// Returns the compact form of `iri` using the longest matching namespace whose remainder
    /// is accepted by `is_valid_local`, and marks the prefix as used.
    pub fn compact<'a>(
        &mut self,
        iri: &'a str,
        is_valid_local: impl Fn(&str) -> bool,
    ) -> Option<CompactIri<'a>> {
        let found = self.candidates.iter().find(|(namespace, _)| {
            iri.starts_with(namespace.as_str()) && is_valid_local(&iri[namespace.len()..])
        });
        let Some((namespace, prefix)) = found else {
            self.warn_if_non_canonical(iri);
            return None;
        };
        let local = &iri[namespace.len()..];
        if !self.used.contains_key(prefix) {
            self.used.insert(prefix.clone(), namespace.clone());
        }
        Some(CompactIri {
            prefix: prefix.clone(),
            local,
        })
    }

    /// The prefixes returned by [`IriCompactor::compact`] so far, sorted by prefix.
    pub fn used_prefixes(&self) -> &BTreeMap<String, String> {
        &self.used
    }

    pub fn into_used_prefixes(self) -> BTreeMap<String, String> {
        self.used
    }

    fn warn_if_non_canonical(&self, iri: &str) {
        let swapped = if let Some(rest) = iri.strip_prefix("https://") {
            format!("http://{}", rest)
        } else if let Some(rest) = iri.strip_prefix("http://") {
            format!("https://{}", rest)
        } else {
            return;
        };
        if let Some((namespace, prefix)) = self
            .candidates
            .iter()
            .find(|(namespace, _)| swapped.starts_with(namespace.as_str()))
        {
            warn!(
                iri,
                namespace = namespace.as_str(),
                prefix = prefix.as_str(),
                "IRI uses a non-canonical scheme for a known namespace, writing it in full"
            );
        }
    }
}

/// Writes `iri` relative to `base_iri` if the result resolves back to `iri`.
///
/// Only IRIs below the directory of the base are made relative. IRIs that only differ from the
/// base by their fragment are written as `#fragment`.
///
/// ```
/// use oxiri::Iri;
/// use rdfio_api::compact::relativize;
///
/// let base = Iri::parse("http://example.org/data/doc".to_owned())?;
/// assert_eq!(relativize(&base, "http://example.org/data/alice"), Some("alice"));
/// assert_eq!(relativize(&base, "http://example.org/data/doc"), Some(""));
/// assert_eq!(relativize(&base, "http://example.org/other"), None);
/// # Result::<_, oxiri::IriParseError>::Ok(())
/// ```
pub fn relativize<'a>(base_iri: &Iri<String>, iri: &'a str) -> Option<&'a str> {
    let base = base_iri.as_str();
    let document = base.split_once('#').map_or(base, |(document, _)| document);
    let relative = match iri.strip_prefix(document) {
        Some(fragment) if fragment.is_empty() || fragment.starts_with('#') => fragment,
        _ => {
            let directory = &document[..=document.rfind('/')?];
            iri.strip_prefix(directory)?
        }
    };
    let resolved = base_iri.resolve(relative).ok()?;
    if resolved.as_str() == iri {
        Some(relative)
    } else {
        None
    }
}
