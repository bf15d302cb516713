//! Named graph variants loaded side by side.
//!
//! A catalog holds independent, immutable networks (base, traffic-aware,
//! sustainable, multi-modal, ...). Callers select one wholesale per query;
//! variants are never merged. Graphs are shared behind `Arc` so concurrent
//! queries can read the same variant without copying it.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Well-known variant names with their default display labels.
pub const WELL_KNOWN_NETWORKS: [(&str, &str); 4] = [
    ("G_base", "Base Network"),
    ("G_traffic", "Traffic-Aware Network"),
    ("G_sustainable", "Sustainable Network"),
    ("G_multi", "Multi-Modal Network"),
];

/// Display label for a variant name, falling back to the name itself.
pub fn default_label(name: &str) -> String {
    WELL_KNOWN_NETWORKS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| name.to_string())
}

/// One selectable network variant.
#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    pub label: String,
    pub graph: Arc<Graph>,
}

/// Ordered collection of network variants.
#[derive(Debug, Clone, Default)]
pub struct NetworkCatalog {
    networks: Vec<Network>,
}

impl NetworkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant, replacing any existing variant with the same name.
    pub fn insert(&mut self, label: Option<String>, graph: Graph) {
        let name = graph.name().to_string();
        let label = label.unwrap_or_else(|| default_label(&name));
        let network = Network {
            name,
            label,
            graph: Arc::new(graph),
        };

        match self.networks.iter_mut().find(|n| n.name == network.name) {
            Some(existing) => *existing = network,
            None => self.networks.push(network),
        }
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Variants in load order.
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.iter().map(|n| n.name.as_str())
    }

    /// Look up a variant by exact name or, failing that, by its label
    /// (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&Network> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .or_else(|| {
                self.networks
                    .iter()
                    .find(|n| n.label.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| Error::UnknownNetwork {
                name: name.to_string(),
                suggestions: self.fuzzy_matches(name, 3),
            })
    }

    /// Shared handle to a variant's graph.
    pub fn graph(&self, name: &str) -> Result<Arc<Graph>> {
        self.get(name).map(|n| Arc::clone(&n.graph))
    }

    /// Closest variant names by Jaro-Winkler similarity, best first.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .networks
            .iter()
            .map(|n| {
                let by_name = strsim::jaro_winkler(&query, &n.name.to_lowercase());
                let by_label = strsim::jaro_winkler(&query, &n.label.to_lowercase());
                (by_name.max(by_label), n.name.as_str())
            })
            .filter(|(score, _)| *score >= 0.7)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
