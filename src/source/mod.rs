//! Sources of neighbors for the visits.
//!
//! A visit never sees a graph: it only asks a [`NeighborSource`] for the
//! neighbors of the nodes it expands.

pub mod http;

use std::collections::HashMap;
use thiserror::Error;

/// The failure of a neighbor lookup.
///
/// Visits recover from lookup failures locally: a node whose lookup fails
/// simply contributes no neighbors.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request for the neighbors of {node:?} failed: {source}")]
    Transport {
        node: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request for the neighbors of {node:?} returned HTTP status {status}")]
    Status {
        node: String,
        status: reqwest::StatusCode,
    },
    #[error("cannot decode the neighbors of {node:?}: {source}")]
    Decode {
        node: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("the neighbors of {node:?} are unavailable")]
    Unavailable { node: String },
}

impl LookupError {
    /// The node whose lookup failed.
    pub fn node(&self) -> &str {
        match self {
            Self::Transport { node, .. }
            | Self::Status { node, .. }
            | Self::Decode { node, .. }
            | Self::Unavailable { node } => node,
        }
    }
}

/// The capability a visit needs: given a node, return its neighbors or
/// fail.
///
/// Implementations are called concurrently from all the workers of a
/// parallel visit, and may block for as long as they need to.
pub trait NeighborSource: Sync {
    fn neighbors(&self, node: &str) -> Result<Vec<String>, LookupError>;
}

impl<S: NeighborSource + ?Sized> NeighborSource for &S {
    fn neighbors(&self, node: &str) -> Result<Vec<String>, LookupError> {
        (**self).neighbors(node)
    }
}

/// A source backed by a closure; see [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Creates a source calling `f` for every lookup.
pub fn from_fn<F: Fn(&str) -> Result<Vec<String>, LookupError> + Sync>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: Fn(&str) -> Result<Vec<String>, LookupError> + Sync> NeighborSource for FromFn<F> {
    fn neighbors(&self, node: &str) -> Result<Vec<String>, LookupError> {
        (self.0)(node)
    }
}

/// An in-memory adjacency map.
///
/// Nodes without an entry have no neighbors. Neighbors are returned in
/// insertion order, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    successors: HashMap<String, Vec<String>>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from a list of arcs.
    pub fn from_arcs<S: Into<String>, T: Into<String>>(
        arcs: impl IntoIterator<Item = (S, T)>,
    ) -> Self {
        let mut source = Self::new();
        for (from, to) in arcs {
            source.add_arc(from, to);
        }
        source
    }

    pub fn add_arc(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.successors
            .entry(from.into())
            .or_default()
            .push(to.into());
    }

    /// The number of nodes with at least one outgoing arc.
    pub fn num_sources(&self) -> usize {
        self.successors.len()
    }
}

impl NeighborSource for MapSource {
    fn neighbors(&self, node: &str) -> Result<Vec<String>, LookupError> {
        Ok(self.successors.get(node).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_map_source() {
        let source = MapSource::from_arcs([("A", "B"), ("A", "C"), ("B", "D")]);
        assert_eq!(source.num_sources(), 2);
        assert_eq!(source.neighbors("A").unwrap(), ["B", "C"]);
        assert_eq!(source.neighbors("B").unwrap(), ["D"]);
        assert!(source.neighbors("D").unwrap().is_empty());
        assert!(source.neighbors("nowhere").unwrap().is_empty());
    }

    #[test]
    fn test_closure_source() {
        let source = from_fn(|node| {
            Err(LookupError::Unavailable {
                node: node.to_owned(),
            })
        });
        let err = source.neighbors("A").unwrap_err();
        assert_eq!(err.node(), "A");
        assert_eq!(err.to_string(), "the neighbors of \"A\" are unavailable");
    }
}
