//! Channel systems: ordered collections of communicating program graphs.

use crate::program_graph::ProgramGraph;
use std::hash::Hash;

/// An ordered list of program graphs sharing no state except via named
/// channels referenced syntactically inside their actions. Actions are
/// textual because a rendezvous composes two one-sided action texts.
#[derive(Debug, Clone)]
pub struct ChannelSystem<L> {
    name: String,
    graphs: Vec<ProgramGraph<L, String>>,
}

impl<L> Default for ChannelSystem<L> {
    fn default() -> Self {
        Self {
            name: String::new(),
            graphs: Vec::new(),
        }
    }
}

impl<L> ChannelSystem<L>
where
    L: Clone + Eq + Hash,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graphs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a process. Order is significant: rendezvous partners are
    /// searched among higher-indexed processes only.
    pub fn push(&mut self, graph: ProgramGraph<L, String>) {
        self.graphs.push(graph);
    }

    pub fn graphs(&self) -> &[ProgramGraph<L, String>] {
        &self.graphs
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
