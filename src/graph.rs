//! Shared query engine over either automaton's state graph.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::state::{State, StateId};
use crate::streamer::Completions;
use crate::view::{self, ViewGraph};

/// One traversed edge of a prefix trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEdge {
    pub source: StateId,
    pub target: StateId,
    pub symbol: char,
}

/// Result of walking a prefix from the root: the states and edges of the
/// portion of the path that exists, and whether the whole prefix was
/// consumed.
#[derive(Debug, Clone)]
pub struct PrefixTrace {
    pub accepted: bool,
    pub visited_states: Vec<StateId>,
    pub visited_edges: Vec<TraceEdge>,
}

/// Read-only view of an automaton's state graph.
///
/// Implemented by both the baseline [`Trie`](crate::Trie) and the minimized
/// [`Dafsa`](crate::Dafsa), so every query below behaves identically over
/// either structure; only the degree of state sharing differs.
pub trait StateGraph {
    /// The root state (id 0, never accepting).
    fn root(&self) -> StateId;

    /// Resolve a state by id.
    fn state(&self, id: StateId) -> &State;

    /// Walk `prefix` one symbol at a time from the root. On the first
    /// missing transition the walk stops with `accepted = false`; states
    /// and edges collected so far are still reported, representing the
    /// valid portion of the prefix.
    fn trace_prefix(&self, prefix: &str) -> PrefixTrace {
        let mut node = self.root();
        let mut trace = PrefixTrace {
            accepted: true,
            visited_states: vec![node],
            visited_edges: Vec::new(),
        };
        for &sym in prefix.as_bytes() {
            match self.state(node).target(sym) {
                Some(next) => {
                    trace.visited_edges.push(TraceEdge {
                        source: node,
                        target: next,
                        symbol: sym as char,
                    });
                    trace.visited_states.push(next);
                    node = next;
                }
                None => {
                    trace.accepted = false;
                    break;
                }
            }
        }
        trace
    }

    /// Whether `word` is in the recognized language.
    fn contains(&self, word: &str) -> bool {
        let mut node = self.root();
        for &sym in word.as_bytes() {
            match self.state(node).target(sym) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.state(node).is_accepting()
    }

    /// Ids of all states reachable from `from`, itself included.
    ///
    /// Iterative DFS with a visited set. The guard is not cosmetic: in the
    /// minimized automaton states have multiple inbound edges, and an
    /// unconditional walk would re-expand every shared subtree once per
    /// inbound path.
    fn reachable_ids(&self, from: StateId) -> FxHashSet<StateId> {
        let mut visited = FxHashSet::default();
        let mut stack = vec![from];
        visited.insert(from);
        while let Some(id) = stack.pop() {
            for (_, target) in self.state(id).edges() {
                if visited.insert(target) {
                    stack.push(target);
                }
            }
        }
        visited
    }

    /// Number of states reachable from the root (orphans excluded).
    fn state_count(&self) -> usize {
        self.reachable_ids(self.root()).len()
    }

    /// Lazy enumeration of every accepted word starting with `prefix`, in
    /// lexicographic order. Finite, and recomputed fresh on every call.
    fn completions(&self, prefix: &str) -> Completions<'_, Self> {
        Completions::new(self, prefix)
    }

    /// Snapshot of the reachable graph for rendering: every reachable state
    /// visited exactly once, so shared states appear as a DAG rather than
    /// being unrolled into a tree.
    fn export_view(&self) -> ViewGraph {
        view::export(self)
    }

    /// Canonical structural fingerprint: reachable states are relabeled in
    /// preorder (ascending symbols) and rendered one line per state. Two
    /// automata produce equal fingerprints exactly when their reachable
    /// graphs are isomorphic, independent of identifier-assignment order.
    fn fingerprint(&self) -> Vec<String> {
        let mut canon: FxHashMap<StateId, usize> = FxHashMap::default();
        let mut order: Vec<StateId> = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if canon.contains_key(&id) {
                continue;
            }
            canon.insert(id, order.len());
            order.push(id);
            // reversed so the smallest symbol is expanded first
            let targets: Vec<StateId> = self.state(id).edges().map(|(_, t)| t).collect();
            stack.extend(targets.into_iter().rev());
        }
        order
            .iter()
            .map(|&id| {
                let state = self.state(id);
                let mut line = String::from(if state.is_accepting() { "1" } else { "0" });
                for (sym, target) in state.edges() {
                    line.push('|');
                    line.push(sym as char);
                    line.push(':');
                    line.push_str(&canon[&target].to_string());
                }
                line
            })
            .collect()
    }
}
