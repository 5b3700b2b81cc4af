//! Exported graph snapshot, the one interface the rendering and layout
//! subsystem consumes.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::graph::StateGraph;
use crate::state::StateId;

/// A node of the exported graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    pub id: StateId,
    pub accepting: bool,
}

/// A labeled edge of the exported graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewEdge {
    pub source: StateId,
    pub target: StateId,
    pub symbol: char,
}

/// Everything a renderer needs: the reachable nodes and labeled edges.
/// Shared states appear exactly once, so the minimized automaton exports
/// as a DAG instead of being unrolled into a tree.
#[derive(Debug, Clone, Serialize)]
pub struct ViewGraph {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

/// Single traversal from the root; the visited set guarantees each
/// reachable state is expanded once, so each edge is listed once.
pub(crate) fn export<G: StateGraph + ?Sized>(graph: &G) -> ViewGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut visited: FxHashSet<StateId> = FxHashSet::default();
    let mut stack = vec![graph.root()];
    visited.insert(graph.root());
    while let Some(id) = stack.pop() {
        let state = graph.state(id);
        nodes.push(ViewNode {
            id,
            accepting: state.is_accepting(),
        });
        for (sym, target) in state.edges() {
            edges.push(ViewEdge {
                source: id,
                target,
                symbol: sym as char,
            });
            if visited.insert(target) {
                stack.push(target);
            }
        }
    }
    ViewGraph { nodes, edges }
}
