use smallvec::SmallVec;

use crate::graph::StateGraph;
use crate::state::StateId;

/// Trait for streaming items, similar to `Iterator`.
pub trait Streamer {
    /// The type of item yielded by the streamer.
    type Item;
    /// Return the next item in the stream, or None if finished.
    fn next(&mut self) -> Option<Self::Item>;
    /// Consume the streamer and collect all remaining items into a Vec.
    fn collect(mut self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        let mut v = Vec::new();
        while let Some(item) = self.next() {
            v.push(item);
        }
        v
    }
}

// Blanket impl so that Box<dyn Streamer> itself implements Streamer
impl<S> Streamer for Box<S>
where
    S: Streamer + ?Sized,
{
    type Item = S::Item;
    fn next(&mut self) -> Option<Self::Item> {
        (**self).next()
    }
}

/// One level of the completion DFS: a state, its outgoing edges in symbol
/// order, a cursor into them, and whether the state's own word was emitted.
struct Frame {
    id: StateId,
    edges: SmallVec<[(u8, StateId); 8]>,
    next_edge: usize,
    yielded: bool,
}

impl Frame {
    fn expand<G: StateGraph + ?Sized>(graph: &G, id: StateId) -> Frame {
        Frame {
            id,
            edges: graph.state(id).edges().collect(),
            next_edge: 0,
            yielded: false,
        }
    }
}

/// Depth-first streamer over every accepted word below a prefix, emitted in
/// lexicographic order (preorder, ascending symbols).
///
/// The stack is explicit so recursion depth never depends on word length,
/// and the stream is finite because the underlying graph is acyclic. No
/// visited set here: in the minimized automaton a shared state legitimately
/// contributes one word per inbound path.
pub struct Completions<'a, G: StateGraph + ?Sized> {
    graph: &'a G,
    word: Vec<u8>,
    stack: Vec<Frame>,
}

impl<'a, G: StateGraph + ?Sized> Completions<'a, G> {
    pub(crate) fn new(graph: &'a G, prefix: &str) -> Self {
        // Walk the prefix first; a missing transition means no completions.
        let mut node = graph.root();
        for &sym in prefix.as_bytes() {
            match graph.state(node).target(sym) {
                Some(next) => node = next,
                None => {
                    return Completions {
                        graph,
                        word: Vec::new(),
                        stack: Vec::new(),
                    }
                }
            }
        }
        Completions {
            graph,
            word: prefix.as_bytes().to_vec(),
            stack: vec![Frame::expand(graph, node)],
        }
    }
}

impl<G: StateGraph + ?Sized> Streamer for Completions<'_, G> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(frame) = self.stack.last_mut() {
            // 1) Emit this state's word once, before descending, so output
            //    stays lexicographically sorted.
            if !frame.yielded {
                frame.yielded = true;
                if self.graph.state(frame.id).is_accepting() {
                    return Some(
                        String::from_utf8(self.word.clone()).expect("alphabet is ascii"),
                    );
                }
            }
            // 2) Descend into the next child, smallest symbol first.
            if frame.next_edge < frame.edges.len() {
                let (sym, target) = frame.edges[frame.next_edge];
                frame.next_edge += 1;
                self.word.push(sym);
                let child = Frame::expand(self.graph, target);
                self.stack.push(child);
                continue;
            }
            // 3) Backtrack: drop the frame and revert the word buffer.
            self.stack.pop();
            self.word.pop();
        }
        None
    }
}
