use std::cmp::Ordering;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::StateGraph;
use crate::state::{Signature, State, StateArena, StateId};
use crate::token;

/// Minimal acyclic automaton built incrementally from sorted words.
///
/// Construction follows the classic sorted-input scheme: each insertion
/// first folds the part of the previous word's suffix that can no longer
/// change (everything past the common prefix with the new word), merging
/// states with equal signatures through the register, then extends the
/// graph with the new word's diverging suffix. [`finish`](Dafsa::finish)
/// folds the last pending suffix; until then the automaton is
/// language-correct but not yet maximally shared.
///
/// Words must arrive in non-decreasing lexicographic order. This is a
/// caller contract, not something the structure can recover from: a
/// violation is reported as [`GraphError::OutOfOrder`] and the automaton
/// should be discarded and rebuilt from a sorted list.
pub struct Dafsa {
    arena: StateArena,
    /// Signature -> canonical state. An entry here freezes its state.
    register: FxHashMap<Signature, StateId>,
    frozen: FxHashSet<StateId>,
    previous_word: String,
}

impl Dafsa {
    pub fn new() -> Self {
        Dafsa {
            arena: StateArena::new(),
            register: FxHashMap::default(),
            frozen: FxHashSet::default(),
            previous_word: String::new(),
        }
    }

    /// Insert a word. A repeated insert of the previous word is a no-op;
    /// anything lexicographically smaller is an error.
    pub fn insert(&mut self, word: &str) -> Result<()> {
        token::validate(word)?;
        match word.cmp(self.previous_word.as_str()) {
            Ordering::Less => {
                return Err(GraphError::OutOfOrder {
                    previous: self.previous_word.clone(),
                    word: word.to_string(),
                })
            }
            Ordering::Equal => return Ok(()),
            Ordering::Greater => {}
        }

        let lcp = common_prefix_len(word, &self.previous_word);
        self.minimize(lcp);

        // Re-walk the common prefix. States on it are normally still
        // mutable, but after a finish() the whole previous path is frozen;
        // mutating a registered state would invalidate its register entry
        // (and, for merge targets, the language of other paths), so frozen
        // states are cloned and the parent edge rewired instead.
        let mut node = StateId::ROOT;
        for &sym in &word.as_bytes()[..lcp] {
            let next = self
                .arena
                .get(node)
                .target(sym)
                .expect("common prefix lies on the previous word's path");
            let next = if self.frozen.contains(&next) {
                let copy = self.arena.alloc_clone(next);
                debug!(original = %next, clone = %copy, "cloned frozen prefix state for append");
                self.arena.get_mut(node).set_transition(sym, copy);
                copy
            } else {
                next
            };
            node = next;
        }

        // Fresh state per remaining symbol of the new word.
        for &sym in &word.as_bytes()[lcp..] {
            let fresh = self.arena.alloc();
            self.arena.get_mut(node).set_transition(sym, fresh);
            node = fresh;
        }
        self.arena.get_mut(node).set_accepting(true);

        self.previous_word.clear();
        self.previous_word.push_str(word);
        Ok(())
    }

    /// Fold the pending suffix of the last inserted word all the way to the
    /// root. Must be called before the automaton is treated as maximally
    /// minimized; skipping it leaves the language intact but some states
    /// unshared. Idempotent, and a no-op with nothing pending.
    pub fn finish(&mut self) {
        self.minimize(0);
    }

    /// Build a finished automaton from sorted, deduplicated words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dafsa = Dafsa::new();
        for word in words {
            dafsa.insert(word.as_ref())?;
        }
        dafsa.finish();
        Ok(dafsa)
    }

    /// Most recently inserted word (empty before the first insert).
    pub fn previous_word(&self) -> &str {
        &self.previous_word
    }

    /// Number of canonical states in the equivalence register.
    pub fn register_len(&self) -> usize {
        self.register.len()
    }

    /// Walk backward along the previous word's path, from its full length
    /// down to `down_to`, one symbol at a time. Each step computes the
    /// child's signature from its *current* transitions — final by now,
    /// because deeper states were frozen by earlier iterations of this same
    /// walk — and either merges the child into a registered equivalent or
    /// registers it as the canonical state for that signature.
    fn minimize(&mut self, down_to: usize) {
        let symbols = self.previous_word.as_bytes();
        // Trace the path once up front. Merges rewrite transitions *of*
        // states on this path but never replace the path states themselves,
        // so the ids stay valid for the whole backward walk.
        let mut path: Vec<StateId> = Vec::with_capacity(symbols.len() + 1);
        path.push(StateId::ROOT);
        for &sym in symbols {
            match self.arena.get(*path.last().expect("path starts at root")).target(sym) {
                Some(next) => path.push(next),
                // Suffix already folded by an earlier pass; nothing below.
                None => break,
            }
        }

        let mut length = path.len() - 1;
        while length > down_to {
            let parent = path[length - 1];
            let child = path[length];
            let sym = symbols[length - 1];
            let signature = self.arena.get(child).signature();
            match self.register.get(&signature) {
                Some(&canonical) => {
                    // An equivalent state exists; repoint the parent at it.
                    // `child` becomes an orphan (on a repeated finish the
                    // canonical state *is* the child and nothing changes).
                    if canonical != child {
                        self.arena.get_mut(parent).set_transition(sym, canonical);
                        let symbol = sym as char;
                        debug!(%parent, %child, %canonical, %symbol,
                               "merged suffix state into canonical");
                    }
                }
                None => {
                    self.register.insert(signature, child);
                    self.frozen.insert(child);
                }
            }
            length -= 1;
        }
    }
}

impl Default for Dafsa {
    fn default() -> Self {
        Self::new()
    }
}

impl StateGraph for Dafsa {
    fn root(&self) -> StateId {
        StateId::ROOT
    }

    fn state(&self, id: StateId) -> &State {
        self.arena.get(id)
    }
}

/// Length of the longest common prefix of two words, in symbols.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix() {
        assert_eq!(common_prefix_len("ant", "art"), 1);
        assert_eq!(common_prefix_len("ant", "ant"), 3);
        assert_eq!(common_prefix_len("ant", "anthem"), 3);
        assert_eq!(common_prefix_len("ant", "bat"), 0);
        assert_eq!(common_prefix_len("", "bat"), 0);
    }
}
