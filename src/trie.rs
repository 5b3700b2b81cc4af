use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::graph::StateGraph;
use crate::state::{State, StateArena, StateId};
use crate::token;

/// Baseline word set: a plain prefix tree with no state sharing.
///
/// Serves as ground truth for the minimized automaton — both recognize
/// exactly the same language, the trie just spends one state per distinct
/// prefix. Insertion order does not matter here.
pub struct Trie {
    arena: StateArena,
    words: FxHashSet<String>,
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            arena: StateArena::new(),
            words: FxHashSet::default(),
        }
    }

    /// Insert a word, allocating a fresh state for every symbol past the
    /// longest already-present prefix. Duplicate inserts are no-ops.
    pub fn insert(&mut self, word: &str) -> Result<()> {
        token::validate(word)?;
        if self.words.contains(word) {
            return Ok(());
        }
        self.words.insert(word.to_string());
        let mut node = StateId::ROOT;
        for &sym in word.as_bytes() {
            node = match self.arena.get(node).target(sym) {
                Some(next) => next,
                None => {
                    let fresh = self.arena.alloc();
                    self.arena.get_mut(node).set_transition(sym, fresh);
                    fresh
                }
            };
        }
        self.arena.get_mut(node).set_accepting(true);
        Ok(())
    }

    /// Build a trie from an iterator of words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word.as_ref())?;
        }
        Ok(trie)
    }

    /// Number of distinct words inserted.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl StateGraph for Trie {
    fn root(&self) -> StateId {
        StateId::ROOT
    }

    fn state(&self, id: StateId) -> &State {
        self.arena.get(id)
    }
}
