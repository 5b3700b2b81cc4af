use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

/// Identifier of a state in a [`StateArena`]. Dense, issued in allocation
/// order; id 0 is always the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// The root state of every arena.
    pub const ROOT: StateId = StateId(0);

    /// Raw index into the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single automaton state: deterministic transitions plus an accepting
/// flag. Transitions are keyed by symbol, so each symbol has at most one
/// target and iteration order is always ascending.
#[derive(Debug, Clone, Default)]
pub struct State {
    transitions: BTreeMap<u8, StateId>,
    accepting: bool,
}

impl State {
    /// Target of the transition on `symbol`, if present.
    pub fn target(&self, symbol: u8) -> Option<StateId> {
        self.transitions.get(&symbol).copied()
    }

    /// Whether a word ending at this state is accepted.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Outgoing edges in ascending symbol order.
    pub fn edges(&self) -> impl Iterator<Item = (u8, StateId)> + '_ {
        self.transitions.iter().map(|(&sym, &id)| (sym, id))
    }

    /// Number of outgoing edges.
    pub fn degree(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn set_transition(&mut self, symbol: u8, target: StateId) {
        self.transitions.insert(symbol, target);
    }

    pub(crate) fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Structural signature of this state as it currently stands.
    pub(crate) fn signature(&self) -> Signature {
        Signature {
            accepting: self.accepting,
            edges: self.edges().collect(),
        }
    }
}

/// Canonical encoding of a state's behavior: accepting flag plus the sorted
/// `(symbol, target)` pairs. Two states with equal signatures recognize the
/// same residual language and can share one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Signature {
    accepting: bool,
    edges: SmallVec<[(u8, StateId); 8]>,
}

/// Arena owning every state of one automaton. Identifiers are indices into
/// the backing vector; the counter lives here, scoped to one automaton.
/// The root occupies slot 0 and is allocated up front.
#[derive(Debug, Clone)]
pub(crate) struct StateArena {
    states: Vec<State>,
}

impl StateArena {
    pub fn new() -> Self {
        StateArena {
            states: vec![State::default()],
        }
    }

    /// Allocate a fresh, empty, non-accepting state.
    pub fn alloc(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(State::default());
        id
    }

    /// Allocate a copy of `id`: same transitions, same accepting flag.
    pub fn alloc_clone(&mut self, id: StateId) -> StateId {
        let copy = self.states[id.index()].clone();
        let fresh = StateId(self.states.len() as u32);
        self.states.push(copy);
        fresh
    }

    pub fn get(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn get_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }

    /// Total number of allocated states, orphans included.
    pub fn len(&self) -> usize {
        self.states.len()
    }
}
