//! In-memory word automata: a baseline trie and a minimal DAFSA built
//! incrementally from sorted input, sharing one prefix/completion query
//! surface and a serializable graph view for external rendering.

mod dafsa;
mod error;
mod graph;
mod state;
mod streamer;
pub mod token;
mod trie;
mod view;

pub use dafsa::Dafsa;
pub use error::{GraphError, Result};
pub use graph::{PrefixTrace, StateGraph, TraceEdge};
pub use state::{State, StateId};
pub use streamer::{Completions, Streamer};
pub use trie::Trie;
pub use view::{ViewEdge, ViewGraph, ViewNode};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a wordlist file into a sorted, deduplicated token list, ready for
/// ordered insertion. One entry per line; blank lines and lines starting
/// with `#` are skipped, and each line is tokenized, so free text works as
/// well as one word per line.
pub fn load_wordlist<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        words.extend(token::tokenize(trimmed));
    }
    words.sort();
    words.dedup();
    Ok(words)
}
