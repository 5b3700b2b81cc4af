use wordgraph::{Dafsa, GraphError, StateGraph, Streamer, Trie};

/// All prefixes and single-symbol extensions of the given words; a cheap
/// probe set of near-misses for language-equivalence checks.
fn probes(words: &[&str]) -> Vec<String> {
    let mut probes = Vec::new();
    for &w in words {
        for i in 0..w.len() {
            probes.push(w[..i].to_string());
        }
        for sym in b'a'..=b'z' {
            let mut longer = w.to_string();
            longer.push(sym as char);
            probes.push(longer);
        }
    }
    probes
}

#[test]
fn language_equivalence_with_baseline() {
    let words = ["ant", "anthem", "ants", "art", "bat", "bats", "cob", "cod", "code"];
    let trie = Trie::from_words(words).unwrap();
    let dafsa = Dafsa::from_words(words).unwrap();

    for &w in &words {
        assert!(dafsa.contains(w), "dafsa lost {:?}", w);
        assert!(trie.contains(w));
    }
    for probe in probes(&words) {
        assert_eq!(
            dafsa.contains(&probe),
            trie.contains(&probe),
            "structures disagree on {:?}",
            probe
        );
    }
    assert_eq!(dafsa.completions("").collect(), trie.completions("").collect());
}

#[test]
fn shared_suffixes_merge() {
    // Baseline spends 6 states on ant/art; the minimal automaton folds the
    // accepting 't' leaves together and then the 'n'/'r' states above them,
    // leaving root -a-> . -{n,r}-> . -t-> accept.
    let trie = Trie::from_words(["ant", "art"]).unwrap();
    let dafsa = Dafsa::from_words(["ant", "art"]).unwrap();
    assert_eq!(trie.state_count(), 6);
    assert_eq!(dafsa.state_count(), 4);
    assert!(dafsa.state_count() < trie.state_count());
    assert_eq!(dafsa.export_view().edges.len(), 4);
}

#[test]
fn distinct_suffixes_share_only_the_accept_state() {
    // cob/code diverge after "co" and nothing below the fork matches except
    // the childless accepting leaves, which always share one signature.
    let trie = Trie::from_words(["cob", "code"]).unwrap();
    let dafsa = Dafsa::from_words(["cob", "code"]).unwrap();
    assert_eq!(trie.state_count(), 6);
    assert_eq!(dafsa.state_count(), 5);
    assert!(dafsa.contains("cob") && dafsa.contains("code"));
    assert!(!dafsa.contains("cobe") && !dafsa.contains("cod"));
}

#[test]
fn minimality_bound_holds_generally() {
    let words = ["ant", "anthem", "art", "bandana", "banana", "cob", "code"];
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort();
    let trie = Trie::from_words(&sorted).unwrap();
    let dafsa = Dafsa::from_words(&sorted).unwrap();
    assert!(dafsa.state_count() <= trie.state_count());
}

#[test]
fn deterministic_shape() {
    let words = ["ant", "anthem", "art", "bat", "bats"];
    let a = Dafsa::from_words(words).unwrap();
    let b = Dafsa::from_words(words).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn out_of_order_insertion_is_an_error() {
    let mut dafsa = Dafsa::new();
    dafsa.insert("bat").unwrap();
    let err = dafsa.insert("bar").unwrap_err();
    match err {
        GraphError::OutOfOrder { previous, word } => {
            assert_eq!(previous, "bat");
            assert_eq!(word, "bar");
        }
        other => panic!("expected OutOfOrder, got {:?}", other),
    }
}

#[test]
fn repeated_word_is_a_noop() {
    let mut dafsa = Dafsa::new();
    dafsa.insert("ant").unwrap();
    dafsa.insert("ant").unwrap();
    dafsa.finish();
    assert_eq!(dafsa.completions("").collect(), vec!["ant"]);
    assert_eq!(dafsa.state_count(), 4);
}

#[test]
fn rejects_invalid_tokens() {
    let mut dafsa = Dafsa::new();
    assert!(dafsa.insert("Ant").is_err());
    assert!(dafsa.insert("art s").is_err());
    assert!(dafsa.insert("").is_err());
    assert_eq!(dafsa.state_count(), 1);
}

#[test]
fn finish_is_idempotent() {
    let mut dafsa = Dafsa::new();
    for w in ["ant", "art", "bat"] {
        dafsa.insert(w).unwrap();
    }
    dafsa.finish();
    let fingerprint = dafsa.fingerprint();
    let states = dafsa.state_count();
    let register = dafsa.register_len();
    dafsa.finish();
    assert_eq!(dafsa.fingerprint(), fingerprint);
    assert_eq!(dafsa.state_count(), states);
    assert_eq!(dafsa.register_len(), register);
}

#[test]
fn finish_without_inserts_is_safe() {
    let mut dafsa = Dafsa::new();
    dafsa.finish();
    dafsa.finish();
    assert_eq!(dafsa.state_count(), 1);
    assert!(dafsa.completions("").collect().is_empty());
}

#[test]
fn unfinished_automaton_is_language_correct() {
    let mut dafsa = Dafsa::new();
    dafsa.insert("ant").unwrap();
    dafsa.insert("art").unwrap();
    // No finish: the suffix of "art" is still pending, but queries hold.
    assert!(dafsa.contains("ant"));
    assert!(dafsa.contains("art"));
    assert!(!dafsa.contains("arts"));
    assert_eq!(dafsa.completions("").collect(), vec!["ant", "art"]);
}

#[test]
fn multi_batch_append_matches_single_batch() {
    // Append after finish(): the previous word's path is frozen, so the
    // builder must clone rather than mutate registered states.
    let mut batched = Dafsa::new();
    batched.insert("ant").unwrap();
    batched.finish();
    batched.insert("anz").unwrap();
    batched.finish();

    let single = Dafsa::from_words(["ant", "anz"]).unwrap();
    assert!(batched.contains("ant"));
    assert!(batched.contains("anz"));
    assert!(!batched.contains("an"));
    assert_eq!(batched.fingerprint(), single.fingerprint());
    assert_eq!(batched.state_count(), 4);
}

#[test]
fn multi_batch_append_preserves_shared_states() {
    // "bn" lands on a state shared with the "an" path after the first
    // batch; appending "bnz" must not leak it onto the "an" side.
    let mut batched = Dafsa::new();
    for w in ["ant", "art", "bnt"] {
        batched.insert(w).unwrap();
    }
    batched.finish();
    batched.insert("bnz").unwrap();
    batched.finish();

    for w in ["ant", "art", "bnt", "bnz"] {
        assert!(batched.contains(w), "lost {:?}", w);
    }
    assert!(!batched.contains("anz"), "append corrupted a shared state");
    assert!(!batched.contains("arz"));

    let single = Dafsa::from_words(["ant", "art", "bnt", "bnz"]).unwrap();
    assert_eq!(batched.fingerprint(), single.fingerprint());
}

#[test]
fn multi_batch_ordering_spans_batches() {
    let mut dafsa = Dafsa::new();
    dafsa.insert("bat").unwrap();
    dafsa.finish();
    // The sorted-input contract is global, not per batch.
    assert!(matches!(
        dafsa.insert("ant"),
        Err(GraphError::OutOfOrder { .. })
    ));
    // Re-inserting the last word across a batch boundary stays a no-op.
    dafsa.insert("bat").unwrap();
    dafsa.finish();
    assert_eq!(dafsa.completions("").collect(), vec!["bat"]);
}

#[test]
fn register_tracks_canonical_states() {
    let mut dafsa = Dafsa::new();
    dafsa.insert("ant").unwrap();
    dafsa.insert("art").unwrap();
    // Only the suffix of "ant" past the common prefix "a" is folded so far.
    assert_eq!(dafsa.register_len(), 2);
    dafsa.finish();
    // The full "art" path is folded: its leaf and 'r' state merge into
    // registered equivalents, and the 'a' state becomes canonical.
    assert_eq!(dafsa.register_len(), 3);
}
