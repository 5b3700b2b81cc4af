use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::Editor;

use wordgraph::{load_wordlist, token, Dafsa, StateGraph, Streamer, Trie};

/// A simple CLI for building and querying word automata.
#[derive(Parser)]
#[command(author, version, about = "Build and query a trie and a minimal DAFSA from a wordlist")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build both structures and compare their sizes
    Stats {
        /// Input file (defaults to stdin)
        #[arg(short, long, value_name = "INPUT")]
        input: Option<PathBuf>,
    },
    /// List every word completing the given prefix
    Complete {
        /// Input file (defaults to stdin)
        #[arg(short, long, value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Prefix to complete (default is empty: all words)
        #[arg(value_name = "PREFIX", default_value = "")]
        prefix: String,
        /// Query the baseline trie instead of the minimized automaton
        #[arg(long)]
        baseline: bool,
    },
    /// Trace a prefix path through the automaton
    Trace {
        /// Input file (defaults to stdin)
        #[arg(short, long, value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Prefix to trace
        #[arg(value_name = "PREFIX")]
        prefix: String,
        /// Trace the baseline trie instead of the minimized automaton
        #[arg(long)]
        baseline: bool,
    },
    /// Print the renderable graph view as JSON
    Export {
        /// Input file (defaults to stdin)
        #[arg(short, long, value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Export the baseline trie instead of the minimized automaton
        #[arg(long)]
        baseline: bool,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Interactive prefix explorer
    Shell {
        /// Input file (defaults to stdin)
        #[arg(short, long, value_name = "INPUT")]
        input: Option<PathBuf>,
    },
}

/// Read and normalize the word set: either a wordlist file or free text on
/// stdin, tokenized, sorted, deduplicated.
fn read_words(input: Option<PathBuf>) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    match input {
        Some(path) => Ok(load_wordlist(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(token::tokenize(&buf))
        }
    }
}

/// Feed the sorted words into both structures. An out-of-order error here
/// means the input pipeline is broken; there is no partial repair, so it
/// propagates and the caller starts over with corrected input.
fn build(words: &[String]) -> Result<(Trie, Dafsa), Box<dyn std::error::Error>> {
    let mut trie = Trie::new();
    let mut dafsa = Dafsa::new();
    for word in words {
        trie.insert(word)?;
        dafsa.insert(word)?;
    }
    dafsa.finish();
    Ok((trie, dafsa))
}

fn print_trace<G: StateGraph>(graph: &G, prefix: &str) {
    let trace = graph.trace_prefix(prefix);
    println!(
        "prefix {:?}: {}",
        prefix,
        if trace.accepted { "valid" } else { "invalid" }
    );
    for edge in &trace.visited_edges {
        println!("  {} -{}-> {}", edge.source, edge.symbol, edge.target);
    }
    if trace.accepted {
        let last = trace
            .visited_states
            .last()
            .copied()
            .unwrap_or_else(|| graph.root());
        println!("  states under match: {}", graph.reachable_ids(last).len());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { input } => {
            let words = read_words(input)?;
            let (trie, dafsa) = build(&words)?;
            let trie_view = trie.export_view();
            let dafsa_view = dafsa.export_view();
            println!("words:        {}", words.len());
            println!(
                "trie:         {} states, {} edges",
                trie.state_count(),
                trie_view.edges.len()
            );
            println!(
                "dafsa:        {} states, {} edges",
                dafsa.state_count(),
                dafsa_view.edges.len()
            );
            println!("register:     {} canonical states", dafsa.register_len());
            let saved = trie.state_count().saturating_sub(dafsa.state_count());
            println!("states saved: {}", saved);
        }
        Commands::Complete {
            input,
            prefix,
            baseline,
        } => {
            let words = read_words(input)?;
            let (trie, dafsa) = build(&words)?;
            let completions = if baseline {
                trie.completions(&prefix).collect()
            } else {
                dafsa.completions(&prefix).collect()
            };
            for word in completions {
                println!("{}", word);
            }
        }
        Commands::Trace {
            input,
            prefix,
            baseline,
        } => {
            let words = read_words(input)?;
            let (trie, dafsa) = build(&words)?;
            if baseline {
                print_trace(&trie, &prefix);
            } else {
                print_trace(&dafsa, &prefix);
            }
        }
        Commands::Export {
            input,
            baseline,
            pretty,
        } => {
            let words = read_words(input)?;
            let (trie, dafsa) = build(&words)?;
            let view = if baseline {
                trie.export_view()
            } else {
                dafsa.export_view()
            };
            let json = if pretty {
                serde_json::to_string_pretty(&view)?
            } else {
                serde_json::to_string(&view)?
            };
            println!("{}", json);
        }
        Commands::Shell { input } => {
            let words = read_words(input)?;
            let (trie, dafsa) = build(&words)?;
            run_shell(&trie, &dafsa)?;
        }
    }

    Ok(())
}

/// Help text for interactive shell commands.
const HELP_TEXT: &str = "\
Type a prefix to trace it and list its completions.
Commands:
  stats        show state counts for both structures
  help         show this help
  exit, quit   exit shell
";

/// Maximum completions printed per query before eliding the rest.
const SHELL_COMPLETION_LIMIT: usize = 25;

fn run_shell(trie: &Trie, dafsa: &Dafsa) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = Editor::<()>::new()?;
    println!("{} words loaded; type 'help' for commands", trie.word_count());
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                rl.add_history_entry(&line);
                match line.as_str() {
                    "" => continue,
                    "help" => print!("{}", HELP_TEXT),
                    "exit" | "quit" => break,
                    "stats" => {
                        println!(
                            "trie: {} states, dafsa: {} states",
                            trie.state_count(),
                            dafsa.state_count()
                        );
                    }
                    prefix => {
                        if let Err(e) = token::validate(prefix) {
                            println!("{}", e);
                            continue;
                        }
                        print_trace(dafsa, prefix);
                        let mut stream = dafsa.completions(prefix);
                        let mut shown = 0usize;
                        while let Some(word) = stream.next() {
                            if shown == SHELL_COMPLETION_LIMIT {
                                println!("  ...");
                                break;
                            }
                            let marker = if word == prefix { "=" } else { ">" };
                            println!("  {} {}", marker, word);
                            shown += 1;
                        }
                        if shown == 0 {
                            println!("  (no completions)");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
