//! setkit-spell - spelling checker over the setkit containers
//!
//! Usage:
//!   setkit-spell --dictionary <path> [--set avl|bst|hash|skip-list] [--seed <u64>] WORD...
//!
//! Logging goes to stderr and is filtered by `RUST_LOG`.

mod dictionary;
mod report;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use setkit::set::{BalancedTreeSet, ChainedHashSet, RandomPromotion, Set, TieredLinkedSet};
use setkit::suggest::SuggestionEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "setkit-spell")]
#[command(about = "Checks words against a dictionary and suggests corrections")]
struct Cli {
    /// Dictionary file, one word per line
    #[arg(long, short = 'd')]
    dictionary: PathBuf,

    /// Container holding the dictionary
    #[arg(long, value_enum, default_value_t = SetKind::Avl)]
    set: SetKind,

    /// Seed for the skip list's level promotion (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Words to check
    #[arg(required = true)]
    words: Vec<String>,
}

/// Container variants selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SetKind {
    /// Balanced AVL tree
    Avl,
    /// Binary search tree without rebalancing
    Bst,
    /// Separately chained hash table
    Hash,
    /// Skip list
    SkipList,
}

fn build_set(kind: SetKind, seed: Option<u64>) -> Box<dyn Set<String>> {
    match kind {
        SetKind::Avl => Box::new(BalancedTreeSet::new()),
        SetKind::Bst => Box::new(BalancedTreeSet::with_balancing(false)),
        SetKind::Hash => Box::new(ChainedHashSet::with_default_hasher()),
        SetKind::SkipList => {
            let promotion = seed.map_or_else(RandomPromotion::new, RandomPromotion::with_seed);
            Box::new(TieredLinkedSet::with_promotion(promotion))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "setkit=info,setkit_spell=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.seed.is_some() && cli.set != SetKind::SkipList {
        tracing::warn!(set = ?cli.set, "--seed only affects the skip list; ignoring it");
    }

    let mut words = build_set(cli.set, cli.seed);
    let file = File::open(&cli.dictionary)
        .with_context(|| format!("Failed to open dictionary {}", cli.dictionary.display()))?;
    let stats = dictionary::load(BufReader::new(file), words.as_mut())
        .with_context(|| format!("Failed to read dictionary {}", cli.dictionary.display()))?;
    tracing::info!(
        set = ?cli.set,
        lines = stats.lines,
        entries = stats.entries,
        words = words.size(),
        "loaded dictionary"
    );

    let engine = SuggestionEngine::new(&*words);
    let mut stdout = io::stdout().lock();
    for word in &cli.words {
        let report = report::check(&engine, word);
        writeln!(stdout, "{report}").context("Failed to write report")?;
    }
    Ok(())
}
