//! Example: feed candidate batches from stdin into a tracker, printing one JSON line per batch.
//!
//! Each input line is `<start_height> <id> <id> ...` (whitespace separated). Use `""` for an
//! empty identifier. Lines that do not start with a height are logged and skipped.
//!
//! Usage:
//!
//!   printf '1 a b\n1 a b\n1 a b\n' | cargo run -p acceptor --example tracker_stdin
//!
//! Options:
//!   --threshold <K>  Occurrences needed to accept a block. Default: 3.
//!   --no-prune       Keep confirmation buckets for closed heights.

use acceptor::{ConfirmationTracker, PruneMode, TrackerConfig};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

fn parse_line(line: &str) -> Result<Option<(u64, Vec<String>)>> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };
    let start: u64 = first
        .parse()
        .with_context(|| format!("start height {first:?} is not an unsigned integer"))?;
    if start == 0 {
        anyhow::bail!("start height must be at least 1");
    }
    let ids = tokens
        .map(|t| if t == "\"\"" { String::new() } else { t.to_string() })
        .collect();
    Ok(Some((start, ids)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = TrackerConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--threshold" => {
                i += 1;
                let k = args.get(i).context("--threshold requires a value")?;
                config.threshold = k.parse().context("--threshold must be an integer")?;
            }
            "--no-prune" => config.prune = PruneMode::Never,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: tracker_stdin [--threshold K] [--no-prune]\n\
                     Reads `<start_height> <id> <id> ...` lines from stdin and prints one JSON\n\
                     submission result per line.\n\
                     --threshold K  Occurrences needed to accept a block. Default: 3.\n\
                     --no-prune     Keep confirmation buckets for closed heights."
                );
                return Ok(());
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    let tracker = ConfirmationTracker::builder().config(config).build()?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line.context("read stdin")?;
        let (start, ids) = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(line = lineno + 1, reason = %e, "skipping malformed line");
                continue;
            }
        };
        let submission = tracker.submit_detailed(start, &ids);
        writeln!(stdout, "{}", serde_json::to_string(&submission)?)?;
    }

    let stats = tracker.stats();
    tracing::info!(
        accepted_height = tracker.accepted_height(),
        observed = stats.observed,
        abandoned = stats.abandoned,
        "done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_reads_height_and_ids() {
        let (start, ids) = parse_line("2 a \"\" b").unwrap().unwrap();
        assert_eq!(start, 2);
        assert_eq!(ids, vec!["a".to_string(), String::new(), "b".to_string()]);
    }

    #[test]
    fn parse_line_rejects_bad_heights() {
        assert!(parse_line("x a").is_err());
        assert!(parse_line("0 a").is_err());
        assert!(parse_line("   ").unwrap().is_none());
    }
}
