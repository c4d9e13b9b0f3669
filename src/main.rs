/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dsi_progress_logger::prelude::*;
use level_crawler::prelude::*;
use level_crawler::source::http::DEFAULT_BASE_URL;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

/// Crawls a remote graph breadth first and prints the nodes at each
/// distance from a start node.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Use the sequential visit.
    #[arg(long, conflicts_with = "parallel")]
    sequential: bool,

    /// Use the parallel visit (the default).
    #[arg(long)]
    parallel: bool,

    /// The node to start from.
    node: String,

    /// The maximum distance from the start node.
    depth: usize,

    /// Number of workers of the parallel visit (0 for one per core).
    #[arg(short = 'j', long, default_value_t = DEFAULT_NUM_WORKERS)]
    threads: usize,

    /// Base URL of the neighbor lookup service.
    #[arg(long, env = "LEVEL_CRAWLER_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Timeout of a single lookup in seconds (0 for no timeout).
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Log every request and response.
    #[arg(long)]
    debug: bool,

    /// Increase logging verbosity (may be repeated).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(2 + args.verbose as usize)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let source = HttpSourceConfig::default()
        .base_url(&args.url)
        .timeout((args.timeout > 0).then(|| Duration::from_secs(args.timeout)))
        .debug(args.debug)
        .build()
        .with_context(|| format!("Cannot set up lookups on {}", args.url))?;

    let mode = if args.sequential {
        Mode::Sequential
    } else {
        Mode::Parallel {
            num_workers: args.threads,
        }
    };

    let mut pl = progress_logger![display_memory = true];
    let start = Instant::now();
    let levels = traverse(&source, &args.node, args.depth, mode, &mut pl);
    let elapsed = start.elapsed();

    let mut out = BufWriter::new(std::io::stdout().lock());
    for level in &levels {
        for node in level {
            writeln!(out, "- {node}")?;
        }
        writeln!(out, "{}", level.len())?;
    }
    writeln!(
        out,
        "Time to crawl ({mode}): {}s",
        elapsed.as_secs_f64()
    )?;
    out.flush()?;

    Ok(())
}
