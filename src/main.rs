/*!
    Program that generates pool of random ranges and then, until stopped, draws random numbers
    and reports how many of the ranges enclose each of them.
 ```
Usage:
   rangecount [--ranges N] [--seed S]
where:
   N  - number of ranges to generate, 1..=1000000000 (default 1000000)
   S  - seed for random number generator (random when omitted)
```
   Every drawn number produces one line `<value> => Enclosed by <count> range(s)`.
   Press `q` to stop. Set `RUST_LOG=debug` to see diagnostics on stderr
   (while the terminal is in raw mode they end with `\r\n` as well).
 */

#[macro_use] extern crate anyhow;

use std::io::stdout;
use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod args;
mod counter;
mod error;
mod input;
mod logging;
mod range_pool;
mod sampling;

use args::Cli;
use input::Keyboard;
use range_pool::RangePool;
use sampling::{CancellationSignal, LineSink, LoopReport, SamplingLoop};

/// Ranges and sampled values lie in `[0, MAX_VALUE)`.
const MAX_VALUE: u32 = 1_000_000_000;

/// Number of ranges generated when `--ranges` is not given.
const DEFAULT_RANGES: usize = 1_000_000;

/// Hard limit for `--ranges`.
const RANGES_CEILING: usize = 1_000_000_000;

/// Key that stops sampling.
const QUIT_KEY: char = 'q';

/// Program main function.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let interactive = input::stdin_is_terminal();
    logging::init(interactive);

    let cli = Cli::parse_or_exit();
    info!("Configuration: {:?}", cli);

    println!("Generating {} ranges", cli.ranges);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let started = Instant::now();
    let pool = RangePool::construct(cli.ranges, MAX_VALUE, &mut rng)?;
    info!("Generated and sorted {} ranges in {:?}", pool.len(), started.elapsed());
    if let Some((lo, hi)) = pool.bounds() {
        debug!("Ranges cover [{}, {})", lo, hi);
    }

    let signal = CancellationSignal::new();
    let keyboard = Keyboard::attach(signal.clone())?;

    let sink = LineSink::new(stdout()).raw_terminal(keyboard.is_some());
    let mut sampler = SamplingLoop::new(pool, rng, sink, MAX_VALUE);
    let outcome = sampler
        .run(&signal, |report| info!("Shutting down, {} samples emitted", report.samples))
        .await;

    // Terminal has to be restored on error path as well.
    let detached = match keyboard {
        Some(keyboard) => keyboard.detach().await,
        None => Ok(()),
    };
    shutdown_result(outcome, detached)
}

/// Merges loop and keyboard results; error that ended the loop is reported first.
fn shutdown_result(outcome: error::Result<LoopReport>, detached: Result<()>) -> Result<()> {
    match (outcome, detached) {
        (Ok(_), Ok(())) => Ok(()),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => bail!("Sampling failed: {}", e),
        (Err(e), Err(k)) => bail!("Sampling failed: {} (keyboard: {:#})", e, k),
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///
