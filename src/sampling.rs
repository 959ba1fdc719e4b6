/*!
 * Endless sampling: draw random value, count ranges enclosing it, emit result.
 *
 * Loop runs as a task on the (single threaded) async runtime and yields back to the scheduler
 * after every iteration, so other tasks (keyboard watcher) get a chance to run and set
 * the cancellation flag. Flag is checked once per iteration, after the result is emitted.
 */

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;

use crate::error::{Error, Result};
use crate::range_pool::{RandomSource, RangePool};

/// One loop result: drawn value and number of ranges enclosing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub value: u32,
    pub count: usize,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => Enclosed by {} range(s)", self.value, self.count)
    }
}

/// Receives every sample produced by the loop.
pub trait SampleSink {
    fn emit(&mut self, sample: Sample) -> Result<()>;
}

/// Writes samples as text lines.
pub struct LineSink<W: Write> {
    out: W,
    eol: &'static str,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        LineSink { out, eol: "\n" }
    }

    pub fn raw_terminal(mut self, raw: bool) -> Self {
        self.eol = crate::input::line_ending(raw);
        self
    }
}

impl<W: Write> SampleSink for LineSink<W> {
    fn emit(&mut self, sample: Sample) -> Result<()> {
        write!(self.out, "{}{}", sample, self.eol)?;
        self.out.flush()?;
        Ok(())
    }
}

impl SampleSink for Vec<Sample> {
    fn emit(&mut self, sample: Sample) -> Result<()> {
        self.push(sample);
        Ok(())
    }
}

/// Stop request shared between keyboard watcher and sampling loop.
/// Starts cleared, once set it is never reset.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal(Arc<AtomicBool>);

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Summary handed to shutdown callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub samples: u64,
}

/// Owns range pool for the rest of program life and produces samples from it.
pub struct SamplingLoop<R, S> {
    pool: RangePool,
    rng: R,
    sink: S,
    max_value: u32,
    state: LoopState,
    samples: u64,
}

impl<R: RandomSource, S: SampleSink> SamplingLoop<R, S> {
    /// Loop starts in `Running` state; values are drawn from `[0, max_value)`.
    pub fn new(pool: RangePool, rng: R, sink: S, max_value: u32) -> Self {
        SamplingLoop { pool, rng, sink, max_value, state: LoopState::Running, samples: 0 }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Single iteration: draw, count, emit. Always completes once started.
    pub fn step(&mut self) -> Result<Sample> {
        if self.state == LoopState::Stopped {
            return Err(Error::InvalidInput("sampling loop already stopped".into()));
        }
        let value = self.rng.below(self.max_value)?;
        let count = self.pool.count_enclosing(value);
        let sample = Sample { value, count };
        self.sink.emit(sample)?;
        self.samples += 1;
        Ok(sample)
    }

    /// Runs iterations until `signal` is found set after an iteration.
    /// Then loop moves to `Stopped` and `on_shutdown` is called (exactly once, it is consumed).
    pub async fn run<F>(&mut self, signal: &CancellationSignal, on_shutdown: F) -> Result<LoopReport>
    where
        F: FnOnce(&LoopReport),
    {
        loop {
            self.step()?;
            if signal.is_set() {
                break;
            }
            tokio::task::yield_now().await;
        }
        self.state = LoopState::Stopped;
        let report = LoopReport { samples: self.samples };
        info!("Sampling stopped after {} samples", report.samples);
        on_shutdown(&report);
        Ok(report)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///
