//! Cancellable fetch task
//!
//! Runs one fetch sequence on a worker thread. Each attempt runs on a
//! nested request thread so the per-request timeout and abort are enforced
//! regardless of what the source blocks on. Progress is reported through a
//! crossbeam channel, tagged with the generation the caller assigned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, select, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use crate::error::{QuoteError, Result};
use crate::quote::{random_fallback, FallbackReason, FetchedQuote, Quote};
use crate::source::QuoteSource;

use super::machine::{RetryMachine, Transition};
use super::policy::RetryPolicy;

/// Progress of a fetch sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A request is about to be made (1-based)
    Attempt { attempt: u32 },
    /// Attempt `attempt` failed; the next one follows after `delay`
    RetryScheduled {
        attempt: u32,
        max_retries: u32,
        delay: Duration,
    },
    /// Whole seconds left before the next attempt
    Countdown { attempt: u32, remaining_secs: u64 },
    /// The sequence is over
    Finished(FetchedQuote),
}

/// A `FetchEvent` tagged with the generation of the task that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchUpdate {
    pub generation: u64,
    pub event: FetchEvent,
}

/// A fetch sequence waiting to be spawned
pub struct FetchTask {
    source: Arc<dyn QuoteSource>,
    policy: RetryPolicy,
    generation: u64,
}

impl FetchTask {
    pub fn new(source: Arc<dyn QuoteSource>, policy: RetryPolicy) -> Self {
        Self {
            source,
            policy,
            generation: 0,
        }
    }

    /// Tag every update from this task with `generation`
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Start the sequence on its own thread
    pub fn spawn(self, updates: Sender<FetchUpdate>) -> Result<FetchHandle> {
        let (cancel_tx, cancel_rx) = bounded(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let generation = self.generation;

        let runner = Runner {
            source: self.source,
            policy: self.policy,
            generation,
            updates,
            cancel_rx,
            cancelled: Arc::clone(&cancelled),
        };

        let thread = thread::Builder::new()
            .name("quote-fetch".into())
            .spawn(move || runner.run())?;

        Ok(FetchHandle {
            cancel_tx,
            cancelled,
            generation,
            thread: Some(thread),
        })
    }
}

/// Handle to a running fetch sequence
///
/// Dropping the handle aborts the sequence.
#[must_use = "dropping the handle aborts the fetch"]
pub struct FetchHandle {
    cancel_tx: Sender<()>,
    cancelled: Arc<AtomicBool>,
    generation: u64,
    thread: Option<JoinHandle<()>>,
}

impl FetchHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the sequence. No further updates are sent and no further
    /// requests are started.
    pub fn abort(&self) {
        self.cancelled.store(true, Ordering::Release);
        let _ = self.cancel_tx.try_send(());
    }

    pub fn is_aborted(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// True once the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Wait for the worker thread to exit
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

struct Runner {
    source: Arc<dyn QuoteSource>,
    policy: RetryPolicy,
    generation: u64,
    updates: Sender<FetchUpdate>,
    cancel_rx: Receiver<()>,
    cancelled: Arc<AtomicBool>,
}

impl Runner {
    fn run(self) {
        let mut machine = RetryMachine::new(self.policy.max_retries, self.policy.retry_delay);
        let Some(mut attempt) = machine.start() else {
            return;
        };

        loop {
            if !self.emit(FetchEvent::Attempt { attempt }) {
                return;
            }

            let Some(result) = self.request() else {
                debug!(generation = self.generation, attempt, "fetch aborted during request");
                return;
            };

            match result {
                Ok(quote) => {
                    machine.succeed();
                    debug!(generation = self.generation, attempt, "quote fetched");
                    self.emit(FetchEvent::Finished(FetchedQuote::remote(quote)));
                    return;
                }
                Err(e) => {
                    warn!(
                        source = self.source.name(),
                        attempt,
                        max_attempts = self.policy.max_attempts(),
                        error = %e,
                        "quote request failed"
                    );
                }
            }

            match machine.fail(Instant::now()) {
                Transition::Retry { attempt: failed, .. } => {
                    let scheduled = FetchEvent::RetryScheduled {
                        attempt: failed,
                        max_retries: self.policy.max_retries,
                        delay: self.policy.retry_delay,
                    };
                    if !self.emit(scheduled) || !self.wait_for_retry(&machine, failed) {
                        debug!(generation = self.generation, attempt = failed, "fetch aborted during retry wait");
                        return;
                    }
                    match machine.retry_due(Instant::now()) {
                        Some(next) => attempt = next,
                        None => return,
                    }
                }
                Transition::Exhausted => {
                    let quote = random_fallback(&mut rand::rng());
                    debug!(generation = self.generation, "retries exhausted, using fallback");
                    self.emit(FetchEvent::Finished(FetchedQuote::fallback(
                        quote,
                        FallbackReason::Exhausted,
                    )));
                    return;
                }
                Transition::Ignored => return,
            }
        }
    }

    /// Run one request against the source. `None` means aborted.
    fn request(&self) -> Option<Result<Quote>> {
        let (tx, rx) = bounded(1);
        let source = Arc::clone(&self.source);
        let spawned = thread::Builder::new()
            .name("quote-request".into())
            .spawn(move || {
                let _ = tx.send(source.fetch());
            });
        if let Err(e) = spawned {
            return Some(Err(QuoteError::Io(e)));
        }

        let timeout = self.policy.request_timeout;
        let cancel_rx = &self.cancel_rx;
        select! {
            recv(rx) -> msg => Some(msg.unwrap_or_else(|_| {
                Err(QuoteError::Decode("request worker exited without a result".into()))
            })),
            recv(cancel_rx) -> _ => None,
            default(timeout) => Some(Err(QuoteError::Timeout(format!(
                "no response within {:.1}s",
                timeout.as_secs_f32()
            )))),
        }
    }

    /// Count down to the pending retry. Returns false if aborted.
    fn wait_for_retry(&self, machine: &RetryMachine, attempt: u32) -> bool {
        let mut last_secs = None;
        loop {
            let Some(remaining) = machine.remaining(Instant::now()) else {
                return true;
            };

            let secs = ceil_secs(remaining);
            if last_secs != Some(secs) {
                if !self.emit(FetchEvent::Countdown {
                    attempt,
                    remaining_secs: secs,
                }) {
                    return false;
                }
                last_secs = Some(secs);
            }

            if remaining.is_zero() {
                return true;
            }

            match self.cancel_rx.recv_timeout(remaining.min(self.policy.countdown_tick)) {
                Err(RecvTimeoutError::Timeout) => {}
                // Explicit abort, or the handle was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    fn emit(&self, event: FetchEvent) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return false;
        }
        self.updates
            .send(FetchUpdate {
                generation: self.generation,
                event,
            })
            .is_ok()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    let millis = d.as_millis() as u64;
    millis.div_ceil(1000)
}
