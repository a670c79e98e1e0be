//! Retry state machine
//!
//! `Idle → Fetching(1) → WaitingRetry(1, deadline) → Fetching(2) … → Done`.
//! Time is passed in explicitly so every transition is deterministic.

use std::time::{Duration, Instant};

/// Where a fetch sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching { attempt: u32 },
    WaitingRetry { attempt: u32, deadline: Instant },
    Done,
}

/// Outcome of reporting a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Wait until `deadline`, then make attempt `attempt + 1`
    Retry { attempt: u32, deadline: Instant },
    /// No retries left; use a fallback
    Exhausted,
    /// The machine was not fetching; nothing changed
    Ignored,
}

#[derive(Debug, Clone)]
pub struct RetryMachine {
    max_retries: u32,
    delay: Duration,
    state: FetchState,
}

impl RetryMachine {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            state: FetchState::Idle,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// True while fetching or waiting for a retry
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            FetchState::Fetching { .. } | FetchState::WaitingRetry { .. }
        )
    }

    /// Begin a sequence. Returns the first attempt number, or `None` if a
    /// sequence is already active.
    pub fn start(&mut self) -> Option<u32> {
        if self.is_active() {
            return None;
        }
        self.state = FetchState::Fetching { attempt: 1 };
        Some(1)
    }

    /// The current attempt succeeded
    pub fn succeed(&mut self) {
        if let FetchState::Fetching { .. } = self.state {
            self.state = FetchState::Done;
        }
    }

    /// The current attempt failed at `now`
    pub fn fail(&mut self, now: Instant) -> Transition {
        let FetchState::Fetching { attempt } = self.state else {
            return Transition::Ignored;
        };

        if attempt <= self.max_retries {
            let deadline = now + self.delay;
            self.state = FetchState::WaitingRetry { attempt, deadline };
            Transition::Retry { attempt, deadline }
        } else {
            self.state = FetchState::Done;
            Transition::Exhausted
        }
    }

    /// Time left before the pending retry, if one is pending
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            FetchState::WaitingRetry { deadline, .. } => {
                Some(deadline.saturating_duration_since(now))
            }
            _ => None,
        }
    }

    /// Move to the next attempt once the deadline has passed
    pub fn retry_due(&mut self, now: Instant) -> Option<u32> {
        match self.state {
            FetchState::WaitingRetry { attempt, deadline } if now >= deadline => {
                let next = attempt + 1;
                self.state = FetchState::Fetching { attempt: next };
                Some(next)
            }
            _ => None,
        }
    }

    /// Stop an active sequence. Returns true if anything was stopped.
    pub fn abort(&mut self) -> bool {
        if self.is_active() {
            self.state = FetchState::Done;
            true
        } else {
            false
        }
    }
}
