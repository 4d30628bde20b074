//! Input debouncing with supersession
//!
//! One suggestion pass per quiescent stretch of typing. Every keystroke
//! issues a pass with a monotonically increasing sequence number; issuing
//! a new pass makes every earlier one stale. A pass whose window elapses
//! while it is still the latest commits; the rest are superseded.
//! Last-writer-wins is decided by issue order, not completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Lifecycle of a suggestion pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// No pass has been issued yet
    Idle,
    /// The latest pass is waiting out its quiescence window
    Pending,
    /// The window elapsed uninterrupted; the pass owns the display
    Committed,
    /// A newer pass was issued before the window elapsed
    Superseded,
}

/// One issued suggestion pass
#[derive(Debug, Clone)]
pub struct Pass {
    pub seq: u64,
    pub query: String,
}

/// Issues sequence-numbered passes and decides which one survives
pub struct Debouncer {
    window: Duration,
    latest: AtomicU64,
    last_outcome: Mutex<PassState>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            latest: AtomicU64::new(0),
            last_outcome: Mutex::new(PassState::Idle),
        }
    }

    /// The configured quiescence window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Issue a pass for the current query text. All earlier passes become
    /// stale immediately.
    pub fn issue(&self, query: &str) -> Pass {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_outcome.lock().unwrap() = PassState::Pending;
        Pass {
            seq,
            query: query.to_string(),
        }
    }

    /// Whether a pass is still the most recently issued one
    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Wait out the quiescence window, then report whether the pass
    /// committed or was superseded by a newer keystroke.
    pub async fn settle(&self, pass: &Pass) -> PassState {
        tokio::time::sleep(self.window).await;
        if self.is_latest(pass.seq) {
            *self.last_outcome.lock().unwrap() = PassState::Committed;
            PassState::Committed
        } else {
            PassState::Superseded
        }
    }

    /// Observable state of the machine: `Idle` before the first pass,
    /// otherwise the latest pass's progress.
    pub fn state(&self) -> PassState {
        if self.latest.load(Ordering::SeqCst) == 0 {
            PassState::Idle
        } else {
            *self.last_outcome.lock().unwrap()
        }
    }
}
