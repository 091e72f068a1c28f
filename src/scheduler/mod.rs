//! Timed suspension points for the single game timeline.
//!
//! Sequence playback and inter-round pauses are modeled as suspension
//! points: the state machine asks its `Scheduler` to deliver a `Wake` after
//! a delay, yields, and resumes in `SequenceGame::resume` when the wake
//! comes back. There is exactly one timeline; nothing here is thread-safe
//! and nothing needs to be.
//!
//! ## Stale wakes
//!
//! Every wake carries the epoch it was scheduled under. Restarting the game
//! bumps the epoch, so wakes from a cancelled playback are recognized and
//! discarded on delivery instead of mutating a game that has since been
//! reset.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Generation counter distinguishing one game timeline from the next.
pub type Epoch = u64;

/// Resume point within the round lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Lead-in elapsed; light the first button of the playback.
    FirstHighlight,
    /// Highlight duration elapsed; darken the lit button.
    Unhighlight,
    /// Inter-highlight pause elapsed; light the next button.
    NextHighlight,
    /// Trailing pause elapsed; hand the turn to the player.
    BeginInput,
    /// Inter-round pause elapsed; extend the sequence and present it.
    NextRound,
}

/// A scheduled resumption of the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wake {
    /// Epoch the wake was scheduled under. Mismatched wakes are stale.
    pub epoch: Epoch,
    /// Where to resume.
    pub step: Step,
}

impl Wake {
    /// Create a wake for the given epoch and step.
    #[must_use]
    pub const fn new(epoch: Epoch, step: Step) -> Self {
        Self { epoch, step }
    }
}

/// Timer capability injected into the core.
///
/// `after` registers a wake for delivery once `delay` has elapsed; the
/// driver delivers due wakes back into `SequenceGame::resume`. A zero delay
/// is delivered on the next poll, never synchronously inside `after`.
pub trait Scheduler {
    /// Deliver `wake` after `delay`.
    fn after(&mut self, delay: Duration, wake: Wake);
}

impl<S: Scheduler> Scheduler for Rc<RefCell<S>> {
    fn after(&mut self, delay: Duration, wake: Wake) {
        self.borrow_mut().after(delay, wake);
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    wake: Wake,
}

// Min-heap order: earliest deadline first, insertion order breaking ties.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

/// Manually-advanced scheduler for frame-loop hosts and tests.
///
/// The driver owns the clock: call `advance(dt)` once per frame and feed
/// the returned wakes into `SequenceGame::resume` in order.
///
/// ```
/// use std::time::Duration;
/// use sequence_recall::scheduler::{FrameScheduler, Scheduler, Step, Wake};
///
/// let mut scheduler = FrameScheduler::new();
/// scheduler.after(Duration::from_millis(500), Wake::new(1, Step::Unhighlight));
///
/// assert!(scheduler.advance(Duration::from_millis(100)).is_empty());
/// let due = scheduler.advance(Duration::from_millis(400));
/// assert_eq!(due, vec![Wake::new(1, Step::Unhighlight)]);
/// ```
#[derive(Debug, Default)]
pub struct FrameScheduler {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Entry>,
}

impl FrameScheduler {
    /// Create an empty scheduler with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scheduler's current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of wakes not yet due.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock by `dt` and collect every wake that came due,
    /// ordered by deadline then insertion.
    pub fn advance(&mut self, dt: Duration) -> Vec<Wake> {
        self.now += dt;

        let mut due = Vec::new();
        while self
            .pending
            .peek()
            .is_some_and(|entry| entry.due <= self.now)
        {
            if let Some(entry) = self.pending.pop() {
                due.push(entry.wake);
            }
        }
        due
    }
}

impl Scheduler for FrameScheduler {
    fn after(&mut self, delay: Duration, wake: Wake) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Entry {
            due: self.now + delay,
            seq,
            wake,
        });
    }
}
