//! The state machine and presentation-side bookkeeping.

pub mod director;
pub mod machine;

pub use director::GameDirector;
pub use machine::{GuessOutcome, InputError, SequenceGame, SequenceGameBuilder};
