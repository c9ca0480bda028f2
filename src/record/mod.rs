//! Recording and replaying move sequences, and high-score entries.

pub mod event;
pub mod recorder;
pub mod score;

pub use event::{Event, EventRecord};
pub use recorder::Recorder;
pub use score::ScoreRecord;
