pub mod feedback;

pub use feedback::{FeedbackFilter, FeedbackRecord, VoteOutcome};
