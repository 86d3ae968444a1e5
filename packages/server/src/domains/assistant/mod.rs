//! Assistant domain - AI answers to visitor questions
//!
//! Responsibilities:
//! - Selecting directory context for a question
//! - Calling the language model with a fallback answer
//! - Usage logging and one-shot usefulness votes

pub mod activities;
pub mod context;
pub mod models;
pub mod prompt;

pub use models::{FeedbackFilter, FeedbackRecord};
