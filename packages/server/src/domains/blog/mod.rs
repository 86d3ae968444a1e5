//! Blog domain - articles written in the back office

pub mod activities;
pub mod models;

pub use models::{BlogPost, BlogPostInput};
