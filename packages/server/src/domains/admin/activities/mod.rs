mod diagnostics;
mod export;
mod feedback_review;

pub use diagnostics::*;
pub use export::*;
pub use feedback_review::*;
