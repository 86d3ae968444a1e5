mod ask;
mod feedback;

pub use ask::*;
pub use feedback::*;

use serde::Serialize;

use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct AssistantStatus {
    pub available: bool,
}

/// Whether a language model is configured
pub fn assistant_status(deps: &ServerDeps) -> AssistantStatus {
    AssistantStatus {
        available: deps.ai.is_some(),
    }
}
