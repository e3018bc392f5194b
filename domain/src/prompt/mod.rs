//! Prompt domain
//!
//! Templates for the reasoning-service calls made during a council run.

mod template;

pub use template::CouncilPromptTemplate;
