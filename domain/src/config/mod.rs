//! Configuration value objects shared across layers

pub mod issue;

pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
