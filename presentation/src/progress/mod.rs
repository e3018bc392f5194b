//! Console progress reporters

pub mod reporter;
