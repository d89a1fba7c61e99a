//! Tree model and forest algorithms.

pub mod locate;
pub mod node;
