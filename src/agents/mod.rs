//! LLM-backed agents.
//!
//! The task analyzer does the structured work (decomposition + parsing
//! with fallbacks); the planner, code companion, and tutor are thin
//! single-prompt wrappers around [`crate::llm::ChatClient`].

pub mod analyzer;
pub mod companion;
pub mod planner;
pub mod tutor;

pub use analyzer::{Complexity, TaskBreakdown};
