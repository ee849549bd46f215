//! Analysis results consumed by later translation stages.
//!
//! Results are keyed by [`NodeId`](crate::ast::NodeId) rather than stored on
//! AST nodes, so the tree stays immutable while passes run.

pub mod loop_info;

pub use loop_info::{Disqualification, LoopAnalysis, LoopInfo};
