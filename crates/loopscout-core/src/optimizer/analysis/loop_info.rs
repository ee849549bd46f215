//! Per-loop analysis records.
//!
//! Records live in a side-table keyed by the loop's [`NodeId`] instead of on
//! the AST node. The table is filled by the selection pass and read by later
//! legality and translation stages.

use crate::ast::NodeId;
use crate::errors::{AnalysisError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a loop stopped being a translation candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Disqualification {
    /// The loop (or a loop nested in it) calls something the library model
    /// does not recognize.
    UnrecognizedCall { signature: String },
    /// Too many return/break/continue statements directly in the loop.
    TooManyBranches { count: usize },
}

impl fmt::Display for Disqualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disqualification::UnrecognizedCall { signature } => {
                write!(f, "unrecognized call {}", signature)
            }
            Disqualification::TooManyBranches { count } => {
                write!(f, "{} branch statements", count)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopInfo {
    /// Body block of the method the loop belongs to.
    pub enclosing_block: Option<NodeId>,
    /// Loop nesting depth, 1 for outermost loops.
    pub depth: usize,
    interesting: bool,
    reasons: Vec<Disqualification>,
}

impl LoopInfo {
    fn new(enclosing_block: Option<NodeId>, depth: usize) -> Self {
        Self {
            enclosing_block,
            depth,
            interesting: true,
            reasons: Vec::new(),
        }
    }

    pub fn interesting(&self) -> bool {
        self.interesting
    }

    pub fn reasons(&self) -> &[Disqualification] {
        &self.reasons
    }
}

/// Loop records in the order the loops were entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopAnalysis {
    records: IndexMap<NodeId, LoopInfo>,
}

impl LoopAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the record of a loop being entered.
    ///
    /// Each loop is entered once per run; a second record for the same id
    /// means the program was never renumbered.
    pub(crate) fn open(&mut self, id: NodeId, enclosing_block: Option<NodeId>, depth: usize) {
        let previous = self
            .records
            .insert(id, LoopInfo::new(enclosing_block, depth));
        assert!(
            previous.is_none(),
            "loop {} entered twice; ids must be unique (see Program::renumber)",
            id
        );
    }

    /// Mark a loop as not interesting. Verdicts never go back to true.
    pub(crate) fn disqualify(&mut self, id: NodeId, reason: Disqualification) {
        match self.records.get_mut(&id) {
            Some(info) => {
                info.interesting = false;
                if !info.reasons.contains(&reason) {
                    info.reasons.push(reason);
                }
            }
            None => panic!("loop {} disqualified before it was entered", id),
        }
    }

    /// The finished record of a loop.
    ///
    /// A missing record means the pass never ran over that loop, which is
    /// distinct from the loop being rejected.
    pub fn get(&self, id: NodeId) -> Result<&LoopInfo> {
        self.records
            .get(&id)
            .ok_or(AnalysisError::AnalysisNotPerformed(id))
    }

    pub fn is_interesting(&self, id: NodeId) -> Result<bool> {
        self.get(id).map(LoopInfo::interesting)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &LoopInfo)> {
        self.records.iter().map(|(id, info)| (*id, info))
    }

    pub fn interesting_loops(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, info)| info.interesting)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_is_not_performed() {
        let analysis = LoopAnalysis::new();
        assert!(matches!(
            analysis.is_interesting(NodeId(4)),
            Err(AnalysisError::AnalysisNotPerformed(NodeId(4)))
        ));
    }

    #[test]
    fn test_disqualify_is_sticky_and_deduplicated() {
        let mut analysis = LoopAnalysis::new();
        analysis.open(NodeId(1), Some(NodeId(0)), 1);
        assert!(analysis.is_interesting(NodeId(1)).unwrap());

        let reason = Disqualification::UnrecognizedCall {
            signature: "g/0".into(),
        };
        analysis.disqualify(NodeId(1), reason.clone());
        analysis.disqualify(NodeId(1), reason);
        analysis.disqualify(NodeId(1), Disqualification::TooManyBranches { count: 2 });

        let info = analysis.get(NodeId(1)).unwrap();
        assert!(!info.interesting());
        assert_eq!(info.reasons().len(), 2);
        assert_eq!(info.reasons()[1].to_string(), "2 branch statements");
        assert_eq!(analysis.interesting_loops().count(), 0);
    }

    #[test]
    #[should_panic(expected = "entered twice")]
    fn test_reopening_a_loop_panics() {
        let mut analysis = LoopAnalysis::new();
        analysis.open(NodeId(1), None, 1);
        analysis.disqualify(NodeId(1), Disqualification::TooManyBranches { count: 2 });
        analysis.open(NodeId(1), None, 2);
    }

    #[test]
    #[should_panic(expected = "before it was entered")]
    fn test_disqualify_unknown_loop_panics() {
        LoopAnalysis::new().disqualify(NodeId(9), Disqualification::TooManyBranches { count: 3 });
    }
}
