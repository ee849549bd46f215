//! Symbolic expression trees for dependence and index analysis.
//!
//! A `SymbolicExpr` is an immutable value: `substitute` always builds a new
//! tree, and no node refers back to its parent. Every query is purely
//! syntactic. Names are compared lexically with no scope resolution, so
//! callers must make names unambiguous before building trees (flattening
//! already renames temporaries).
//!
//! ```text
//! a[i + 1] = f(b[i], n)   ──lower──>   a(i + 1)   f(b(i),n)
//! ```

mod call;
mod lower;

pub use call::CallNode;
pub use lower::collect_loop_indexes;

use crate::ast::{BinaryOp, Literal, UnaryOp};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index expression lists per array name, in traversal order.
pub type ArrayIndexes = IndexMap<String, Vec<Vec<SymbolicExpr>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolicExpr {
    Literal {
        value: Literal,
    },
    Id {
        name: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<SymbolicExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<SymbolicExpr>,
        right: Box<SymbolicExpr>,
    },
    Call(CallNode),
}

impl SymbolicExpr {
    pub fn id(name: impl Into<String>) -> Self {
        SymbolicExpr::Id { name: name.into() }
    }

    pub fn int(n: i64) -> Self {
        SymbolicExpr::Literal {
            value: Literal::Int(n),
        }
    }

    pub fn call(name: impl Into<String>, arguments: Vec<SymbolicExpr>) -> Self {
        SymbolicExpr::Call(CallNode::new(name, arguments))
    }

    pub fn binary(op: BinaryOp, left: SymbolicExpr, right: SymbolicExpr) -> Self {
        SymbolicExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Replace every identifier named `target` with `replacement`.
    ///
    /// The result is always a fresh tree, and `replacement` itself is not
    /// searched for further matches.
    pub fn substitute(&self, target: &str, replacement: &SymbolicExpr) -> SymbolicExpr {
        match self {
            SymbolicExpr::Literal { .. } => self.clone(),
            SymbolicExpr::Id { name } => {
                if name == target {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            SymbolicExpr::Unary { op, operand } => SymbolicExpr::Unary {
                op: *op,
                operand: Box::new(operand.substitute(target, replacement)),
            },
            SymbolicExpr::Binary { op, left, right } => SymbolicExpr::Binary {
                op: *op,
                left: Box::new(left.substitute(target, replacement)),
                right: Box::new(right.substitute(target, replacement)),
            },
            SymbolicExpr::Call(call) => SymbolicExpr::Call(call.substitute(target, replacement)),
        }
    }

    /// Whether `ident` names this node or any node below it.
    pub fn contains(&self, ident: &str) -> bool {
        match self {
            SymbolicExpr::Literal { .. } => false,
            SymbolicExpr::Id { name } => name == ident,
            SymbolicExpr::Unary { operand, .. } => operand.contains(ident),
            SymbolicExpr::Binary { left, right, .. } => {
                left.contains(ident) || right.contains(ident)
            }
            SymbolicExpr::Call(call) => call.contains(ident),
        }
    }

    /// Append one index list per occurrence of `array` as a call/access
    /// node. No entry is created for an array that does not occur.
    pub fn collect_indexes(&self, array: &str, indexes: &mut ArrayIndexes) {
        match self {
            SymbolicExpr::Literal { .. } | SymbolicExpr::Id { .. } => {}
            SymbolicExpr::Unary { operand, .. } => operand.collect_indexes(array, indexes),
            SymbolicExpr::Binary { left, right, .. } => {
                left.collect_indexes(array, indexes);
                right.collect_indexes(array, indexes);
            }
            SymbolicExpr::Call(call) => call.collect_indexes(array, indexes),
        }
    }

    pub fn indexes_of(&self, array: &str) -> Vec<Vec<SymbolicExpr>> {
        let mut indexes = ArrayIndexes::new();
        self.collect_indexes(array, &mut indexes);
        indexes.shift_remove(array).unwrap_or_default()
    }

    /// Canonical text form; identical to `to_string()`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicExpr::Binary { .. } => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

impl fmt::Display for SymbolicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicExpr::Literal { value } => write!(f, "{}", value),
            SymbolicExpr::Id { name } => f.write_str(name),
            SymbolicExpr::Unary { op, operand } => {
                f.write_str(op.symbol())?;
                operand.fmt_operand(f)
            }
            SymbolicExpr::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f)
            }
            SymbolicExpr::Call(call) => write!(f, "{}", call),
        }
    }
}
