use super::{ArrayIndexes, SymbolicExpr};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A call or element access: `name(arg1,...,argN)`.
///
/// Function calls and array accesses share this node so that subscripts can
/// be treated uniformly; for an access the arguments are the subscript
/// expressions in dimension order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallNode {
    name: String,
    arguments: Vec<SymbolicExpr>,
}

impl CallNode {
    pub fn new(name: impl Into<String>, arguments: Vec<SymbolicExpr>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[SymbolicExpr] {
        &self.arguments
    }

    /// Rebuild the node with `target` replaced by `replacement` in every
    /// argument. The node's own name is kept.
    pub fn substitute(&self, target: &str, replacement: &SymbolicExpr) -> CallNode {
        let arguments = self
            .arguments
            .iter()
            .map(|arg| arg.substitute(target, replacement))
            .collect();
        CallNode::new(self.name.clone(), arguments)
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.name == ident || self.arguments.iter().any(|arg| arg.contains(ident))
    }

    /// Record this node's arguments under `array` when the names match, then
    /// let the arguments contribute their own occurrences.
    pub fn collect_indexes(&self, array: &str, indexes: &mut ArrayIndexes) {
        if self.name == array {
            indexes
                .entry(self.name.clone())
                .or_default()
                .push(self.arguments.clone());
        }
        for arg in &self.arguments {
            arg.collect_indexes(array, indexes);
        }
    }
}

impl fmt::Display for CallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> SymbolicExpr {
        SymbolicExpr::id(name)
    }

    #[test]
    fn test_render_without_padding() {
        let node = CallNode::new("f", vec![id("a"), id("b"), SymbolicExpr::int(3)]);
        assert_eq!(node.to_string(), "f(a,b,3)");
        assert_eq!(CallNode::new("g", vec![]).to_string(), "g()");
    }

    #[test]
    fn test_substitute_keeps_own_name() {
        let node = CallNode::new("i", vec![id("i")]);
        let out = node.substitute("i", &SymbolicExpr::int(0));
        assert_eq!(out.to_string(), "i(0)");
    }

    #[test]
    fn test_contains_checks_name_and_arguments() {
        let node = CallNode::new("a", vec![SymbolicExpr::call("g", vec![id("k")])]);
        assert!(node.contains("a"));
        assert!(node.contains("g"));
        assert!(node.contains("k"));
        assert!(!node.contains("z"));
    }

    #[test]
    fn test_collect_indexes_nested_same_name() {
        // x(x(1)) contributes the outer occurrence first
        let inner = SymbolicExpr::call("x", vec![SymbolicExpr::int(1)]);
        let node = CallNode::new("x", vec![inner.clone()]);
        let mut indexes = ArrayIndexes::new();
        node.collect_indexes("x", &mut indexes);
        assert_eq!(indexes["x"], vec![vec![inner], vec![SymbolicExpr::int(1)]]);
    }
}
