use super::{ArrayIndexes, CallNode, SymbolicExpr};
use crate::ast::{Expression, WhileStatement};
use crate::errors::{AnalysisError, Result};
use crate::visit::{self, Node, Visitor};
use tracing::trace;

impl SymbolicExpr {
    /// Lower a flattened host expression into symbolic form.
    ///
    /// - `x` becomes `Id(x)`, and `obj.f` becomes `Id("obj.f")`
    /// - `a[i][j]` becomes `a(i,j)`
    /// - `recv.m(args)` becomes `m(recv,args)` and `f(args)` becomes `f(args)`
    ///
    /// Assignments are statements in disguise and are rejected.
    pub fn lower(expr: &Expression) -> Result<SymbolicExpr> {
        match expr {
            Expression::Literal { value } => Ok(SymbolicExpr::Literal {
                value: value.clone(),
            }),
            Expression::Identifier { name } => Ok(SymbolicExpr::id(name.clone())),
            Expression::Field { .. } => Ok(SymbolicExpr::id(qualified_name(expr)?)),
            Expression::ArrayAccess { .. } => {
                let mut subscripts = Vec::new();
                let mut current = expr;
                while let Expression::ArrayAccess { array, index } = current {
                    subscripts.push(SymbolicExpr::lower(index)?);
                    current = array.as_ref();
                }
                subscripts.reverse();
                Ok(SymbolicExpr::Call(CallNode::new(
                    qualified_name(current)?,
                    subscripts,
                )))
            }
            Expression::Unary { op, operand } => Ok(SymbolicExpr::Unary {
                op: *op,
                operand: Box::new(SymbolicExpr::lower(operand)?),
            }),
            Expression::Binary { op, left, right } => Ok(SymbolicExpr::binary(
                *op,
                SymbolicExpr::lower(left)?,
                SymbolicExpr::lower(right)?,
            )),
            Expression::Call(call) => {
                let mut arguments = Vec::with_capacity(call.arguments.len() + 1);
                if let Some(target) = &call.target {
                    arguments.push(SymbolicExpr::lower(target)?);
                }
                for arg in &call.arguments {
                    arguments.push(SymbolicExpr::lower(arg)?);
                }
                Ok(SymbolicExpr::call(call.name.clone(), arguments))
            }
            Expression::Assignment { .. } => Err(AnalysisError::UnsupportedExpression(
                "assignment".to_string(),
            )),
        }
    }
}

/// Dotted name of an identifier or field chain, e.g. `this.data`.
fn qualified_name(expr: &Expression) -> Result<String> {
    match expr {
        Expression::Identifier { name } => Ok(name.clone()),
        Expression::Field { target, name } => Ok(format!("{}.{}", qualified_name(target)?, name)),
        other => Err(AnalysisError::UnsupportedExpression(format!(
            "{} used as a name",
            shape(other)
        ))),
    }
}

fn shape(expr: &Expression) -> &'static str {
    match expr {
        Expression::Literal { .. } => "literal",
        Expression::Identifier { .. } => "identifier",
        Expression::Field { .. } => "field access",
        Expression::ArrayAccess { .. } => "array access",
        Expression::Unary { .. } => "unary expression",
        Expression::Binary { .. } => "binary expression",
        Expression::Call(_) => "call",
        Expression::Assignment { .. } => "assignment",
    }
}

/// Collect index lists for each of `arrays` from every statement-level
/// expression inside `loop_stmt`, its condition included.
///
/// Both sides of an assignment are lowered separately. Expressions that
/// cannot be lowered contribute nothing.
pub fn collect_loop_indexes(loop_stmt: &WhileStatement, arrays: &[String]) -> ArrayIndexes {
    let mut collector = IndexCollector {
        arrays,
        indexes: ArrayIndexes::new(),
    };
    collector.collect(&loop_stmt.condition);
    visit::walk_block(&mut collector, &loop_stmt.body);
    collector.indexes
}

struct IndexCollector<'r> {
    arrays: &'r [String],
    indexes: ArrayIndexes,
}

impl IndexCollector<'_> {
    fn collect(&mut self, expr: &Expression) {
        if let Expression::Assignment { target, value } = expr {
            self.collect(target);
            self.collect(value);
            return;
        }
        match SymbolicExpr::lower(expr) {
            Ok(symbolic) => {
                for array in self.arrays {
                    symbolic.collect_indexes(array, &mut self.indexes);
                }
            }
            Err(err) => trace!("skipping expression during index collection: {}", err),
        }
    }
}

impl<'a> Visitor<'a> for IndexCollector<'_> {
    fn enter(&mut self, parent: Option<Node<'a>>, node: Node<'a>) {
        if let (Some(Node::Statement(_)), Node::Expression(expr)) = (parent, node) {
            self.collect(expr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Block, CallExpression, Literal, NodeId, Statement};

    fn ident(name: &str) -> Expression {
        Expression::Identifier { name: name.into() }
    }

    fn index(array: Expression, idx: Expression) -> Expression {
        Expression::ArrayAccess {
            array: Box::new(array),
            index: Box::new(idx),
        }
    }

    fn plus_one(name: &str) -> Expression {
        Expression::Binary {
            op: BinaryOp::Add,
            left: Box::new(ident(name)),
            right: Box::new(Expression::Literal {
                value: Literal::Int(1),
            }),
        }
    }

    #[test]
    fn test_lower_multidimensional_access() {
        let expr = index(index(ident("m"), ident("i")), plus_one("j"));
        let lowered = SymbolicExpr::lower(&expr).unwrap();
        assert_eq!(lowered.render(), "m(i,j + 1)");
    }

    #[test]
    fn test_lower_field_array_and_method_call() {
        let field = Expression::Field {
            target: Box::new(ident("this")),
            name: "data".into(),
        };
        let access = index(field, ident("i"));
        assert_eq!(SymbolicExpr::lower(&access).unwrap().render(), "this.data(i)");

        let call = Expression::Call(CallExpression {
            target: Some(Box::new(ident("xs"))),
            receiver_type: Some("List".into()),
            name: "get".into(),
            arguments: vec![ident("i")],
        });
        assert_eq!(SymbolicExpr::lower(&call).unwrap().render(), "get(xs,i)");
    }

    #[test]
    fn test_lower_rejects_assignment_and_computed_array() {
        let assign = Expression::Assignment {
            target: Box::new(ident("x")),
            value: Box::new(ident("y")),
        };
        assert!(matches!(
            SymbolicExpr::lower(&assign),
            Err(AnalysisError::UnsupportedExpression(_))
        ));

        let computed = index(plus_one("p"), ident("i"));
        assert!(SymbolicExpr::lower(&computed).is_err());
    }

    #[test]
    fn test_collect_loop_indexes_reads_both_assignment_sides() {
        // while (i < n) { a[i] = a[i + 1]; b[i] = 0; }
        let loop_stmt = WhileStatement {
            id: NodeId(1),
            condition: Expression::Binary {
                op: BinaryOp::LessThan,
                left: Box::new(ident("i")),
                right: Box::new(ident("n")),
            },
            body: Block {
                id: NodeId(2),
                statements: vec![
                    Statement::Expression {
                        expression: Expression::Assignment {
                            target: Box::new(index(ident("a"), ident("i"))),
                            value: Box::new(index(ident("a"), plus_one("i"))),
                        },
                    },
                    Statement::Expression {
                        expression: Expression::Assignment {
                            target: Box::new(index(ident("b"), ident("i"))),
                            value: Box::new(Expression::Literal {
                                value: Literal::Int(0),
                            }),
                        },
                    },
                ],
            },
        };

        let indexes = collect_loop_indexes(&loop_stmt, &["a".to_string(), "c".to_string()]);
        let a: Vec<String> = indexes["a"]
            .iter()
            .map(|list| list[0].render())
            .collect();
        assert_eq!(a, vec!["i", "i + 1"]);
        assert!(!indexes.contains_key("b"));
        assert!(!indexes.contains_key("c"));
    }
}
