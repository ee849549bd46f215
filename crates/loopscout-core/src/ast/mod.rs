//! Host AST for normalized method bodies.
//!
//! The tree is produced by the front end after loop normalization and
//! expression flattening. Only the nodes the analyses need to refer back to
//! (methods, blocks and loops) carry a [`NodeId`]; per-node analysis data is
//! stored in side-tables keyed by that id rather than on the nodes.

pub mod expression;
pub mod statement;

pub use expression::{BinaryOp, CallExpression, CallSignature, Expression, Literal, UnaryOp};
pub use statement::{Block, IfStatement, Statement, WhileStatement};

use crate::errors::{AnalysisError, Result};
use crate::visit::{self, Node, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Stable identity of a method, block or loop within one [`Program`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    #[serde(default)]
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub body: Block,
}

impl MethodDeclaration {
    /// Loops of this method in pre-order.
    pub fn loops(&self) -> Vec<&WhileStatement> {
        let mut collector = LoopCollector::default();
        visit::walk_method(&mut collector, self);
        collector.loops
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}

impl Program {
    pub fn new(methods: Vec<MethodDeclaration>) -> Self {
        Self { methods }
    }

    /// Assign fresh pre-order ids to every method, block and loop.
    ///
    /// Ids are unique within the program and start at 1, so a default
    /// (zero) id always means "never numbered".
    pub fn renumber(&mut self) {
        let mut next = 0u32;
        let mut fresh = || {
            next += 1;
            NodeId(next)
        };
        for method in &mut self.methods {
            method.id = fresh();
            renumber_block(&mut method.body, &mut fresh);
        }
    }

    /// Loops of every method in pre-order.
    pub fn loops(&self) -> Vec<&WhileStatement> {
        let mut collector = LoopCollector::default();
        visit::walk_program(&mut collector, self);
        collector.loops
    }

    pub fn method(&self, name: &str) -> Option<&MethodDeclaration> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Parse a serialized program. Ids are kept as written; call
    /// [`renumber`](Self::renumber) before analysis.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a serialized program. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&source)?),
            _ => Self::from_yaml_str(&source),
        }
    }
}

fn renumber_block(block: &mut Block, fresh: &mut impl FnMut() -> NodeId) {
    block.id = fresh();
    for stmt in &mut block.statements {
        renumber_statement(stmt, fresh);
    }
}

fn renumber_statement(stmt: &mut Statement, fresh: &mut impl FnMut() -> NodeId) {
    match stmt {
        Statement::If(if_stmt) => {
            renumber_block(&mut if_stmt.then_block, fresh);
            if let Some(else_block) = &mut if_stmt.else_block {
                renumber_block(else_block, fresh);
            }
        }
        Statement::While(while_stmt) => {
            while_stmt.id = fresh();
            renumber_block(&mut while_stmt.body, fresh);
        }
        Statement::Block(block) => renumber_block(block, fresh),
        Statement::Local { .. }
        | Statement::Expression { .. }
        | Statement::Return { .. }
        | Statement::Break { .. }
        | Statement::Continue { .. } => {}
    }
}

#[derive(Default)]
struct LoopCollector<'a> {
    loops: Vec<&'a WhileStatement>,
}

impl<'a> Visitor<'a> for LoopCollector<'a> {
    fn enter(&mut self, _parent: Option<Node<'a>>, node: Node<'a>) {
        if let Node::Statement(Statement::While(while_stmt)) = node {
            self.loops.push(while_stmt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expression {
        Expression::Identifier { name: name.into() }
    }

    fn while_loop(body: Vec<Statement>) -> Statement {
        Statement::While(WhileStatement {
            id: NodeId::default(),
            condition: ident("c"),
            body: Block {
                id: NodeId::default(),
                statements: body,
            },
        })
    }

    fn sample() -> Program {
        Program::new(vec![MethodDeclaration {
            id: NodeId::default(),
            name: "m".into(),
            params: vec![],
            body: Block {
                id: NodeId::default(),
                statements: vec![
                    while_loop(vec![while_loop(vec![])]),
                    while_loop(vec![]),
                ],
            },
        }])
    }

    #[test]
    fn test_renumber_is_preorder_and_unique() {
        let mut program = sample();
        program.renumber();

        let method = &program.methods[0];
        assert_eq!(method.id, NodeId(1));
        assert_eq!(method.body.id, NodeId(2));

        let ids: Vec<NodeId> = program.loops().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NodeId(3), NodeId(5), NodeId(7)]);
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let mut first = sample();
        first.renumber();
        let mut second = first.clone();
        second.renumber();
        assert_eq!(first, second);
    }

    #[test]
    fn test_program_from_json_without_ids() {
        let json = r#"{
            "methods": [{
                "name": "run",
                "body": { "statements": [
                    { "kind": "while",
                      "condition": { "kind": "identifier", "name": "c" },
                      "body": { "statements": [ { "kind": "break" } ] } }
                ] }
            }]
        }"#;
        let mut program: Program = serde_json::from_str(json).unwrap();
        program.renumber();
        let loops = program.loops();
        assert_eq!(loops.len(), 1);
        assert!(loops[0].body.statements[0].is_branch());
        assert_ne!(loops[0].id, NodeId::default());
    }

    #[test]
    fn test_program_load_yaml_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.yaml");
        std::fs::write(
            &path,
            "methods:\n  - name: run\n    body:\n      statements:\n        - kind: return\n",
        )
        .unwrap();
        let program = Program::load(&path).unwrap();
        assert!(program.method("run").is_some());
        assert!(program.loops().is_empty());

        let err = Program::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }
}
