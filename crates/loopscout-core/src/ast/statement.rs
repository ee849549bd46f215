use super::expression::Expression;
use super::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: NodeId,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_block: Block,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_block: Option<Block>,
}

/// The canonical loop form left behind by loop normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    #[serde(default)]
    pub id: NodeId,
    pub condition: Expression,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Local {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initializer: Option<Expression>,
    },
    Expression {
        expression: Expression,
    },
    If(IfStatement),
    While(WhileStatement),
    Block(Block),
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Expression>,
    },
    Break {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Continue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl Statement {
    /// Control-transfer statements counted against the enclosing loop.
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            Statement::Return { .. } | Statement::Break { .. } | Statement::Continue { .. }
        )
    }
}
