//! Terse constructors for normalized ASTs.
//!
//! Ids are left at their default; call [`program`] (which renumbers) or
//! `Program::renumber` before running a pass.

use loopscout_core::ast::{
    BinaryOp, Block, CallExpression, Expression, IfStatement, Literal, MethodDeclaration, NodeId,
    Program, Statement, WhileStatement,
};

/// Build a renumbered program.
pub fn program(methods: Vec<MethodDeclaration>) -> Program {
    let mut program = Program::new(methods);
    program.renumber();
    program
}

pub fn method(name: &str, statements: Vec<Statement>) -> MethodDeclaration {
    MethodDeclaration {
        id: NodeId::default(),
        name: name.to_string(),
        params: Vec::new(),
        body: block(statements),
    }
}

pub fn block(statements: Vec<Statement>) -> Block {
    Block {
        id: NodeId::default(),
        statements,
    }
}

pub fn ident(name: &str) -> Expression {
    Expression::Identifier {
        name: name.to_string(),
    }
}

pub fn int(n: i64) -> Expression {
    Expression::Literal {
        value: Literal::Int(n),
    }
}

pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `left < right`
pub fn lt(left: &str, right: &str) -> Expression {
    binary(BinaryOp::LessThan, ident(left), ident(right))
}

/// `left == right`
pub fn eq(left: &str, right: &str) -> Expression {
    binary(BinaryOp::Equal, ident(left), ident(right))
}

pub fn index(array: &str, subscript: Expression) -> Expression {
    Expression::ArrayAccess {
        array: Box::new(ident(array)),
        index: Box::new(subscript),
    }
}

/// A free-function call expression.
pub fn call_expr(name: &str, arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        target: None,
        receiver_type: None,
        name: name.to_string(),
        arguments,
    })
}

/// `receiver.name(arguments)` where `receiver` has static type `receiver_type`.
pub fn method_call_expr(
    receiver: &str,
    receiver_type: &str,
    name: &str,
    arguments: Vec<Expression>,
) -> Expression {
    Expression::Call(CallExpression {
        target: Some(Box::new(ident(receiver))),
        receiver_type: Some(receiver_type.to_string()),
        name: name.to_string(),
        arguments,
    })
}

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::Expression { expression }
}

/// `name(arguments);`
pub fn call(name: &str, arguments: Vec<Expression>) -> Statement {
    expr_stmt(call_expr(name, arguments))
}

/// `target = value;`
pub fn assign(target: Expression, value: Expression) -> Statement {
    expr_stmt(Expression::Assignment {
        target: Box::new(target),
        value: Box::new(value),
    })
}

pub fn local(name: &str, initializer: Expression) -> Statement {
    Statement::Local {
        name: name.to_string(),
        initializer: Some(initializer),
    }
}

pub fn while_loop(condition: Expression, body: Vec<Statement>) -> Statement {
    Statement::While(WhileStatement {
        id: NodeId::default(),
        condition,
        body: block(body),
    })
}

pub fn if_then(condition: Expression, then: Vec<Statement>) -> Statement {
    Statement::If(IfStatement {
        condition,
        then_block: block(then),
        else_block: None,
    })
}

pub fn if_else(
    condition: Expression,
    then: Vec<Statement>,
    otherwise: Vec<Statement>,
) -> Statement {
    Statement::If(IfStatement {
        condition,
        then_block: block(then),
        else_block: Some(block(otherwise)),
    })
}

pub fn nested_block(statements: Vec<Statement>) -> Statement {
    Statement::Block(block(statements))
}

pub fn brk() -> Statement {
    Statement::Break { label: None }
}

pub fn cont() -> Statement {
    Statement::Continue { label: None }
}

pub fn ret(value: Option<Expression>) -> Statement {
    Statement::Return { value }
}

/// Ids of every loop in `program`, pre-order.
pub fn loop_ids(program: &Program) -> Vec<NodeId> {
    program.loops().iter().map(|l| l.id).collect()
}
