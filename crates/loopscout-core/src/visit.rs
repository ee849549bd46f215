//! Enter/leave traversal over the host AST.
//!
//! Passes implement [`Visitor`] and override only the hooks they need; the
//! `walk_*` functions drive a depth-first walk that calls `enter` in
//! pre-order and `leave` in post-order for every node, then `finish` once.

use crate::ast::{Block, Expression, MethodDeclaration, Program, Statement};

/// A borrowed reference to any node kind a visitor can observe.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Method(&'a MethodDeclaration),
    Block(&'a Block),
    Statement(&'a Statement),
    Expression(&'a Expression),
}

pub trait Visitor<'a> {
    /// Called before any child of `node` is visited.
    fn enter(&mut self, _parent: Option<Node<'a>>, _node: Node<'a>) {}

    /// Called after every child of `node` has been visited.
    fn leave(&mut self, _node: Node<'a>) {}

    /// Called once after the whole walk.
    fn finish(&mut self) {}
}

pub fn walk_program<'a, V: Visitor<'a>>(visitor: &mut V, program: &'a Program) {
    for method in &program.methods {
        visit_node(visitor, None, Node::Method(method));
    }
    visitor.finish();
}

pub fn walk_method<'a, V: Visitor<'a>>(visitor: &mut V, method: &'a MethodDeclaration) {
    visit_node(visitor, None, Node::Method(method));
    visitor.finish();
}

/// Walk a detached block, e.g. a loop body, as if it were a root.
pub fn walk_block<'a, V: Visitor<'a>>(visitor: &mut V, block: &'a Block) {
    visit_node(visitor, None, Node::Block(block));
    visitor.finish();
}

fn visit_node<'a, V: Visitor<'a>>(visitor: &mut V, parent: Option<Node<'a>>, node: Node<'a>) {
    visitor.enter(parent, node);
    walk_children(visitor, node);
    visitor.leave(node);
}

fn walk_children<'a, V: Visitor<'a>>(visitor: &mut V, node: Node<'a>) {
    let parent = Some(node);
    match node {
        Node::Method(method) => visit_node(visitor, parent, Node::Block(&method.body)),
        Node::Block(block) => {
            for stmt in &block.statements {
                visit_node(visitor, parent, Node::Statement(stmt));
            }
        }
        Node::Statement(stmt) => walk_statement(visitor, parent, stmt),
        Node::Expression(expr) => walk_expression(visitor, parent, expr),
    }
}

fn walk_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    parent: Option<Node<'a>>,
    stmt: &'a Statement,
) {
    match stmt {
        Statement::Local { initializer, .. } => {
            if let Some(init) = initializer {
                visit_node(visitor, parent, Node::Expression(init));
            }
        }
        Statement::Expression { expression } => {
            visit_node(visitor, parent, Node::Expression(expression));
        }
        Statement::If(if_stmt) => {
            visit_node(visitor, parent, Node::Expression(&if_stmt.condition));
            visit_node(visitor, parent, Node::Block(&if_stmt.then_block));
            if let Some(else_block) = &if_stmt.else_block {
                visit_node(visitor, parent, Node::Block(else_block));
            }
        }
        Statement::While(while_stmt) => {
            visit_node(visitor, parent, Node::Expression(&while_stmt.condition));
            visit_node(visitor, parent, Node::Block(&while_stmt.body));
        }
        Statement::Block(block) => visit_node(visitor, parent, Node::Block(block)),
        Statement::Return { value } => {
            if let Some(value) = value {
                visit_node(visitor, parent, Node::Expression(value));
            }
        }
        Statement::Break { .. } | Statement::Continue { .. } => {}
    }
}

fn walk_expression<'a, V: Visitor<'a>>(
    visitor: &mut V,
    parent: Option<Node<'a>>,
    expr: &'a Expression,
) {
    match expr {
        Expression::Literal { .. } | Expression::Identifier { .. } => {}
        Expression::Field { target, .. } => visit_node(visitor, parent, Node::Expression(target)),
        Expression::ArrayAccess { array, index } => {
            visit_node(visitor, parent, Node::Expression(array));
            visit_node(visitor, parent, Node::Expression(index));
        }
        Expression::Unary { operand, .. } => {
            visit_node(visitor, parent, Node::Expression(operand))
        }
        Expression::Binary { left, right, .. } => {
            visit_node(visitor, parent, Node::Expression(left));
            visit_node(visitor, parent, Node::Expression(right));
        }
        Expression::Call(call) => {
            if let Some(target) = &call.target {
                visit_node(visitor, parent, Node::Expression(target));
            }
            for arg in &call.arguments {
                visit_node(visitor, parent, Node::Expression(arg));
            }
        }
        Expression::Assignment { target, value } => {
            visit_node(visitor, parent, Node::Expression(target));
            visit_node(visitor, parent, Node::Expression(value));
        }
    }
}
