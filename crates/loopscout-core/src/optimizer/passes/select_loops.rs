// =============================================================================
// Loop Selection Pass
// =============================================================================
//
// Runs after loop normalization and expression flattening and decides which
// loops are worth handing to the parallel translator. Every loop starts out
// interesting and is rejected when:
// - it contains, at any depth, a call the library model does not recognize
//   (this rejects every loop enclosing the call, not just the innermost one)
// - more than `max_direct_branches` return/break/continue statements sit in
//   its own scope (branches inside nested loops count for the nested loop)
//
// Nothing here proves a loop safe; later stages do the real legality checks.

use crate::ast::{CallSignature, Expression, MethodDeclaration, NodeId, Program, Statement};
use crate::config::SelectionConfig;
use crate::library_model::CallRecognizer;
use crate::optimizer::analysis::{Disqualification, LoopAnalysis};
use crate::optimizer::AnalysisPass;
use crate::visit::{self, Node, Visitor};
use tracing::{debug, trace};

pub struct SelectLoopsPass<'r, R: CallRecognizer + ?Sized> {
    recognizer: &'r R,
    config: SelectionConfig,
    /// Loop nesting depth of the cursor.
    current_depth: usize,
    /// Branch statements seen in the innermost open loop.
    current_branch_count: usize,
    /// Saved counts of the enclosing loops.
    branch_counts: Vec<usize>,
    /// Loops on the path from the root to the cursor, outermost first.
    open_loops: Vec<NodeId>,
    /// Body block of the method being walked.
    current_parent: Option<NodeId>,
    analysis: LoopAnalysis,
}

impl<'r, R: CallRecognizer + ?Sized> SelectLoopsPass<'r, R> {
    pub fn new(recognizer: &'r R) -> Self {
        Self::with_config(recognizer, SelectionConfig::default())
    }

    pub fn with_config(recognizer: &'r R, config: SelectionConfig) -> Self {
        Self {
            recognizer,
            config,
            current_depth: 0,
            current_branch_count: 0,
            branch_counts: Vec::new(),
            open_loops: Vec::new(),
            current_parent: None,
            analysis: LoopAnalysis::new(),
        }
    }

    /// Select loops in a single method.
    pub fn run_method(&mut self, method: &MethodDeclaration) -> LoopAnalysis {
        self.reset();
        visit::walk_method(self, method);
        std::mem::take(&mut self.analysis)
    }

    fn reset(&mut self) {
        self.current_depth = 0;
        self.current_branch_count = 0;
        self.branch_counts.clear();
        self.open_loops.clear();
        self.current_parent = None;
        self.analysis = LoopAnalysis::new();
    }

    fn enter_loop(&mut self, id: NodeId) {
        self.current_depth += 1;
        self.analysis.open(id, self.current_parent, self.current_depth);

        // Save the outer loop's count and start a fresh tally for this one.
        self.branch_counts.push(self.current_branch_count);
        self.current_branch_count = 0;

        self.open_loops.push(id);
        trace!("entered loop {} at depth {}", id, self.current_depth);
    }

    fn leave_loop(&mut self, id: NodeId) {
        match self.open_loops.pop() {
            Some(innermost) if innermost == id => {}
            Some(innermost) => panic!(
                "left loop {} while loop {} was the innermost open loop",
                id, innermost
            ),
            None => panic!("left loop {} with no open loop", id),
        }

        if self.current_branch_count > self.config.max_direct_branches {
            self.analysis.disqualify(
                id,
                Disqualification::TooManyBranches {
                    count: self.current_branch_count,
                },
            );
        }

        if self.config.trace_loops {
            debug!(
                "loop {} (depth {}): {} direct branch(es), interesting = {:?}",
                id,
                self.current_depth,
                self.current_branch_count,
                self.analysis.is_interesting(id).ok()
            );
        }

        self.current_branch_count = match self.branch_counts.pop() {
            Some(count) => count,
            None => panic!("branch count stack underflow leaving loop {}", id),
        };
        self.current_depth -= 1;
    }

    fn visit_call(&mut self, signature: &CallSignature<'_>) {
        if self.recognizer.recognizes(signature) {
            return;
        }
        // The call's effects are unknown at every level that contains it.
        for &id in &self.open_loops {
            self.analysis.disqualify(
                id,
                Disqualification::UnrecognizedCall {
                    signature: signature.to_string(),
                },
            );
        }
        if !self.open_loops.is_empty() {
            debug!(
                "unrecognized call {} rejects {} open loop(s)",
                signature,
                self.open_loops.len()
            );
        }
    }
}

impl<'a, R: CallRecognizer + ?Sized> Visitor<'a> for SelectLoopsPass<'_, R> {
    fn enter(&mut self, parent: Option<Node<'a>>, node: Node<'a>) {
        match (parent, node) {
            (Some(Node::Method(_)), Node::Block(block)) => {
                self.current_parent = Some(block.id);
            }
            (_, Node::Statement(Statement::While(while_stmt))) => self.enter_loop(while_stmt.id),
            (_, Node::Expression(Expression::Call(call))) => self.visit_call(&call.signature()),
            (_, Node::Statement(stmt)) if stmt.is_branch() => {
                self.current_branch_count += 1;
            }
            _ => {}
        }
    }

    fn leave(&mut self, node: Node<'a>) {
        if let Node::Statement(Statement::While(while_stmt)) = node {
            self.leave_loop(while_stmt.id);
        }
    }

    fn finish(&mut self) {
        assert!(
            self.open_loops.is_empty() && self.branch_counts.is_empty() && self.current_depth == 0,
            "loop selection finished with unbalanced scopes"
        );
        debug!(
            "loop selection finished: {} of {} loop(s) interesting",
            self.analysis.interesting_loops().count(),
            self.analysis.len()
        );
    }
}

impl<R: CallRecognizer + ?Sized> AnalysisPass for SelectLoopsPass<'_, R> {
    type Output = LoopAnalysis;

    fn name(&self) -> &'static str {
        "select-loops"
    }

    fn run(&mut self, program: &Program) -> LoopAnalysis {
        self.reset();
        visit::walk_program(self, program);
        std::mem::take(&mut self.analysis)
    }
}
