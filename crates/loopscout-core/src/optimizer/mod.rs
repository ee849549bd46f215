//! Analysis passes over normalized programs.

pub mod analysis;
pub mod passes;

use crate::ast::Program;
use tracing::debug;

/// A read-only pass over a whole program.
pub trait AnalysisPass {
    type Output;

    fn name(&self) -> &'static str;

    fn run(&mut self, program: &Program) -> Self::Output;
}

/// Run `pass` with logging around it.
pub fn run_pass<P: AnalysisPass>(pass: &mut P, program: &Program) -> P::Output {
    debug!(
        "running pass {} over {} method(s)",
        pass.name(),
        program.methods.len()
    );
    let output = pass.run(program);
    debug!("pass {} finished", pass.name());
    output
}
