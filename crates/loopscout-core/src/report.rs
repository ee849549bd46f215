//! Human- and machine-readable summaries of a selection run.

use crate::ast::{NodeId, Program, WhileStatement};
use crate::errors::Result;
use crate::optimizer::analysis::LoopAnalysis;
use crate::symbolic::{collect_loop_indexes, SymbolicExpr};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    pub methods: Vec<MethodReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodReport {
    pub name: String,
    pub loops: Vec<LoopReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopReport {
    pub id: NodeId,
    pub depth: usize,
    pub condition: String,
    pub interesting: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    /// Rendered index lists per requested array, interesting loops only.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub indexes: IndexMap<String, Vec<String>>,
}

impl SelectionReport {
    /// Summarize `analysis` for every loop of `program`.
    ///
    /// Fails with `AnalysisNotPerformed` if a loop has no record.
    pub fn build(program: &Program, analysis: &LoopAnalysis) -> Result<Self> {
        Self::build_with_indexes(program, analysis, &[])
    }

    /// Like [`build`](Self::build), also listing the index expressions of
    /// `arrays` inside each interesting loop.
    pub fn build_with_indexes(
        program: &Program,
        analysis: &LoopAnalysis,
        arrays: &[String],
    ) -> Result<Self> {
        let mut methods = Vec::with_capacity(program.methods.len());
        for method in &program.methods {
            let mut loops = Vec::new();
            for loop_stmt in method.loops() {
                loops.push(LoopReport::build(loop_stmt, analysis, arrays)?);
            }
            methods.push(MethodReport {
                name: method.name.clone(),
                loops,
            });
        }
        Ok(Self { methods })
    }

    pub fn loop_count(&self) -> usize {
        self.methods.iter().map(|m| m.loops.len()).sum()
    }

    pub fn interesting_count(&self) -> usize {
        self.methods
            .iter()
            .flat_map(|m| &m.loops)
            .filter(|l| l.interesting)
            .count()
    }
}

impl LoopReport {
    fn build(
        loop_stmt: &WhileStatement,
        analysis: &LoopAnalysis,
        arrays: &[String],
    ) -> Result<Self> {
        let info = analysis.get(loop_stmt.id)?;
        let condition = SymbolicExpr::lower(&loop_stmt.condition)
            .map(|expr| expr.render())
            .unwrap_or_else(|_| "<unsupported>".to_string());

        let mut indexes = IndexMap::new();
        if info.interesting() && !arrays.is_empty() {
            for (array, lists) in collect_loop_indexes(loop_stmt, arrays) {
                let rendered = lists
                    .iter()
                    .map(|list| {
                        let parts: Vec<String> = list.iter().map(SymbolicExpr::render).collect();
                        format!("[{}]", parts.join(","))
                    })
                    .collect();
                indexes.insert(array, rendered);
            }
        }

        Ok(Self {
            id: loop_stmt.id,
            depth: info.depth,
            condition,
            interesting: info.interesting(),
            reasons: info.reasons().iter().map(ToString::to_string).collect(),
            indexes,
        })
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for method in &self.methods {
            writeln!(f, "method {}:", method.name)?;
            if method.loops.is_empty() {
                writeln!(f, "  no loops")?;
            }
            for l in &method.loops {
                let indent = "  ".repeat(l.depth);
                if l.interesting {
                    writeln!(f, "{}loop {} while ({}): interesting", indent, l.id, l.condition)?;
                } else {
                    writeln!(
                        f,
                        "{}loop {} while ({}): rejected ({})",
                        indent,
                        l.id,
                        l.condition,
                        l.reasons.join("; ")
                    )?;
                }
                for (array, lists) in &l.indexes {
                    writeln!(f, "{}  {}: {}", indent, array, lists.join(" "))?;
                }
            }
        }
        write!(
            f,
            "{} of {} loop(s) selected",
            self.interesting_count(),
            self.loop_count()
        )
    }
}
