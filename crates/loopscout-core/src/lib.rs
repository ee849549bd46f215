//! Loop selection for a source-to-source parallelizing translator.
//!
//! Given method bodies that have already been loop-normalized and
//! expression-flattened, [`SelectLoopsPass`] marks every loop as a
//! parallelization candidate or not, and [`symbolic`] provides the
//! substitution-friendly expression trees later stages use to compare
//! array index expressions.
//!
//! ```
//! use loopscout_core::ast::Program;
//! use loopscout_core::{AnalysisPass, LibraryModel, SelectLoopsPass};
//!
//! let mut program: Program = serde_json::from_str(r#"{ "methods": [] }"#).unwrap();
//! program.renumber();
//! let model = LibraryModel::builtin();
//! let analysis = SelectLoopsPass::new(&model).run(&program);
//! assert!(analysis.is_empty());
//! ```

pub mod ast;
pub mod config;
pub mod errors;
pub mod library_model;
pub mod optimizer;
pub mod report;
pub mod symbolic;
pub mod visit;

pub use config::{Config, LibraryConfig, SelectionConfig};
pub use errors::{AnalysisError, Result};
pub use library_model::{CallRecognizer, LibraryModel};
pub use optimizer::analysis::{Disqualification, LoopAnalysis, LoopInfo};
pub use optimizer::passes::SelectLoopsPass;
pub use optimizer::{run_pass, AnalysisPass};
pub use report::SelectionReport;
pub use symbolic::{ArrayIndexes, CallNode, SymbolicExpr};
