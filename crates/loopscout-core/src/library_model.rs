//! Call recognition: which calls the translator understands.
//!
//! The selection pass only needs a yes/no answer per call site. A call is
//! recognized when its semantics are modelled well enough that a loop
//! containing it can still be reasoned about (pure math, container
//! accessors, string queries and the like).

use crate::ast::{CallSignature, Program};
use crate::config::LibraryConfig;
use crate::errors::{AnalysisError, Result};
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Answers whether a call's semantics are understood.
pub trait CallRecognizer {
    fn recognizes(&self, signature: &CallSignature<'_>) -> bool;
}

impl<F> CallRecognizer for F
where
    F: Fn(&CallSignature<'_>) -> bool,
{
    fn recognizes(&self, signature: &CallSignature<'_>) -> bool {
        self(signature)
    }
}

/// Calls recognized out of the box.
const DEFAULT_PATTERNS: &[&str] = &[
    // Pure math
    "Math.abs",
    "Math.max",
    "Math.min",
    "Math.pow",
    "Math.sqrt",
    "Math.floor",
    "Math.ceil",
    "Math.round",
    "Math.exp",
    "Math.log",
    "Math.sin",
    "Math.cos",
    // Strings
    "String.length",
    "String.charAt",
    "String.equals",
    "String.substring",
    "String.indexOf",
    "String.split",
    "String.trim",
    "String.toLowerCase",
    "String.toUpperCase",
    // Boxed numbers
    "Integer.parseInt",
    "Integer.valueOf",
    "Long.parseLong",
    "Double.parseDouble",
    "Double.valueOf",
    // Collections
    "List.get",
    "List.set",
    "List.add",
    "List.size",
    "ArrayList.get",
    "ArrayList.set",
    "ArrayList.add",
    "ArrayList.size",
    "Map.get",
    "Map.put",
    "Map.containsKey",
    "HashMap.get",
    "HashMap.put",
    "HashMap.containsKey",
];

static DEFAULT_MODEL: Lazy<LibraryModel> = Lazy::new(|| {
    let mut model = LibraryModel::empty();
    for pattern in DEFAULT_PATTERNS {
        model
            .add_pattern(pattern)
            .unwrap_or_else(|err| panic!("malformed built-in pattern {}: {}", pattern, err));
    }
    model
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MethodPattern {
    Any,
    Named(String),
}

/// A set of recognized call patterns.
///
/// Patterns take one of three shapes:
/// - `Type.method` recognizes one method of a receiver type
/// - `Type.*` recognizes every method of a receiver type
/// - `function` recognizes a free (receiver-less) function
///
/// Receiver types may be qualified (`java.util.List.get`); a pattern with a
/// simple type name also matches qualified receivers with that simple name.
#[derive(Debug, Clone, Default)]
pub struct LibraryModel {
    /// receiver type -> recognized methods
    methods: FxHashMap<String, FxHashSet<MethodPattern>>,
    functions: FxHashSet<String>,
}

impl LibraryModel {
    /// A model that recognizes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in model of well-understood library calls.
    pub fn builtin() -> Self {
        DEFAULT_MODEL.clone()
    }

    /// Build a model from configuration.
    pub fn from_config(config: &LibraryConfig) -> Result<Self> {
        let mut model = if config.include_defaults {
            Self::builtin()
        } else {
            Self::empty()
        };
        for pattern in &config.recognized {
            model.add_pattern(pattern)?;
        }
        Ok(model)
    }

    /// Recognize calls to every method declared in `program`.
    pub fn with_local_methods(mut self, program: &Program) -> Self {
        for method in &program.methods {
            debug!("recognizing local method {}", method.name);
            self.functions.insert(method.name.clone());
        }
        self
    }

    pub fn add_pattern(&mut self, pattern: &str) -> Result<()> {
        let pattern = pattern.trim();
        let invalid = || AnalysisError::InvalidPattern(pattern.to_string());

        if pattern.is_empty() || pattern == "*" {
            return Err(invalid());
        }

        match pattern.rsplit_once('.') {
            None => {
                self.functions.insert(pattern.to_string());
            }
            Some((receiver, method)) => {
                if receiver.is_empty() || method.is_empty() || receiver.contains('*') {
                    return Err(invalid());
                }
                let method = match method {
                    "*" => MethodPattern::Any,
                    name if name.contains('*') => return Err(invalid()),
                    name => MethodPattern::Named(name.to_string()),
                };
                self.methods
                    .entry(receiver.to_string())
                    .or_default()
                    .insert(method);
            }
        }
        Ok(())
    }

    fn receiver_methods(&self, receiver: &str) -> Option<&FxHashSet<MethodPattern>> {
        self.methods.get(receiver).or_else(|| {
            let simple = receiver.rsplit_once('.').map(|(_, simple)| simple)?;
            self.methods.get(simple)
        })
    }
}

impl CallRecognizer for LibraryModel {
    fn recognizes(&self, signature: &CallSignature<'_>) -> bool {
        match signature.receiver_type {
            None => self.functions.contains(signature.name),
            Some(receiver) => self.receiver_methods(receiver).is_some_and(|methods| {
                methods.contains(&MethodPattern::Any)
                    || methods.contains(&MethodPattern::Named(signature.name.to_string()))
            }),
        }
    }
}
