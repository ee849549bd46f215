//! Canonical selection scenarios.
//!
//! Each fixture returns a renumbered single-method program. Calls to `f` are
//! meant to be recognized by the test model; any other free function is not.

use crate::builders::*;
use loopscout_core::ast::{CallSignature, Program};

/// Recognizes only the free function `f`.
pub fn recognizes_only_f(signature: &CallSignature<'_>) -> bool {
    signature.receiver_type.is_none() && signature.name == "f"
}

/// `while (i < n) { y = f(i); }`
pub fn recognized_call_loop() -> Program {
    program(vec![method(
        "main",
        vec![while_loop(
            lt("i", "n"),
            vec![assign(ident("y"), call_expr("f", vec![ident("i")]))],
        )],
    )])
}

/// `while (i < n) { y = g(i); }`
pub fn unrecognized_call_loop() -> Program {
    program(vec![method(
        "main",
        vec![while_loop(
            lt("i", "n"),
            vec![assign(ident("y"), call_expr("g", vec![ident("i")]))],
        )],
    )])
}

/// `while (i < n) { if (i == k) break; if (i == m) continue; }`
pub fn two_branch_loop() -> Program {
    program(vec![method(
        "main",
        vec![while_loop(
            lt("i", "n"),
            vec![
                if_then(eq("i", "k"), vec![brk()]),
                if_then(eq("i", "m"), vec![cont()]),
            ],
        )],
    )])
}

/// `while (i < n) { if (i == k) break; y = f(i); }`
pub fn one_branch_loop() -> Program {
    program(vec![method(
        "main",
        vec![while_loop(
            lt("i", "n"),
            vec![
                if_then(eq("i", "k"), vec![brk()]),
                assign(ident("y"), call_expr("f", vec![ident("i")])),
            ],
        )],
    )])
}

/// `while (i < n) { while (j < m) { unsupportedCall(); } }`
pub fn nested_unrecognized_call() -> Program {
    program(vec![method(
        "main",
        vec![while_loop(
            lt("i", "n"),
            vec![while_loop(lt("j", "m"), vec![call("unsupportedCall", vec![])])],
        )],
    )])
}

/// `while (i < n) { while (j < m) { if (j == k) break; if (j == p) continue; } }`
pub fn nested_two_branch_inner() -> Program {
    program(vec![method(
        "main",
        vec![while_loop(
            lt("i", "n"),
            vec![while_loop(
                lt("j", "m"),
                vec![
                    if_then(eq("j", "k"), vec![brk()]),
                    if_then(eq("j", "p"), vec![cont()]),
                ],
            )],
        )],
    )])
}
