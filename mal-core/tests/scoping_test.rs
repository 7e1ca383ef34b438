// mal-core - Lexical scoping integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for environments, closures and shadowing.

mod common;

use common::{Error, MalVal, eval_all, new_env};

#[test]
fn test_let_shadows_outer_binding() {
    let env = new_env();
    assert_eq!(
        eval_all("(def! x 1) (let* (x 2) x)", &env).unwrap(),
        MalVal::int(2)
    );
    assert_eq!(eval_all("x", &env).unwrap(), MalVal::int(1));
}

#[test]
fn test_inner_let_shadows_outer_let() {
    assert_eval!("(let* (x 1) (let* (x 2) x))", MalVal::int(2));
    assert_eval!("(let* (x 1) (+ (let* (x 2) x) x))", MalVal::int(3));
}

#[test]
fn test_let_can_rebind_same_name() {
    assert_eval!("(let* (x 1 x (+ x 10)) x)", MalVal::int(11));
}

#[test]
fn test_closure_captures_definition_env() {
    let env = new_env();
    let result = eval_all(
        "(def! make-adder (fn* (n) (fn* (x) (+ x n))))
         (def! add5 (make-adder 5))
         (add5 10)",
        &env,
    );
    assert_eq!(result.unwrap(), MalVal::int(15));
}

#[test]
fn test_closure_sees_later_binding_in_captured_frame() {
    // The frame is captured by reference, so names bound after fn* are visible.
    assert_eval!("(let* (f (fn* () x) x 3) (f))", MalVal::int(3));
}

#[test]
fn test_closure_sees_global_redefinition() {
    let env = new_env();
    let result = eval_all(
        "(def! g 1)
         (def! get-g (fn* () g))
         (def! g 2)
         (get-g)",
        &env,
    );
    assert_eq!(result.unwrap(), MalVal::int(2));
}

#[test]
fn test_params_shadow_globals() {
    let env = new_env();
    assert_eq!(
        eval_all("(def! a 100) ((fn* (a) a) 1)", &env).unwrap(),
        MalVal::int(1)
    );
}

#[test]
fn test_closure_locals_do_not_leak() {
    let env = new_env();
    eval_all("((fn* (hidden) hidden) 1)", &env).unwrap();
    assert!(matches!(eval_all("hidden", &env), Err(Error::UnboundSymbol(_))));
}

#[test]
fn test_def_inside_closure_binds_in_call_frame() {
    let env = new_env();
    eval_all("((fn* () (def! local 1)))", &env).unwrap();
    assert!(matches!(eval_all("local", &env), Err(Error::UnboundSymbol(_))));
}

#[test]
fn test_eval_uses_root_environment() {
    let env = new_env();
    assert_eq!(
        eval_all("(def! y 1) (let* (y 2) (eval (read-string \"y\")))", &env).unwrap(),
        MalVal::int(1)
    );
}

#[test]
fn test_recursive_closure_via_def() {
    let env = new_env();
    let result = eval_all(
        "(def! fib (fn* (n) (if (< n 2) n (+ (fib (- n 1)) (fib (- n 2))))))
         (fib 15)",
        &env,
    );
    assert_eq!(result.unwrap(), MalVal::int(610));
}
