// mal-core - Tail call integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tail position evaluation must run in constant native stack.
//!
//! Each test recurses far deeper than the evaluation depth limit, so any
//! tail position that grows the Rust stack fails with `DepthExceeded`.

mod common;

use common::{MalVal, eval_all, new_env};

const DEPTH: i64 = 100_000;

#[test]
fn test_self_recursive_closure() {
    let env = new_env();
    let src = format!(
        "(def! count-down (fn* (n) (if (= n 0) :done (count-down (- n 1)))))
         (count-down {})",
        DEPTH
    );
    assert_eq!(eval_all(&src, &env).unwrap(), MalVal::keyword("done"));
}

#[test]
fn test_accumulator_through_let_and_do() {
    let env = new_env();
    let src = format!(
        "(def! sum-to (fn* (n acc)
           (if (= n 0)
             acc
             (let* (next (- n 1))
               (do
                 nil
                 (sum-to next (+ acc n)))))))
         (sum-to {} 0)",
        DEPTH
    );
    assert_eq!(eval_all(&src, &env).unwrap(), MalVal::int(DEPTH * (DEPTH + 1) / 2));
}

#[test]
fn test_mutual_recursion() {
    let env = new_env();
    let src = format!(
        "(def! even? (fn* (n) (if (= n 0) true (odd? (- n 1)))))
         (def! odd? (fn* (n) (if (= n 0) false (even? (- n 1)))))
         (even? {})",
        DEPTH
    );
    assert_eq!(eval_all(&src, &env).unwrap(), MalVal::bool(true));
}

#[test]
fn test_variadic_tail_call() {
    let env = new_env();
    let src = format!(
        "(def! drain (fn* (n & acc) (if (= n 0) (count acc) (drain (- n 1) n))))
         (drain {})",
        DEPTH
    );
    assert_eq!(eval_all(&src, &env).unwrap(), MalVal::int(1));
}

#[test]
fn test_swap_loop_through_atom() {
    let env = new_env();
    let src = format!(
        "(def! counter (atom 0))
         (def! bump (fn* (n) (if (= n 0) @counter (do (swap! counter + 1) (bump (- n 1))))))
         (bump {})",
        DEPTH
    );
    assert_eq!(eval_all(&src, &env).unwrap(), MalVal::int(DEPTH));
}
