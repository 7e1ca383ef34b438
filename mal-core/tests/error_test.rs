// mal-core - Error reporting integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for evaluation errors and their messages.

mod common;

use common::{Error, MalVal, eval_all, eval_str, new_env};
use mal_core::{get_eval_depth, get_max_eval_depth, set_max_eval_depth};

#[test]
fn test_unbound_symbol_carries_name() {
    let err = eval_str("(+ 1 missing-thing)").unwrap_err();
    match &err {
        Error::UnboundSymbol(sym) => assert_eq!(sym.name(), "missing-thing"),
        other => panic!("expected UnboundSymbol, got {:?}", other),
    }
    assert_eq!(err.to_string(), "'missing-thing' not found");
}

#[test]
fn test_not_callable() {
    assert_eval_err!("(1 2 3)", Error::NotCallable(MalVal::Int(1)));
    assert_eval_err!("(\"f\")", Error::NotCallable(MalVal::Str(_)));
    assert_eval_err!("((list 1))", Error::NotCallable(MalVal::List(_)));
}

#[test]
fn test_not_callable_message() {
    let err = eval_str("(:k 1)").unwrap_err();
    assert_eq!(err.to_string(), "Cannot call value: :k");
}

#[test]
fn test_arity_message_names_native() {
    let err = eval_str("(cons 1)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong number of arguments to 'cons': expected 2, got 1"
    );
}

#[test]
fn test_closure_arity_message() {
    let err = eval_str("((fn* (a b & c) a) 1)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong number of arguments: expected at least 2, got 1"
    );
}

#[test]
fn test_malformed_message() {
    let err = eval_str("(let* (a 1 b) a)").unwrap_err();
    assert_eq!(err.to_string(), "Malformed 'let*': odd number of binding forms");
}

#[test]
fn test_type_error_message() {
    let err = eval_str("(+ 1 \"two\")").unwrap_err();
    assert_eq!(err.to_string(), "+: expected int, got string");
}

#[test]
fn test_arithmetic_errors() {
    assert_eval_err!("(/ 1 0)", Error::DivisionByZero);
    assert_eval_err!("(+ 9223372036854775807 1)", Error::Overflow("+"));
    assert_eval_err!("(- -9223372036854775808)", Error::Overflow("-"));
}

#[test]
fn test_index_out_of_bounds() {
    assert_eval_err!(
        "(nth (list 1 2) 5)",
        Error::IndexOutOfBounds { index: 5, length: 2 }
    );
    assert_eval_err!("(nth [1] -1)", Error::IndexOutOfBounds { index: -1, .. });
}

#[test]
fn test_reader_error_surfaces_from_read_string() {
    assert_eval_err!("(read-string \"(1 2\")", Error::Read(_));
}

#[test]
fn test_error_in_argument_stops_evaluation() {
    let env = new_env();
    let result = eval_all("(def! a (atom 0)) (list (reset! a 1) (undefined) (reset! a 2))", &env);
    assert!(result.is_err());
    assert_eq!(eval_all("@a", &env).unwrap(), MalVal::int(1));
}

#[test]
fn test_depth_limit_on_non_tail_recursion() {
    let previous = set_max_eval_depth(100);
    let env = new_env();
    let result = eval_all(
        "(def! sum (fn* (n) (if (= n 0) 0 (+ n (sum (- n 1))))))
         (sum 1000)",
        &env,
    );
    set_max_eval_depth(previous);

    assert!(matches!(result, Err(Error::DepthExceeded(100))));
    assert_eq!(get_eval_depth(), 0);
    assert_eq!(get_max_eval_depth(), previous);
}

#[test]
fn test_depth_limit_allows_shallow_recursion() {
    let previous = set_max_eval_depth(100);
    let env = new_env();
    let result = eval_all(
        "(def! sum (fn* (n) (if (= n 0) 0 (+ n (sum (- n 1))))))
         (sum 20)",
        &env,
    );
    set_max_eval_depth(previous);

    assert_eq!(result.unwrap(), MalVal::int(210));
}

#[test]
fn test_default_depth_limit_on_spawned_thread() {
    // Spawned threads get a 2 MB stack; the default limit must still be
    // reached before the native stack runs out.
    let handle = std::thread::spawn(|| {
        let env = new_env();
        eval_all(
            "(def! sum (fn* (n) (if (= n 0) 0 (+ n (sum (- n 1))))))",
            &env,
        )
        .unwrap();
        // Values are not Send, so report plain data back to the test thread
        let near_limit = eval_all("(sum 900)", &env).map(|v| v.to_string());
        let past_limit = match eval_all("(sum 5000)", &env) {
            Err(Error::DepthExceeded(limit)) => Some(limit),
            _ => None,
        };
        (near_limit.map_err(|e| e.to_string()), past_limit, get_max_eval_depth())
    });
    let (near_limit, past_limit, max) = handle.join().unwrap();

    assert_eq!(near_limit.as_deref(), Ok("405450"));
    assert_eq!(past_limit, Some(max));
}

#[test]
fn test_evaluation_continues_after_error() {
    let env = new_env();
    assert!(eval_all("(undefined)", &env).is_err());
    assert_eq!(eval_all("(+ 1 1)", &env).unwrap(), MalVal::int(2));
}
