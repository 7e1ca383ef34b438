// mal-core - Native stack growth for non-tail evaluation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keeps non-tail evaluation inside the native stack.
//!
//! Every non-tail `eval` runs through [`ensure_sufficient_stack`], so nesting
//! up to the configured depth limit works on small thread stacks (2 MB for
//! `std::thread::spawn`) as well as on the main thread. The depth limit,
//! not the native stack, is what ends runaway recursion.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
