//! Stack growth for the recursive passes.
//!
//! Parsing, resolving and evaluating all recurse once per nesting level, and
//! a single Lox call costs several host frames.  Wrapping each recursive step
//! in [`ensure_sufficient_stack`] moves the walk onto a freshly allocated
//! segment whenever the current one runs low, so deep (but finite) recursion
//! in a script no longer overflows the thread's stack.
//!
//! Growth alone never fails, so runaway recursion is bounded separately by
//! the interpreter's call-depth limit.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
