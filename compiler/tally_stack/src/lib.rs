//! Stack growth for nested bracket groups.
//!
//! The evaluator recurses once per `(...)` or `[...]` group, so the native
//! call stack is proportional to the nesting depth of the input expression.
//! A deeply nested expression such as `((((...))))` would overflow a fixed
//! thread stack; wrapping each descent in [`ensure_sufficient_stack`] grows
//! the stack on demand instead. This bounds memory, not time: each level
//! rescans its own group, so evaluation is `O(tokens * depth)`.
//!
//! # Platform Support
//!
//! - **Native targets**: backed by `stacker::maybe_grow`.
//! - **WASM targets**: plain call, the runtime manages its own stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn eval_group(&mut self, span: BracketSpan) -> EvalResult<f64> {
///     ensure_sufficient_stack(|| self.eval_range(span.open + 1, span.close))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
