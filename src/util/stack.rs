/// Stack space that must remain before a recursive step runs.
const RED_ZONE: usize = 128 * 1024;

/// Size of each additional stack segment.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Runs `f`, first moving to a freshly allocated stack segment when less than
/// [`RED_ZONE`] bytes of the current one remain.
///
/// Nested calls and deeply nested expressions recurse through the evaluator
/// and the parser; every recursive step goes through here, so the nesting
/// depth is bounded by the call depth limit and memory, never by the size of
/// the caller's thread stack.
///
/// # Example
/// ```
/// use slate::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u64) -> u64 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
