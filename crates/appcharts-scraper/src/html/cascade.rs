//! Ordered fallback evaluation.

/// Runs `attempt` on each strategy in order and returns the first strategy
/// whose output is non-empty, together with that output.
///
/// Strategies after the first success are never evaluated.
pub fn first_success<'s, S, T, F>(strategies: &'s [S], mut attempt: F) -> Option<(&'s S, Vec<T>)>
where
    F: FnMut(&S) -> Vec<T>,
{
    strategies.iter().find_map(|strategy| {
        let output = attempt(strategy);
        (!output.is_empty()).then_some((strategy, output))
    })
}
