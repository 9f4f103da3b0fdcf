/// Compute effective limit with precedence: explicit override -> configured fallback.
#[must_use]
pub fn effective_limit(explicit: Option<u32>, fallback: u32) -> u32 {
    explicit.unwrap_or(fallback)
}

/// Cut a result list down to the global `--limit`, when one was given.
pub fn apply_limit<T>(items: &mut Vec<T>, limit: Option<u32>) {
    if let Some(limit) = limit {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
}
