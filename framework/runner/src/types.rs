/// Recommended error type for a suite's `main` function. Compatible with the
/// rest of the runner API so `?` propagates cleanly.
pub type GaleResult<T> = anyhow::Result<T>;
