//! Scalar average consensus.
//!
//! One gossip step pulls a local estimate toward the mean of the estimates
//! heard from neighbors.  The function keeps no state; how fast a group
//! converges depends only on how often callers invoke it and on `alpha`.

/// `(1 - alpha)·local + alpha·mean(neighbor_values)`, or `local` unchanged
/// when no neighbor values are given.
///
/// Pass map values directly: `consensus_update(x, estimates.values().copied(), 0.5)`.
pub fn consensus_update<I>(local_value: f64, neighbor_values: I, alpha: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = neighbor_values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        return local_value;
    }
    let mean = sum / count as f64;
    (1.0 - alpha) * local_value + alpha * mean
}
