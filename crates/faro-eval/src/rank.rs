//! Fractional ranking.

/// Indices of `values` in ascending value order.
fn sorted_indices(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    indices
}

/// Walk runs of numerically equal values in sorted order, calling `f(start, end)` for
/// each half-open run `start..end` of sorted positions.
fn for_each_tie_run(values: &[f64], sorted: &[usize], mut f: impl FnMut(usize, usize)) {
    let n = sorted.len();
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && values[sorted[j]] == values[sorted[i]] {
            j += 1;
        }
        f(i, j);
        i = j;
    }
}

/// Compute fractional ranks (average method), 1-based.
///
/// Tied values share the mean of the ranks they jointly occupy, so the ranks
/// always sum to `n (n + 1) / 2`.
///
/// # Examples
///
/// ```
/// use faro_eval::rank::fractional_ranks;
///
/// assert_eq!(fractional_ranks(&[30.0, 10.0, 20.0]), vec![3.0, 1.0, 2.0]);
/// assert_eq!(fractional_ranks(&[1.0, 2.0, 2.0, 3.0]), vec![1.0, 2.5, 2.5, 4.0]);
/// ```
#[must_use]
pub fn fractional_ranks(values: &[f64]) -> Vec<f64> {
    let sorted = sorted_indices(values);
    let mut ranks = vec![0.0; values.len()];

    for_each_tie_run(values, &sorted, |start, end| {
        // Positions start..end hold ranks start+1 ..= end.
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &index in &sorted[start..end] {
            ranks[index] = avg_rank;
        }
    });

    ranks
}

/// Tie correction term `Σ (t³ - t)` over groups of `t` tied values.
#[must_use]
pub fn tie_correction(values: &[f64]) -> f64 {
    let sorted = sorted_indices(values);
    let mut total = 0.0;
    for_each_tie_run(values, &sorted, |start, end| {
        let t = (end - start) as f64;
        total += t * t * t - t;
    });
    total
}
