//! A from-scratch, dedicated 2-opt implementation, independent of
//! `tspkit-solver`'s cut-index/catalog machinery, used to cross-check
//! that k-opt specializes to classical 2-opt at k=2.

/// Classical best-improvement 2-opt: repeatedly finds the pair of edges
/// whose replacement most reduces total cost and reverses the segment
/// between them, until no pair improves by at least `min_improvement`.
pub fn reference_two_opt(
    weight: impl Fn(usize, usize) -> f64,
    n: usize,
    min_improvement: f64,
    initial: &[usize],
) -> Vec<usize> {
    let mut tour = initial.to_vec();
    loop {
        let mut best_delta = -min_improvement;
        let mut best_pair: Option<(usize, usize)> = None;

        for i in 0..n - 1 {
            for j in (i + 1)..n {
                let (a, b) = (tour[i], tour[i + 1]);
                let (c, d) = (tour[j], tour[j + 1]);
                let before = weight(a, b) + weight(c, d);
                let after = weight(a, c) + weight(b, d);
                let delta = after - before;
                if delta < best_delta {
                    best_delta = delta;
                    best_pair = Some((i, j));
                }
            }
        }

        match best_pair {
            Some((i, j)) => tour[i + 1..=j].reverse(),
            None => break,
        }
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_until_no_improving_pair_remains() {
        // A square where the initial crossing tour 0-2-1-3-0 should
        // untangle into 0-1-2-3-0 (or its mirror) via one reversal.
        const W: [[f64; 4]; 4] = [
            [0.0, 1.0, 2.0, 1.0],
            [1.0, 0.0, 1.0, 2.0],
            [2.0, 1.0, 0.0, 1.0],
            [1.0, 2.0, 1.0, 0.0],
        ];
        let weight = |a: usize, b: usize| W[a][b];
        let result = reference_two_opt(weight, 4, 1e-8, &[0, 2, 1, 3, 0]);
        let cost: f64 = result.windows(2).map(|w| weight(w[0], w[1])).sum();
        assert!((cost - 4.0).abs() < 1e-9);
    }
}
