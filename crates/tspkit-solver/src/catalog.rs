//! Combination catalogs: every canonical k-segment recombination for a
//! given k, built once and memoized process-wide through a concurrent
//! computation cache.
//!
//! Two catalogs are kept per k, each behind its own [`ComputationCache`]
//! instance, matching the "static-initialized global caches" design note:
//! the normalized catalog (every recombination, identity included) and the
//! pure catalog (the subset whose every new edge differs from the
//! original). The pure catalog's compute function calls into the
//! normalized cache, exercising the no-cross-key-blocking guarantee of the
//! cache across two distinct cache instances.
//!
//! # Example
//!
//! ```
//! use tspkit_solver::catalog::{normalized_combinations, pure_combinations};
//!
//! // 3-opt has 2^(3-1) * (3-1)! = 8 canonical recombinations, the first
//! // of which is always the identity.
//! let normalized = normalized_combinations(3).unwrap();
//! assert_eq!(normalized.len(), 8);
//! assert_eq!(normalized[0], vec![0, 1, 2, 3, 4, 5]);
//!
//! // The pure catalog drops the identity and every entry that reuses an
//! // original edge.
//! let pure = pure_combinations(3).unwrap();
//! assert!(!pure.contains(&vec![0, 1, 2, 3, 4, 5]));
//! assert!(pure.iter().all(|c| normalized.contains(c)));
//! ```

use std::sync::{Arc, OnceLock};

use tspkit_cache::{CacheError, ComputationCache};
use tspkit_core::{Result, TspError};

/// A single canonical combination: a length-2k index sequence into the
/// segment-bound vertex map B.
pub type Combination = Vec<usize>;

type CatalogCache = ComputationCache<usize, Arc<Vec<Combination>>, TspError>;

fn normalized_cache() -> &'static CatalogCache {
    static CACHE: OnceLock<CatalogCache> = OnceLock::new();
    CACHE.get_or_init(ComputationCache::new)
}

fn pure_cache() -> &'static CatalogCache {
    static CACHE: OnceLock<CatalogCache> = OnceLock::new();
    CACHE.get_or_init(ComputationCache::new)
}

fn unwrap_cache_error(err: CacheError<TspError>) -> TspError {
    match err {
        CacheError::Compute(inner) => inner,
        CacheError::NullKey => {
            TspError::InternalInvariantViolation("catalog cache received a null key".into())
        }
        CacheError::Interrupted => {
            TspError::InternalInvariantViolation("catalog cache wait was interrupted".into())
        }
    }
}

/// Returns the normalized combination catalog for `k`, building (and
/// self-checking) it on first use, then serving the cached copy forever.
///
/// # Example
///
/// ```
/// use tspkit_solver::catalog::normalized_combinations;
///
/// // 2-opt has exactly one non-identity recombination: reverse the
/// // segment between the two cuts.
/// let combinations = normalized_combinations(2).unwrap();
/// assert_eq!(combinations.len(), 2);
/// assert_eq!(combinations[0], vec![0, 1, 2, 3]);
/// ```
pub fn normalized_combinations(k: usize) -> Result<Arc<Vec<Combination>>> {
    normalized_cache()
        .get(k, move || build_normalized(k))
        .map_err(unwrap_cache_error)
}

/// Returns the pure combination catalog for `k`: the subset of
/// [`normalized_combinations`] whose every new edge differs from the
/// original edge at the same position. Does **not** include the identity
/// entry.
///
/// # Example
///
/// ```
/// use tspkit_solver::catalog::pure_combinations;
///
/// // 2-opt's only non-identity move (reverse the middle segment) is
/// // already pure: both new edges differ from the originals.
/// let pure = pure_combinations(2).unwrap();
/// assert_eq!(pure.len(), 1);
/// assert_eq!(pure[0], vec![0, 2, 1, 3]);
/// ```
pub fn pure_combinations(k: usize) -> Result<Arc<Vec<Combination>>> {
    pure_cache()
        .get(k, move || {
            let normalized = normalized_combinations(k)?;
            Ok(Arc::new(
                normalized
                    .iter()
                    .filter(|c| is_pure(c, k))
                    .cloned()
                    .collect(),
            ))
        })
        .map_err(unwrap_cache_error)
}

/// A convenience bundle of both catalogs for a given k.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub normalized: Arc<Vec<Combination>>,
    pub pure: Arc<Vec<Combination>>,
}

/// Builds (or fetches the cached) normalized and pure catalogs for `k`
/// together.
///
/// # Example
///
/// ```
/// use tspkit_solver::catalog::catalog;
///
/// let bundle = catalog(2).unwrap();
/// assert_eq!(bundle.normalized.len(), 2);
/// assert_eq!(bundle.pure.len(), 1);
/// ```
pub fn catalog(k: usize) -> Result<Catalog> {
    Ok(Catalog {
        normalized: normalized_combinations(k)?,
        pure: pure_combinations(k)?,
    })
}

/// Builds the normalized catalog for k and runs its self-check.
///
/// Construction: start from the single partial combination `[0]`. For each
/// of the k-1 segment-attachment rounds, extend every partial combination
/// with every odd bound `1, 3, ..., 2k-3` not yet present in it, once
/// forward (`v, v+1`) and once reversed (`v+1, v`). Finally append `2k-1`
/// to every combination.
fn build_normalized(k: usize) -> Result<Arc<Vec<Combination>>> {
    if k < 2 {
        return Err(TspError::InvalidParameter(format!(
            "k must be >= 2, got {k}"
        )));
    }

    let odd_bounds: Vec<usize> = (0..k - 1).map(|i| 2 * i + 1).collect();

    let mut partials: Vec<Combination> = vec![vec![0]];
    for _round in 1..k {
        let mut next = Vec::with_capacity(partials.len() * odd_bounds.len() * 2);
        for partial in &partials {
            for &v in &odd_bounds {
                if partial.contains(&v) {
                    continue;
                }
                let mut forward = partial.clone();
                forward.push(v);
                forward.push(v + 1);
                next.push(forward);

                let mut reversed = partial.clone();
                reversed.push(v + 1);
                reversed.push(v);
                next.push(reversed);
            }
        }
        partials = next;
    }

    for partial in &mut partials {
        partial.push(2 * k - 1);
    }

    self_check(k, &partials)?;
    tracing::info!(k, count = partials.len(), "built normalized combination catalog");

    Ok(Arc::new(partials))
}

fn is_pure(c: &[usize], k: usize) -> bool {
    (0..k).all(|i| (c[2 * i + 1] as isize - c[2 * i] as isize).unsigned_abs() != 1)
}

/// Cardinality, length, and bound-membership self-check for a catalog
/// entry set.
fn self_check(k: usize, normalized: &[Combination]) -> Result<()> {
    let expected_len = 2 * k;
    let expected_count: usize = (1..k).map(|i| 2 * (k - i)).product();

    if normalized.len() != expected_count {
        return Err(TspError::InternalInvariantViolation(format!(
            "expected {expected_count} combinations for k={k}, got {}",
            normalized.len()
        )));
    }

    for c in normalized {
        if c.len() != expected_len {
            return Err(TspError::InternalInvariantViolation(format!(
                "combination has length {} for k={k}, expected {expected_len}",
                c.len()
            )));
        }
        if c[0] != 0 || c[expected_len - 1] != expected_len - 1 {
            return Err(TspError::InternalInvariantViolation(format!(
                "combination {c:?} does not begin with 0 and end with {}",
                expected_len - 1
            )));
        }

        let mut odd_seen = vec![false; expected_len];
        let mut even_seen = vec![false; expected_len];
        for (pos, &bound) in c.iter().enumerate() {
            if pos % 2 == 0 {
                even_seen[bound] = true;
            } else {
                odd_seen[bound] = true;
            }
        }
        for b in (1..expected_len - 2).step_by(2) {
            if !odd_seen[b] {
                return Err(TspError::InternalInvariantViolation(format!(
                    "odd bound {b} missing in combination {c:?}"
                )));
            }
        }
        for b in (2..expected_len - 1).step_by(2) {
            if !even_seen[b] {
                return Err(TspError::InternalInvariantViolation(format!(
                    "even bound {b} missing in combination {c:?}"
                )));
            }
        }
    }

    Ok(())
}
