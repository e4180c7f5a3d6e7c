//! Exact combinatorics.
//!
//! Two flavours are needed: a tiny Pascal-triangle lookup for arrangements
//! within a single box (a square has at most 8 neighbours, so box sizes are
//! bounded), and arbitrary-precision binomial coefficients for whole-board
//! expansions where the counts overflow any machine integer.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// A square has at most this many neighbouring cells.
pub const MAX_NEIGHBOURS: usize = 8;

/// Pascal's triangle for n in 0..=8, padded with zeros.
/// `SMALL_COMBINATIONS[n][k]` = C(n, k).
pub const SMALL_COMBINATIONS: [[u32; 9]; 9] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 0, 0, 0, 0, 0, 0, 0],
    [1, 2, 1, 0, 0, 0, 0, 0, 0],
    [1, 3, 3, 1, 0, 0, 0, 0, 0],
    [1, 4, 6, 4, 1, 0, 0, 0, 0],
    [1, 5, 10, 10, 5, 1, 0, 0, 0],
    [1, 6, 15, 20, 15, 6, 1, 0, 0],
    [1, 7, 21, 35, 35, 21, 7, 1, 0],
    [1, 8, 28, 56, 70, 56, 28, 8, 1],
];

/// C(n, k) for n <= 8. Returns 0 when k > n.
pub fn small_combination(n: usize, k: usize) -> u32 {
    if k > MAX_NEIGHBOURS {
        return 0;
    }
    SMALL_COMBINATIONS[n][k]
}

/// C(n, k) as an exact big integer. Returns 0 when k > n.
pub fn combination(k: u32, n: u32) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    // multiplicative form; each intermediate division is exact
    for i in 1..=k {
        result *= BigUint::from(n - k + i);
        result /= BigUint::from(i);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_table_rows_sum_to_powers_of_two() {
        for n in 0..=MAX_NEIGHBOURS {
            let sum: u32 = SMALL_COMBINATIONS[n].iter().sum();
            assert_eq!(sum, 1 << n, "row {}", n);
        }
    }

    #[test]
    fn test_small_combination_out_of_range() {
        assert_eq!(small_combination(2, 3), 0);
        assert_eq!(small_combination(8, 9), 0);
        assert_eq!(small_combination(0, 0), 1);
    }

    #[test]
    fn test_combination_matches_small_table() {
        for n in 0..=8u32 {
            for k in 0..=n {
                assert_eq!(
                    combination(k, n),
                    BigUint::from(SMALL_COMBINATIONS[n as usize][k as usize])
                );
            }
        }
    }

    #[test]
    fn test_combination_large() {
        // C(50, 25) = 126410606437752
        assert_eq!(
            combination(25, 50),
            "126410606437752".parse::<BigUint>().unwrap()
        );
        // C(100, 50) does not fit in u64
        assert_eq!(
            combination(50, 100),
            "100891344545564193334812497256".parse::<BigUint>().unwrap()
        );
    }

    #[test]
    fn test_combination_degenerate() {
        assert_eq!(combination(5, 3), BigUint::zero());
        assert_eq!(combination(0, 0), BigUint::one());
        assert_eq!(combination(7, 7), BigUint::one());
    }
}
