//! Exact integer arithmetic shared by the passes
//!
//! Every helper returns `None` on `i64` overflow so the caller can leave the
//! node unfolded.

/// Greatest common divisor by Euclid's algorithm, always non-negative
pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    // gcd(i64::MIN, 0) does not fit; callers treat it like no common factor
    i64::try_from(a).unwrap_or(1)
}

/// Least common multiple of two non-zero values
pub(crate) fn lcm(a: i64, b: i64) -> Option<i64> {
    let g = gcd(a, b);
    if g == 0 {
        return Some(0);
    }
    (a / g).checked_mul(b)?.checked_abs()
}

/// `base^exponent` for a non-negative exponent, exponentiation by squaring
pub(crate) fn integer_power(base: i64, exponent: i64) -> Option<i64> {
    let exponent = usize::try_from(exponent).ok()?;
    num_traits::checked_pow(base, exponent)
}

/// Exact square root of a perfect square
pub(crate) fn exact_sqrt(value: i64) -> Option<i64> {
    let root = value.checked_isqrt()?;
    (root * root == value).then_some(root)
}

/// Reduce `n/d` to lowest terms with a positive denominator
pub(crate) fn reduce_fraction(numerator: i64, denominator: i64) -> Option<(i64, i64)> {
    let g = gcd(numerator, denominator);
    let (n, d) = (numerator / g, denominator / g);
    if d < 0 {
        Some((n.checked_neg()?, d.checked_neg()?))
    } else {
        Some((n, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-4, 6), 2);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(-3, 5), Some(15));
        assert_eq!(lcm(i64::MAX, i64::MAX - 1), None);
    }

    #[test]
    fn test_integer_power() {
        assert_eq!(integer_power(2, 9), Some(512));
        assert_eq!(integer_power(-3, 3), Some(-27));
        assert_eq!(integer_power(7, 0), Some(1));
        assert_eq!(integer_power(10, 19), None);
        assert_eq!(integer_power(2, -1), None);
    }

    #[test]
    fn test_exact_sqrt() {
        assert_eq!(exact_sqrt(49), Some(7));
        assert_eq!(exact_sqrt(0), Some(0));
        assert_eq!(exact_sqrt(50), None);
        assert_eq!(exact_sqrt(-4), None);
    }

    #[test]
    fn test_reduce_fraction() {
        assert_eq!(reduce_fraction(6, 8), Some((3, 4)));
        assert_eq!(reduce_fraction(3, -6), Some((-1, 2)));
        assert_eq!(reduce_fraction(0, 7), Some((0, 1)));
    }
}
