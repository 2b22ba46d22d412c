//! Pure arithmetic behind the numeric operations.

use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("lcm of zero and zero is undefined")]
    ZeroLcm,
    #[error("lcm does not fit in a 64-bit integer")]
    LcmOverflow,
    #[error("hcf does not fit in a 64-bit integer")]
    HcfOverflow,
}

/// Trial division up to `floor(sqrt(n))`. Anything below 2 is not prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Remaining candidates are of the form 6k ± 1.
    let mut i = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

fn unsigned_gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Euclid's algorithm on absolute values, so the result is never negative.
/// `gcd(a, 0) == |a|` and `gcd(0, 0) == 0`.
///
/// Only `gcd(i64::MIN, 0)` and `gcd(i64::MIN, i64::MIN)` equal `2^63`, which
/// has no `i64` representation.
pub fn gcd(a: i64, b: i64) -> Result<i64, MathError> {
    let divisor = unsigned_gcd(a.unsigned_abs(), b.unsigned_abs());
    i64::try_from(divisor).map_err(|_| MathError::HcfOverflow)
}

/// `|a * b| / gcd(a, b)`, dividing before multiplying to delay overflow.
pub fn lcm(a: i64, b: i64) -> Result<i64, MathError> {
    let (a, b) = (a.unsigned_abs(), b.unsigned_abs());
    let divisor = unsigned_gcd(a, b);
    if divisor == 0 {
        return Err(MathError::ZeroLcm);
    }

    (a / divisor)
        .checked_mul(b)
        .and_then(|product| i64::try_from(product).ok())
        .ok_or(MathError::LcmOverflow)
}

/// Left fold of [`lcm`] seeded with the first element.
pub fn lcm_all(values: &[i64]) -> Option<Result<i64, MathError>> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().try_fold(*first, |acc, &n| lcm(acc, n)))
}

/// Left fold of [`gcd`] seeded with the first element.
///
/// A single element is its own hcf, sign included.
pub fn gcd_all(values: &[i64]) -> Option<Result<i64, MathError>> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().try_fold(*first, |acc, &n| gcd(acc, n)))
}

/// The first `n` Fibonacci numbers, starting `0, 1, 1, 2, ...`. Terms are
/// exact at any length.
pub fn fibonacci_sequence(n: usize) -> Vec<BigUint> {
    let mut sequence = Vec::with_capacity(n);
    let (mut a, mut b) = (BigUint::from(0u32), BigUint::from(1u32));
    for _ in 0..n {
        let next = &a + &b;
        sequence.push(std::mem::replace(&mut a, std::mem::replace(&mut b, next)));
    }
    sequence
}
