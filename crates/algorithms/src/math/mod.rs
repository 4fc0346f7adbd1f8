//! Integer helpers on top of `num-bigint-dig`

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{validate, Error, Result};

/// Inverse of `a` modulo `m` by the extended Euclidean algorithm (FIPS 186-4 C.1)
///
/// `a` is reduced modulo `m` first. Fails with
/// [`Error::ModularInverseUndefined`] when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    validate::parameter(m > &BigUint::one(), "modulus", "must be greater than 1")?;

    let a = a % m;
    if a.is_zero() {
        return Err(Error::ModularInverseUndefined);
    }

    // Step 1: i = m, j = a, y2 = 0, y1 = 1
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut i = modulus.clone();
    let mut j = BigInt::from_biguint(Sign::Plus, a);
    let mut y2 = BigInt::zero();
    let mut y1 = BigInt::one();

    loop {
        // Steps 2-4: quotient, remainder and the next Bezout coefficient
        let (quotient, remainder) = i.div_rem(&j);
        let y = &y2 - &y1 * &quotient;

        if remainder.is_zero() {
            break;
        }

        i = j;
        j = remainder;
        y2 = y1;
        y1 = y;
    }

    // j now holds gcd(m, a)
    if !j.is_one() {
        return Err(Error::ModularInverseUndefined);
    }

    y1.mod_floor(&modulus)
        .to_biguint()
        .ok_or(Error::ModularInverseUndefined)
}

/// `ceil(a / b)` for a non-zero `b`
pub fn ceil_div(a: &BigUint, b: &BigUint) -> BigUint {
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + BigUint::one()
    }
}

/// `ceil(a / b)` on machine words
pub fn ceil_div_usize(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// `2^bits`
pub fn pow2(bits: usize) -> BigUint {
    BigUint::one() << bits
}

/// Map `x` into `[2^(length-1), 2^length)` by keeping its low `length-1` bits
pub fn fold_into_range(x: &BigUint, length: usize) -> BigUint {
    let floor = pow2(length - 1);
    let low = x % &floor;
    floor + low
}

/// Deterministic primality test by trial division
///
/// Only meant for the small candidates of the Shawe-Taylor base case.
pub fn is_prime_trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut divisor = 3u64;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
