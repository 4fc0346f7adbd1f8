//! Shawe-Taylor provable primes (FIPS 186-4, Appendix C.6)
//!
//! A prime of `length` bits is built from a certified prime `c0` of roughly
//! half the length: candidates have the form `c = 2·t·c0 + 1` and are
//! certified with Pocklington's criterion. Below 33 bits the candidates are
//! small enough to be proven prime by trial division.
//!
//! The construction is a pure function of `(length, seed, hash)`. Every call
//! returns the advanced seed and the generation counter so that domain
//! parameters can later be regenerated and audited.

mod cancel;
mod seed;

pub use cancel::CancellationToken;
pub use seed::Seed;

use dsacrypt_params::traditional::dsa::{SHAWE_TAYLOR_BASE_CASE_BITS, SHAWE_TAYLOR_MIN_BITS};
use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument, trace};

use crate::error::{validate, Error, Result};
use crate::hash::HashId;
use crate::math::{ceil_div, ceil_div_usize, fold_into_range, is_prime_trial_division, pow2};

/// A certified prime together with the generator state after producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvablePrime {
    /// The prime
    pub prime: BigUint,
    /// Seed to continue from (`prime_seed` in FIPS 186-4)
    pub seed: Seed,
    /// Generation counter (`prime_gen_counter` in FIPS 186-4)
    pub counter: u64,
}

/// Shawe-Taylor prime generator bound to one hash function
#[derive(Debug, Clone, Copy)]
pub struct ShaweTaylor<'a> {
    hash: HashId,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> ShaweTaylor<'a> {
    /// Generator using `hash`
    pub fn new(hash: HashId) -> Self {
        Self { hash, cancel: None }
    }

    /// Check `token` once per candidate and stop with [`Error::Cancelled`]
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The hash this generator uses
    pub fn hash(&self) -> HashId {
        self.hash
    }

    /// Generate a `length`-bit provable prime from `seed`
    ///
    /// Fails with [`Error::PrimeGenerationExhausted`] once the counter budget
    /// (`4·length` for the base case, `4·length` past the sub-prime's counter
    /// otherwise) is spent.
    #[instrument(level = "debug", skip(self, seed), fields(hash = %self.hash, seed_len = seed.len()))]
    pub fn generate(&self, length: usize, seed: &Seed) -> Result<ProvablePrime> {
        validate::parameter(
            length >= SHAWE_TAYLOR_MIN_BITS,
            "length",
            "provable primes need at least 2 bits",
        )?;

        if length < SHAWE_TAYLOR_BASE_CASE_BITS {
            return self.base_case(length, seed);
        }

        // Step 14: c0 of ceil(length / 2) + 1 bits
        let c0 = self.generate(ceil_div_usize(length, 2) + 1, seed)?;

        // Steps 15-35
        self.extend(length, &c0.prime, &BigUint::one(), &c0.seed, c0.counter)
    }

    /// Generate a `bits`-bit provable prime from a fresh random seed
    ///
    /// The seed is twice the estimated security strength of a `bits`-bit
    /// modulus long, rounded down to whole bytes, with its top bit set.
    pub fn generate_random<R: CryptoRng + RngCore>(
        &self,
        bits: usize,
        rng: &mut R,
    ) -> Result<ProvablePrime> {
        validate::parameter(
            bits > 0 && bits % 8 == 0,
            "bits",
            "must be a positive multiple of 8",
        )?;

        let mut bytes = vec![0u8; (2 * security_strength(bits) / 8).max(1)];
        loop {
            rng.fill_bytes(&mut bytes);
            if bytes[0] & 0x80 != 0 {
                break;
            }
        }

        self.generate(bits, &Seed::new(bytes)?)
    }

    /// Grow a certified factor into a `length`-bit prime `2·t·cofactor·factor + 1`
    ///
    /// With `cofactor = 1` these are steps 15-35 of Appendix C.6. With
    /// `cofactor = q` and `factor = p0` it is step 5 onwards of Appendix A.1.2.1.2,
    /// which derives the DSA modulus `p`. The base `a` is drawn from the hash
    /// and the candidate is accepted when `z = a^(2·t·cofactor)` satisfies
    /// `gcd(z - 1, c) = 1` and `z^factor = 1 (mod c)`.
    ///
    /// Fails with [`Error::Parameter`] when `2·factor·cofactor` is too wide for
    /// any multiple plus one to have exactly `length` bits.
    #[instrument(level = "debug", skip(self, factor, cofactor, seed), fields(hash = %self.hash))]
    pub fn extend(
        &self,
        length: usize,
        factor: &BigUint,
        cofactor: &BigUint,
        seed: &Seed,
        counter: u64,
    ) -> Result<ProvablePrime> {
        validate::parameter(
            length >= SHAWE_TAYLOR_MIN_BITS,
            "length",
            "provable primes need at least 2 bits",
        )?;
        validate::parameter(factor > &BigUint::one(), "factor", "must be a prime")?;
        validate::parameter(!cofactor.is_zero(), "cofactor", "must be non-zero")?;

        let one = BigUint::one();
        let two = BigUint::from(2u32);
        let three = BigUint::from(3u32);

        let outlen = self.hash.output_bits();
        let iterations = ceil_div_usize(length, outlen) - 1;
        let step = iterations as u64 + 1;
        let budget = 4 * length as u64 + counter;

        let mut seed = seed.clone();
        let mut counter = counter;

        // Steps 16-22: x from iterations + 1 hash blocks
        let x = self.hash_blocks(&seed, iterations);
        seed = seed.offset(step);

        // Step 23: x = 2^(length-1) + (x mod 2^(length-1))
        let x = fold_into_range(&x, length);

        // Step 24: t = ceil(x / (2·c0))
        let stride = (factor * cofactor) << 1;
        let upper = pow2(length);
        let restart = ceil_div(&pow2(length - 1), &stride);
        validate::parameter(
            &stride * &restart + &one <= upper,
            "factor",
            "2·factor·cofactor leaves no candidate of the requested length",
        )?;
        let mut t = ceil_div(&x, &stride);

        loop {
            self.check_cancelled()?;

            // Step 25: restart t once the candidate outgrows length bits
            if &stride * &t + &one > upper {
                t = restart.clone();
            }

            // Steps 26-27
            let candidate = &stride * &t + &one;
            counter += 1;

            // Steps 28-30: a = 2 + (a mod (c - 3))
            let a = self.hash_blocks(&seed, iterations);
            seed = seed.offset(step);
            let a = &two + a % (&candidate - &three);

            // Steps 31-32
            let z = a.modpow(&((&t * cofactor) << 1), &candidate);
            trace!(counter, "testing candidate");

            if pocklington(&z, factor, &candidate) {
                debug!(length, counter, "certified provable prime");
                return Ok(ProvablePrime {
                    prime: candidate,
                    seed,
                    counter,
                });
            }

            // Step 34
            if counter > budget {
                return Err(Error::PrimeGenerationExhausted { length, counter });
            }

            // Step 35
            t += &one;
        }
    }

    /// Steps 5-13 of Appendix C.6, for `length < 33`
    fn base_case(&self, length: usize, seed: &Seed) -> Result<ProvablePrime> {
        let floor = 1u64 << (length - 1);
        let budget = 4 * length as u64;

        let mut seed = seed.clone();
        let mut counter = 0u64;

        loop {
            self.check_cancelled()?;

            // Step 6: c = Hash(seed) xor Hash(seed + 1)
            let mixed: Vec<u8> = self
                .hash
                .digest(seed.as_bytes())
                .iter()
                .zip(self.hash.digest(seed.offset(1).as_bytes()))
                .map(|(a, b)| a ^ b)
                .collect();

            // Steps 7-8: fold into [2^(length-1), 2^length) and force odd.
            // Every digest is at least 20 bytes, and only the low bits matter.
            let low = mixed[mixed.len() - 8..]
                .iter()
                .fold(0u64, |acc, &b| (acc << 8) | b as u64);
            let candidate = (floor + (low & (floor - 1))) | 1;

            // Steps 9-10
            counter += 1;
            seed = seed.offset(2);
            trace!(counter, candidate, "testing small candidate");

            // Step 11
            if is_prime_trial_division(candidate) {
                debug!(length, counter, "found small prime");
                return Ok(ProvablePrime {
                    prime: BigUint::from(candidate),
                    seed,
                    counter,
                });
            }

            // Step 12
            if counter > budget {
                return Err(Error::PrimeGenerationExhausted { length, counter });
            }
        }
    }

    /// `sum(Hash(seed + i) · 2^(i·outlen))` for `i` in `0..=iterations`
    pub fn hash_blocks(&self, seed: &Seed, iterations: usize) -> BigUint {
        let outlen = self.hash.output_bits();
        (0..=iterations).fold(BigUint::zero(), |acc, i| {
            acc + (self.hash.digest_int(seed.offset(i as u64).as_bytes()) << (i * outlen))
        })
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled {
                operation: "provable prime generation",
            }),
            _ => Ok(()),
        }
    }
}

/// Security strength in bits of a `bits`-bit modulus against the general number field sieve
pub fn security_strength(bits: usize) -> usize {
    use core::f64::consts::LN_2;

    let b = bits.saturating_sub(1).max(1) as f64 * LN_2;
    let work = (64.0 / 9.0 * b).cbrt() * b.ln().max(0.0).powf(2.0 / 3.0);
    (work / LN_2).floor() as usize
}

/// Pocklington's criterion for `c` given `z = a^((c-1)/factor) mod c`
fn pocklington(z: &BigUint, factor: &BigUint, c: &BigUint) -> bool {
    if z.is_zero() {
        return false;
    }
    let one = BigUint::one();
    (z - &one).gcd(c) == one && z.modpow(factor, c) == one
}
