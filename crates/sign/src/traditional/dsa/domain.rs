//! DSA domain parameters (FIPS 186-4, Appendix A.1.2 and A.2.3)

use std::sync::Arc;

use dsacrypt_algorithms::math::ceil_div_usize;
use dsacrypt_algorithms::{CancellationToken, HashId, Seed, ShaweTaylor};
use dsacrypt_params::traditional::dsa::{
    DSA_DS160_NAME, DSA_DS256_NAME, DSA_GENERATOR_INDEX, DSA_GGEN_LABEL, DSA_OTHER_NAME,
    DSA_SMELL_PRIMES,
};
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Seeds and counters recorded while generating domain parameters
///
/// Together with `L`, `N` and the hash they allow anyone to regenerate the
/// parameters and confirm that `p` and `q` were not chosen adversarially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Seed `q` was generated from
    pub firstseed: Seed,
    /// Seed state after generating `p`
    pub pgen_seed: Seed,
    /// Seed state after generating `q`
    pub qgen_seed: Seed,
    /// Generation counter after generating `p`
    pub pgen_counter: u64,
    /// Generation counter after generating `q`
    pub qgen_counter: u64,
    /// Generator index used for `g`
    pub index: u8,
}

impl Provenance {
    /// `firstseed || pgen_seed || qgen_seed`
    pub fn domain_parameter_seed(&self) -> Vec<u8> {
        [
            self.firstseed.as_bytes(),
            self.pgen_seed.as_bytes(),
            self.qgen_seed.as_bytes(),
        ]
        .concat()
    }
}

/// The shared `(p, q, g)` triple of a DSA setting
///
/// Immutable once constructed and handed out as `Arc<DomainParameters>` so that
/// every key derived from it shares one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    l: usize,
    n: usize,
    hash: HashId,
    provenance: Option<Provenance>,
}

impl DomainParameters {
    /// Generate fresh provable domain parameters
    pub fn generate<R: CryptoRng + RngCore>(
        l: usize,
        n: usize,
        hash: HashId,
        rng: &mut R,
    ) -> Result<Arc<Self>> {
        DomainParameterGenerator::new(l, n, hash)?.generate(rng)
    }

    /// Deterministically generate domain parameters from `firstseed`
    pub fn generate_from_seed(
        l: usize,
        n: usize,
        hash: HashId,
        firstseed: &Seed,
    ) -> Result<Arc<Self>> {
        DomainParameterGenerator::new(l, n, hash)?.generate_from_seed(firstseed)
    }

    /// Check caller-supplied parameters and wrap them
    ///
    /// Checks the byte lengths of `p` and `q` against `L` and `N`, that `q`
    /// divides `p - 1`, that `1 < g < p` and `g^q = 1 (mod p)`, and finally
    /// rejects `p` or `q` divisible by 2, 3 or 5.
    ///
    /// The last check is a smell test, not a primality proof: many composite
    /// values pass it. Callers that need prime `p` and `q` should generate the
    /// parameters or audit them through their provenance.
    #[instrument(level = "debug", skip(p, q, g, hash), fields(hash = %hash))]
    pub fn validate(
        p: BigUint,
        q: BigUint,
        g: BigUint,
        l: usize,
        n: usize,
        hash: HashId,
    ) -> Result<Arc<Self>> {
        check_sizes(l, n)?;

        // Lengths are compared on whole bytes
        let p_bits = p.to_bytes_be().len() * 8;
        if p_bits != l {
            return Err(Error::DomainParameterLengthMismatch {
                parameter: "p",
                expected: l,
                actual: p_bits,
            });
        }
        let q_bits = q.to_bytes_be().len() * 8;
        if q_bits != n {
            return Err(Error::DomainParameterLengthMismatch {
                parameter: "q",
                expected: n,
                actual: q_bits,
            });
        }

        let one = BigUint::one();
        if q <= one || p <= one {
            return Err(Error::DomainParameterInvalidRelation("p, q > 1"));
        }
        if !((&p - &one) % &q).is_zero() {
            return Err(Error::DomainParameterInvalidRelation("p = 1 (mod q)"));
        }
        if g <= one || g >= p {
            return Err(Error::DomainParameterInvalidRelation("1 < g < p"));
        }
        if g.modpow(&q, &p) != one {
            return Err(Error::DomainParameterInvalidRelation("g^q = 1 (mod p)"));
        }

        for small in DSA_SMELL_PRIMES {
            let small = BigUint::from(small);
            if (&p % &small).is_zero() {
                return Err(Error::DomainParameterCompositeSmell("p"));
            }
            if (&q % &small).is_zero() {
                return Err(Error::DomainParameterCompositeSmell("q"));
            }
        }

        debug!(l, n, "accepted supplied domain parameters");
        Ok(Arc::new(DomainParameters {
            p,
            q,
            g,
            l,
            n,
            hash,
            provenance: None,
        }))
    }

    /// The prime modulus `p`
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The prime divisor `q` of `p - 1`
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// The generator `g` of the order-`q` subgroup
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Bit length `L` of `p`
    pub fn l(&self) -> usize {
        self.l
    }

    /// Bit length `N` of `q`
    pub fn n(&self) -> usize {
        self.n
    }

    /// Hash the parameters were generated with
    pub fn hash(&self) -> HashId {
        self.hash
    }

    /// Generation record, present only for generated parameters
    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// `"DS160"`, `"DS256"` or `"other"`
    pub fn algorithm_name(&self) -> &'static str {
        match (self.l, self.n, self.hash) {
            (1024, 160, HashId::Sha1) => DSA_DS160_NAME,
            (2048, 256, HashId::Sha256) => DSA_DS256_NAME,
            _ => DSA_OTHER_NAME,
        }
    }

    /// Regenerate from the recorded first seed and compare everything
    ///
    /// Returns false when there is no provenance or when any of `p`, `q`, `g`,
    /// the seeds or the counters differ.
    pub fn verify_provenance(&self) -> bool {
        let Some(provenance) = &self.provenance else {
            return false;
        };

        match DomainParameters::generate_from_seed(
            self.l,
            self.n,
            self.hash,
            &provenance.firstseed,
        ) {
            Ok(regenerated) => *regenerated == *self,
            Err(err) => {
                debug!(%err, "regeneration from provenance failed");
                false
            }
        }
    }

    /// Attach a generation record carried alongside imported parameters
    pub(crate) fn with_provenance(self: Arc<Self>, provenance: Provenance) -> Arc<Self> {
        let mut domain = Arc::try_unwrap(self).unwrap_or_else(|shared| (*shared).clone());
        domain.provenance = Some(provenance);
        Arc::new(domain)
    }
}

/// Reject requests the generator cannot serve
fn check_sizes(l: usize, n: usize) -> Result<()> {
    if l == 0 || n == 0 || l % 8 != 0 || n % 8 != 0 {
        return Err(Error::InvalidParameterDictionary(format!(
            "L = {} and N = {} must be positive multiples of 8",
            l, n
        )));
    }
    if n >= l {
        return Err(Error::InvalidParameterDictionary(format!(
            "N = {} must be smaller than L = {}",
            n, l
        )));
    }
    Ok(())
}

/// Configured generator of provable domain parameters
///
/// ```no_run
/// # use dsacrypt_sign::traditional::dsa::DomainParameterGenerator;
/// # use dsacrypt_algorithms::{CancellationToken, HashId};
/// let token = CancellationToken::new();
/// let generator = DomainParameterGenerator::new(3072, 256, HashId::Sha256)
///     .unwrap()
///     .with_cancellation(&token);
/// # let _ = generator;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DomainParameterGenerator<'a> {
    l: usize,
    n: usize,
    hash: HashId,
    cancel: Option<&'a CancellationToken>,
}

impl<'a> DomainParameterGenerator<'a> {
    /// Check the request: `L` and `N` positive multiples of 8, room in `L` bits
    /// for `2·q·p0` (`N + ceil(L/2) + 2 < L`), and a hash at least `N` bits wide
    pub fn new(l: usize, n: usize, hash: HashId) -> Result<Self> {
        check_sizes(l, n)?;
        // p0 has ceil(L/2) + 1 bits, so 2·q·p0 stays below 2^(L-1)
        if n + ceil_div_usize(l, 2) + 2 >= l {
            return Err(Error::InvalidParameterDictionary(format!(
                "N = {} is too large to build a {}-bit p",
                n, l
            )));
        }
        if hash.output_bits() < n {
            return Err(Error::UnsupportedHashBitLength {
                hash,
                bits: hash.output_bits(),
                n,
            });
        }

        Ok(Self {
            l,
            n,
            hash,
            cancel: None,
        })
    }

    /// Stop prime searches once `token` is cancelled
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Generate with a random first seed of `ceil(N/8)` bytes
    pub fn generate<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<Arc<DomainParameters>> {
        // Step 1: firstseed with its top bit set
        let mut bytes = vec![0u8; ceil_div_usize(self.n, 8)];
        loop {
            rng.fill_bytes(&mut bytes);
            if bytes[0] & 0x80 != 0 {
                break;
            }
        }

        self.generate_from_seed(&Seed::new(bytes)?)
    }

    /// Generate from a caller-chosen first seed
    ///
    /// The seed must be at least `N` bits long with its top bit set.
    #[instrument(level = "debug", skip(self, firstseed), fields(l = self.l, n = self.n, hash = %self.hash))]
    pub fn generate_from_seed(&self, firstseed: &Seed) -> Result<Arc<DomainParameters>> {
        if firstseed.bit_len() < self.n || !firstseed.top_bit_set() {
            return Err(Error::InvalidParameterDictionary(
                "firstseed must be at least N bits with its top bit set".to_string(),
            ));
        }

        let mut generator = ShaweTaylor::new(self.hash);
        if let Some(token) = self.cancel {
            generator = generator.with_cancellation(token);
        }

        // Step 2: q from firstseed
        let q = generator.generate(self.n, firstseed)?;

        // Step 3: p0 of ceil(L/2) + 1 bits, continuing from qseed
        let p0 = generator.generate(ceil_div_usize(self.l, 2) + 1, &q.seed)?;

        // Steps 4-5: p = 2·t·q·p0 + 1
        let p = generator.extend(self.l, &p0.prime, &q.prime, &p0.seed, p0.counter)?;

        // Step 6: canonical generator
        let provenance = Provenance {
            firstseed: firstseed.clone(),
            pgen_seed: p.seed,
            qgen_seed: q.seed,
            pgen_counter: p.counter,
            qgen_counter: q.counter,
            index: DSA_GENERATOR_INDEX,
        };
        let g = canonical_generator(
            &p.prime,
            &q.prime,
            self.hash,
            &provenance.domain_parameter_seed(),
            provenance.index,
        )?;

        debug!(
            pgen_counter = provenance.pgen_counter,
            qgen_counter = provenance.qgen_counter,
            "generated domain parameters"
        );

        // Step 7
        Ok(Arc::new(DomainParameters {
            p: p.prime,
            q: q.prime,
            g,
            l: self.l,
            n: self.n,
            hash: self.hash,
            provenance: Some(provenance),
        }))
    }
}

/// Verifiable canonical generator (FIPS 186-4, Appendix A.2.3)
fn canonical_generator(
    p: &BigUint,
    q: &BigUint,
    hash: HashId,
    domain_parameter_seed: &[u8],
    index: u8,
) -> Result<BigUint> {
    let two = BigUint::from(2u32);

    // Step 3: e = (p - 1) / q
    let e = (p - BigUint::one()) / q;

    // U = domain_parameter_seed || "ggen" || index || count
    let mut u = Vec::with_capacity(domain_parameter_seed.len() + DSA_GGEN_LABEL.len() + 3);
    u.extend_from_slice(domain_parameter_seed);
    u.extend_from_slice(DSA_GGEN_LABEL);
    u.push(index);
    let prefix = u.len();

    // Steps 5-10: count is 16 bits and must not wrap to zero
    for count in 1..=u16::MAX {
        u.truncate(prefix);
        u.extend_from_slice(&count.to_be_bytes());

        let w = hash.digest_int(&u);
        let g = w.modpow(&e, p);
        if g >= two {
            debug!(count, "derived canonical generator");
            return Ok(g);
        }
    }

    Err(Error::DomainGeneratorExhausted)
}
