//! Constants for the Digital Signature Algorithm (FIPS 186-4)

/// Extra random bits drawn when deriving `x` or `k` (FIPS 186-4 B.1.1 / B.2.1)
pub const DSA_EXTRA_RANDOM_BITS: usize = 64;

/// Attempts allowed when an internally drawn `k` yields `r = 0` or `s = 0`
pub const DSA_MAX_SIGNING_ATTEMPTS: usize = 10;

/// Bit length below which Shawe-Taylor uses its direct construction
pub const SHAWE_TAYLOR_BASE_CASE_BITS: usize = 33;

/// Smallest bit length Shawe-Taylor accepts
pub const SHAWE_TAYLOR_MIN_BITS: usize = 2;

/// Label mixed into the canonical generator derivation (FIPS 186-4 A.2.3)
pub const DSA_GGEN_LABEL: &[u8] = b"ggen";

/// Generator index used for the canonical generator
pub const DSA_GENERATOR_INDEX: u8 = 1;

/// Small primes used by the compositeness smell test on supplied parameters
pub const DSA_SMELL_PRIMES: [u32; 3] = [2, 3, 5];

/// Algorithm name for (1024, 160, SHA-1)
pub const DSA_DS160_NAME: &str = "DS160";

/// Algorithm name for (2048, 256, SHA-256)
pub const DSA_DS256_NAME: &str = "DS256";

/// Algorithm name for any other parameter set
pub const DSA_OTHER_NAME: &str = "other";

/// JWK `kty` identifier for DSA keys
pub const DSA_JWK_KTY: &str = "a93954ad-1fa0-4ca8-aab4-c0c9545aff15";

/// JWK `alg` identifier for DS160
pub const DSA_JWK_ALG_DS160: &str = "3e39eeb9-ee43-4455-a07a-fc72941de431";

/// JWK `alg` identifier for DS256
pub const DSA_JWK_ALG_DS256: &str = "5fcb7176-5c49-47b1-8186-5ceac87190f9";

/// JWK `alg` identifier for other parameter sets
pub const DSA_JWK_ALG_OTHER: &str = "f50cdfe6-8f80-4e45-909e-43928017c3a9";
