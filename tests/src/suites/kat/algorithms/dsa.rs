//! Known-answer handlers for DSA domain parameters and signatures

use std::sync::Arc;

use dsacrypt_sign::traditional::dsa::{
    sign, verify, DomainParameters, DsaSignature, KeyUsage, PrivateKey, PublicKey,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::super::dispatcher::{insert, DispatchKey, HandlerFn};
use super::super::error::{EngineError, Result};
use super::super::model::{TestCase, TestGroup};
use super::{bytes, expect_bytes, expect_int, expect_number, hash, int, number, seed};

/// `(l, n)` announced by the group
fn sizes(case: &TestCase) -> Result<(usize, usize)> {
    Ok((number(case, "l")? as usize, number(case, "n")? as usize))
}

/// Validated `(p, q, g)` from the case inputs
fn domain(case: &TestCase) -> Result<Arc<DomainParameters>> {
    let (l, n) = sizes(case)?;
    Ok(DomainParameters::validate(
        int(case, "p")?,
        int(case, "q")?,
        int(case, "g")?,
        l,
        n,
        hash(case)?,
    )?)
}

/// Provable p and q with canonical g, compared with the recorded provenance
pub(crate) fn pqg_gen(_group: &TestGroup, case: &TestCase) -> Result<()> {
    let (l, n) = sizes(case)?;
    let domain =
        DomainParameters::generate_from_seed(l, n, hash(case)?, &seed(case, "firstSeed")?)?;

    expect_int(case, "p", domain.p())?;
    expect_int(case, "q", domain.q())?;
    expect_int(case, "g", domain.g())?;

    let provenance = domain
        .provenance()
        .ok_or_else(|| EngineError::Crypto("generated domain has no provenance".into()))?;
    expect_bytes(case, "pSeed", provenance.pgen_seed.as_bytes())?;
    expect_bytes(case, "qSeed", provenance.qgen_seed.as_bytes())?;
    expect_number(case, "pCounter", provenance.pgen_counter)?;
    expect_number(case, "qCounter", provenance.qgen_counter)
}

/// Validation of supplied parameters
pub(crate) fn pqg_ver(_group: &TestGroup, case: &TestCase) -> Result<()> {
    domain(case).map(|_| ())
}

/// Signature with a fixed per-message secret
pub(crate) fn sig_gen(_group: &TestGroup, case: &TestCase) -> Result<()> {
    let hash = hash(case)?;
    let key = PrivateKey::from_components(domain(case)?, int(case, "x")?, false)?;
    let message = bytes(case, "message")?;

    // The RNG is unused when k is supplied
    let mut rng = ChaCha20Rng::seed_from_u64(case.test_id);
    let signature = sign(&key, &message, hash, Some(&int(case, "k")?), &mut rng)?;

    expect_int(case, "r", signature.r())?;
    expect_int(case, "s", signature.s())?;

    if !verify(&key.public_key(), &message, hash, &signature)? {
        return Err(EngineError::Crypto("generated signature does not verify".into()));
    }
    Ok(())
}

/// Verification of a supplied signature
pub(crate) fn sig_ver(_group: &TestGroup, case: &TestCase) -> Result<()> {
    let key = PublicKey::from_components(domain(case)?, int(case, "y")?, &[KeyUsage::Verify])?;
    let signature = DsaSignature::new(int(case, "r")?, int(case, "s")?);

    if verify(&key, &bytes(case, "message")?, hash(case)?, &signature)? {
        Ok(())
    } else {
        Err(EngineError::Crypto("signature rejected".into()))
    }
}

pub fn register(map: &mut std::collections::HashMap<DispatchKey, HandlerFn>) {
    insert(map, "DSA", "pqgGen", "GDT", pqg_gen);
    insert(map, "DSA", "pqgVer", "GDT", pqg_ver);
    insert(map, "DSA", "sigGen", "AFT", sig_gen);
    insert(map, "DSA", "sigVer", "AFT", sig_ver);
}
