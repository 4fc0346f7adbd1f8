pub mod dsa;

use dsacrypt_algorithms::{HashId, Seed};
use num_bigint_dig::BigUint;

use super::error::{EngineError, Result};
use super::model::TestCase;

/// String value of a case input (group defaults already merged in)
pub(crate) fn field(case: &TestCase, name: &'static str) -> Result<String> {
    case.inputs
        .get(name)
        .map(|v| v.as_string())
        .ok_or(EngineError::MissingField(name))
}

pub(crate) fn bytes(case: &TestCase, name: &'static str) -> Result<Vec<u8>> {
    Ok(hex::decode(field(case, name)?)?)
}

pub(crate) fn int(case: &TestCase, name: &'static str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&bytes(case, name)?))
}

pub(crate) fn number(case: &TestCase, name: &'static str) -> Result<u64> {
    let value = field(case, name)?;
    value
        .parse()
        .map_err(|_| EngineError::InvalidData(format!("{} = '{}' is not a number", name, value)))
}

pub(crate) fn hash(case: &TestCase) -> Result<HashId> {
    Ok(field(case, "hashAlg")?.parse()?)
}

pub(crate) fn seed(case: &TestCase, name: &'static str) -> Result<Seed> {
    Ok(Seed::new(bytes(case, name)?)?)
}

/// Compare a computed integer against the expected hex value
pub(crate) fn expect_int(case: &TestCase, name: &'static str, actual: &BigUint) -> Result<()> {
    let expected = int(case, name)?;
    if &expected != actual {
        return Err(EngineError::Mismatch {
            field: name,
            expected: hex::encode(expected.to_bytes_be()),
            actual: hex::encode(actual.to_bytes_be()),
        });
    }
    Ok(())
}

pub(crate) fn expect_bytes(case: &TestCase, name: &'static str, actual: &[u8]) -> Result<()> {
    let expected = bytes(case, name)?;
    if expected != actual {
        return Err(EngineError::Mismatch {
            field: name,
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        });
    }
    Ok(())
}

pub(crate) fn expect_number(case: &TestCase, name: &'static str, actual: u64) -> Result<()> {
    let expected = number(case, name)?;
    if expected != actual {
        return Err(EngineError::Mismatch {
            field: name,
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}
