// tests/src/suites/kat/engine.rs
//! Engine that routes each case to the registered dsacrypt handler

use crate::suites::kat::error::{EngineError, Result};
use crate::suites::kat::model::{TestCase, TestGroup};
use crate::suites::kat::runner::KatEngine;

/// Concrete type used by tests: one instance suffices for all suites.
pub struct DsacryptEngine;

impl KatEngine for DsacryptEngine {
    fn run(&self, group: &TestGroup, case: &TestCase) -> std::result::Result<(), String> {
        self.run_internal(group, case).map_err(|e| e.to_string())
    }
}

impl DsacryptEngine {
    fn run_internal(&self, group: &TestGroup, case: &TestCase) -> Result<()> {
        use super::dispatcher::{DispatchKey, REGISTRY};

        let key = DispatchKey {
            algo: group.algorithm.clone(),
            mode: group.mode.clone().unwrap_or_default(),
            kind: group.test_type.clone(),
        };

        let handler = REGISTRY
            .get(&key)
            .ok_or_else(|| EngineError::Crypto(format!("unsupported {:?}", key)))?;
        handler(group, case)
    }
}
