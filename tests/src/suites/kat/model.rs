//! Pure data model for ACVP-style known-answer vectors.
//! No dependency on the rest of the framework.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flexible value that can be either string, number, bool, array, object, or null
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FlexValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Array(Vec<FlexValue>),
    Object(HashMap<String, FlexValue>),
    Null,
}

impl FlexValue {
    pub fn as_string(&self) -> String {
        match self {
            FlexValue::String(s) => s.clone(),
            FlexValue::Number(n) => n.to_string(),
            FlexValue::Bool(b) => b.to_string(),
            FlexValue::Array(arr) => {
                serde_json::to_string(arr).unwrap_or_else(|_| format!("{:?}", arr))
            }
            FlexValue::Object(obj) => {
                serde_json::to_string(obj).unwrap_or_else(|_| format!("{:?}", obj))
            }
            FlexValue::Null => String::new(),
        }
    }
}

/// ----------------------------------------------------------------
/// 1. Leaf-level test case
/// ----------------------------------------------------------------
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(rename = "tcId")]
    pub test_id: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub inputs: HashMap<String, FlexValue>,
    #[serde(default = "default_expected_result")]
    pub expected_result: String, // valid / invalid
    #[serde(default)]
    pub error_contains: Option<String>,
}

fn default_expected_result() -> String {
    "valid".into()
}

/// ----------------------------------------------------------------
/// 2. Groups share the domain size, hash and often p, q, g
/// ----------------------------------------------------------------
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestGroup {
    #[serde(rename = "tgId")]
    pub group_id: u64,
    #[serde(rename = "testType")]
    pub test_type: String, // AFT / GDT
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub mode: Option<String>, // pqgGen / pqgVer / sigGen / sigVer / primeGen

    /// Group-level values (l, n, hashAlg, p, q, g, ...) copied into every case
    #[serde(flatten)]
    pub defaults: HashMap<String, FlexValue>,

    pub tests: Vec<TestCase>,
}

/// ----------------------------------------------------------------
/// 3. Whole suite (file)
/// ----------------------------------------------------------------
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    #[serde(rename = "vsId")]
    pub suite_id: u64,
    pub algorithm: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(rename = "testGroups")]
    pub groups: Vec<TestGroup>,
}
