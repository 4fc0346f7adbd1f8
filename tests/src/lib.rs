//! Known-answer suites and shared test support for dsacrypt

/// Directory holding the JSON vector sets, one sub-directory per suite
pub fn vector_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("vectors")
        .join("kat_json")
}
