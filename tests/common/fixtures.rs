use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the `.at` sample programs
pub fn samples_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples")
}

/// Discover all .at files in the samples/ directory, sorted by name
pub fn discover_samples() -> Vec<PathBuf> {
    let mut samples: Vec<PathBuf> = fs::read_dir(samples_dir())
        .expect("Failed to read samples directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("at"))
        .collect();
    samples.sort();
    samples
}

/// Load a sample by file stem, e.g. `load_sample("01-hello")`
pub fn load_sample(name: &str) -> String {
    let path = samples_dir().join(format!("{}.at", name));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load sample {}: {}", name, e))
}
