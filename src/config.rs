use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Which word vector backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorBackend {
    /// Local ONNX sentence-transformer (default), run per word
    Onnx,
    /// Static GloVe/word2vec table loaded from TRIAGE_VECTOR_TABLE
    Table,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// CLI flags override the listener settings.
pub struct Config {
    /// Which vector provider to build (default: Onnx)
    pub vector_backend: VectorBackend,
    /// Root directory for the ONNX model files
    pub model_dir: PathBuf,
    /// Path of the static vector table (required for the table backend)
    pub vector_table: Option<PathBuf>,
    pub bind: String,
    pub port: u16,
    /// Directory served for every non-API path
    pub static_dir: PathBuf,
    /// Optional cap on symptom text length, in characters
    pub max_symptom_chars: Option<usize>,
    /// Command line of a companion process started alongside the server
    pub companion: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let vector_backend = match get("TRIAGE_VECTORS").as_deref() {
            Some("table") => VectorBackend::Table,
            // "onnx" or unset both default to ONNX
            Some("onnx") | None => VectorBackend::Onnx,
            Some(other) => anyhow::bail!(
                "Unknown TRIAGE_VECTORS value {other:?}. Use \"onnx\" or \"table\"."
            ),
        };

        let port = match get("TRIAGE_PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("TRIAGE_PORT is not a valid port: {p}"))?,
            None => 5000,
        };

        let max_symptom_chars = match get("TRIAGE_MAX_SYMPTOM_CHARS") {
            Some(n) => Some(
                n.trim()
                    .parse::<usize>()
                    .with_context(|| format!("TRIAGE_MAX_SYMPTOM_CHARS is not a number: {n}"))?,
            ),
            None => None,
        };

        Ok(Self {
            vector_backend,
            model_dir: get("TRIAGE_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(crate::vectors::download::default_model_dir),
            vector_table: get("TRIAGE_VECTOR_TABLE").map(PathBuf::from),
            bind: get("TRIAGE_BIND").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            static_dir: get("TRIAGE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            max_symptom_chars,
            companion: get("TRIAGE_COMPANION"),
        })
    }

    /// Validate that the chosen vector backend has what it needs.
    /// For ONNX: model files must exist (or user should run download-model).
    /// For Table: TRIAGE_VECTOR_TABLE must point to an existing file.
    pub fn require_vectors(&self) -> Result<()> {
        match self.vector_backend {
            VectorBackend::Onnx => {
                if !crate::vectors::download::embedding_files_present(&self.model_dir) {
                    anyhow::bail!(
                        "ONNX embedding model not found in {}\n\
                         Run `triage download-model` to download it.\n\
                         Or set TRIAGE_VECTORS=table and TRIAGE_VECTOR_TABLE to use a static table.",
                        self.model_dir.display()
                    );
                }
                Ok(())
            }
            VectorBackend::Table => match &self.vector_table {
                Some(path) if path.exists() => Ok(()),
                Some(path) => anyhow::bail!("Vector table not found: {}", path.display()),
                None => anyhow::bail!(
                    "TRIAGE_VECTORS=table but TRIAGE_VECTOR_TABLE is not set. Add it to your .env file."
                ),
            },
        }
    }
}
