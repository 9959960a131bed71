// Model download helper for the ONNX word embedding model.
//
// Fetches all-MiniLM-L6-v2 (~90MB) from HuggingFace into a platform data
// directory (~/.local/share/triage/models/ on Linux) so it persists
// across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// HuggingFace repo for the embedding model.
const EMBEDDING_HF_URL: &str =
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main";

/// A file the ONNX provider needs: local name, path in the remote repo,
/// and whether it is large enough to deserve a progress bar.
struct ModelFile {
    local: &'static str,
    remote: &'static str,
    label: &'static str,
    large: bool,
}

const EMBEDDING_FILES: [ModelFile; 2] = [
    ModelFile {
        local: "tokenizer.json",
        remote: "tokenizer.json",
        label: "tokenizer.json",
        large: false,
    },
    ModelFile {
        local: "model.onnx",
        remote: "onnx/model.onnx",
        label: "model.onnx (~90 MB)",
        large: true,
    },
];

/// Returns the default directory for storing model files.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("triage")
        .join("models")
}

/// Subdirectory within model_dir for the embedding model.
pub fn embedding_model_dir(base: &Path) -> PathBuf {
    base.join("all-MiniLM-L6-v2")
}

/// Check whether every embedding model file exists.
pub fn embedding_files_present(base: &Path) -> bool {
    let embed_dir = embedding_model_dir(base);
    EMBEDDING_FILES
        .iter()
        .all(|f| embed_dir.join(f.local).exists())
}

/// Download the embedding model into `base`.
///
/// Files already on disk are left alone.
pub async fn download_model(base: &Path) -> Result<()> {
    download_model_from(EMBEDDING_HF_URL, base, true).await
}

async fn download_model_from(repo_url: &str, base: &Path, show_progress: bool) -> Result<()> {
    let embed_dir = embedding_model_dir(base);
    tokio::fs::create_dir_all(&embed_dir)
        .await
        .with_context(|| format!("Failed to create {}", embed_dir.display()))?;

    println!("\nWord embedding model (all-MiniLM-L6-v2):");

    for file in &EMBEDDING_FILES {
        let dest = embed_dir.join(file.local);
        if dest.exists() {
            info!(file = file.local, "Model file already present, skipping");
            println!("  {} (already exists)", file.local);
            continue;
        }
        println!("  Downloading {}...", file.label);
        let url = format!("{repo_url}/{}", file.remote);
        download_file(&url, &dest, show_progress && file.large).await?;
    }

    Ok(())
}

/// Progress display for one download: a bar when the size is known, a
/// byte-counting spinner otherwise, nothing when `visible` is false.
fn progress_for(total: Option<u64>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    match total {
        Some(size) => ProgressBar::new(size).with_style(
            ProgressStyle::default_bar()
                .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("valid template")
                .progress_chars("=> "),
        ),
        None => ProgressBar::new_spinner().with_style(
            ProgressStyle::default_spinner()
                .template("    {spinner} {bytes}")
                .expect("valid template"),
        ),
    }
}

/// Stream `url` into `dest`.
///
/// Chunks go to `<dest>.part` as they arrive, and the file is renamed to
/// `dest` only once the body is complete, so an interrupted download never
/// counts as present. The partial file is removed on failure.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let partial = dest.with_extension("part");
    let result = stream_to(url, &partial, show_progress).await;

    match result {
        Ok(written) => {
            tokio::fs::rename(&partial, dest)
                .await
                .with_context(|| format!("Failed to move download into {}", dest.display()))?;
            info!(bytes = written, "Downloaded {} to {}", url, dest.display());
            Ok(())
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(e)
        }
    }
}

async fn stream_to(url: &str, partial: &Path, show_progress: bool) -> Result<u64> {
    let mut response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to download {url}"))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let expected = response.content_length();
    let pb = progress_for(expected, show_progress);

    let mut file = tokio::fs::File::create(partial)
        .await
        .with_context(|| format!("Failed to create {}", partial.display()))?;
    let mut written: u64 = 0;

    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Connection lost while downloading {url}"))?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {}", partial.display()))?;
        written += chunk.len() as u64;
        pb.inc(chunk.len() as u64);
    }
    file.flush().await?;
    pb.finish_and_clear();

    if let Some(expected) = expected {
        if written != expected {
            anyhow::bail!("Download of {url} ended after {written} of {expected} bytes");
        }
    }

    Ok(written)
}
