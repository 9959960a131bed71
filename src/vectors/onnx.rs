// Word vectors from all-MiniLM-L6-v2 running locally via ONNX.
//
// Each word is encoded on its own and the model's last hidden state is
// mean-pooled over the attention mask, giving one 384-dimensional vector
// per surface form. Cosine similarity between two such vectors is high for
// semantically close words ("migraine" and "headache") even when they share
// no characters.
//
// A word whose sub-tokens are all [UNK] is treated as having no vector,
// the same way a static vocabulary reports out-of-vocabulary words.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Encoding, Tokenizer};
use tracing::debug;

use super::traits::WordVectors;

/// Embedding dimension for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

const UNKNOWN_TOKEN: &str = "[UNK]";

/// ONNX-backed word vector provider.
pub struct OnnxWordVectors {
    // ort::Session::run takes &mut self; the provider is shared read-only
    // across requests, so the session sits behind a Mutex.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    unk_id: Option<u32>,
}

impl OnnxWordVectors {
    /// Load the embedding model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json` in the directory.
    /// Call `download_model()` first if they don't exist.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "Embedding model not found: {}\nRun `triage download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Embedding tokenizer not found: {}\nRun `triage download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| {
                format!(
                    "Failed to load embedding model from {}",
                    model_path.display()
                )
            })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;
        let unk_id = tokenizer.token_to_id(UNKNOWN_TOKEN);

        debug!("Loaded word embedding model from {}", model_dir.display());

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            unk_id,
        })
    }

    /// Whether an encoding carries at least one known, non-special sub-token.
    fn has_known_subtoken(&self, encoding: &Encoding) -> bool {
        encoding
            .get_ids()
            .iter()
            .zip(encoding.get_special_tokens_mask())
            .any(|(&id, &special)| special == 0 && Some(id) != self.unk_id)
    }

    /// Run the model over a batch of encodings and mean-pool each row.
    fn embed_encodings(&self, encodings: &[Encoding]) -> Result<Vec<Vec<f64>>> {
        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        if batch_size == 0 || max_len == 0 {
            return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch_size]);
        }

        // BERT inputs, padded to the longest encoding (pad id 0, mask 0)
        let mut input_ids: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut attention_mask: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut token_type_ids: Vec<i64> = Vec::with_capacity(batch_size * max_len);

        for enc in encodings {
            let ids = enc.get_ids();
            let mask = enc.get_attention_mask();
            let pad_len = max_len - ids.len();

            input_ids.extend(ids.iter().map(|&id| id as i64));
            attention_mask.extend(mask.iter().map(|&m| m as i64));
            token_type_ids.extend(std::iter::repeat_n(0i64, ids.len()));

            input_ids.extend(std::iter::repeat_n(0i64, pad_len));
            attention_mask.extend(std::iter::repeat_n(0i64, pad_len));
            token_type_ids.extend(std::iter::repeat_n(0i64, pad_len));
        }

        let shape = [batch_size as i64, max_len as i64];

        let input_ids_tensor =
            Tensor::from_array((shape, input_ids)).context("Failed to create input_ids tensor")?;
        let attention_mask_tensor = Tensor::from_array((shape, attention_mask.clone()))
            .context("Failed to create attention_mask tensor")?;
        let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids))
            .context("Failed to create token_type_ids tensor")?;

        // last_hidden_state: [batch, seq_len, 384]
        let hidden_states = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                    "token_type_ids" => token_type_ids_tensor
                })
                .context("Embedding ONNX inference failed")?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract embedding output tensor")?;

            data.to_vec()
        };

        Ok(mean_pool(&hidden_states, &attention_mask, batch_size, max_len))
    }
}

/// Average token embeddings per row, weighted by the attention mask.
fn mean_pool(
    hidden_states: &[f32],
    attention_mask: &[i64],
    batch_size: usize,
    max_len: usize,
) -> Vec<Vec<f64>> {
    let mut pooled = Vec::with_capacity(batch_size);

    for i in 0..batch_size {
        let mut sum = vec![0.0_f64; EMBEDDING_DIM];
        let mut mask_sum = 0.0_f64;

        for j in 0..max_len {
            let mask_val = attention_mask[i * max_len + j] as f64;
            if mask_val > 0.0 {
                mask_sum += mask_val;
                let offset = (i * max_len + j) * EMBEDDING_DIM;
                for (k, acc) in sum.iter_mut().enumerate() {
                    *acc += hidden_states[offset + k] as f64 * mask_val;
                }
            }
        }

        if mask_sum > 0.0 {
            for val in &mut sum {
                *val /= mask_sum;
            }
        }

        pooled.push(sum);
    }

    pooled
}

impl WordVectors for OnnxWordVectors {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn vector(&self, word: &str) -> Result<Option<Vec<f64>>> {
        Ok(self.vectors(&[word.to_string()])?.pop().flatten())
    }

    fn vectors(&self, words: &[String]) -> Result<Vec<Option<Vec<f64>>>> {
        let encodings: Vec<Encoding> = words
            .iter()
            .map(|w| {
                self.tokenizer
                    .encode(w.as_str(), true)
                    .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        // Only words with a known sub-token go through the model
        let known: Vec<usize> = encodings
            .iter()
            .enumerate()
            .filter(|(_, enc)| self.has_known_subtoken(enc))
            .map(|(i, _)| i)
            .collect();

        let mut result: Vec<Option<Vec<f64>>> = vec![None; words.len()];
        if known.is_empty() {
            return Ok(result);
        }

        let batch: Vec<Encoding> = known.iter().map(|&i| encodings[i].clone()).collect();
        let embedded = self.embed_encodings(&batch)?;

        for (slot, vector) in known.into_iter().zip(embedded) {
            result[slot] = Some(vector);
        }

        debug!(
            words = words.len(),
            embedded = result.iter().filter(|v| v.is_some()).count(),
            "Computed word vectors"
        );

        Ok(result)
    }
}
