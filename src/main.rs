use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use triage::analysis::analyzer::SymptomAnalyzer;
use triage::config::{Config, VectorBackend};
use triage::vectors::traits::WordVectors;

/// Triage: recommend a medical specialty from a description of symptoms.
///
/// Combines verbatim keyword matching with word-embedding similarity
/// against a fixed list of specialties.
#[derive(Parser)]
#[command(name = "triage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: TRIAGE_PORT or 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: TRIAGE_BIND or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,

        /// Directory of static files to serve (default: TRIAGE_STATIC_DIR or .)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Command to run alongside the server (default: TRIAGE_COMPANION)
        #[arg(long)]
        companion: Option<String>,
    },

    /// Recommend a specialty for the given symptom text
    Analyze {
        /// Symptom description
        #[arg(required = true)]
        text: Vec<String>,

        /// Also print every specialty's score
        #[arg(long)]
        scores: bool,
    },

    /// Download the ONNX word embedding model (~90 MB)
    DownloadModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("triage=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve {
            port,
            bind,
            static_dir,
            companion,
        } => {
            let config = Config::load()?;
            let analyzer = Arc::new(create_analyzer(&config)?);

            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let port = port.unwrap_or(config.port);
            let static_dir = static_dir.unwrap_or_else(|| config.static_dir.clone());

            let companion = match companion.or_else(|| config.companion.clone()) {
                Some(command) => Some(triage::companion::Companion::spawn(&command)?),
                None => None,
            };

            info!(
                "Open http://{bind}:{port} in a browser to use the symptom checker"
            );

            let result =
                triage::web::run_server(analyzer, &bind, port, &static_dir, shutdown_signal())
                    .await;

            if let Some(companion) = companion {
                companion.shutdown().await?;
            }
            result?;
        }

        Commands::Analyze { text, scores } => {
            let config = Config::load()?;
            let analyzer = create_analyzer(&config)?;
            let text = text.join(" ");

            let table = analyzer.score(&text)?;
            let specialty = analyzer.decide(&table);
            let recommendation =
                triage::analysis::decision::Recommendation::for_specialty(specialty);

            triage::output::terminal::display_recommendation(&recommendation);
            if scores {
                triage::output::terminal::display_scores(
                    &table,
                    specialty,
                    analyzer.weights().fallback_threshold,
                );
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX models...");
            println!("  Destination: {}", model_dir.display());

            triage::vectors::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `triage serve` or `triage analyze \"...\"`.");
        }
    }

    Ok(())
}

/// Build the configured word vector provider and the analyzer around it.
/// Any failure here is fatal: the service never starts without a model.
fn create_analyzer(config: &Config) -> Result<SymptomAnalyzer> {
    config.require_vectors()?;

    let vectors: Arc<dyn WordVectors> = match config.vector_backend {
        VectorBackend::Onnx => {
            info!("Using local ONNX word vectors");
            let dir = triage::vectors::download::embedding_model_dir(&config.model_dir);
            Arc::new(triage::vectors::onnx::OnnxWordVectors::load(&dir)?)
        }
        VectorBackend::Table => {
            let path = config
                .vector_table
                .as_deref()
                .context("TRIAGE_VECTOR_TABLE is not set")?;
            info!("Using static word vector table");
            Arc::new(triage::vectors::table::StaticWordVectors::load(path)?)
        }
    };

    let analyzer = SymptomAnalyzer::new(vectors)?.with_max_chars(config.max_symptom_chars);
    Ok(analyzer)
}

/// Resolves on Ctrl-C.
#[cfg(feature = "web")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
