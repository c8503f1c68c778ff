// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use web_rag::utils::logging::{format_error, format_info, format_step, format_success};
use web_rag::{
    AlwaysRetrieve, Config, ContentExtractor, DuckDuckGoProvider, HttpRenderer, LlmRouter,
    PageRenderer, RetrievalPipeline, SourceDiscovery, ToolRouter, Validator,
};

#[derive(Parser)]
#[command(name = "web_rag")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Web retrieval-augmented generation pipeline", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question, grounding it in freshly retrieved web content
    Ask {
        /// The question to answer
        query: String,

        /// Skip retrieval and answer directly from the model
        #[arg(long, conflicts_with = "rag")]
        direct: bool,

        /// Force retrieval even if the router would answer directly
        #[arg(long)]
        rag: bool,

        /// Print both the grounded and the direct answer
        #[arg(long)]
        compare: bool,
    },

    /// Run retrieval only and print the top-k context documents
    Retrieve {
        query: String,

        #[arg(short, long, default_value_t = 3)]
        k: usize,
    },

    /// Discover candidate URLs for a query without fetching them
    Search {
        query: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Fetch and extract a single URL, printing a content preview
    Fetch {
        url: String,
    },

    /// Load and validate the effective configuration
    ConfigCheck,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    web_rag::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Web RAG pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Ask {
            query,
            direct,
            rag,
            compare,
        } => {
            cmd_ask(config, &query, direct, rag, compare).await?;
        }
        Commands::Retrieve { query, k } => {
            cmd_retrieve(config, &query, k).await?;
        }
        Commands::Search { query, limit } => {
            cmd_search(config, &query, limit).await?;
        }
        Commands::Fetch { url } => {
            cmd_fetch(config, &url).await?;
        }
        Commands::ConfigCheck => {
            cmd_config_check(&config);
        }
    }

    Ok(())
}

async fn cmd_ask(config: Config, query: &str, direct: bool, rag: bool, compare: bool) -> Result<()> {
    let pipeline = RetrievalPipeline::new(config)
        .context("Failed to build pipeline")?
        .with_progress(true);

    if compare {
        println!("{}", format_step(1, 2, "Direct answer (no retrieval)"));
        println!("{}", "-".repeat(80));
        println!("{}", pipeline.answer_direct(query).await?);
        println!("{}\n", "-".repeat(80));

        println!("{}", format_step(2, 2, "Grounded answer (with retrieval)"));
        println!("{}", "-".repeat(80));
        println!("{}", pipeline.answer(query).await?);
        println!("{}", "-".repeat(80));
        return Ok(());
    }

    let retrieve = if direct {
        false
    } else if rag {
        true
    } else {
        let router = LlmRouter::new(pipeline.generator());
        match router.should_retrieve(query).await {
            Ok(decision) => decision,
            Err(e) => {
                warn!("Router failed ({}), defaulting to retrieval", e);
                AlwaysRetrieve.should_retrieve(query).await?
            }
        }
    };

    let answer = if retrieve {
        println!("{}", format_info("Answering with web retrieval"));
        pipeline.answer(query).await?
    } else {
        println!("{}", format_info("Answering directly"));
        pipeline.answer_direct(query).await?
    };

    println!("{}", "-".repeat(80));
    println!("{}", answer);
    println!("{}", "-".repeat(80));

    Ok(())
}

async fn cmd_retrieve(config: Config, query: &str, k: usize) -> Result<()> {
    let mut config = config;
    config.answer.top_k = k;

    let pipeline = RetrievalPipeline::new(config)
        .context("Failed to build pipeline")?
        .with_progress(true);

    let (top, stats) = pipeline.retrieve(query).await?;

    if top.is_empty() {
        println!("\nNo context documents retrieved for: \"{}\"\n", query);
        println!("Try:");
        println!("  - Rephrasing the query");
        println!("  - Checking network connectivity");
        return Ok(());
    }

    println!("\nContext for: \"{}\"\n", query);
    println!(
        "{} URL(s) discovered, {} document(s) indexed, {} ms\n",
        stats.urls_discovered, stats.documents_indexed, stats.duration_ms
    );
    println!("{}", "=".repeat(80));

    for (idx, scored) in top.iter().enumerate() {
        println!("\n{}. {}", idx + 1, scored.format_summary(300));
    }

    println!("{}", "=".repeat(80));
    info!("Retrieval complete");

    Ok(())
}

async fn cmd_search(config: Config, query: &str, limit: usize) -> Result<()> {
    let provider = DuckDuckGoProvider::new(&config.search, &config.fetch.user_agent)
        .context("Failed to build search provider")?;
    let discovery = SourceDiscovery::new(Arc::new(provider));

    let urls = discovery.discover(query, limit).await?;

    if urls.is_empty() {
        println!("{}", format_error("No sources found"));
        return Ok(());
    }

    println!("{}", format_success(&format!("{} source(s) found", urls.len())));
    for (idx, url) in urls.iter().enumerate() {
        println!("{:2}. {}", idx + 1, url);
    }

    Ok(())
}

async fn cmd_fetch(config: Config, url: &str) -> Result<()> {
    Validator::validate_url(url).context("Invalid URL")?;

    let renderer = HttpRenderer::new(&config.fetch).context("Failed to build renderer")?;
    let html = renderer
        .render(url)
        .await
        .map_err(|e| web_rag::PipelineError::fetch(url, e))?;

    match ContentExtractor::extract(url, &html) {
        Ok(text) => {
            let chars = text.chars().count();
            println!("{}", format_success(&format!("Extracted {} chars", chars)));
            println!("{}", "-".repeat(80));
            let preview: String = text.chars().take(500).collect();
            println!("{}", preview);
            if chars > 500 {
                println!("...");
            }
            println!("{}", "-".repeat(80));
        }
        Err(e) => {
            println!("{}", format_error(&format!("No usable content: {}", e)));
        }
    }

    Ok(())
}

fn cmd_config_check(config: &Config) {
    println!("{}", format_success("Configuration is valid"));
    println!("  search.provider        = {}", config.search.provider);
    println!("  search.max_results     = {}", config.search.max_results);
    println!("  fetch.page_timeout     = {}s", config.fetch.page_timeout_secs);
    println!("  fetch.max_concurrent   = {}", config.fetch.max_concurrent);
    println!("  embedding.model        = {}", config.embedding.model);
    println!(
        "  embedding.api_key      = {}",
        if config.embedding.api_key.is_some() {
            "set"
        } else {
            "missing"
        }
    );
    println!("  answer.model           = {}", config.answer.model);
    println!("  answer.top_k           = {}", config.answer.top_k);
}
