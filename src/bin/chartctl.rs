use clap::{Parser, Subcommand};
use chart_syntax_api::api::models::HealthResponse;
use chart_syntax_api::prompt::builder::build_prompt;
use chart_syntax_api::{Config, GenerationRequest, Pipeline, Variant};
use serde_json::{Map, Value};

#[derive(Parser, Debug)]
#[command(name = "chartctl", about = "CLI for the chart syntax API", version)]
struct Cli {
    /// Override PERPLEXITY_API_URL
    #[arg(global = true, long)]
    api_url: Option<String>,

    /// Override SUMMARIZER_URL
    #[arg(global = true, long)]
    summarizer_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate chart or diagram syntax without running the server
    Generate {
        /// Chart library to target
        #[arg(long, value_enum, default_value_t = Variant::Apex)]
        variant: Variant,
        /// Data or text to convert
        #[arg(long, value_name = "TEXT")]
        input: String,
        /// Chart or diagram type, e.g. Bar, Line, flowchart
        #[arg(long = "type", value_name = "TYPE")]
        output_type: String,
        /// Print the result wrapped in the variant's JSON response
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent, without summarizing or calling out
    Prompt {
        #[arg(long, value_enum, default_value_t = Variant::Apex)]
        variant: Variant,
        #[arg(long, value_name = "TEXT")]
        input: String,
        #[arg(long = "type", value_name = "TYPE")]
        output_type: String,
    },
    /// Run only the summarization step
    Summarize {
        #[arg(long, value_name = "TEXT")]
        input: String,
    },
    /// Check a running service's health endpoint
    Health {
        /// Base URL of the service
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut conf = Config::new()?;
    if let Some(url) = cli.api_url {
        conf.perplexity_url = url;
    }
    if let Some(url) = cli.summarizer_url {
        conf.summarizer_url = url;
    }

    match cli.command {
        Commands::Generate { variant, input, output_type, json } => {
            conf.variant = variant;
            let pipeline = Pipeline::from_config(&conf);
            let result = pipeline
                .generate(&GenerationRequest::new(input, output_type))
                .await
                .into_text();
            if json {
                let mut body = Map::new();
                body.insert(variant.result_key().to_string(), Value::String(result));
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", result);
            }
            Ok(())
        }
        Commands::Prompt { variant, input, output_type } => {
            println!("{}", build_prompt(&input, &output_type, variant));
            Ok(())
        }
        Commands::Summarize { input } => {
            conf.variant = Variant::Mermaid;
            let pipeline = Pipeline::from_config(&conf);
            let summary = pipeline.summarize(&input).await;
            println!("{}", summary);
            if summary.starts_with("Error:") {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Health { url } => {
            let url = format!("{}/", url.trim_end_matches('/'));
            let response = reqwest::get(&url).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            let status = response.status();
            if !status.is_success() {
                eprintln!("Error: {} returned {}", url, status);
                std::process::exit(1);
            }
            let health: HealthResponse = response.json().await?;
            println!("{}", health.message);
            Ok(())
        }
    }
}
