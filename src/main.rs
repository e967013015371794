use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use chart_syntax_api::{
    api,
    config::Config,
    GenerationRequest, Pipeline, Variant,
};

#[derive(Parser, Debug)]
#[command(name = "chart-syntax-api", about = "Serve chart and diagram syntax generated by an LLM", version)]
struct Args {
    /// Which chart library to generate for (overrides VARIANT)
    #[arg(long, value_enum)]
    variant: Option<Variant>,
    /// Bind address (overrides API_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Ask for one input on stdin, print the result, then start serving
    #[arg(short, long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Config::dotenv_load();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let args = Args::parse();
    let mut config = Config::new()?;
    if let Some(v) = args.variant {
        config.variant = v;
    }
    if let Some(h) = args.host {
        config.api_host = h;
    }
    if let Some(p) = args.port {
        config.port = p;
    }
    config.print_env_vars();

    let pipeline = Pipeline::from_config(&config);
    if let Err(e) = pipeline.warm_up().await {
        tracing::warn!("Summarizer not loaded at startup, will retry on first request: {}", e);
    }

    if args.interactive {
        run_interactive(&pipeline).await?;
    }

    let state = Arc::new(api::routes::AppState { pipeline });
    let app = api::routes::router(state);

    let ip: IpAddr = config.api_host.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 0.0.0.0", config.api_host);
        IpAddr::from([0, 0, 0, 0])
    });
    let socket_address = SocketAddr::new(ip, config.port);
    tracing::info!("{} listening on {}", config.variant.greeting(), socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

/// Read data and chart type from stdin, run the pipeline once and print it.
async fn run_interactive(pipeline: &Pipeline) -> Result<(), Box<dyn std::error::Error>> {
    let variant = pipeline.variant();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Enter your data or text: ").await?;
    stdout.flush().await?;
    let user_input = lines.next_line().await?.unwrap_or_default();

    stdout.write_all(variant.type_question().as_bytes()).await?;
    stdout.flush().await?;
    let output_type = lines.next_line().await?.unwrap_or_default();

    let request = GenerationRequest::new(user_input.trim_end(), output_type.trim());
    let data = pipeline.prompt_data(&request.user_input).await;
    if variant.summarizes_input() {
        println!("\nSummarized Text:\n{}\n", data);
    }
    let result = pipeline.generate_from_data(&data, &request.output_type).await.into_text();
    println!("\nGenerated {} Syntax:\n", variant.syntax_name());
    println!("{}", result);
    Ok(())
}
