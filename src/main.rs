use anyhow::Result;
use clap::{Parser, Subcommand};
use pinforge::app::App;
use pinforge::models::{Config, GenerationOutcome};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PENDING_MESSAGE: &str =
    "Image generation is still in progress. Please try again in a few minutes.";

#[derive(Debug, Parser)]
#[command(name = "pinforge")]
#[command(about = "Generate images and pin the one you keep")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a prompt and wait for the generated image URLs.
    Generate {
        #[arg(value_name = "PROMPT", value_parser = parse_prompt_arg)]
        prompt: String,
    },
    /// Pin a generated image and download it.
    Deliver {
        #[arg(value_name = "URL")]
        url: String,
        /// Directory the image is written to.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

fn parse_prompt_arg(input: &str) -> std::result::Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("No prompt provided".to_string());
    }
    Ok(trimmed.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let app = match Config::from_env().and_then(|config| App::new(&config)) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Generate { prompt } => match app.submit(&prompt).await {
            Ok(GenerationOutcome::Complete(urls)) => {
                for url in urls {
                    println!("{}", url);
                }
            }
            Ok(GenerationOutcome::Pending { generation_id, .. }) => {
                info!("Generation {} timed out locally", generation_id);
                println!("{}", PENDING_MESSAGE);
                std::process::exit(2);
            }
            Err(e) => {
                error!("Generation failed: {}", e);
                std::process::exit(1);
            }
        },
        Command::Deliver { url, output_dir } => match app.deliver_selected(&url).await {
            Ok(asset) => {
                let path = output_dir.join(&asset.filename);
                std::fs::write(&path, &asset.bytes)?;
                println!("{}", path.display());
                println!("publish status: {}", asset.publish.status.as_header_value());
            }
            Err(e) => {
                error!("Failed to process image: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
