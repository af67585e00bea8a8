//! Brandkit: AI-assisted campaign branding.
//!
//! `serve` runs the campaign API, `brand` drives the staged branding flow
//! against it (or in-process), and `quick` runs the one-shot variant.

use anyhow::Context;
use campaign_api::ApiServer;
use campaign_core::config::AppConfig;
use campaign_generation::{GenerationPipeline, GenerativeClient, OpenAiClient};
use campaign_management::{CampaignStore, LogoStorage, ManagementState};
use campaign_studio::{
    BrandingBackend, BrandingOutcome, BrandingRequest, BrandingStudio, HttpBackend, ImageStyle,
    LocalBackend, LogoUpload, QuickBrief, QuickCampaign,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "brandkit")]
#[command(about = "Generate campaign copy and visuals with a generative AI service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the campaign API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long, env = "BRANDKIT__API__HOST")]
        host: Option<String>,

        /// HTTP port (overrides config)
        #[arg(long, env = "BRANDKIT__API__HTTP_PORT")]
        http_port: Option<u16>,

        /// Expose Prometheus metrics on the configured metrics port
        #[arg(long, default_value_t = false)]
        metrics: bool,
    },

    /// Create a campaign and generate its branding step by step
    Brand {
        /// Campaign name
        #[arg(long)]
        name: String,

        /// Campaign description
        #[arg(long)]
        description: Option<String>,

        /// Logo file to upload
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Brand colors, e.g. "#FF0000, #00FF00"
        #[arg(long)]
        colors: Option<String>,

        /// Backend URL (overrides config)
        #[arg(long)]
        api_url: Option<String>,

        /// Run against an in-process store instead of a server
        #[arg(long, default_value_t = false, conflicts_with = "api_url")]
        local: bool,

        /// Print the outcome as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Generate a campaign in one call, without storing anything
    Quick {
        /// Campaign description
        #[arg(long)]
        description: String,

        /// Brand name
        #[arg(long)]
        brand_name: String,

        /// Brand colors
        #[arg(long, default_value = "")]
        colors: String,

        /// Image style: Modern, Vintage, Minimalist, Bold or Professional
        #[arg(long, default_value_t = ImageStyle::Modern)]
        style: ImageStyle,

        /// Download the generated image to this path
        #[arg(long)]
        save_image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "brandkit=info,campaign_api=info,campaign_generation=info,campaign_management=info,\
                 campaign_studio=info,tower_http=info"
                    .into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    match cli.command {
        Command::Serve {
            host,
            http_port,
            metrics,
        } => serve(config, host, http_port, metrics).await,
        Command::Brand {
            name,
            description,
            logo,
            colors,
            api_url,
            local,
            json,
        } => {
            let logo = logo.map(read_logo).transpose()?;
            let backend: Arc<dyn BrandingBackend> = if local {
                Arc::new(LocalBackend::new(build_state(&config)?))
            } else {
                let url = api_url.unwrap_or_else(|| config.studio.api_url.clone());
                info!(api_url = %url, "Using HTTP backend");
                Arc::new(HttpBackend::new(
                    url,
                    Duration::from_secs(config.generation.request_timeout_secs),
                )?)
            };

            let outcome = BrandingStudio::new(backend)
                .run(BrandingRequest {
                    name,
                    description,
                    logo,
                    brand_colors: colors,
                })
                .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
            Ok(())
        }
        Command::Quick {
            description,
            brand_name,
            colors,
            style,
            save_image,
        } => {
            let client: Arc<dyn GenerativeClient> =
                Arc::new(OpenAiClient::from_config(&config.generation)?);
            let mut quick = QuickCampaign::new(client);
            if save_image.is_none() {
                quick = quick.without_download();
            }

            let output = quick
                .run(&QuickBrief {
                    description,
                    brand_name,
                    brand_colors: colors,
                    image_style: style,
                })
                .await;

            println!("{}", output.content);
            if let Some(url) = &output.image_url {
                println!("\nImage: {url}");
            }
            if let (Some(path), Some(image)) = (save_image, output.image) {
                tokio::fs::write(&path, &image)
                    .await
                    .with_context(|| format!("failed to write image to {}", path.display()))?;
                println!("Saved image to {}", path.display());
            }
            Ok(())
        }
    }
}

async fn serve(
    mut config: AppConfig,
    host: Option<String>,
    http_port: Option<u16>,
    metrics: bool,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.api.host = host;
    }
    if let Some(port) = http_port {
        config.api.http_port = port;
    }
    if metrics {
        config.metrics.enabled = true;
    }

    info!(
        host = %config.api.host,
        http_port = config.api.http_port,
        text_model = %config.generation.text_model,
        image_model = %config.generation.image_model,
        logo_dir = %config.uploads.logo_dir,
        "Configuration loaded"
    );

    let state = build_state(&config)?;
    let server = ApiServer::new(config.clone(), state);

    if config.metrics.enabled {
        if let Err(e) = server.start_metrics() {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("Brandkit backend is ready to serve traffic");
    server.start_http().await
}

/// Store, pipeline and logo storage, constructed once per process.
fn build_state(config: &AppConfig) -> anyhow::Result<ManagementState> {
    let client: Arc<dyn GenerativeClient> = Arc::new(OpenAiClient::from_config(&config.generation)?);
    Ok(ManagementState {
        store: Arc::new(CampaignStore::new()),
        pipeline: Arc::new(GenerationPipeline::new(
            client,
            config.generation.system_prompt.clone(),
        )),
        logos: Arc::new(LogoStorage::new(
            &config.uploads.logo_dir,
            config.uploads.max_logo_bytes,
        )),
    })
}

fn read_logo(path: PathBuf) -> anyhow::Result<LogoUpload> {
    let bytes =
        std::fs::read(&path).with_context(|| format!("failed to read logo {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "uploaded_logo".to_string());
    Ok(LogoUpload { filename, bytes })
}

fn print_outcome(outcome: &BrandingOutcome) {
    println!("{}", outcome.message);
    if let Some(id) = outcome.campaign_id {
        println!("Campaign: {id}");
    }

    let sections = [
        ("Social Media Post", &outcome.social_post),
        ("Ad Copy", &outcome.ad_copy),
        ("Email Campaign", &outcome.email_campaign),
        ("Tagline", &outcome.tagline),
        ("Product Description", &outcome.product_description),
        ("Visual Prompt", &outcome.prompt),
    ];
    for (title, text) in sections {
        println!("\n## {title}\n{text}");
    }

    println!(
        "\n## Generated Visual\n{}",
        outcome.image_url.as_deref().unwrap_or("(none)")
    );
    println!(
        "\n## Logo\n{}",
        outcome.logo_url.as_deref().unwrap_or("(none)")
    );
}
