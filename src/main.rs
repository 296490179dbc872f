use anyhow::{bail, Context};
use clap::Parser;
use open_market::config::cli::Command;
use open_market::utils::{logger, validation};
use open_market::utils::validation::Validate;
use open_market::{
    CollectingObserver, ConfigProvider, HttpTransport, ImagePayload, ImageSubtype,
    ListingSession, MarketClient, MarketConfig,
};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(cli: &open_market::Cli) -> anyhow::Result<MarketConfig> {
    let config = match &cli.config {
        Some(path) => MarketConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => MarketConfig::from_env()?,
    };
    let config = match &cli.base_url {
        Some(base_url) => config.with_base_url(base_url.clone()),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

fn read_images(paths: &[std::path::PathBuf]) -> anyhow::Result<Vec<ImagePayload>> {
    let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    validation::validate_file_extensions("image", &names, &["png", "jpg", "jpeg"])?;

    let images = paths
        .iter()
        .map(|path| -> anyhow::Result<ImagePayload> {
            let subtype: ImageSubtype = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .parse()
                .map_err(anyhow::Error::msg)?;
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(ImagePayload::new(data, subtype))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    validation::validate_image_count(&images)?;
    Ok(images)
}

async fn run(cli: open_market::Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    tracing::debug!("Using market server {}", config.base_url());

    let timeout = Duration::from_secs(config.timeout_seconds());
    let transport = HttpTransport::new(timeout, &config.server.user_agent)?;
    let client = MarketClient::from_config(&config, transport);
    let secret = config.credentials().secret.clone();

    match cli.command {
        Command::Health => {
            let status = client.health_check().await?;
            println!("{}", status);
        }
        Command::List {
            page,
            per_page,
            all,
        } => {
            let per_page = per_page.unwrap_or_else(|| config.items_per_page());
            if all {
                let mut session = ListingSession::new(per_page);
                let mut observer = CollectingObserver::default();
                while session.load_next(&client, &mut observer).await {
                    if let Some(error) = observer.errors.pop() {
                        return Err(error.into());
                    }
                    tracing::info!("Loaded {} products so far", session.items().len());
                }
                print_json(&session.items())?;
            } else {
                print_json(&client.list_page(page, per_page).await?)?;
            }
        }
        Command::Detail { id } => {
            print_json(&client.product_detail(id).await?)?;
        }
        Command::Create { product, images } => {
            let images = read_images(&images)?;
            let request = product.into_request(&secret, None);
            request.validate()?;
            let created = client.create_product(&request, &images).await?;
            tracing::info!("Registered product {}", created.product.id);
            print_json(&created)?;
        }
        Command::Update {
            id,
            product,
            thumbnail_id,
        } => {
            let request = product.into_request(&secret, thumbnail_id);
            request.validate()?;
            print_json(&client.update_product(id, &request).await?)?;
        }
        Command::Secret { id } => {
            println!("{}", client.fetch_secret(id, &secret).await?);
        }
        Command::Delete {
            id,
            secret: product_secret,
        } => {
            let product_secret = match product_secret {
                Some(value) => value,
                None => client.fetch_secret(id, &secret).await?,
            };
            let deleted = client.delete_product(id, &product_secret).await?;
            tracing::info!("Deleted product {}", deleted.product.id);
            print_json(&deleted)?;
        }
        Command::Download { url, output } => match client.download_image(&url).await {
            Some(bytes) => {
                write_output(&output, &bytes)?;
                tracing::info!("Saved {} bytes to {}", bytes.len(), output.display());
            }
            None => bail!("could not download {}", url),
        },
    }

    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[tokio::main]
async fn main() {
    let cli = open_market::Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
