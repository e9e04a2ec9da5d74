use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use config::{Settings, load_env_file};
use directus_image::logging::init_logging;
use directus_image::{
    AssetMaterializer, Capabilities, ColumnTransformer, HttpFetcher, ImageTransformer,
    TransformInput, UuidNodeIds,
};

/// Materialize one Directus file column into the local build cache
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON transform request; read from stdin when omitted
    input: Option<PathBuf>,

    /// Base URL of the Directus server (overrides DIRECTUS_URL and directus.toml)
    #[arg(long)]
    site_url: Option<String>,

    /// Site root; the cache lives in <program-dir>/.cache/directus
    #[arg(long)]
    program_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, env = "DIRECTUS_IMAGE_LOG")]
    log_file: Option<PathBuf>,

    /// Pretty-print the resulting node
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_file();
    let args = Args::parse();

    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    let settings_dir = args.program_dir.clone().unwrap_or_else(|| cwd.clone());
    let mut settings = Settings::load(&settings_dir)
        .map_err(anyhow::Error::msg)?
        .with_env_overrides();
    if let Some(url) = args.site_url {
        settings.site_url = Some(url);
    }
    if let Some(dir) = args.program_dir {
        settings.program_directory = Some(dir);
    }
    let context = settings.into_context(&cwd).map_err(anyhow::Error::msg)?;

    let log_file = args.log_file.unwrap_or_else(|| context.log_file_path());
    init_logging(Some(&log_file));

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    let input: TransformInput =
        serde_json::from_str(&raw).context("Malformed transform request")?;

    let capabilities = Capabilities::discover(context.program_directory());
    tracing::debug!(image_processing = capabilities.image_processing(), "Capabilities discovered");

    let materializer = AssetMaterializer::new(
        context,
        Arc::new(HttpFetcher::new()),
        Arc::new(UuidNodeIds::new()),
    );
    let transformer = ImageTransformer::new(materializer, capabilities);

    if !transformer.handles(&input.identity.column) {
        bail!(
            "Column '{}' is not a single-file column of directus_files",
            input.identity.column.id
        );
    }

    let transformed = transformer.transform(input).await?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&transformed)?
    } else {
        serde_json::to_string(&transformed)?
    };
    println!("{}", output);

    Ok(())
}
