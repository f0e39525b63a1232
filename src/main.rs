mod cli;

use memoria::compose::MemoryComposer;
use memoria::config;
use memoria::images::{encode_jpeg, ImageSource, NormalizeOptions, PathImageSource};
use memoria::workflow::MemoryWorkflow;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "memoria=trace,memoria_common=debug".to_string()
        } else {
            "memoria=info".to_string()
        }
    });

    // Logs go to stderr so stdout stays usable for --json
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Submit {
            image,
            title,
            description,
            no_normalize,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(submit(
                cli.config.as_deref(),
                image,
                title,
                description,
                no_normalize,
                json,
            ))
        }
        Commands::Normalize {
            input,
            output,
            max_width,
            quality,
        } => normalize_file(cli.config.as_deref(), &input, &output, max_width, quality),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("memoria {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn submit(
    config_path: Option<&Path>,
    image: Option<PathBuf>,
    title: String,
    description: String,
    no_normalize: bool,
    json: bool,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    if no_normalize {
        config.normalize.enabled = false;
    }

    let mut composer = MemoryComposer::new(MemoryWorkflow::from_config(&config));

    match PathImageSource::new(image).pick().await {
        Ok(Some(handle)) => composer.select_image(handle),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Error picking image: {}", e);
            anyhow::bail!("{}", e.notice());
        }
    }
    composer.set_title(title);
    composer.set_description(description);

    // Each stage is logged at info as the workflow enters it
    let result = composer.submit().await;

    match result {
        Ok(memory) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&memory)?);
            } else {
                println!("Memory Created Successfully!");
                println!("Your memory \"{}\" has been uploaded.", memory.title);
                println!("  ID: {}", memory.id);
                println!("  Image: {}", memory.image_url);
                println!("  Created: {}", memory.created_at.to_rfc3339());
            }
            Ok(())
        }
        Err(e) => {
            if let Some(inline) = e.inline_error() {
                anyhow::bail!("{:?}: {}", inline.field(), inline.user_message());
            }
            anyhow::bail!("{}", e.notice())
        }
    }
}

fn normalize_file(
    config_path: Option<&Path>,
    input: &Path,
    output: &Path,
    max_width: Option<u32>,
    quality: Option<u8>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let config = config::load_config_or_default(config_path)?;
    let mut options = NormalizeOptions::from(&config.normalize);
    if let Some(width) = max_width {
        options.max_width = width;
    }
    if let Some(quality) = quality {
        options.quality = quality;
    }
    if options.max_width == 0 || !(1..=100).contains(&options.quality) {
        anyhow::bail!("max width must be positive and quality between 1 and 100");
    }

    let data = std::fs::read(input).with_context(|| format!("Failed to read {:?}", input))?;
    let encoded = encode_jpeg(&data, &options)?;
    std::fs::write(output, &encoded).with_context(|| format!("Failed to write {:?}", output))?;

    println!(
        "{} -> {} ({} bytes -> {} bytes)",
        input.display(),
        output.display(),
        data.len(),
        encoded.len()
    );
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!(
        "  Backend: {}",
        if config.backend.url.is_empty() {
            "(not set)"
        } else {
            config.backend.url.as_str()
        }
    );
    println!(
        "  Credentials: {}",
        if config.backend.has_credentials() {
            "present"
        } else {
            "missing"
        }
    );
    println!("  Bucket: {}", config.backend.bucket);
    println!("  Table: {}", config.backend.table);
    println!(
        "  Normalize: {} (max width {}, quality {})",
        if config.normalize.enabled { "on" } else { "off" },
        config.normalize.max_width,
        config.normalize.quality
    );

    Ok(())
}
