use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memoria")]
#[command(author, version, about = "Upload a photo with a title and description as a memory")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload an image and save it as a new memory
    Submit {
        /// Image file to upload
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Title of the memory (required)
        #[arg(short, long, default_value = "")]
        title: String,

        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Upload the image as-is, without resizing or re-encoding
        #[arg(long)]
        no_normalize: bool,

        /// Print the created memory as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resize and re-encode an image the way uploads are normalized
    Normalize {
        /// Image to read
        #[arg(required = true)]
        input: PathBuf,

        /// Where to write the JPEG output
        #[arg(required = true)]
        output: PathBuf,

        /// Maximum output width in pixels (defaults to config)
        #[arg(long)]
        max_width: Option<u32>,

        /// JPEG quality 1-100 (defaults to config)
        #[arg(long)]
        quality: Option<u8>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
