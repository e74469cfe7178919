//! Postcard CLI - Command-line interface for Postcard Studio

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{catalog, edit, generate, preview, upload};

#[derive(Parser)]
#[command(name = "postcard")]
#[command(about = "Assemble postcard collages from photos and AI-generated art", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load photos into the gallery and show the result
    Upload {
        /// Image files, in the order they should appear
        #[arg(required = true)]
        files: Vec<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Generate a new photo from a text prompt
    Generate {
        /// Description of the scene
        #[arg(long, short)]
        prompt: String,

        /// Resolution: 1K, 2K or 4K
        #[arg(long)]
        size: Option<String>,

        /// Aspect ratio (1:1, 3:4, 4:3, 9:16, 16:9); derived from orientation if omitted
        #[arg(long)]
        aspect_ratio: Option<String>,

        /// Postcard orientation (portrait or landscape)
        #[arg(long)]
        orientation: Option<String>,

        /// Provider to use (gemini, mock)
        #[arg(long)]
        provider: Option<String>,

        /// API key; overrides POSTCARD_API_KEY and config files
        #[arg(long)]
        api_key: Option<String>,

        /// Output image path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Edit a photo with an instruction or a preset
    Edit {
        /// Image file to edit
        file: String,

        /// Free-form instruction, e.g. "add a retro filter"
        #[arg(long, short, conflicts_with = "preset", required_unless_present = "preset")]
        instruction: Option<String>,

        /// Preset label, e.g. "Vintage Polaroid" (see `postcard presets`)
        #[arg(long)]
        preset: Option<String>,

        /// Provider to use (gemini, mock)
        #[arg(long)]
        provider: Option<String>,

        /// API key; overrides POSTCARD_API_KEY and config files
        #[arg(long)]
        api_key: Option<String>,

        /// Output image path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show how photos would be laid out on the postcard
    Preview {
        /// Image files, in gallery order
        files: Vec<String>,

        /// Postcard size (4x6, 5x7, 6x9, 6x11)
        #[arg(long)]
        size: Option<String>,

        /// Postcard orientation (portrait or landscape)
        #[arg(long)]
        orientation: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List edit presets
    Presets,

    /// List postcard sizes
    Sizes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Upload { files, format } => upload::run(&files, &format),
        Commands::Generate {
            prompt,
            size,
            aspect_ratio,
            orientation,
            provider,
            api_key,
            output,
        } => generate::run(generate::GenerateArgs {
            prompt,
            size,
            aspect_ratio,
            orientation,
            provider,
            api_key,
            output,
        }),
        Commands::Edit {
            file,
            instruction,
            preset,
            provider,
            api_key,
            output,
        } => edit::run(edit::EditArgs {
            file,
            instruction,
            preset,
            provider,
            api_key,
            output,
        }),
        Commands::Preview {
            files,
            size,
            orientation,
            format,
        } => preview::run(&files, size.as_deref(), orientation.as_deref(), &format),
        Commands::Presets => catalog::run_presets(),
        Commands::Sizes => catalog::run_sizes(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
