use chunkanalyzer::cli::{analyze, analyze_all, assemble, show_info, split_kb, AssembleOptions};
use chunkanalyzer::{ChunkError, Config, OperationResult, Upload};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("CHUNKANALYZER_VERSION");
const BUILD: &str = env!("CHUNKANALYZER_BUILD");
const PROFILE: &str = env!("CHUNKANALYZER_PROFILE");
const GIT_HASH: &str = env!("CHUNKANALYZER_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "chunkanalyzer")]
#[command(author, about = "Split files into chunk sets, reassemble them, and validate text content", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base directory for chunk sets (overrides the config file)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file into numbered chunks under the storage directory
    #[command(alias = "s")]
    Split {
        /// File to split
        file: PathBuf,

        /// Chunk size in KB (400 bytes of each chunk are reserved)
        #[arg(long)]
        chunk_size: Option<u64>,

        /// Name to split under instead of the file's own name
        #[arg(long)]
        name: Option<String>,
    },

    /// Report every disallowed symbol in a file
    #[command(alias = "a")]
    Analyze {
        /// File to analyze
        file: PathBuf,
    },

    /// Rebuild a file from a chunk directory
    #[command(alias = "j")]
    Assemble {
        /// Chunk directory
        dir: PathBuf,

        /// Delete each chunk once it has been appended
        #[arg(long)]
        delete_source: bool,
    },

    /// Analyze every file in a directory
    #[command(name = "analyze-all", alias = "aa")]
    AnalyzeAll {
        /// Directory to scan
        dir: PathBuf,
    },

    /// Show information about a chunk directory
    #[command(alias = "i")]
    Info {
        /// Chunk directory
        dir: PathBuf,
    },
}

fn init_logging(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config, ChunkError> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(storage) = &cli.storage {
        config.storage.location = storage.clone();
    }
    config.validate()?;
    Ok(config)
}

fn print_result(result: &OperationResult, json: bool) -> Result<(), ChunkError> {
    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}", result);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("chunkanalyzer {}", get_version());
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging.level, cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if Cli::command().print_help().is_err() {
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Split {
            file,
            chunk_size,
            name,
        } => {
            let chunk_size_kb = chunk_size.unwrap_or(config.split.default_chunk_size_kb);
            match Upload::open(&file) {
                Ok(upload) => {
                    let upload = match name {
                        Some(name) => upload.with_name(name),
                        None => upload,
                    };
                    split_kb(upload, &config.storage.location, chunk_size_kb)
                }
                Err(e) => e.into(),
            }
        }

        Commands::Analyze { file } => match Upload::open(&file) {
            Ok(upload) => analyze(upload),
            Err(e) => e.into(),
        },

        Commands::Assemble { dir, delete_source } => {
            assemble(&dir, &AssembleOptions { delete_source })
        }

        Commands::AnalyzeAll { dir } => analyze_all(&dir),

        Commands::Info { dir } => {
            return match show_info(&dir) {
                Ok(info) => {
                    print!("{}", info);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
    };

    if let Err(e) = print_result(&result, cli.json) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
