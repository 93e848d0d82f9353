// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use exam_composer::app_config::{self, Config, OutputFormat};
use exam_composer::app_controller::{Controller, RenderOptions};
use exam_composer::document::{share, HeaderTemplate};
use exam_composer::language_utils::Language;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Screen,
    Html,
    Docx,
    All,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Screen => OutputFormat::Screen,
            CliOutputFormat::Html => OutputFormat::Html,
            CliOutputFormat::Docx => OutputFormat::Docx,
            CliOutputFormat::All => OutputFormat::All,
        }
    }
}

/// CLI Wrapper for HeaderTemplate to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliHeaderTemplate {
    Classic,
    Modern,
    Boxed,
    Academic,
}

impl From<CliHeaderTemplate> for HeaderTemplate {
    fn from(cli_template: CliHeaderTemplate) -> Self {
        match cli_template {
            CliHeaderTemplate::Classic => HeaderTemplate::Classic,
            CliHeaderTemplate::Modern => HeaderTemplate::Modern,
            CliHeaderTemplate::Boxed => HeaderTemplate::Boxed,
            CliHeaderTemplate::Academic => HeaderTemplate::Academic,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a document file, or every document in a directory
    Render(RenderArgs),

    /// Create or read share payloads
    Share {
        #[command(subcommand)]
        action: ShareCommand,
    },

    /// Generate shell completions for exam-composer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Document JSON file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Outputs to produce
    #[arg(long, value_enum, default_value = "all")]
    format: CliOutputFormat,

    /// Document language (EN, UR, AR or an ISO 639 code), overrides the document's tag
    #[arg(long)]
    language: Option<String>,

    /// Header template, overrides the document's template
    #[arg(long, value_enum)]
    template: Option<CliHeaderTemplate>,

    /// Output directory (defaults to the configured one)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

#[derive(Subcommand, Debug)]
enum ShareCommand {
    /// Print the share payload of a document file
    Encode {
        /// Document JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print a full link with the payload as its fragment
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the document JSON carried by a payload or link
    Decode {
        /// Bare payload or link ending in `#<payload>`
        #[arg(value_name = "PAYLOAD")]
        payload: String,
    },
}

/// exam-composer - print-ready exam papers from transcriptions
///
/// Normalizes transcribed exam papers and renders them as a screen/print
/// layout, a printable HTML page and a Word document.
#[derive(Parser, Debug)]
#[command(name = "exam-composer")]
#[command(version)]
#[command(about = "Render transcribed exam papers for print and Word")]
#[command(long_about = "exam-composer normalizes transcribed exam papers and renders them for print and Word.

EXAMPLES:
    exam-composer render paper.json                     # Layout, HTML and docx next to the config's output dir
    exam-composer render -f paper.json                  # Force overwrite existing files
    exam-composer render --format docx paper.json       # Only the Word document
    exam-composer render --language UR --template boxed paper.json
    exam-composer render --log-level debug papers/      # Process an entire directory
    exam-composer share encode paper.json               # Print a share payload
    exam-composer share decode 'https://host/#eyJ0...'  # Print the shared document
    exam-composer completions bash > exam-composer.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set after the
    // config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "exam-composer", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = Config::load_or_create(Path::new(&cli.config_path))
        .context("Configuration validation failed")?;
    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(level_filter(&config.log_level)),
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Render(args) => run_render(&controller, args).await,
        Commands::Share { action } => run_share(&controller, action),
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_render(controller: &Controller, args: RenderArgs) -> Result<()> {
    let language = args
        .language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()?;

    let options = RenderOptions {
        format: args.format.into(),
        language,
        template: args.template.map(Into::into),
        force_overwrite: args.force_overwrite,
    };
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&controller.config().output_dir));

    if args.input_path.is_file() {
        controller.run(args.input_path, output_dir, &options).await?;
    } else if args.input_path.is_dir() {
        let outcomes = controller.run_folder(args.input_path, output_dir, &options).await?;
        info!("Rendered {} document(s)", outcomes.len());
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_share(controller: &Controller, action: ShareCommand) -> Result<()> {
    match action {
        ShareCommand::Encode { input, base_url } => {
            let document = controller.load_document(&input, &RenderOptions::default())?;
            let output = match base_url {
                Some(base_url) => share::share_url(&base_url, &document)?,
                None => share::encode(&document)?,
            };
            println!("{}", output);
        }
        ShareCommand::Decode { payload } => match share::decode(&payload) {
            Some(document) => println!("{}", serde_json::to_string_pretty(&document)?),
            None => warn!("Payload could not be read, nothing to load"),
        },
    }
    Ok(())
}
