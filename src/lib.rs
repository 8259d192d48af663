pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod sources;
pub mod widgets;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, SourceKind};
use error::CliError;
use model::WidgetKind;
use render::{PageRender, PageSummary, compose_document, report_degraded};
use sources::FileSource;
use widgets::{RawHtmlPolicy, RenderedSection, SlotStatus};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "sfw",
    version,
    about = "Render storefront pages from server-configured widgets"
)]
pub struct Cli {
    /// Config file (defaults to $STOREFRONT_WIDGETS_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to a daily file in the data dir instead of stderr
    #[arg(long, global = true, default_value_t = false)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to fetch descriptors from; overrides the `[source]` config section.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory of `<page>.json` payloads
    #[arg(long, env = "SFW_SOURCE_DIR", conflicts_with = "source_url")]
    pub source_dir: Option<PathBuf>,

    /// Base URL of the content service
    #[arg(long, env = "SFW_SOURCE_URL")]
    pub source_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a page to HTML or JSON
    Render {
        /// Page slug
        page: String,

        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Render widgets one after another instead of in parallel
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// How custom HTML payloads are injected
        #[arg(long, value_enum)]
        raw_html: Option<RawHtmlPolicy>,

        /// Emit empty marker sections for widgets that could not render
        #[arg(long, default_value_t = false)]
        show_unsupported: bool,
    },
    /// Report which widgets on a page would degrade
    Validate {
        /// Page slug
        page: String,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the widget types the registry can render
    Types,
    /// List pages available in a file source
    Pages {
        #[arg(long, env = "SFW_SOURCE_DIR")]
        source_dir: Option<PathBuf>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

pub async fn run() -> std::result::Result<(), CliError> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref()).map_err(anyhow::Error::from)?;
    let _guard = init_logging(&config, cli.log_to_file || config.log.to_file);
    match &config.loaded_from {
        Some(path) => debug!("loaded config from {}", path.display()),
        None => debug!("no config file, using defaults"),
    }

    match cli.command {
        Commands::Render {
            page,
            source,
            format,
            out,
            sequential,
            raw_html,
            show_unsupported,
        } => {
            let mut config = apply_source_args(config, &source);
            if let Some(policy) = raw_html {
                config.render.raw_html = policy;
            }
            config.render.show_unsupported |= show_unsupported;
            config.render.parallel &= !sequential;
            run_render(config, page, format, out).await?;
            Ok(())
        }
        Commands::Validate { page, source } => {
            let config = apply_source_args(config, &source);
            let sections = fetch_and_render(config, page.clone()).await?;
            let summary = print_validation(&sections).map_err(anyhow::Error::from)?;
            if summary.degraded() > 0 {
                return Err(CliError::degraded(&page, summary.degraded()));
            }
            Ok(())
        }
        Commands::Types => {
            for kind in WidgetKind::known() {
                println!("{:<14} {}", kind.tag(), kind.summary());
            }
            Ok(())
        }
        Commands::Pages { source_dir } => {
            let root = source_dir
                .or(config.source.root)
                .ok_or(config::ConfigError::MissingSource("set source.root or --source-dir"))
                .map_err(anyhow::Error::from)?;
            let pages = FileSource::new(root).pages().map_err(anyhow::Error::from)?;
            for page in pages {
                println!("{page}");
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sfw", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out).map_err(anyhow::Error::from)?;
            Ok(())
        }
    }
}

fn init_logging(config: &Config, to_file: bool) -> Option<WorkerGuard> {
    let level = config.log.level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if to_file {
        let data_dir = default_data_dir();
        std::fs::create_dir_all(&data_dir).ok();
        let file_appender = tracing_appender::rolling::daily(&data_dir, "storefront-widgets.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .compact()
                    .with_target(false)
                    .with_ansi(false),
            )
            .try_init()
            .ok();
        return Some(guard);
    }

    // Rendered output goes to stdout, so logs stay on stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_target(false),
        )
        .try_init()
        .ok();
    None
}

fn apply_source_args(mut config: Config, args: &SourceArgs) -> Config {
    if let Some(dir) = &args.source_dir {
        config.source.kind = SourceKind::File;
        config.source.root = Some(dir.clone());
    }
    if let Some(url) = &args.source_url {
        config.source.kind = SourceKind::Http;
        config.source.base_url = Some(url.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.source.timeout_secs = secs;
    }
    config
}

/// Fetch descriptors and render them off the async runtime.
async fn fetch_and_render(
    config: Config,
    page: String,
) -> Result<Vec<RenderedSection>> {
    tokio::task::spawn_blocking(move || -> Result<_> {
        let source = config.build_source()?;
        let descriptors = source
            .fetch(&page)
            .with_context(|| format!("fetch page {page:?} from {} source", source.name()))?;
        info!(page = %page, widgets = descriptors.len(), "rendering page");

        let opts = config.render_options();
        let sections = if config.render.parallel {
            render::render_page_parallel(&descriptors, &opts)
        } else {
            render::render_page(&descriptors, &opts)
        };
        report_degraded(&page, &sections);
        Ok(sections)
    })
    .await
    .context("render task panicked")?
}

async fn run_render(
    config: Config,
    page: String,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let doc_opts = config.document_options();
    let sections = fetch_and_render(config, page.clone()).await?;

    let output = match format {
        OutputFormat::Html => compose_document(&page, &sections, &doc_opts),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&PageRender::new(&page, &sections))?;
            json.push('\n');
            json
        }
    };

    match out {
        Some(path) => write_output(&path, &output)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn write_output(path: &Path, output: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    std::fs::write(path, output).with_context(|| format!("write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn print_validation(sections: &[RenderedSection]) -> std::io::Result<PageSummary> {
    let mut stdout = std::io::stdout().lock();
    for (slot, section) in sections.iter().enumerate() {
        let label = match section.status {
            SlotStatus::Rendered => "ok".green(),
            SlotStatus::UnknownType => "unknown".yellow(),
            SlotStatus::MalformedSettings => "malformed".red(),
        };
        write!(
            stdout,
            "{slot:>3} [{label}] {} ({})",
            section.widget_id, section.kind
        )?;
        match &section.detail {
            Some(detail) => writeln!(stdout, ": {detail}")?,
            None => writeln!(stdout)?,
        }
    }
    let summary = PageSummary::from_sections(sections);
    writeln!(
        stdout,
        "{} widgets, {} rendered, {} unknown type, {} malformed settings",
        summary.total, summary.rendered, summary.unknown_type, summary.malformed_settings
    )?;
    Ok(summary)
}

pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "storefront-widgets", "storefront-widgets")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".storefront-widgets"))
}
