use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use showroom_registry::DemoCatalog;
use showroom_tui::RunOptions;
use showroom_types::Platform;
use showroom_util::{ShowroomConfig, deep_link::section_links, default_log_path, parse_deep_link};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Browse the component kit showroom in the terminal.
#[derive(Debug, Parser)]
#[command(name = "showroom", version, about)]
struct Cli {
    /// Layout to use: handset, web or tv
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Deep link to open at startup, e.g. /showroom/button/outline
    #[arg(long)]
    link: Option<String>,

    /// YAML or JSON registration file replacing the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Delay before retrying a scroll to a row that was not laid out yet
    #[arg(long, value_name = "MS")]
    retry_delay_ms: Option<u64>,

    /// Jump instead of animating programmatic scrolls
    #[arg(long)]
    no_animate: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every outbound link in catalog order
    Links {
        /// Only print links for this section
        #[arg(long)]
        section: Option<String>,
    },
    /// Print the catalog with structural (section, item) indices
    Sections,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none())?;

    let mut config = ShowroomConfig::load().context("failed to load the showroom configuration")?;
    apply_cli_overrides(&mut config, &cli);
    debug!(?config, "configuration resolved");

    let catalog = Arc::new(load_catalog(config.catalog_path.as_deref())?);

    match &cli.command {
        Some(Command::Links { section }) => print_links(&catalog, section.as_deref()),
        Some(Command::Sections) => {
            print_sections(&catalog);
            Ok(())
        }
        None => {
            let options = run_options(&config, cli.link.as_deref());
            showroom_tui::run(catalog, options).await
        }
    }
}

/// TUI mode logs to a file so the terminal frame stays intact; everything
/// else logs to stderr.
fn init_tracing(tui_mode: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if !tui_mode {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(());
    }

    let log_path = default_log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn apply_cli_overrides(config: &mut ShowroomConfig, cli: &Cli) {
    if let Some(platform) = cli.platform {
        config.platform = platform;
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }
    if let Some(delay) = cli.retry_delay_ms {
        config.scroll_retry_delay_ms = delay;
    }
    if cli.no_animate {
        config.animate_scroll = false;
    }
}

fn load_catalog(path: Option<&Path>) -> Result<DemoCatalog> {
    match path {
        Some(path) => DemoCatalog::from_path(path).with_context(|| format!("failed to load catalog from {}", path.display())),
        None => DemoCatalog::from_embedded().context("failed to load the built-in catalog"),
    }
}

/// A startup link that does not parse is logged and skipped; the showroom
/// still opens.
fn run_options(config: &ShowroomConfig, link: Option<&str>) -> RunOptions {
    let initial_link = link.and_then(|link| match parse_deep_link(link) {
        Ok(params) => Some(params),
        Err(error) => {
            warn!(%error, link, "ignoring startup deep link");
            None
        }
    });
    RunOptions {
        platform: config.platform,
        initial_link,
        retry_delay: config.scroll_retry_delay(),
        animate: config.animate_scroll,
    }
}

fn print_links(catalog: &DemoCatalog, section: Option<&str>) -> Result<()> {
    let sections = match section {
        Some(name) => {
            let Some(index) = catalog.resolver().resolve_section_index(name) else {
                bail!("no section named '{name}'");
            };
            &catalog.sections()[index..=index]
        }
        None => catalog.sections(),
    };
    for section in sections {
        for link in section_links(section) {
            println!("{link}");
        }
    }
    Ok(())
}

fn print_sections(catalog: &DemoCatalog) {
    for (section_index, section) in catalog.sections().iter().enumerate() {
        println!("({section_index}, 0) {}", section.name);
        for (position, name) in catalog.use_case_names(section_index).into_iter().enumerate() {
            println!("  ({section_index}, {}) {name}", position + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn flags_override_the_configuration() {
        let cli = Cli::parse_from(["showroom", "--platform", "tv", "--retry-delay-ms", "120", "--no-animate"]);
        let mut config = ShowroomConfig::default();
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.platform, Platform::Tv);
        assert_eq!(config.scroll_retry_delay_ms, 120);
        assert!(!config.animate_scroll);
        assert!(cli.command.is_none());

        let options = run_options(&config, None);
        assert_eq!(options.retry_delay, Duration::from_millis(120));
        assert!(!options.animate);
    }

    #[test]
    fn links_subcommand_accepts_a_section_filter() {
        let cli = Cli::parse_from(["showroom", "links", "--section", "Button"]);
        match cli.command {
            Some(Command::Links { section }) => assert_eq!(section.as_deref(), Some("Button")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(Cli::try_parse_from(["showroom", "--platform", "desktop"]).is_err());
    }

    #[test]
    fn malformed_startup_link_is_dropped() {
        let config = ShowroomConfig::default();
        let options = run_options(&config, Some("/elsewhere/button"));
        assert!(options.initial_link.is_none());

        let options = run_options(&config, Some("/showroom/button/outline"));
        let params = options.initial_link.expect("link parses");
        assert_eq!(params.query_index.as_deref(), Some("button"));
        assert_eq!(params.item_index.as_deref(), Some("outline"));
        assert_eq!(options.retry_delay, Duration::from_millis(50));
    }

    #[test]
    fn unknown_section_filter_is_an_error() {
        let catalog = DemoCatalog::from_embedded().unwrap();
        assert!(print_links(&catalog, Some("carousel")).is_err());
    }
}
