//! cardflow - Entry Point

use cardflow::commands::{install_command_for, layout_report};
use cardflow::config::{resolve_config, CliOverrides, ResolvedConfig};
use cardflow::meta::{fetch_repo_meta, FetchProgress, GithubClient, FETCH_DELAY};
use cardflow::model::RepoMetaCache;
use cardflow::source::load_posts;
use cardflow::state::theme::detect_system_appearance;
use cardflow::state::{GalleryOptions, GalleryState, ThemeMode};
use cardflow::view::{run_gallery, ColorConfig};
use cardflow::view_state::card::CardRenderer;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// cardflow - masonry card gallery for markdown posts
#[derive(Parser, Debug)]
#[command(name = "cardflow")]
#[command(version)]
#[command(about = "Browse, search, and copy from a gallery of markdown cards")]
pub struct Args {
    /// Directory of markdown posts
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Repository metadata cache (JSON)
    #[arg(long)]
    pub meta: Option<PathBuf>,

    /// Start with search query active
    #[arg(short, long)]
    pub search: Option<String>,

    /// Color theme: system, light, or dark
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<ThemeMode>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Subcommand; the gallery opens when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Non-interactive subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fetch GitHub metadata for github posts and write the cache
    FetchMeta,
    /// Print the column assignment for a viewport width
    Layout {
        /// Viewport width in pixels
        #[arg(long)]
        width: u32,
    },
    /// Print the winget command installing the given app posts
    InstallCommand {
        /// Post slugs
        #[arg(required = true)]
        slugs: Vec<String>,
    },
}

fn parse_theme(raw: &str) -> Result<ThemeMode, String> {
    ThemeMode::parse(raw).ok_or_else(|| format!("expected system, light, or dark, got {raw:?}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(
        args.config.clone(),
        CliOverrides {
            content_dir: args.content_dir.clone(),
            meta_path: args.meta.clone(),
            theme: args.theme,
        },
    )?;

    cardflow::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    match args.command {
        Some(Command::FetchMeta) => fetch_meta(&config),
        Some(Command::Layout { width }) => {
            let content = load_posts(&config.content_dir)?;
            print!("{}", layout_report(&content.posts, &config.breakpoints, width));
            Ok(())
        }
        Some(Command::InstallCommand { slugs }) => {
            let content = load_posts(&config.content_dir)?;
            if let Some(command) = install_command_for(&content.posts, &slugs)? {
                println!("{command}");
            }
            Ok(())
        }
        None => run_tui(&config, args.search.as_deref(), args.no_color),
    }
}

fn run_tui(
    config: &ResolvedConfig,
    search: Option<&str>,
    no_color: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = load_posts(&config.content_dir)?;
    let repo_meta = RepoMetaCache::load(&config.meta_path)?;
    let colors = ColorConfig::from_env_and_args(no_color);

    let options = GalleryOptions {
        breakpoints: config.breakpoints.clone(),
        cell_width_px: config.cell_width_px,
        theme: config.theme,
        system_appearance: detect_system_appearance(),
    };
    let mut state = GalleryState::new(content.posts, repo_meta, options);
    if let Some(query) = search {
        state.set_query(query);
    }

    let renderer = CardRenderer::new(
        config.collapsed_code_lines,
        config.syntax_theme.clone(),
        colors.colors_enabled(),
    );
    run_gallery(state, renderer, colors)?;
    Ok(())
}

fn fetch_meta(config: &ResolvedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let content = load_posts(&config.content_dir)?;
    let client = GithubClient::from_env()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(fetch_repo_meta(
        &client,
        &content.posts,
        FETCH_DELAY,
        |progress| match progress {
            FetchProgress::Started(key) => println!("Fetching {key}..."),
            FetchProgress::Failed(key, error) => println!("Failed {key}: {error}"),
        },
    ));

    report.cache.save(&config.meta_path)?;
    println!(
        "Saved metadata for {} repositories to {} ({} failed)",
        report.fetched(),
        config.meta_path.display(),
        report.failed.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let err = Args::try_parse_from(["cardflow", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let err = Args::try_parse_from(["cardflow", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["cardflow"]);
        assert_eq!(args.content_dir, None);
        assert_eq!(args.meta, None);
        assert_eq!(args.search, None);
        assert_eq!(args.theme, None);
        assert!(!args.no_color);
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_search_flag() {
        let args = Args::parse_from(["cardflow", "-s", "rust"]);
        assert_eq!(args.search, Some("rust".to_string()));
    }

    #[test]
    fn test_theme_values() {
        let args = Args::parse_from(["cardflow", "--theme", "Light"]);
        assert_eq!(args.theme, Some(ThemeMode::Light));

        let err = Args::try_parse_from(["cardflow", "--theme", "sepia"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_paths() {
        let args = Args::parse_from([
            "cardflow",
            "--content-dir",
            "posts",
            "--meta",
            "meta.json",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.content_dir, Some(PathBuf::from("posts")));
        assert_eq!(args.meta, Some(PathBuf::from("meta.json")));
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_subcommands() {
        let args = Args::parse_from(["cardflow", "layout", "--width", "1300"]);
        assert_eq!(args.command, Some(Command::Layout { width: 1300 }));

        let args = Args::parse_from(["cardflow", "install-command", "vlc", "git"]);
        assert_eq!(
            args.command,
            Some(Command::InstallCommand {
                slugs: vec!["vlc".to_string(), "git".to_string()]
            })
        );

        let args = Args::parse_from(["cardflow", "--no-color", "fetch-meta"]);
        assert!(args.no_color);
        assert_eq!(args.command, Some(Command::FetchMeta));
    }

    #[test]
    fn test_install_command_requires_slugs() {
        assert!(Args::try_parse_from(["cardflow", "install-command"]).is_err());
    }
}
