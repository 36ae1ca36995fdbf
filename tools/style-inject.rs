//! Run the component style loader over files on disk
//!
//! Usage:
//!   style-inject --config loader.toml [--mode development] [--out-dir out] [--deps] <files>...
//!
//! Transformed files are written to stdout, or mirrored under `--out-dir`
//! relative to the root directory.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use component_style_loader::utils::init_logging_from_config;
use component_style_loader::{FsHost, LoaderConfig, Mode, StyleLoader};

#[derive(Parser, Debug)]
#[command(name = "style-inject", about = "Inject component stylesheets into source files")]
struct Args {
    /// Loader config file (.json or .toml)
    #[arg(long, short)]
    config: PathBuf,

    /// Override the build mode from the config file
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Directory top-level specs resolve from (defaults to config `rootDir`, then cwd)
    #[arg(long)]
    root_dir: Option<PathBuf>,

    /// Write results under this directory instead of stdout
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print registered dependencies to stderr
    #[arg(long)]
    deps: bool,

    /// Files to transform
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    match value {
        "development" | "dev" => Ok(Mode::Development),
        "production" | "prod" => Ok(Mode::Production),
        other => Err(format!("unknown mode '{}'", other)),
    }
}

/// Relative paths in the config are taken relative to the config file
fn anchor(path: &Path, config_dir: &Path) -> PathBuf {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    };
    std::fs::canonicalize(&path).unwrap_or(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = LoaderConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config {:?}", args.config))?;
    init_logging_from_config(config.logging.as_ref());

    let config_dir = args
        .config
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let cwd = std::env::current_dir()?;

    let root_dir = match (&args.root_dir, &config.options.root_dir) {
        (Some(dir), _) => anchor(dir, &cwd),
        (None, Some(dir)) => anchor(dir, &config_dir),
        (None, None) => cwd.clone(),
    };
    config.options.root_dir = Some(root_dir.clone());
    config.options.base_style_target = config
        .options
        .base_style_target
        .as_deref()
        .map(|target| anchor(target, &config_dir));

    let mode = args.mode.unwrap_or(config.mode);
    info!("Transforming {} files in {:?} mode", args.files.len(), mode);

    let loader = StyleLoader::new(config.options);
    for file in &args.files {
        let path = std::fs::canonicalize(file)
            .with_context(|| format!("Input file {:?} not found", file))?;
        let source = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;

        let host = FsHost::new(mode);
        let output = loader.run(&source, &path, &host).await?;
        debug!("{:?}: {:?}", path, output.kind);

        if args.deps {
            for dependency in host.take_dependencies() {
                eprintln!("{} -> {}", path.display(), dependency.display());
            }
        }

        match &args.out_dir {
            Some(out_dir) => {
                let relative = path
                    .strip_prefix(&root_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.file_name().map(PathBuf::from).unwrap_or_default());
                let target = out_dir.join(relative);
                if let Some(parent) = target.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&target, output.code)
                    .await
                    .with_context(|| format!("Failed to write {:?}", target))?;
            }
            None => print!("{}", output.code),
        }
    }

    Ok(())
}
