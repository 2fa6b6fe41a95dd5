use anyhow::{Context, Result};
use assetroot_core::{
    Asset, AssetStoreLayout, Messages, ProgressObservable, ReleaseManifest, SHARD_PREFIX_LEN,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod messages;
mod output;

use messages::EnglishMessages;
use output::{BuildOutput, OutputWriter, PathOutput};

/// How often the progress line is refreshed during a build.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// assetroot - Asset store layout and virtual tree builder
#[derive(Parser)]
#[command(name = "assetroot")]
#[command(about = "Content-addressed asset store tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Store root directory (defaults to ASSETROOT_DIR env var or ./assets)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the path of an asset index document
    IndexPath {
        /// Asset index identifier
        id: String,
    },

    /// Print the path of a stored object
    ObjectPath {
        /// Content hash of the object
        hash: String,
    },

    /// Materialize the virtual tree for an asset index
    Build {
        /// Asset index identifier
        #[arg(required_unless_present = "manifest")]
        id: Option<String>,

        /// Release manifest to read the asset index identifier from
        #[arg(long, conflicts_with = "id")]
        manifest: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = OutputWriter::new(cli.json);

    // Determine store root: CLI arg > ASSETROOT_DIR env var > ./assets default
    let root = cli
        .root
        .or_else(|| std::env::var("ASSETROOT_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./assets"));
    let layout = AssetStoreLayout::new(root);

    let result = match cli.command {
        Commands::IndexPath { id } => cmd_index_path(&layout, &id, &output),
        Commands::ObjectPath { hash } => cmd_object_path(&layout, &hash, &output),
        Commands::Build { id, manifest } => {
            cmd_build(&layout, id, manifest.as_deref(), &output)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.write_error(&describe(&err, &EnglishMessages), 1);
            ExitCode::FAILURE
        }
    }
}

/// Render an error for the user, localizing library errors where possible.
fn describe(err: &anyhow::Error, messages: &dyn Messages) -> String {
    match err.downcast_ref::<assetroot_core::Error>() {
        Some(core_err) => core_err.describe(messages),
        None => format!("{:#}", err),
    }
}

fn cmd_index_path(layout: &AssetStoreLayout, id: &str, output: &OutputWriter) -> Result<()> {
    if id.is_empty() {
        anyhow::bail!("Asset index id cannot be empty");
    }

    let path = layout.index_path(id);
    let data = PathOutput {
        success: true,
        result_code: 0,
        path: path.display().to_string(),
    };
    output.write(&data, || format!("{}\n", path.display()))
}

fn cmd_object_path(layout: &AssetStoreLayout, hash: &str, output: &OutputWriter) -> Result<()> {
    if hash.len() < SHARD_PREFIX_LEN || !hash.is_char_boundary(SHARD_PREFIX_LEN) {
        anyhow::bail!("Invalid hash: {}", hash);
    }

    let path = layout.object_path(&Asset::new(hash, 0));
    let data = PathOutput {
        success: true,
        result_code: 0,
        path: path.display().to_string(),
    };
    output.write(&data, || format!("{}\n", path.display()))
}

fn cmd_build(
    layout: &AssetStoreLayout,
    id: Option<String>,
    manifest: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let assets_index_id = match (id, manifest) {
        (Some(id), _) => id,
        (None, Some(path)) => {
            let manifest = ReleaseManifest::load(path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))?;
            tracing::info!(
                release = ?manifest.id,
                assets = %manifest.assets_index_id,
                "Loaded manifest"
            );
            manifest.assets_index_id
        }
        (None, None) => anyhow::bail!("Either an asset index id or --manifest is required"),
    };

    if assets_index_id.is_empty() {
        anyhow::bail!("Asset index id cannot be empty");
    }

    let index = layout.load_index(&assets_index_id)?;
    let builder = layout.tree_builder(&assets_index_id, &index)?;
    let done = AtomicBool::new(false);
    let show_progress = !output.is_json();

    let result = thread::scope(|s| {
        if show_progress {
            s.spawn(|| {
                let mut last = String::new();
                while !done.load(Ordering::Acquire) {
                    let status = builder.status_description(&EnglishMessages);
                    if status != last {
                        eprintln!("{}", status);
                        last = status;
                    }
                    thread::sleep(PROGRESS_INTERVAL);
                }
            });
        }

        let result = builder.build();
        done.store(true, Ordering::Release);
        result
    });
    let dest = result?;

    let data = BuildOutput {
        success: true,
        result_code: 0,
        assets_index_id: assets_index_id.clone(),
        destination: dest.display().to_string(),
        total: builder.total(),
        copied: builder.copied(),
    };
    output.write(&data, || {
        format!(
            "Built virtual tree {} at {}\n{} assets, {} copied\n",
            assets_index_id,
            dest.display(),
            builder.total(),
            builder.copied()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build_with_id() {
        let cli =
            Cli::try_parse_from(["assetroot", "--root", "/store", "build", "1.7.10"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/store")));
        match cli.command {
            Commands::Build { id, manifest } => {
                assert_eq!(id.as_deref(), Some("1.7.10"));
                assert!(manifest.is_none());
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_cli_build_requires_id_or_manifest() {
        assert!(Cli::try_parse_from(["assetroot", "build"]).is_err());
        assert!(Cli::try_parse_from(["assetroot", "build", "--manifest", "m.json"]).is_ok());
        assert!(
            Cli::try_parse_from(["assetroot", "build", "x", "--manifest", "m.json"]).is_err()
        );
    }

    #[test]
    fn test_describe_localizes_missing_object() {
        let err =
            anyhow::Error::new(assetroot_core::Error::missing_object("/s/objects/ab/abcd"));
        let text = describe(&err, &EnglishMessages);
        assert!(text.starts_with("The asset object /s/objects/ab/abcd is missing"));
    }

    #[test]
    fn test_describe_other_errors_keep_context() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(describe(&err, &EnglishMessages), "outer: inner");
    }
}
