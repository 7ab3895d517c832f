//! # Content CLI
//!
//! Command-line host for the content template engine.
//!
//! ## Usage
//!
//! ```bash
//! # Add the content an item's schema calls for
//! content-cli fit item.json --output fitted.json
//!
//! # Kinds offered when adding content to a paper
//! content-cli kinds --item-kind Paper
//!
//! # Editing surfaces for every piece of content, with video switched off
//! content-cli --disable-shape Video describe item.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `EngineConfig` - Built from an optional JSON file plus flag overrides
//! - `run` - Dispatches a command; results go to the given writer as JSON or text

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use content_core::{
    fit_item_to_template, BaseShape, ContentError, EngineConfig, EngineContext, ItemDescriptor,
    ItemKind, SequentialContext, SurfaceNode, TemplateRegistry,
};
use serde::Serialize;
use thiserror::Error;

/// Command-line arguments for content-cli.
#[derive(Debug, Clone, Parser)]
#[command(name = "content-cli")]
#[command(about = "Reconcile, inspect and list conference content")]
#[command(version)]
pub struct CliArgs {
    /// Identity stamped on new versions
    #[arg(long, global = true, env = "CONTENT_ACTOR")]
    pub actor: Option<String>,

    /// Engine configuration file (JSON)
    #[arg(long, global = true, env = "CONTENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base shape to treat as display-only (repeatable)
    #[arg(long = "disable-shape", global = true)]
    pub disable_shapes: Vec<BaseShape>,

    /// Use counter-based IDs and a zero clock instead of random IDs and wall time
    #[arg(long, global = true)]
    pub deterministic: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// content-cli commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add the content an item's schema calls for
    Fit {
        /// Item JSON file
        input: PathBuf,
        /// Where to write the fitted item (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the kinds that can be added
    Kinds {
        /// Put this item kind's schema kinds first
        #[arg(long)]
        item_kind: Option<ItemKind>,
    },
    /// Show the editing surface of every piece of an item's content
    Describe {
        /// Item JSON file
        input: PathBuf,
    },
}

/// Errors raised by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing an output failed.
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// The engine rejected the input or configuration.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Serializing a report failed.
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TryFrom<&CliArgs> for EngineConfig {
    type Error = CliError;

    /// Load the configuration file, if any, then apply flag overrides.
    fn try_from(args: &CliArgs) -> Result<Self, Self::Error> {
        let mut config = match &args.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(actor) = &args.actor {
            config.actor.clone_from(actor);
        }
        for &shape in &args.disable_shapes {
            if !config.is_disabled(shape) {
                config.disabled_shapes.push(shape);
            }
        }
        Ok(config)
    }
}

/// One piece of content as reported by `describe`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    /// Editor heading.
    pub heading: String,
    /// Element kind.
    pub kind: String,
    /// Base shape of the kind.
    pub shape: BaseShape,
    /// Whether the content is an uploadable slot.
    pub required: bool,
    /// Whether the template materialized a default that a caller would commit.
    pub pending_default: bool,
    /// The editing surface.
    pub surface: SurfaceNode,
}

/// Run a parsed command, writing results to `out`.
///
/// # Errors
///
/// Returns an error if the configuration or input cannot be loaded, the
/// registry cannot be built, or output cannot be written.
pub fn run(args: &CliArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let config = EngineConfig::try_from(args)?;
    let registry = TemplateRegistry::from_config(&config)?;
    tracing::debug!(
        actor = %config.actor,
        disabled = ?config.disabled_shapes,
        "engine configured"
    );

    match &args.command {
        Command::Fit { input, output } => {
            let item = read_item(input)?;
            let ctx = engine_context(args, &config, &item);
            fit(&registry, ctx.as_ref(), &item, output.as_deref(), out)
        }
        Command::Kinds { item_kind } => kinds(&registry, *item_kind, out),
        Command::Describe { input } => {
            let item = read_item(input)?;
            let ctx = engine_context(args, &config, &item);
            describe(&registry, ctx.as_ref(), &item, out)
        }
    }
}

/// Context for one command. A deterministic context never reissues an
/// identifier already present in `item`.
fn engine_context(
    args: &CliArgs,
    config: &EngineConfig,
    item: &ItemDescriptor,
) -> Box<dyn EngineContext> {
    if args.deterministic {
        let ctx = SequentialContext::new(config.actor.clone());
        ctx.reserve(item.content_ids().iter().map(|id| *id.as_uuid()));
        Box::new(ctx)
    } else {
        Box::new(config.context())
    }
}

/// Fit an item to its schema and write the result.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized or written.
pub fn fit(
    registry: &TemplateRegistry,
    ctx: &dyn EngineContext,
    item: &ItemDescriptor,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let fitted = fit_item_to_template(registry, ctx, item);
    tracing::info!(
        item = %fitted.id,
        added = (fitted.elements.len() + fitted.uploadable_elements.len())
            - (item.elements.len() + item.uploadable_elements.len()),
        "item fitted"
    );

    let json = fitted.to_json()?;
    match output {
        Some(path) => std::fs::write(path, json)?,
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

/// List supported kinds with their shapes, one per line.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn kinds(
    registry: &TemplateRegistry,
    item_kind: Option<ItemKind>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    for kind in registry.list_supported_kinds(item_kind) {
        writeln!(out, "{kind}\t{}", kind.shape())?;
    }
    Ok(())
}

/// Report the editing surface of every piece of an item's content as JSON.
///
/// Pending defaults are reported, never applied.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized or written.
pub fn describe(
    registry: &TemplateRegistry,
    ctx: &dyn EngineContext,
    item: &ItemDescriptor,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let reports: Vec<ContentReport> = item
        .content_descriptors()
        .iter()
        .map(|descriptor| {
            let kind = descriptor.type_name();
            let template = registry.resolve(kind);
            let surface = template.produce_editing_surface(ctx, descriptor);
            if surface.is_fallback() {
                tracing::warn!(%kind, "content shown as diagnostic");
            }
            ContentReport {
                heading: template.render_editor_heading(descriptor),
                kind: kind.to_string(),
                shape: kind.shape(),
                required: descriptor.is_required(),
                pending_default: surface.pending.is_some(),
                surface: surface.root,
            }
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)?;
    Ok(())
}

fn read_item(path: &Path) -> Result<ItemDescriptor, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ItemDescriptor::from_json(&raw)?)
}
