//! Command dispatch

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings, StylePreset, TraversalOrder};
use crate::domain::{views, Node, NodeId, Tree, VisitResult};
use crate::errors::ArborError;
use crate::outline;
use crate::render::{self, RenderStyle};
use crate::tree_traits::TreeConvert;

/// Runs the parsed command, writing its output to `out`.
pub fn execute_command<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Render {
            file,
            style,
            termtree,
        }) => _render(&settings, out, file, *style, *termtree),
        Some(Commands::Walk { file, order }) => _walk(&settings, out, file, *order),
        Some(Commands::Stats { file }) => _stats(&settings, out, file),
        Some(Commands::Diff { left, right }) => _diff(&settings, out, left, right),
        Some(Commands::Config { command }) => _config(&settings, out, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, out);
            Ok(())
        }
        None => {
            let help = Cli::command().render_help();
            write!(out, "{}", help).map_err(write_err)
        }
    }
}

fn write_err(e: io::Error) -> CliError {
    ArborError::io("write output", e).into()
}

fn load(settings: &Settings, file: &Path) -> CliResult<Tree<String>> {
    Ok(outline::read(file, settings.tab_width)?)
}

#[instrument(skip(settings, out))]
fn _render<W: Write>(
    settings: &Settings,
    out: &mut W,
    file: &Path,
    style: Option<StylePreset>,
    termtree: bool,
) -> CliResult<()> {
    if termtree && style.is_some() {
        return Err(CliError::InvalidArgs(
            "--style has no effect with --termtree".into(),
        ));
    }
    let tree = load(settings, file)?;

    if termtree {
        return write!(out, "{}", tree.to_termtree()).map_err(write_err);
    }

    let style: RenderStyle = style.unwrap_or(settings.style).into();
    render::write_tree(&tree, out, &style)?;
    writeln!(out).map_err(write_err)
}

#[instrument(skip(settings, out))]
fn _walk<W: Write>(
    settings: &Settings,
    out: &mut W,
    file: &Path,
    order: Option<TraversalOrder>,
) -> CliResult<()> {
    let tree = load(settings, file)?;
    let print = |_: NodeId, node: &Node<String>| -> VisitResult<CliError> {
        output::info(out, node.info()).map_err(write_err)?;
        Ok(ControlFlow::Continue(()))
    };

    match order.unwrap_or(settings.order) {
        TraversalOrder::Pre => views::preorder(Some(&tree), print),
        TraversalOrder::Post => views::postorder(Some(&tree), print),
        TraversalOrder::In => views::inorder(Some(&tree), print),
        TraversalOrder::Bfs => views::bfs(Some(&tree), print),
    }
}

#[instrument(skip(settings, out))]
fn _stats<W: Write>(settings: &Settings, out: &mut W, file: &Path) -> CliResult<()> {
    let tree = load(settings, file)?;

    output::header(out, &file.display()).map_err(write_err)?;
    output::action(out, "size", &tree.size()).map_err(write_err)?;
    output::action(out, "depth", &tree.depth()).map_err(write_err)?;
    output::action(out, "leaves", &tree.leaves().len()).map_err(write_err)?;
    for &leaf in tree.leaves() {
        let name = tree.get(leaf).map_err(ArborError::from)?;
        output::detail(out, name).map_err(write_err)?;
    }
    Ok(())
}

#[instrument(skip(settings, out))]
fn _diff<W: Write>(settings: &Settings, out: &mut W, left: &Path, right: &Path) -> CliResult<()> {
    let left_tree = load(settings, left)?;
    let right_tree = load(settings, right)?;

    if views::equals(Some(&left_tree), Some(&right_tree)) {
        output::success(out, "trees are equal").map_err(write_err)
    } else {
        output::failure(out, "trees differ").map_err(write_err)?;
        Err(CliError::TreesDiffer)
    }
}

fn _config<W: Write>(settings: &Settings, out: &mut W, command: &ConfigCommands) -> CliResult<()> {
    let written = match command {
        ConfigCommands::Show => output::info(out, &settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(out, &path.display()),
            None => output::failure(out, "no config directory on this platform"),
        },
    };
    written.map_err(write_err)
}
