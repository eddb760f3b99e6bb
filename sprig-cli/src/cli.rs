use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use sprig::prelude::*;

use crate::error::{CliError, Result};
use crate::paths;

#[derive(Debug, Parser)]
#[command(name = "sprig", about = "Tree state and color shade toolkit", version)]
pub struct Cli {
    /// JSON config document (`{ "tree": { ... } }`).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase terminal log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the 11 shades of a base color.
    Shades(ShadesArgs),

    /// Load a JSON forest, apply commands and print the result.
    Tree(TreeArgs),
}

#[derive(Debug, Args)]
pub struct ShadesArgs {
    /// Base color, `#RRGGBB` or `#RGB`.
    pub hex: String,

    /// Palette name used for CSS variables.
    #[arg(long, default_value = "primary")]
    pub name: String,

    /// Print CSS custom properties instead of a table.
    #[arg(long)]
    pub css: bool,

    /// Fail on malformed input instead of falling back to black.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// JSON file holding an array of nodes.
    pub file: PathBuf,

    /// Only show nodes matching this query (and their ancestors).
    #[arg(long, short)]
    pub search: Option<String>,

    /// Selection mode: none, single, multiple or checkbox.
    #[arg(long)]
    pub mode: Option<SelectionMode>,

    /// Expand every node before printing.
    #[arg(long)]
    pub expand_all: bool,

    /// Check a node (checkbox mode). Repeatable.
    #[arg(long, value_name = "ID")]
    pub check: Vec<NodeId>,

    /// Select a node. Repeatable.
    #[arg(long, value_name = "ID")]
    pub select: Vec<NodeId>,

    /// Print the resulting forest as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let output = match cli.command {
        Commands::Shades(args) => run_shades(&args)?,
        Commands::Tree(args) => run_tree(&args, config.tree)?,
    };
    print!("{}", output);
    Ok(())
}

/// Load the config document, falling back to the user config file, then defaults.
fn load_config(explicit: Option<&Path>) -> Result<SprigConfig> {
    if let Some(path) = explicit {
        return read_json(path);
    }
    match paths::default_config_file() {
        Some(path) if path.exists() => {
            debug!("using config {}", path.display());
            read_json(&path)
        }
        _ => Ok(SprigConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    serde_json::from_str(&text).map_err(|e| CliError::json(path, e))
}

fn run_shades(args: &ShadesArgs) -> Result<String> {
    if args.css {
        let palette = Palette::new(&args.name, &args.hex)?;
        return Ok(render_css(&palette));
    }
    let shades = if args.strict {
        try_generate_shades(&args.hex)?
    } else {
        generate_shades(&args.hex)
    };
    Ok(render_shades(&shades))
}

fn run_tree(args: &TreeArgs, mut config: TreeConfig) -> Result<String> {
    let forest: Vec<TreeNode> = read_json(&args.file)?;
    if let Some(mode) = args.mode {
        config.selection_mode = mode;
    }
    let mut state = TreeState::new(forest, config)?;
    info!("loaded {} nodes from {}", state.len(), args.file.display());

    if args.expand_all {
        state.expand_all();
    }
    for id in &args.select {
        state.select(id)?;
    }
    if !args.check.is_empty() && !state.selection_mode().is_checkbox() {
        warn!("--check ignored outside checkbox mode");
    }
    for id in &args.check {
        state.set_checked(id, true)?;
    }
    for event in state.drain_events() {
        debug!("{:?}", event);
    }

    let view = state.filter(args.search.as_deref().unwrap_or_default());
    if args.json {
        let forest = view.to_forest(&state);
        let mut text = serde_json::to_string_pretty(&forest).map_err(CliError::Encode)?;
        text.push('\n');
        return Ok(text);
    }
    Ok(render_rows(&state, &view))
}

/// One line per shade: level, hex and rgb.
pub fn render_shades(shades: &[Shade]) -> String {
    let mut out = String::new();
    for shade in shades {
        let _ = writeln!(out, "{:>4}  {}  {}", shade.level, shade.hex, shade.rgb);
    }
    out
}

/// A `:root` block with the palette's custom properties.
pub fn render_css(palette: &Palette) -> String {
    let mut out = String::from(":root {\n");
    for (name, value) in palette.css_variables() {
        let _ = writeln!(out, "  {}: {};", name, value);
    }
    out.push_str("}\n");
    out
}

/// Indented outline of the visible rows.
pub fn render_rows(state: &TreeState, view: &TreeView) -> String {
    let checkbox = state.selection_mode().is_checkbox();
    let mut out = String::new();
    for row in view.rows() {
        let Some(node) = state.get(row.index) else {
            continue;
        };
        let indent = "  ".repeat(usize::from(row.depth));
        let arrow = match (row.has_children, row.is_expanded) {
            (false, _) => ' ',
            (true, true) => 'v',
            (true, false) => '>',
        };
        let mark = if checkbox {
            match (node.checked, node.indeterminate) {
                (true, _) => "[x] ",
                (false, true) => "[-] ",
                (false, false) => "[ ] ",
            }
        } else if node.selected {
            "* "
        } else {
            ""
        };
        let _ = writeln!(out, "{}{} {}{}", indent, arrow, mark, node.label);
    }
    out
}
