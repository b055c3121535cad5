use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use dex_catalog::Catalog;
use dex_graph::{ChainLink, EvolutionIndex, EvolutionTreeData, GraphError};
use flags::LayoutFlag;
use report::FamilySummary;
use serde::Serialize;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

mod flags;
mod report;

const CATALOG_ENV: &str = "DEX_CATALOG";
const DEFAULT_CATALOG: &str = "data/pokedex.json";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    print_stdout(&text)
}

#[derive(Parser)]
#[command(name = "dex")]
#[command(about = "Evolution families and trees for a creature catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog JSON file (overrides DEX_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolution tree centered on a member
    Tree(TreeArgs),

    /// Full family graph (nodes, edges, bases) containing a member
    Family(MemberArgs),

    /// Single-line evolution chain through a member
    Chain(MemberArgs),

    /// Summaries of every family in the catalog
    Families(FamiliesArgs),

    /// Catalog and family diagnostics
    Stats,

    /// Raw catalog record
    Show(MemberArgs),
}

#[derive(Args)]
struct MemberArgs {
    /// Catalog id
    id: u32,
}

#[derive(Args)]
struct TreeArgs {
    /// Catalog id of the focal member
    id: u32,

    /// Render an indented text tree instead of JSON
    #[arg(long)]
    text: bool,
}

#[derive(Args)]
struct FamiliesArgs {
    /// Only families with this layout
    #[arg(long, value_enum)]
    layout: Option<LayoutFlag>,
}

#[derive(Serialize)]
struct TreeOutput<'a> {
    id: u32,
    name: &'a str,
    family: &'a str,
    tree: EvolutionTreeData<'a>,
}

#[derive(Serialize)]
struct ChainOutput<'a> {
    id: u32,
    name: &'a str,
    chain: Vec<ChainLink<'a>>,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let catalog_path = resolve_catalog_path(cli.catalog.as_deref());
    let index = load_index(&catalog_path).await?;

    match cli.command {
        Commands::Tree(args) => run_tree(&index, args, cli.pretty)?,
        Commands::Family(args) => run_family(&index, args, cli.pretty)?,
        Commands::Chain(args) => run_chain(&index, args, cli.pretty)?,
        Commands::Families(args) => run_families(&index, args, cli.pretty)?,
        Commands::Stats => print_json(&report::collect_stats(&index), cli.pretty)?,
        Commands::Show(args) => run_show(&index, args, cli.pretty)?,
    }

    Ok(())
}

fn resolve_catalog_path(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    env::var(CATALOG_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
}

async fn load_index(path: &Path) -> Result<EvolutionIndex> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_json_slice(&bytes)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    log::info!("Loaded {} records from {}", catalog.len(), path.display());
    Ok(EvolutionIndex::new(catalog))
}

fn member_name(index: &EvolutionIndex, id: u32) -> Result<&str> {
    index
        .catalog()
        .get(id)
        .map(|r| r.display_name())
        .ok_or_else(|| GraphError::MemberNotFound(id).into())
}

fn run_tree(index: &EvolutionIndex, args: TreeArgs, pretty: bool) -> Result<()> {
    let name = member_name(index, args.id)?;
    let family = index.family_for(args.id)?;
    let tree = index.tree_for(args.id)?;

    if args.text {
        return print_stdout(report::render_tree_text(&tree).trim_end());
    }

    let output = TreeOutput {
        id: args.id,
        name,
        family: &family.id,
        tree,
    };
    print_json(&output, pretty)
}

fn run_family(index: &EvolutionIndex, args: MemberArgs, pretty: bool) -> Result<()> {
    let family = index.family_for(args.id)?;
    print_json(family, pretty)
}

fn run_chain(index: &EvolutionIndex, args: MemberArgs, pretty: bool) -> Result<()> {
    let name = member_name(index, args.id)?;
    let chain = index.chain_for(args.id)?;
    let output = ChainOutput {
        id: args.id,
        name,
        chain,
    };
    print_json(&output, pretty)
}

fn run_families(index: &EvolutionIndex, args: FamiliesArgs, pretty: bool) -> Result<()> {
    let wanted = args.layout.map(LayoutFlag::as_domain);
    let summaries: Vec<FamilySummary<'_>> = index
        .registry()
        .families()
        .map(FamilySummary::new)
        .filter(|s| wanted.is_none_or(|layout| s.layout == layout))
        .collect();
    print_json(&summaries, pretty)
}

fn run_show(index: &EvolutionIndex, args: MemberArgs, pretty: bool) -> Result<()> {
    let record = index
        .catalog()
        .get(args.id)
        .ok_or(GraphError::MemberNotFound(args.id))?;
    print_json(record, pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_flag_wins_over_default() {
        let path = resolve_catalog_path(Some(Path::new("/tmp/dex.json")));
        assert_eq!(path, PathBuf::from("/tmp/dex.json"));
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dex", "tree", "25", "--pretty", "--catalog", "x.json"])
            .expect("parse");
        assert!(cli.pretty);
        assert_eq!(cli.catalog, Some(PathBuf::from("x.json")));
        assert!(matches!(cli.command, Commands::Tree(TreeArgs { id: 25, text: false })));
    }

    #[test]
    fn families_layout_filter_parses() {
        let cli = Cli::try_parse_from(["dex", "families", "--layout", "branching"]).expect("parse");
        let Commands::Families(args) = cli.command else {
            panic!("expected families");
        };
        assert!(matches!(
            args.layout.map(LayoutFlag::as_domain),
            Some(dex_graph::Layout::Branching)
        ));
    }
}
