use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dependson::component::Facet;
use dependson::config::PageConfig;
use dependson::logging::init_tracing;
use dependson::page::Page;

#[derive(Parser)]
#[command(
    name = "dependson",
    about = "Check and simulate dependencies between search facets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Page file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the page and print its dependency forest
    Check {
        /// Also reject dependencies on unknown facets
        #[arg(long)]
        strict: bool,
    },
    /// Initialize the page, apply selections, run one query and print the result
    Simulate {
        /// Selection as `id=value[,value...]`; repeatable
        #[arg(short, long = "select", value_parser = parse_selection)]
        selections: Vec<(String, Vec<String>)>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PageConfig::load_from(path),
        None => PageConfig::load(),
    }
    .context("Failed to load page configuration")?;

    match cli.command {
        Command::Check { strict } => check(&config, strict),
        Command::Simulate { selections } => simulate(&config, &selections),
    }
}

fn check(config: &PageConfig, strict: bool) -> Result<()> {
    if strict {
        config.validate_strict()?;
    }
    let page = Page::from_config(config)?;
    for root in page.roots() {
        print_tree(&page, &root, 0);
    }
    println!("{} facet(s), no dependency cycles", config.facets.len());
    Ok(())
}

fn print_tree(page: &Page, id: &str, depth: usize) {
    let note = match page.facet(id).and_then(|f| f.options().depends_on) {
        Some(parent) if depth == 0 => format!("  (depends on unknown '{}')", parent),
        _ => String::new(),
    };
    println!("{}{}{}", "  ".repeat(depth), id, note);
    for dependent in page.bindings().registry.dependents_of(id) {
        print_tree(page, &dependent.options().id, depth + 1);
    }
}

fn simulate(config: &PageConfig, selections: &[(String, Vec<String>)]) -> Result<()> {
    let page = Page::from_config(config)?;
    page.initialize()?;
    for (id, values) in selections {
        page.select(id, values.iter().cloned())
            .with_context(|| format!("Failed to select values on '{}'", id))?;
    }
    page.execute_query()?;

    for facet in page.facets() {
        let values: Vec<String> = facet
            .selected_values()
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect();
        println!(
            "{:<24} {:<9} [{}]",
            facet.id(),
            if facet.is_enabled() { "enabled" } else { "disabled" },
            values.join(", ")
        );
    }
    Ok(())
}

fn parse_selection(raw: &str) -> Result<(String, Vec<String>), String> {
    let (id, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `id=value[,value...]`, got '{}'", raw))?;
    if id.is_empty() {
        return Err("facet id must not be empty".to_string());
    }
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    Ok((id.to_string(), values))
}
