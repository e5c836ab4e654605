use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use suit_core::{framework, search};

#[derive(Subcommand)]
pub enum FrameworkSubcommand {
    /// List bundled framework references
    List,
    /// Full-text search over the framework library
    Search {
        /// Query, e.g. `ports adapters`, `"bounded contexts"`, `title:twelve`
        query: String,
        /// Maximum number of results
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Print a framework reference
    Show { id: String },
    /// Copy a framework reference into .kiro/frameworks/
    Install { id: String },
}

pub fn run(root: &Path, subcmd: FrameworkSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        FrameworkSubcommand::List => list(json),
        FrameworkSubcommand::Search { query, limit } => search(&query, limit, json),
        FrameworkSubcommand::Show { id } => show(&id, json),
        FrameworkSubcommand::Install { id } => install(root, &id, json),
    }
}

fn list(json: bool) -> anyhow::Result<()> {
    let frameworks = framework::list();

    if json {
        return print_json(&frameworks);
    }

    let rows: Vec<Vec<String>> = frameworks
        .iter()
        .map(|f| vec![f.id.clone(), f.title.clone(), truncate(&f.summary, 60)])
        .collect();
    print_table(&["ID", "TITLE", "SUMMARY"], rows);
    Ok(())
}

fn search(query: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let results =
        search::search_frameworks(query, limit).context("failed to search framework library")?;

    if json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No frameworks match '{query}'.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| vec![r.id.clone(), r.title.clone(), format!("{:.2}", r.score)])
        .collect();
    print_table(&["ID", "TITLE", "SCORE"], rows);
    Ok(())
}

fn show(id: &str, json: bool) -> anyhow::Result<()> {
    let f = framework::get(id).with_context(|| format!("failed to show framework '{id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "id": f.id,
            "title": f.title,
            "summary": f.summary,
            "content": f.content,
        }))?;
    } else {
        print!("{}", f.content);
    }
    Ok(())
}

fn install(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (path, written) =
        framework::install(root, id).with_context(|| format!("failed to install framework '{id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "path": path,
            "installed": written,
        }))?;
    } else if written {
        println!("Installed framework '{id}' to {}.", path.display());
    } else {
        println!("Framework '{id}' already installed at {}.", path.display());
    }
    Ok(())
}
