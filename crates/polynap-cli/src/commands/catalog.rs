//! Schedule catalog commands.
//!
//! Lists and inspects the configured catalog, validates external catalog
//! files, and exports the built-in catalog as a starting point for one.

use std::path::PathBuf;

use clap::Subcommand;
use polynap_core::{Config, Language, ScheduleCatalog};

use super::recommend::print_blocks;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all schedules in the catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Catalog file instead of the configured one
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
    /// Show details for a schedule
    Show {
        /// Schedule ID (e.g., "everyman", "biphasic")
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Description language (en, tr)
        #[arg(long, value_name = "LANG")]
        lang: Option<String>,
        /// Catalog file instead of the configured one
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
    /// Validate a catalog file
    Validate {
        /// Path to a TOML or JSON catalog
        path: PathBuf,
    },
    /// Print the built-in catalog as TOML
    Export,
}

pub fn run(action: CatalogAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List { json, catalog } => {
            let catalog = load(catalog, config)?;
            list(&catalog, json || config.display.json)
        }
        CatalogAction::Show {
            id,
            json,
            lang,
            catalog,
        } => {
            let catalog = load(catalog, config)?;
            let language = match lang {
                Some(raw) => Language::parse(&raw)
                    .ok_or_else(|| format!("unsupported language: {raw} (expected en or tr)"))?,
                None => config.display.language,
            };
            show(&catalog, &id, json || config.display.json, language)
        }
        CatalogAction::Validate { path } => {
            let catalog = ScheduleCatalog::load(&path)?;
            println!(
                "ok: {} schedules ({} free), version {}",
                catalog.len(),
                catalog.free_templates().count(),
                catalog.version()
            );
            Ok(())
        }
        CatalogAction::Export => {
            print!("{}", ScheduleCatalog::builtin().to_toml_string()?);
            Ok(())
        }
    }
}

fn load(
    path: Option<PathBuf>,
    config: &Config,
) -> Result<ScheduleCatalog, Box<dyn std::error::Error>> {
    let catalog = match path {
        Some(path) => ScheduleCatalog::load(&path)?,
        None => config.catalog()?,
    };
    Ok(catalog)
}

fn list(catalog: &ScheduleCatalog, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.templates())?);
        return Ok(());
    }

    println!(
        "{:<16} {:<20} {:>6} {:>5}  {:<12} {}",
        "ID", "NAME", "HOURS", "NAPS", "DIFFICULTY", "PLAN"
    );
    for template in catalog {
        println!(
            "{:<16} {:<20} {:>6.2} {:>5}  {:<12} {}",
            template.id,
            template.name,
            template.total_sleep_hours,
            template.nap_count(),
            template.difficulty(),
            if template.is_premium { "premium" } else { "free" },
        );
    }
    Ok(())
}

fn show(
    catalog: &ScheduleCatalog,
    id: &str,
    json: bool,
    language: Language,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = catalog
        .get(id)
        .ok_or_else(|| format!("schedule not found: {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(template)?);
        return Ok(());
    }

    println!("{} ({})", template.name, template.id);
    println!("{}", template.description.get(language));
    println!();
    println!("Total sleep: {:.2} h", template.total_sleep_hours);
    println!("Naps:        {}", template.nap_count());
    println!("Difficulty:  {}", template.difficulty());
    println!("Plan:        {}", if template.is_premium { "premium" } else { "free" });
    println!();
    print_blocks(template);
    Ok(())
}
