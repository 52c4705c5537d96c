//! Shared command inputs: survey answers and catalog source.

use std::path::{Path, PathBuf};

use clap::Args;
use polynap_core::{AnswerSet, Config, ScheduleCatalog, UserFactors};

#[derive(Args, Debug, Default)]
pub struct AnswerArgs {
    /// Survey answer as QUESTION=ANSWER (repeatable, overrides the file)
    #[arg(short = 'a', long = "answer", value_name = "QUESTION=ANSWER")]
    pub answers: Vec<String>,

    /// JSON or TOML file of question/answer pairs
    #[arg(long, value_name = "PATH")]
    pub answers_file: Option<PathBuf>,
}

impl AnswerArgs {
    /// Collect answers from the file, then the command line.
    pub fn load(&self) -> Result<AnswerSet, Box<dyn std::error::Error>> {
        let mut set = match &self.answers_file {
            Some(path) => read_answers_file(path)?,
            None => AnswerSet::new(),
        };
        for pair in &self.answers {
            let (question, answer) = AnswerSet::parse_pair(pair)?;
            set.insert(&question, answer);
        }
        Ok(set)
    }

    pub fn factors(&self) -> Result<UserFactors, Box<dyn std::error::Error>> {
        Ok(UserFactors::from_answers(&self.load()?))
    }
}

fn read_answers_file(path: &Path) -> Result<AnswerSet, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let set = if is_json {
        AnswerSet::from_json_str(&content)?
    } else {
        AnswerSet::from_toml_str(&content)?
    };
    Ok(set)
}

#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    /// Catalog file to rank instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self, config: &Config) -> Result<ScheduleCatalog, Box<dyn std::error::Error>> {
        let catalog = match &self.catalog {
            Some(path) => ScheduleCatalog::load(path)?,
            None => config.catalog()?,
        };
        Ok(catalog)
    }
}

pub fn run_factors(args: &AnswerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let factors = args.factors()?;
    println!("{}", serde_json::to_string_pretty(&factors)?);
    Ok(())
}
