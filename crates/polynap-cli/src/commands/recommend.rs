//! Recommendation and ranking commands.

use clap::Args;
use polynap_core::{
    Config, Language, RankedTemplate, ScheduleRecommender, ScheduleTemplate, ScoreBreakdown,
    ScoredRecommendation,
};

use super::input::{AnswerArgs, CatalogArgs};

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub answers: AnswerArgs,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show every multiplier that contributed to the score
    #[arg(long)]
    pub explain: bool,

    /// Description language (en, tr)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,
}

impl RecommendArgs {
    fn language(&self, config: &Config) -> Result<Language, Box<dyn std::error::Error>> {
        match &self.lang {
            Some(raw) => Language::parse(raw)
                .ok_or_else(|| format!("unsupported language: {raw} (expected en or tr)").into()),
            None => Ok(config.display.language),
        }
    }

    fn json(&self, config: &Config) -> bool {
        self.json || config.display.json
    }
}

pub fn run_recommend(
    args: &RecommendArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let factors = args.answers.factors()?;
    let catalog = args.catalog.load(config)?;
    let language = args.language(config)?;

    tracing::debug!(schedules = catalog.len(), ?factors, "recommending");
    let recommendation = ScheduleRecommender::new().recommend(&factors, catalog.templates());

    if args.json(config) {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
        return Ok(());
    }

    match recommendation {
        Some(rec) => print_recommendation(&rec, language, args.explain),
        None => println!("No recommendation available: the catalog has no free schedules."),
    }
    Ok(())
}

pub fn run_rank(args: &RecommendArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let factors = args.answers.factors()?;
    let catalog = args.catalog.load(config)?;

    let ranking = ScheduleRecommender::new().rank(&factors, catalog.templates());
    tracing::debug!(ranked = ranking.len(), "ranking complete");

    if args.json(config) {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    if ranking.is_empty() {
        println!("No free schedules in the catalog.");
        return Ok(());
    }

    println!("{:<4} {:<16} {:>6}  {:<12} {:>6}", "#", "ID", "SCORE", "DIFFICULTY", "HOURS");
    for (position, entry) in ranking.iter().enumerate() {
        print_rank_row(position + 1, entry);
        if args.explain {
            print_breakdown(&entry.breakdown, "      ");
        }
    }
    Ok(())
}

fn print_rank_row(position: usize, entry: &RankedTemplate) {
    println!(
        "{:<4} {:<16} {:>6.3}  {:<12} {:>6.2}",
        position,
        entry.template.id,
        entry.score(),
        entry.template.difficulty(),
        entry.template.total_sleep_hours,
    );
}

fn print_recommendation(rec: &ScoredRecommendation, language: Language, explain: bool) {
    let template = &rec.template;
    println!("Recommended: {} ({})", template.name, template.id);
    println!("Confidence:  {:.2}", rec.confidence_score);
    println!("Difficulty:  {}", rec.difficulty);
    println!("Adaptation:  {} days", rec.adaptation_period_days);
    println!("Total sleep: {:.2} h", template.total_sleep_hours);
    println!();
    println!("{}", template.description.get(language));
    println!();
    print_blocks(template);

    if !rec.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &rec.warnings {
            println!("  [{}] {}", warning.severity, warning.message_key);
        }
    }

    if explain {
        println!();
        println!("Score breakdown:");
        print_breakdown(&rec.breakdown, "  ");
        if let Some(term) = rec.breakdown.top_penalty() {
            println!(
                "  strongest penalty: {} = {} (x{})",
                term.factor, term.value, term.multiplier
            );
        }
    }
}

pub(crate) fn print_blocks(template: &ScheduleTemplate) {
    println!("Blocks:");
    for block in &template.blocks {
        let kind = if block.is_core { "core" } else { "nap" };
        println!("  {}  {:>4} min  {}", block.start_time, block.duration_minutes, kind);
    }
}

fn print_breakdown(breakdown: &ScoreBreakdown, indent: &str) {
    for term in &breakdown.terms {
        println!("{indent}x{:<5} {} = {}", term.multiplier, term.factor, term.value);
    }
    if breakdown.raw_score != breakdown.score {
        println!("{indent}raw {:.3} clamped to {:.3}", breakdown.raw_score, breakdown.score);
    }
}
