//! # PolyNap Core Library
//!
//! This library recommends a polyphasic sleep schedule from a user's
//! onboarding survey answers. All logic lives here; the `polynap-cli`
//! binary is a thin front end over the same crate.
//!
//! ## Architecture
//!
//! - **Answers**: raw question/answer strings behind the [`AnswerSource`] trait
//! - **Factors**: typed survey answers with silent fallback to defaults
//! - **Catalog**: validated, ordered list of schedule templates
//! - **Recommender**: multiplicative scoring, warnings and adaptation estimate
//! - **Config**: TOML configuration for catalog source, language and logging
//!
//! ## Example
//!
//! ```
//! use polynap_core::{AnswerSet, ScheduleCatalog, ScheduleRecommender, UserFactors};
//!
//! let answers = AnswerSet::from_pairs([
//!     ("sleepExperience", "extensive"),
//!     ("motivationLevel", "high"),
//! ]);
//! let factors = UserFactors::from_answers(&answers);
//! let catalog = ScheduleCatalog::builtin();
//!
//! let recommendation = ScheduleRecommender::new()
//!     .recommend(&factors, catalog.templates())
//!     .expect("built-in catalog has free schedules");
//! assert_eq!(recommendation.adaptation_period_days, 7);
//! ```

pub mod answers;
pub mod catalog;
pub mod config;
pub mod error;
pub mod factors;
pub mod recommender;

pub use answers::{question, AnswerSet, AnswerSource};
pub use catalog::{
    Language, LocalizedText, ScheduleCatalog, ScheduleTemplate, SleepBlock, CATALOG_VERSION,
};
pub use config::Config;
pub use error::{CatalogError, ConfigError, CoreError, Result};
pub use factors::{
    AgeRange, Chronotype, DisruptionTolerance, HealthStatus, KnowledgeLevel, Lifestyle,
    MotivationLevel, NapEnvironment, SleepExperience, SleepGoal, SocialObligations, SurveyAnswer,
    UserFactors, WorkSchedule,
};
pub use recommender::{
    Difficulty, RankedTemplate, ScheduleRecommender, ScoreBreakdown, ScoreTerm,
    ScoredRecommendation, Severity, Warning,
};
