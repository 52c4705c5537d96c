//! Rule-based sleep schedule recommender.
//!
//! Every free template in the catalog is scored multiplicatively from 1.0:
//! each survey answer contributes a fixed multiplier, some only when the
//! template has enough naps for the answer to matter. The best-scoring
//! template is returned with warnings and an adaptation estimate.
//!
//! ## Multipliers
//!
//! | Factor | Applies | Value → multiplier |
//! |--------|---------|--------------------|
//! | sleepExperience | always | none 0.7, some 0.8, moderate 0.9, extensive 1.0 |
//! | ageRange | always | under18 0.6, 18to24 1.0, 25to34 0.9, 35to44 0.8, 45to54 0.7, 55plus 0.6 |
//! | workSchedule | always | flexible 1.0, regular 0.9, irregular 0.7, shift 0.6 |
//! | napEnvironment | naps > 0 | ideal 1.0, suitable 0.9, limited 0.7, unsuitable 0.5 |
//! | lifestyle | always | calm 1.0, moderatelyActive 0.9, veryActive 0.7 |
//! | knowledgeLevel | always | beginner 0.8, intermediate 0.9, advanced 1.0 |
//! | healthStatus | always | healthy 1.0, managedConditions 0.7, seriousConditions 0.4 |
//! | motivationLevel | always | low 0.7, moderate 0.85, high 1.0 |
//!
//! Sleep goal, social obligations, disruption tolerance and chronotype are
//! conditional on nap count, total sleep, or core block timing. The final
//! score is clamped to `[0.0, 1.5]`.

use serde::{Deserialize, Serialize};

use crate::catalog::ScheduleTemplate;
use crate::factors::{
    Chronotype, DisruptionTolerance, HealthStatus, MotivationLevel, NapEnvironment,
    SleepExperience, SleepGoal, SocialObligations, SurveyAnswer, UserFactors, WorkSchedule,
};

/// Lower bound of a confidence score.
pub const MIN_SCORE: f64 = 0.0;
/// Upper bound of a confidence score.
pub const MAX_SCORE: f64 = 1.5;
/// Applied to `monophasic` for users able to attempt something else.
pub const MONOPHASIC_PENALTY: f64 = 0.2;
/// Template id the monophasic penalty is keyed on.
pub const MONOPHASIC_ID: &str = "monophasic";
/// Baseline adaptation period in days.
pub const BASE_ADAPTATION_DAYS: f64 = 14.0;

/// 09:00 and 17:00 in minutes past midnight, inclusive.
const WORK_HOURS: std::ops::RangeInclusive<u32> = 9 * 60..=17 * 60;

/// Message keys resolved by the UI's localization table.
pub mod warning_keys {
    pub const EXPERIENCE_TOO_LOW: &str = "warning.experienceTooLow";
    pub const MODERATE_EXPERIENCE: &str = "warning.moderateExperience";
    pub const CHALLENGING_SCHEDULE: &str = "warning.challengingSchedule";
    pub const HEALTH_CONCERNS: &str = "warning.healthConcerns";
    pub const UNSUITABLE_NAP_ENVIRONMENT: &str = "warning.unsuitableNapEnvironment";
    pub const WORK_SCHEDULE_CONFLICT: &str = "warning.workScheduleConflict";
}

/// How hard a schedule is to adapt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Extreme,
}

impl Difficulty {
    /// Classify by nap count and total sleep. Anything outside the three
    /// recognised shapes is extreme.
    pub fn classify(template: &ScheduleTemplate) -> Self {
        let hours = template.total_sleep_hours;
        match template.nap_count() {
            0 if (6.0..=8.0).contains(&hours) => Difficulty::Beginner,
            1 if (5.0..=7.0).contains(&hours) => Difficulty::Intermediate,
            2 if (4.0..=6.0).contains(&hours) => Difficulty::Advanced,
            _ => Difficulty::Extreme,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Extreme => "extreme",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Warning severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.pad(s)
    }
}

/// A caveat attached to a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub severity: Severity,
    pub message_key: String,
}

impl Warning {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            severity,
            message_key: message_key.into(),
        }
    }
}

/// One multiplier applied while scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTerm {
    /// Question key, or `monophasicPenalty`.
    pub factor: String,
    /// Answer that triggered the multiplier.
    pub value: String,
    pub multiplier: f64,
}

/// Explainable score for one template.
///
/// Conditional factors that did not apply are not recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub terms: Vec<ScoreTerm>,
    /// Product of all multipliers before clamping.
    pub raw_score: f64,
    /// `raw_score` clamped to `[MIN_SCORE, MAX_SCORE]`.
    pub score: f64,
}

impl ScoreBreakdown {
    fn new() -> Self {
        Self {
            terms: Vec::new(),
            raw_score: 1.0,
            score: 1.0,
        }
    }

    fn apply(&mut self, factor: &str, value: &str, multiplier: f64) {
        self.raw_score *= multiplier;
        self.terms.push(ScoreTerm {
            factor: factor.to_string(),
            value: value.to_string(),
            multiplier,
        });
    }

    fn apply_answer<T: SurveyAnswer>(&mut self, answer: T, multiplier: f64) {
        self.apply(T::QUESTION, answer.as_answer(), multiplier);
    }

    fn finish(mut self) -> Self {
        self.score = self.raw_score.clamp(MIN_SCORE, MAX_SCORE);
        self
    }

    /// The term that lowered the score the most, if any did.
    pub fn top_penalty(&self) -> Option<&ScoreTerm> {
        self.terms
            .iter()
            .filter(|t| t.multiplier < 1.0)
            .min_by(|a, b| a.multiplier.total_cmp(&b.multiplier))
    }

    /// Terms that raised the score.
    pub fn boosts(&self) -> impl Iterator<Item = &ScoreTerm> {
        self.terms.iter().filter(|t| t.multiplier > 1.0)
    }
}

/// A template with its score, as produced by [`ScheduleRecommender::rank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTemplate {
    pub template: ScheduleTemplate,
    pub breakdown: ScoreBreakdown,
}

impl RankedTemplate {
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }
}

/// The recommender's answer for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecommendation {
    pub template: ScheduleTemplate,
    /// Heuristic suitability in `[0.0, 1.5]`; not a probability.
    pub confidence_score: f64,
    pub warnings: Vec<Warning>,
    pub adaptation_period_days: u32,
    pub difficulty: Difficulty,
    pub breakdown: ScoreBreakdown,
}

impl ScoredRecommendation {
    /// Most severe warning level, if there are any warnings.
    pub fn max_severity(&self) -> Option<Severity> {
        self.warnings.iter().map(|w| w.severity).max()
    }

    pub fn has_critical_warning(&self) -> bool {
        self.max_severity() == Some(Severity::Critical)
    }
}

/// Stateless schedule recommender.
///
/// A pure function of its inputs: safe to share and call concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleRecommender;

impl ScheduleRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Pick the best free template for `factors`.
    ///
    /// Returns `None` when the catalog has no free templates. Ties keep
    /// catalog order.
    pub fn recommend(
        &self,
        factors: &UserFactors,
        catalog: &[ScheduleTemplate],
    ) -> Option<ScoredRecommendation> {
        let best = self.rank(factors, catalog).into_iter().next()?;

        let warnings = self.generate_warnings(&best.template, factors);
        let adaptation_period_days =
            self.calculate_adaptation_period(factors.sleep_experience, factors.motivation_level);
        let difficulty = best.template.difficulty();

        tracing::debug!(
            schedule = %best.template.id,
            score = best.breakdown.score,
            warnings = warnings.len(),
            adaptation_period_days,
            "selected schedule"
        );

        Some(ScoredRecommendation {
            confidence_score: best.breakdown.score,
            template: best.template,
            warnings,
            adaptation_period_days,
            difficulty,
            breakdown: best.breakdown,
        })
    }

    /// Score every free template and sort best first.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn rank(&self, factors: &UserFactors, catalog: &[ScheduleTemplate]) -> Vec<RankedTemplate> {
        let mut ranked: Vec<RankedTemplate> = catalog
            .iter()
            .filter(|t| !t.is_premium)
            .map(|t| RankedTemplate {
                breakdown: self.score_template(t, factors),
                template: t.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| b.breakdown.score.total_cmp(&a.breakdown.score));
        ranked
    }

    /// Score a single template.
    pub fn score_template(
        &self,
        template: &ScheduleTemplate,
        factors: &UserFactors,
    ) -> ScoreBreakdown {
        let naps = template.nap_count();
        let mut breakdown = ScoreBreakdown::new();

        breakdown.apply_answer(factors.sleep_experience, factors.sleep_experience.multiplier());
        breakdown.apply_answer(factors.age_range, factors.age_range.multiplier());
        breakdown.apply_answer(factors.work_schedule, factors.work_schedule.multiplier());
        if naps > 0 {
            breakdown.apply_answer(factors.nap_environment, factors.nap_environment.multiplier());
        }
        breakdown.apply_answer(factors.lifestyle, factors.lifestyle.multiplier());
        breakdown.apply_answer(factors.knowledge_level, factors.knowledge_level.multiplier());
        breakdown.apply_answer(factors.health_status, factors.health_status.multiplier());
        breakdown.apply_answer(factors.motivation_level, factors.motivation_level.multiplier());

        if let Some(m) = sleep_goal_multiplier(factors.sleep_goal, template) {
            breakdown.apply_answer(factors.sleep_goal, m);
        }
        if let Some(m) = social_multiplier(factors.social_obligations, naps) {
            breakdown.apply_answer(factors.social_obligations, m);
        }
        if let Some(m) = disruption_multiplier(factors.disruption_tolerance, naps) {
            breakdown.apply_answer(factors.disruption_tolerance, m);
        }
        if let Some(m) = chronotype_multiplier(factors.chronotype, template) {
            breakdown.apply_answer(factors.chronotype, m);
        }

        if template.id == MONOPHASIC_ID && can_go_polyphasic(factors) {
            breakdown.apply("monophasicPenalty", MONOPHASIC_ID, MONOPHASIC_PENALTY);
        }

        let breakdown = breakdown.finish();
        tracing::trace!(
            schedule = %template.id,
            naps,
            raw_score = breakdown.raw_score,
            score = breakdown.score,
            "scored schedule"
        );
        breakdown
    }

    /// Caveats for `template` given the user's answers, in a fixed order.
    pub fn generate_warnings(
        &self,
        template: &ScheduleTemplate,
        factors: &UserFactors,
    ) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if template.difficulty() == Difficulty::Extreme {
            let experience = match factors.sleep_experience {
                SleepExperience::None | SleepExperience::Some => {
                    Warning::new(Severity::Critical, warning_keys::EXPERIENCE_TOO_LOW)
                }
                SleepExperience::Moderate => {
                    Warning::new(Severity::Warning, warning_keys::MODERATE_EXPERIENCE)
                }
                SleepExperience::Extensive => {
                    Warning::new(Severity::Info, warning_keys::CHALLENGING_SCHEDULE)
                }
            };
            warnings.push(experience);

            if factors.health_status != HealthStatus::Healthy {
                warnings.push(Warning::new(Severity::Critical, warning_keys::HEALTH_CONCERNS));
            }
        }

        if template.has_naps() && factors.nap_environment == NapEnvironment::Unsuitable {
            warnings.push(Warning::new(
                Severity::Warning,
                warning_keys::UNSUITABLE_NAP_ENVIRONMENT,
            ));
        }

        let nap_during_work = template
            .nap_blocks()
            .filter_map(|b| b.start_minutes())
            .any(|minute| WORK_HOURS.contains(&minute));
        if nap_during_work && factors.work_schedule == WorkSchedule::Regular {
            warnings.push(Warning::new(
                Severity::Warning,
                warning_keys::WORK_SCHEDULE_CONFLICT,
            ));
        }

        warnings
    }

    /// Estimated days to adapt: `round(14 × experience × motivation)`.
    pub fn calculate_adaptation_period(
        &self,
        experience: SleepExperience,
        motivation: MotivationLevel,
    ) -> u32 {
        let days = BASE_ADAPTATION_DAYS
            * experience.adaptation_multiplier()
            * motivation.adaptation_multiplier();
        (days.round() as u32).max(1)
    }
}

/// Adult, not seriously ill, and at least moderately motivated.
fn can_go_polyphasic(factors: &UserFactors) -> bool {
    factors.age_range.is_adult()
        && factors.health_status != HealthStatus::SeriousConditions
        && matches!(
            factors.motivation_level,
            MotivationLevel::Moderate | MotivationLevel::High
        )
}

fn sleep_goal_multiplier(goal: SleepGoal, template: &ScheduleTemplate) -> Option<f64> {
    let naps = template.nap_count();
    match goal {
        SleepGoal::MoreProductivity if naps >= 2 => Some(1.1),
        SleepGoal::BalancedLifestyle if naps >= 5 => Some(0.8),
        SleepGoal::ImproveHealth if template.total_sleep_hours < 4.0 => Some(0.6),
        SleepGoal::Curiosity if naps >= 2 => Some(1.05),
        _ => None,
    }
}

fn social_multiplier(obligations: SocialObligations, naps: usize) -> Option<f64> {
    match obligations {
        SocialObligations::Significant if naps >= 3 => Some(0.75),
        SocialObligations::Moderate if naps >= 6 => Some(0.7),
        SocialObligations::Minimal if naps >= 4 => Some(1.1),
        _ => None,
    }
}

fn disruption_multiplier(tolerance: DisruptionTolerance, naps: usize) -> Option<f64> {
    match tolerance {
        DisruptionTolerance::VerySensitive if naps >= 2 => Some(0.75),
        DisruptionTolerance::SomewhatSensitive if naps >= 3 => Some(0.85),
        DisruptionTolerance::NotSensitive if naps >= 3 => Some(1.1),
        _ => None,
    }
}

fn chronotype_multiplier(chronotype: Chronotype, template: &ScheduleTemplate) -> Option<f64> {
    let mut core_hours = template.core_blocks().filter_map(|b| b.start_hour());
    match chronotype {
        Chronotype::MorningLark if core_hours.any(|h| h >= 2) => Some(0.8),
        Chronotype::NightOwl if core_hours.any(|h| h < 22) => Some(0.8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LocalizedText, ScheduleCatalog, SleepBlock};
    use crate::factors::{AgeRange, KnowledgeLevel, Lifestyle};

    fn template(id: &str, hours: f64, blocks: Vec<SleepBlock>) -> ScheduleTemplate {
        ScheduleTemplate {
            id: id.to_string(),
            name: id.to_string(),
            description: LocalizedText::new(id, id),
            total_sleep_hours: hours,
            blocks,
            is_premium: false,
        }
    }

    fn ideal_factors() -> UserFactors {
        UserFactors {
            sleep_experience: SleepExperience::Extensive,
            age_range: AgeRange::From25To34,
            work_schedule: WorkSchedule::Flexible,
            nap_environment: NapEnvironment::Ideal,
            lifestyle: Lifestyle::Calm,
            knowledge_level: KnowledgeLevel::Advanced,
            health_status: HealthStatus::Healthy,
            motivation_level: MotivationLevel::High,
            sleep_goal: SleepGoal::MoreProductivity,
            social_obligations: SocialObligations::Minimal,
            disruption_tolerance: DisruptionTolerance::NotSensitive,
            chronotype: Chronotype::Neutral,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_catalog_yields_none() {
        let recommender = ScheduleRecommender::new();
        assert!(recommender.recommend(&UserFactors::default(), &[]).is_none());
    }

    #[test]
    fn premium_only_catalog_yields_none() {
        let mut premium = template("uberman", 2.0, vec![SleepBlock::nap("00:00", 20)]);
        premium.is_premium = true;
        let recommender = ScheduleRecommender::new();
        assert!(recommender
            .recommend(&UserFactors::default(), &[premium])
            .is_none());
    }

    #[test]
    fn unconditional_multipliers_compound() {
        let mono = template("mono", 8.0, vec![SleepBlock::core("00:30", 480)]);
        let factors = UserFactors {
            sleep_experience: SleepExperience::None,
            age_range: AgeRange::Under18,
            work_schedule: WorkSchedule::Shift,
            lifestyle: Lifestyle::VeryActive,
            knowledge_level: KnowledgeLevel::Beginner,
            health_status: HealthStatus::SeriousConditions,
            motivation_level: MotivationLevel::Low,
            ..ideal_factors()
        };
        let breakdown = ScheduleRecommender::new().score_template(&mono, &factors);
        assert_close(breakdown.score, 0.7 * 0.6 * 0.6 * 0.7 * 0.8 * 0.4 * 0.7);
        assert_eq!(breakdown.terms.len(), 7);
    }

    #[test]
    fn nap_environment_skipped_without_naps() {
        let recommender = ScheduleRecommender::new();
        let factors = UserFactors {
            nap_environment: NapEnvironment::Unsuitable,
            ..ideal_factors()
        };
        let mono = template("mono", 8.0, vec![SleepBlock::core("00:00", 480)]);
        let napper = template(
            "napper",
            6.5,
            vec![SleepBlock::core("00:00", 360), SleepBlock::nap("14:00", 30)],
        );

        let mono_score = recommender.score_template(&mono, &factors);
        let nap_score = recommender.score_template(&napper, &factors);
        assert!(mono_score.terms.iter().all(|t| t.factor != "napEnvironment"));
        assert_close(nap_score.score, mono_score.score * 0.5);
    }

    #[test]
    fn sleep_goal_conditions() {
        let two_naps = template(
            "two",
            5.0,
            vec![
                SleepBlock::core("00:00", 240),
                SleepBlock::nap("09:00", 30),
                SleepBlock::nap("15:00", 30),
            ],
        );
        let short = template("short", 3.0, vec![SleepBlock::core("00:00", 180)]);

        assert_eq!(sleep_goal_multiplier(SleepGoal::MoreProductivity, &two_naps), Some(1.1));
        assert_eq!(sleep_goal_multiplier(SleepGoal::Curiosity, &two_naps), Some(1.05));
        assert_eq!(sleep_goal_multiplier(SleepGoal::BalancedLifestyle, &two_naps), None);
        assert_eq!(sleep_goal_multiplier(SleepGoal::ImproveHealth, &two_naps), None);
        assert_eq!(sleep_goal_multiplier(SleepGoal::ImproveHealth, &short), Some(0.6));
        assert_eq!(sleep_goal_multiplier(SleepGoal::MoreProductivity, &short), None);
    }

    #[test]
    fn social_and_disruption_thresholds() {
        assert_eq!(social_multiplier(SocialObligations::Significant, 2), None);
        assert_eq!(social_multiplier(SocialObligations::Significant, 3), Some(0.75));
        assert_eq!(social_multiplier(SocialObligations::Moderate, 5), None);
        assert_eq!(social_multiplier(SocialObligations::Moderate, 6), Some(0.7));
        assert_eq!(social_multiplier(SocialObligations::Minimal, 4), Some(1.1));

        assert_eq!(disruption_multiplier(DisruptionTolerance::VerySensitive, 1), None);
        assert_eq!(disruption_multiplier(DisruptionTolerance::VerySensitive, 2), Some(0.75));
        assert_eq!(disruption_multiplier(DisruptionTolerance::SomewhatSensitive, 2), None);
        assert_eq!(disruption_multiplier(DisruptionTolerance::SomewhatSensitive, 3), Some(0.85));
        assert_eq!(disruption_multiplier(DisruptionTolerance::NotSensitive, 3), Some(1.1));
    }

    #[test]
    fn chronotype_checks_core_start_hours() {
        let early = template("early", 6.0, vec![SleepBlock::core("00:30", 360)]);
        let late = template("late", 6.0, vec![SleepBlock::core("03:00", 360)]);
        let evening = template("evening", 6.0, vec![SleepBlock::core("21:00", 360)]);
        let night = template("night", 6.0, vec![SleepBlock::core("23:00", 360)]);

        assert_eq!(chronotype_multiplier(Chronotype::MorningLark, &early), None);
        assert_eq!(chronotype_multiplier(Chronotype::MorningLark, &late), Some(0.8));
        assert_eq!(chronotype_multiplier(Chronotype::NightOwl, &evening), Some(0.8));
        assert_eq!(chronotype_multiplier(Chronotype::NightOwl, &night), None);
        assert_eq!(chronotype_multiplier(Chronotype::Neutral, &late), None);
    }

    #[test]
    fn monophasic_penalty_requires_capable_user() {
        let mono = template(MONOPHASIC_ID, 8.0, vec![SleepBlock::core("00:00", 480)]);
        let recommender = ScheduleRecommender::new();

        let capable = recommender.score_template(&mono, &ideal_factors());
        let penalty = capable.terms.last().map(|t| t.multiplier);
        assert_eq!(penalty, Some(MONOPHASIC_PENALTY));

        for factors in [
            UserFactors {
                age_range: AgeRange::Under18,
                ..ideal_factors()
            },
            UserFactors {
                health_status: HealthStatus::SeriousConditions,
                ..ideal_factors()
            },
            UserFactors {
                motivation_level: MotivationLevel::Low,
                ..ideal_factors()
            },
        ] {
            let breakdown = recommender.score_template(&mono, &factors);
            assert!(breakdown.terms.iter().all(|t| t.factor != "monophasicPenalty"));
        }
    }

    #[test]
    fn ties_keep_catalog_order() {
        let a = template("a", 8.0, vec![SleepBlock::core("00:00", 480)]);
        let b = template("b", 8.0, vec![SleepBlock::core("00:00", 480)]);
        let recommender = ScheduleRecommender::new();

        let first = recommender.recommend(&UserFactors::default(), &[a.clone(), b.clone()]);
        assert_eq!(first.map(|r| r.template.id), Some("a".to_string()));
        let second = recommender.recommend(&UserFactors::default(), &[b, a]);
        assert_eq!(second.map(|r| r.template.id), Some("b".to_string()));
    }

    #[test]
    fn difficulty_classification() {
        let cases = [
            (template("m", 8.0, vec![SleepBlock::core("00:00", 480)]), Difficulty::Beginner),
            (template("m", 5.0, vec![SleepBlock::core("00:00", 300)]), Difficulty::Extreme),
            (
                template(
                    "b",
                    6.5,
                    vec![SleepBlock::core("00:00", 300), SleepBlock::nap("14:00", 90)],
                ),
                Difficulty::Intermediate,
            ),
            (
                template(
                    "e2",
                    5.0,
                    vec![
                        SleepBlock::core("00:00", 240),
                        SleepBlock::nap("09:00", 30),
                        SleepBlock::nap("15:00", 30),
                    ],
                ),
                Difficulty::Advanced,
            ),
        ];
        for (t, expected) in cases {
            assert_eq!(Difficulty::classify(&t), expected, "{}", t.id);
        }

        let builtin = ScheduleCatalog::builtin();
        assert_eq!(builtin.get("everyman").map(|t| t.difficulty()), Some(Difficulty::Extreme));
        assert_eq!(builtin.get("segmented").map(|t| t.difficulty()), Some(Difficulty::Beginner));
    }

    #[test]
    fn extreme_schedule_warnings_by_experience() {
        let recommender = ScheduleRecommender::new();
        let uberman = template(
            "uberman",
            2.0,
            (0..6)
                .map(|i| SleepBlock::nap(&format!("{:02}:00", i * 4), 20))
                .collect(),
        );

        let expectations = [
            (SleepExperience::None, Severity::Critical, warning_keys::EXPERIENCE_TOO_LOW),
            (SleepExperience::Some, Severity::Critical, warning_keys::EXPERIENCE_TOO_LOW),
            (SleepExperience::Moderate, Severity::Warning, warning_keys::MODERATE_EXPERIENCE),
            (SleepExperience::Extensive, Severity::Info, warning_keys::CHALLENGING_SCHEDULE),
        ];
        for (experience, severity, key) in expectations {
            let factors = UserFactors {
                sleep_experience: experience,
                work_schedule: WorkSchedule::Flexible,
                ..UserFactors::default()
            };
            let warnings = recommender.generate_warnings(&uberman, &factors);
            assert_eq!(warnings, vec![Warning::new(severity, key)]);
        }
    }

    #[test]
    fn health_and_environment_warnings() {
        let recommender = ScheduleRecommender::new();
        let everyman = ScheduleCatalog::builtin().get("everyman").cloned().unwrap();
        let factors = UserFactors {
            sleep_experience: SleepExperience::Extensive,
            health_status: HealthStatus::ManagedConditions,
            nap_environment: NapEnvironment::Unsuitable,
            work_schedule: WorkSchedule::Regular,
            ..UserFactors::default()
        };

        let keys: Vec<_> = recommender
            .generate_warnings(&everyman, &factors)
            .into_iter()
            .map(|w| w.message_key)
            .collect();
        assert_eq!(
            keys,
            vec![
                warning_keys::CHALLENGING_SCHEDULE,
                warning_keys::HEALTH_CONCERNS,
                warning_keys::UNSUITABLE_NAP_ENVIRONMENT,
                warning_keys::WORK_SCHEDULE_CONFLICT,
            ]
        );
    }

    #[test]
    fn work_conflict_window_is_inclusive() {
        let recommender = ScheduleRecommender::new();
        let factors = UserFactors {
            work_schedule: WorkSchedule::Regular,
            ..UserFactors::default()
        };
        let at = |time: &str| {
            template(
                "t",
                6.33,
                vec![SleepBlock::core("23:00", 360), SleepBlock::nap(time, 20)],
            )
        };

        let cases = [
            ("08:59", false),
            ("09:00", true),
            ("17:00", true),
            ("17:01", false),
        ];
        for (time, conflict) in cases {
            let warnings = recommender.generate_warnings(&at(time), &factors);
            let has = warnings
                .iter()
                .any(|w| w.message_key == warning_keys::WORK_SCHEDULE_CONFLICT);
            assert_eq!(has, conflict, "nap at {time}");
        }
    }

    #[test]
    fn adaptation_period_examples() {
        let r = ScheduleRecommender::new();
        let days = |e, m| r.calculate_adaptation_period(e, m);
        assert_eq!(days(SleepExperience::Extensive, MotivationLevel::High), 7);
        assert_eq!(days(SleepExperience::None, MotivationLevel::Low), 20);
        assert_eq!(days(SleepExperience::Some, MotivationLevel::Moderate), 14);
        assert_eq!(days(SleepExperience::Moderate, MotivationLevel::Low), 13);
    }

    #[test]
    fn top_penalty_picks_lowest_multiplier() {
        let mono = template(MONOPHASIC_ID, 8.0, vec![SleepBlock::core("00:00", 480)]);
        let breakdown = ScheduleRecommender::new().score_template(&mono, &ideal_factors());
        let top = breakdown.top_penalty().map(|t| t.factor.as_str());
        assert_eq!(top, Some("monophasicPenalty"));
        assert_eq!(breakdown.boosts().count(), 0);
    }

    #[test]
    fn recommendation_serializes_camel_case() {
        let catalog = ScheduleCatalog::builtin();
        let rec = ScheduleRecommender::new()
            .recommend(&ideal_factors(), catalog.templates())
            .unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("confidenceScore").is_some());
        assert!(json.get("adaptationPeriodDays").is_some());
        assert_eq!(json["template"]["id"], rec.template.id.as_str());
    }
}
