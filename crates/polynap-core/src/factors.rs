//! User factors collected by the onboarding survey.
//!
//! Each survey question maps to one closed enum. Raw answers arrive as free
//! strings and are decoded with a silent fallback: an unknown or missing
//! answer resolves to the documented default for that question, so a
//! [`UserFactors`] is always fully populated.

use serde::{Deserialize, Serialize};

use crate::answers::{question, AnswerSource};

/// Normalize a question or answer key for comparison.
///
/// Lowercases, drops separators and whitespace, and spells `+` as `plus`,
/// so `"Moderately_Active"`, `"moderately-active"` and `"moderatelyActive"`
/// compare equal.
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c == '+' {
            out.push_str("plus");
        } else if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// A closed set of answers to one survey question.
pub trait SurveyAnswer: Sized + Copy + Default + PartialEq + std::fmt::Debug + 'static {
    /// Question key this answer belongs to.
    const QUESTION: &'static str;

    /// Every answer, in survey order.
    const ALL: &'static [Self];

    /// Canonical answer key.
    fn as_answer(self) -> &'static str;

    /// Additional spellings accepted when parsing.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// Parse a raw answer key, ignoring case and separators.
    fn parse_answer(raw: &str) -> Option<Self> {
        let wanted = normalize_key(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.iter().copied().find(|value| {
            normalize_key(value.as_answer()) == wanted
                || value.aliases().iter().any(|alias| normalize_key(alias) == wanted)
        })
    }

    /// Decode a raw answer, falling back to the default when it is missing
    /// or not recognised.
    fn decode(raw: Option<&str>) -> Self {
        match raw {
            Some(value) => Self::parse_answer(value).unwrap_or_else(|| {
                let fallback = Self::default();
                tracing::debug!(
                    question = Self::QUESTION,
                    answer = value,
                    fallback = fallback.as_answer(),
                    "unrecognised answer, using default"
                );
                fallback
            }),
            None => {
                let fallback = Self::default();
                tracing::debug!(
                    question = Self::QUESTION,
                    fallback = fallback.as_answer(),
                    "missing answer, using default"
                );
                fallback
            }
        }
    }
}

/// Prior experience with polyphasic sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SleepExperience {
    #[default]
    None,
    Some,
    Moderate,
    Extensive,
}

impl SleepExperience {
    pub fn multiplier(self) -> f64 {
        match self {
            SleepExperience::None => 0.7,
            SleepExperience::Some => 0.8,
            SleepExperience::Moderate => 0.9,
            SleepExperience::Extensive => 1.0,
        }
    }

    /// Scale applied to the base adaptation period.
    pub fn adaptation_multiplier(self) -> f64 {
        match self {
            SleepExperience::None => 1.2,
            SleepExperience::Some => 1.0,
            SleepExperience::Moderate => 0.8,
            SleepExperience::Extensive => 0.6,
        }
    }
}

impl SurveyAnswer for SleepExperience {
    const QUESTION: &'static str = question::SLEEP_EXPERIENCE;
    const ALL: &'static [Self] = &[
        SleepExperience::None,
        SleepExperience::Some,
        SleepExperience::Moderate,
        SleepExperience::Extensive,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            SleepExperience::None => "none",
            SleepExperience::Some => "some",
            SleepExperience::Moderate => "moderate",
            SleepExperience::Extensive => "extensive",
        }
    }
}

/// Age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "under18")]
    Under18,
    #[serde(rename = "18to24")]
    From18To24,
    #[default]
    #[serde(rename = "25to34")]
    From25To34,
    #[serde(rename = "35to44")]
    From35To44,
    #[serde(rename = "45to54")]
    From45To54,
    #[serde(rename = "55plus")]
    Over55,
}

impl AgeRange {
    pub fn multiplier(self) -> f64 {
        match self {
            AgeRange::Under18 => 0.6,
            AgeRange::From18To24 => 1.0,
            AgeRange::From25To34 => 0.9,
            AgeRange::From35To44 => 0.8,
            AgeRange::From45To54 => 0.7,
            AgeRange::Over55 => 0.6,
        }
    }

    pub fn is_adult(self) -> bool {
        self != AgeRange::Under18
    }
}

impl SurveyAnswer for AgeRange {
    const QUESTION: &'static str = question::AGE_RANGE;
    const ALL: &'static [Self] = &[
        AgeRange::Under18,
        AgeRange::From18To24,
        AgeRange::From25To34,
        AgeRange::From35To44,
        AgeRange::From45To54,
        AgeRange::Over55,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            AgeRange::Under18 => "under18",
            AgeRange::From18To24 => "18to24",
            AgeRange::From25To34 => "25to34",
            AgeRange::From35To44 => "35to44",
            AgeRange::From45To54 => "45to54",
            AgeRange::Over55 => "55plus",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            AgeRange::Under18 => &["below18"],
            AgeRange::From18To24 => &["18-24"],
            AgeRange::From25To34 => &["25-34"],
            AgeRange::From35To44 => &["35-44"],
            AgeRange::From45To54 => &["45-54"],
            AgeRange::Over55 => &["55+", "over55"],
        }
    }
}

/// Shape of the user's working week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkSchedule {
    Flexible,
    #[default]
    Regular,
    Irregular,
    Shift,
}

impl WorkSchedule {
    pub fn multiplier(self) -> f64 {
        match self {
            WorkSchedule::Flexible => 1.0,
            WorkSchedule::Regular => 0.9,
            WorkSchedule::Irregular => 0.7,
            WorkSchedule::Shift => 0.6,
        }
    }
}

impl SurveyAnswer for WorkSchedule {
    const QUESTION: &'static str = question::WORK_SCHEDULE;
    const ALL: &'static [Self] = &[
        WorkSchedule::Flexible,
        WorkSchedule::Regular,
        WorkSchedule::Irregular,
        WorkSchedule::Shift,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            WorkSchedule::Flexible => "flexible",
            WorkSchedule::Regular => "regular",
            WorkSchedule::Irregular => "irregular",
            WorkSchedule::Shift => "shift",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            WorkSchedule::Shift => &["shiftWork"],
            _ => &[],
        }
    }
}

/// Where and how easily the user can nap during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NapEnvironment {
    Ideal,
    #[default]
    Suitable,
    Limited,
    Unsuitable,
}

impl NapEnvironment {
    /// Only meaningful for schedules that contain naps.
    pub fn multiplier(self) -> f64 {
        match self {
            NapEnvironment::Ideal => 1.0,
            NapEnvironment::Suitable => 0.9,
            NapEnvironment::Limited => 0.7,
            NapEnvironment::Unsuitable => 0.5,
        }
    }
}

impl SurveyAnswer for NapEnvironment {
    const QUESTION: &'static str = question::NAP_ENVIRONMENT;
    const ALL: &'static [Self] = &[
        NapEnvironment::Ideal,
        NapEnvironment::Suitable,
        NapEnvironment::Limited,
        NapEnvironment::Unsuitable,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            NapEnvironment::Ideal => "ideal",
            NapEnvironment::Suitable => "suitable",
            NapEnvironment::Limited => "limited",
            NapEnvironment::Unsuitable => "unsuitable",
        }
    }
}

/// Physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lifestyle {
    Calm,
    #[default]
    ModeratelyActive,
    VeryActive,
}

impl Lifestyle {
    pub fn multiplier(self) -> f64 {
        match self {
            Lifestyle::Calm => 1.0,
            Lifestyle::ModeratelyActive => 0.9,
            Lifestyle::VeryActive => 0.7,
        }
    }
}

impl SurveyAnswer for Lifestyle {
    const QUESTION: &'static str = question::LIFESTYLE;
    const ALL: &'static [Self] = &[
        Lifestyle::Calm,
        Lifestyle::ModeratelyActive,
        Lifestyle::VeryActive,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            Lifestyle::Calm => "calm",
            Lifestyle::ModeratelyActive => "moderatelyActive",
            Lifestyle::VeryActive => "veryActive",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Lifestyle::ModeratelyActive => &["moderate", "active"],
            _ => &[],
        }
    }
}

/// Self-reported knowledge about sleep science.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KnowledgeLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl KnowledgeLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            KnowledgeLevel::Beginner => 0.8,
            KnowledgeLevel::Intermediate => 0.9,
            KnowledgeLevel::Advanced => 1.0,
        }
    }
}

impl SurveyAnswer for KnowledgeLevel {
    const QUESTION: &'static str = question::KNOWLEDGE_LEVEL;
    const ALL: &'static [Self] = &[
        KnowledgeLevel::Beginner,
        KnowledgeLevel::Intermediate,
        KnowledgeLevel::Advanced,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            KnowledgeLevel::Beginner => "beginner",
            KnowledgeLevel::Intermediate => "intermediate",
            KnowledgeLevel::Advanced => "advanced",
        }
    }
}

/// General health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthStatus {
    #[default]
    Healthy,
    ManagedConditions,
    SeriousConditions,
}

impl HealthStatus {
    pub fn multiplier(self) -> f64 {
        match self {
            HealthStatus::Healthy => 1.0,
            HealthStatus::ManagedConditions => 0.7,
            HealthStatus::SeriousConditions => 0.4,
        }
    }
}

impl SurveyAnswer for HealthStatus {
    const QUESTION: &'static str = question::HEALTH_STATUS;
    const ALL: &'static [Self] = &[
        HealthStatus::Healthy,
        HealthStatus::ManagedConditions,
        HealthStatus::SeriousConditions,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::ManagedConditions => "managedConditions",
            HealthStatus::SeriousConditions => "seriousConditions",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            HealthStatus::ManagedConditions => &["managed"],
            HealthStatus::SeriousConditions => &["serious"],
            HealthStatus::Healthy => &[],
        }
    }
}

/// Commitment to getting through the adaptation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotivationLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl MotivationLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            MotivationLevel::Low => 0.7,
            MotivationLevel::Moderate => 0.85,
            MotivationLevel::High => 1.0,
        }
    }

    /// Scale applied to the base adaptation period.
    pub fn adaptation_multiplier(self) -> f64 {
        match self {
            MotivationLevel::Low => 1.2,
            MotivationLevel::Moderate => 1.0,
            MotivationLevel::High => 0.8,
        }
    }
}

impl SurveyAnswer for MotivationLevel {
    const QUESTION: &'static str = question::MOTIVATION_LEVEL;
    const ALL: &'static [Self] = &[
        MotivationLevel::Low,
        MotivationLevel::Moderate,
        MotivationLevel::High,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            MotivationLevel::Low => "low",
            MotivationLevel::Moderate => "moderate",
            MotivationLevel::High => "high",
        }
    }
}

/// What the user hopes to get out of a new schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SleepGoal {
    MoreProductivity,
    #[default]
    BalancedLifestyle,
    ImproveHealth,
    Curiosity,
}

impl SurveyAnswer for SleepGoal {
    const QUESTION: &'static str = question::SLEEP_GOAL;
    const ALL: &'static [Self] = &[
        SleepGoal::MoreProductivity,
        SleepGoal::BalancedLifestyle,
        SleepGoal::ImproveHealth,
        SleepGoal::Curiosity,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            SleepGoal::MoreProductivity => "moreProductivity",
            SleepGoal::BalancedLifestyle => "balancedLifestyle",
            SleepGoal::ImproveHealth => "improveHealth",
            SleepGoal::Curiosity => "curiosity",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            SleepGoal::MoreProductivity => &["productivity"],
            SleepGoal::BalancedLifestyle => &["balanced"],
            SleepGoal::ImproveHealth => &["health"],
            SleepGoal::Curiosity => &["experiment"],
        }
    }
}

/// Weight of fixed social commitments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocialObligations {
    Significant,
    #[default]
    Moderate,
    Minimal,
}

impl SurveyAnswer for SocialObligations {
    const QUESTION: &'static str = question::SOCIAL_OBLIGATIONS;
    const ALL: &'static [Self] = &[
        SocialObligations::Significant,
        SocialObligations::Moderate,
        SocialObligations::Minimal,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            SocialObligations::Significant => "significant",
            SocialObligations::Moderate => "moderate",
            SocialObligations::Minimal => "minimal",
        }
    }
}

/// How badly interrupted sleep affects the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisruptionTolerance {
    VerySensitive,
    #[default]
    SomewhatSensitive,
    NotSensitive,
}

impl SurveyAnswer for DisruptionTolerance {
    const QUESTION: &'static str = question::DISRUPTION_TOLERANCE;
    const ALL: &'static [Self] = &[
        DisruptionTolerance::VerySensitive,
        DisruptionTolerance::SomewhatSensitive,
        DisruptionTolerance::NotSensitive,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            DisruptionTolerance::VerySensitive => "verySensitive",
            DisruptionTolerance::SomewhatSensitive => "somewhatSensitive",
            DisruptionTolerance::NotSensitive => "notSensitive",
        }
    }
}

/// Natural sleep timing preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Chronotype {
    MorningLark,
    NightOwl,
    #[default]
    Neutral,
}

impl SurveyAnswer for Chronotype {
    const QUESTION: &'static str = question::CHRONOTYPE;
    const ALL: &'static [Self] = &[
        Chronotype::MorningLark,
        Chronotype::NightOwl,
        Chronotype::Neutral,
    ];

    fn as_answer(self) -> &'static str {
        match self {
            Chronotype::MorningLark => "morningLark",
            Chronotype::NightOwl => "nightOwl",
            Chronotype::Neutral => "neutral",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Chronotype::MorningLark => &["lark", "morning"],
            Chronotype::NightOwl => &["owl", "night"],
            Chronotype::Neutral => &["intermediate"],
        }
    }
}

/// Fully decoded survey answers.
///
/// Every field carries a valid value: missing fields default on
/// deserialization, and [`UserFactors::from_answers`] defaults unknown
/// answers instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFactors {
    pub sleep_experience: SleepExperience,
    pub age_range: AgeRange,
    pub work_schedule: WorkSchedule,
    pub nap_environment: NapEnvironment,
    pub lifestyle: Lifestyle,
    pub knowledge_level: KnowledgeLevel,
    pub health_status: HealthStatus,
    pub motivation_level: MotivationLevel,
    pub sleep_goal: SleepGoal,
    pub social_obligations: SocialObligations,
    pub disruption_tolerance: DisruptionTolerance,
    pub chronotype: Chronotype,
}

impl UserFactors {
    /// Decode all twelve questions from an answer source.
    pub fn from_answers<S: AnswerSource + ?Sized>(source: &S) -> Self {
        fn field<T: SurveyAnswer, S: AnswerSource + ?Sized>(source: &S) -> T {
            T::decode(source.answer(T::QUESTION))
        }

        Self {
            sleep_experience: field(source),
            age_range: field(source),
            work_schedule: field(source),
            nap_environment: field(source),
            lifestyle: field(source),
            knowledge_level: field(source),
            health_status: field(source),
            motivation_level: field(source),
            sleep_goal: field(source),
            social_obligations: field(source),
            disruption_tolerance: field(source),
            chronotype: field(source),
        }
    }

    /// Canonical question/answer pairs, in survey order.
    pub fn to_answers(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            (SleepExperience::QUESTION, self.sleep_experience.as_answer()),
            (AgeRange::QUESTION, self.age_range.as_answer()),
            (WorkSchedule::QUESTION, self.work_schedule.as_answer()),
            (NapEnvironment::QUESTION, self.nap_environment.as_answer()),
            (Lifestyle::QUESTION, self.lifestyle.as_answer()),
            (KnowledgeLevel::QUESTION, self.knowledge_level.as_answer()),
            (HealthStatus::QUESTION, self.health_status.as_answer()),
            (MotivationLevel::QUESTION, self.motivation_level.as_answer()),
            (SleepGoal::QUESTION, self.sleep_goal.as_answer()),
            (SocialObligations::QUESTION, self.social_obligations.as_answer()),
            (DisruptionTolerance::QUESTION, self.disruption_tolerance.as_answer()),
            (Chronotype::QUESTION, self.chronotype.as_answer()),
        ]
    }
}
