//! Sleep schedule templates and the catalog they are ranked from.
//!
//! The catalog is static configuration: it is either the built-in list
//! shipped with the crate or a TOML/JSON file loaded once at startup. It is
//! validated on load and never mutated afterwards. Iteration order is
//! significant, since it breaks ties when templates score the same.

use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveTime, Timelike};
use indoc::indoc;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CoreError, Result};
use crate::recommender::Difficulty;

/// Version of the built-in catalog.
pub const CATALOG_VERSION: u32 = 1;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "tr" | "turkish" => Some(Language::Tr),
            _ => None,
        }
    }
}

/// Text available in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub tr: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, tr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            tr: tr.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Tr => &self.tr,
        }
    }
}

/// One sleep period within a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepBlock {
    /// Start time, 24h `HH:MM`.
    pub start_time: String,
    pub duration_minutes: u32,
    /// Core (long, usually nighttime) sleep as opposed to a nap.
    pub is_core: bool,
}

impl SleepBlock {
    pub fn core(start_time: &str, duration_minutes: u32) -> Self {
        Self {
            start_time: start_time.to_string(),
            duration_minutes,
            is_core: true,
        }
    }

    pub fn nap(start_time: &str, duration_minutes: u32) -> Self {
        Self {
            start_time: start_time.to_string(),
            duration_minutes,
            is_core: false,
        }
    }

    /// Parsed start time, `None` if `start_time` is not valid `HH:MM`.
    pub fn start(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.start_time.trim(), "%H:%M").ok()
    }

    pub fn start_hour(&self) -> Option<u32> {
        self.start().map(|t| t.hour())
    }

    /// Minutes past midnight.
    pub fn start_minutes(&self) -> Option<u32> {
        self.start().map(|t| t.hour() * 60 + t.minute())
    }
}

/// A predefined sleep schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTemplate {
    /// Stable key, e.g. `"everyman"`.
    pub id: String,
    pub name: String,
    pub description: LocalizedText,
    pub total_sleep_hours: f64,
    pub blocks: Vec<SleepBlock>,
    #[serde(default)]
    pub is_premium: bool,
}

impl ScheduleTemplate {
    /// Number of non-core blocks.
    pub fn nap_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_core).count()
    }

    pub fn has_naps(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_core)
    }

    pub fn core_blocks(&self) -> impl Iterator<Item = &SleepBlock> {
        self.blocks.iter().filter(|b| b.is_core)
    }

    pub fn nap_blocks(&self) -> impl Iterator<Item = &SleepBlock> {
        self.blocks.iter().filter(|b| !b.is_core)
    }

    /// Sum of block durations in minutes.
    pub fn scheduled_minutes(&self) -> u32 {
        self.blocks.iter().map(|b| b.duration_minutes).sum()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::classify(self)
    }

    /// Check the block invariants: valid times, positive durations and no
    /// overlap on the 24h clock.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self, index: usize) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyId { index });
        }
        if self.blocks.is_empty() {
            return Err(CatalogError::NoBlocks(self.id.clone()));
        }

        let mut spans = Vec::with_capacity(self.blocks.len());
        for (block_index, block) in self.blocks.iter().enumerate() {
            let start = block
                .start_minutes()
                .ok_or_else(|| CatalogError::InvalidStartTime {
                    schedule: self.id.clone(),
                    block: block_index,
                    value: block.start_time.clone(),
                })?;
            if block.duration_minutes == 0 {
                return Err(CatalogError::ZeroDuration {
                    schedule: self.id.clone(),
                    block: block_index,
                });
            }
            if i64::from(block.duration_minutes) > MINUTES_PER_DAY {
                return Err(CatalogError::DurationTooLong {
                    schedule: self.id.clone(),
                    block: block_index,
                    minutes: block.duration_minutes,
                });
            }
            spans.push((i64::from(start), i64::from(block.duration_minutes)));
        }

        for (first, &(start_a, len_a)) in spans.iter().enumerate() {
            for (offset, &(start_b, len_b)) in spans[first + 1..].iter().enumerate() {
                let a_to_b = (start_b - start_a).rem_euclid(MINUTES_PER_DAY);
                let b_to_a = (start_a - start_b).rem_euclid(MINUTES_PER_DAY);
                if a_to_b < len_a || b_to_a < len_b {
                    return Err(CatalogError::OverlappingBlocks {
                        schedule: self.id.clone(),
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<u32>,
    schedules: Vec<ScheduleTemplate>,
}

/// Ordered, validated list of schedule templates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleCatalog {
    version: u32,
    templates: Vec<ScheduleTemplate>,
}

impl ScheduleCatalog {
    /// Validate and wrap a list of templates.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any template breaks a block invariant or
    /// two templates share an id.
    pub fn new(templates: Vec<ScheduleTemplate>) -> Result<Self, CatalogError> {
        Self::with_version(CATALOG_VERSION, templates)
    }

    pub fn with_version(
        version: u32,
        templates: Vec<ScheduleTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, template) in templates.iter().enumerate() {
            template.validate(index)?;
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateId(template.id.clone()));
            }
        }
        Ok(Self { version, templates })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            version: CATALOG_VERSION,
            templates: builtin_templates(),
        }
    }

    /// Parse a TOML catalog with a `[[schedules]]` array.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
        Ok(Self::with_version(
            file.version.unwrap_or(CATALOG_VERSION),
            file.schedules,
        )?)
    }

    /// Parse a JSON catalog `{"version": 1, "schedules": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)
            .map_err(|e| CatalogError::ParseFailed(e.to_string()))?;
        Ok(Self::with_version(
            file.version.unwrap_or(CATALOG_VERSION),
            file.schedules,
        )?)
    }

    /// Load a catalog file, choosing the format by extension (`.json`,
    /// anything else is read as TOML).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        tracing::info!(
            path = %path.display(),
            version = catalog.version,
            schedules = catalog.len(),
            "loaded schedule catalog"
        );
        Ok(catalog)
    }

    /// Serialize in the TOML file format accepted by [`Self::from_toml_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            version: Some(self.version),
            schedules: self.templates.clone(),
        };
        toml::to_string_pretty(&file).map_err(CoreError::from)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn templates(&self) -> &[ScheduleTemplate] {
        &self.templates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleTemplate> {
        self.templates.iter()
    }

    /// Templates available without a subscription.
    pub fn free_templates(&self) -> impl Iterator<Item = &ScheduleTemplate> {
        self.templates.iter().filter(|t| !t.is_premium)
    }

    pub fn get(&self, id: &str) -> Option<&ScheduleTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScheduleCatalog {
    type Item = &'a ScheduleTemplate;
    type IntoIter = std::slice::Iter<'a, ScheduleTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

// ============================================================================
// BUILT-IN SCHEDULES
// ============================================================================

fn builtin_templates() -> Vec<ScheduleTemplate> {
    vec![
        monophasic(),
        biphasic(),
        everyman_e1(),
        everyman_e2(),
        everyman(),
        segmented(),
        dual_core(),
        triphasic(),
        everyman_e4(),
        uberman(),
        dymaxion(),
    ]
}

fn monophasic() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "monophasic".to_string(),
        name: "Monophasic".to_string(),
        description: LocalizedText::new(
            "A single consolidated night of sleep.",
            "Tek parça, kesintisiz gece uykusu.",
        ),
        total_sleep_hours: 8.0,
        blocks: vec![SleepBlock::core("23:00", 480)],
        is_premium: false,
    }
}

fn biphasic() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "biphasic".to_string(),
        name: "Biphasic (Siesta)".to_string(),
        description: LocalizedText::new(
            indoc! {"
                A shortened night paired with a full-cycle afternoon siesta.
                The gentlest step away from monophasic sleep."},
            "Kısaltılmış gece uykusu ve öğleden sonra tam döngülü bir siesta.",
        ),
        total_sleep_hours: 6.5,
        blocks: vec![SleepBlock::core("23:00", 300), SleepBlock::nap("14:00", 90)],
        is_premium: false,
    }
}

fn everyman_e1() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "everyman_e1".to_string(),
        name: "Everyman 1".to_string(),
        description: LocalizedText::new(
            "A six-hour core with one short nap after lunch.",
            "Altı saatlik çekirdek uyku ve öğle sonrası tek kısa şekerleme.",
        ),
        total_sleep_hours: 6.33,
        blocks: vec![SleepBlock::core("23:00", 360), SleepBlock::nap("14:00", 20)],
        is_premium: false,
    }
}

fn everyman_e2() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "everyman_e2".to_string(),
        name: "Everyman 2".to_string(),
        description: LocalizedText::new(
            "A four-and-a-half-hour core with two daytime naps.",
            "Dört buçuk saatlik çekirdek uyku ve gün içinde iki şekerleme.",
        ),
        total_sleep_hours: 5.17,
        blocks: vec![
            SleepBlock::core("23:00", 270),
            SleepBlock::nap("08:00", 20),
            SleepBlock::nap("14:30", 20),
        ],
        is_premium: false,
    }
}

fn everyman() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "everyman".to_string(),
        name: "Everyman 3".to_string(),
        description: LocalizedText::new(
            indoc! {"
                The classic everyman: a three-and-a-half-hour core and three
                evenly spaced 20 minute naps."},
            indoc! {"
                Klasik everyman: üç buçuk saatlik çekirdek uyku ve eşit aralıklı
                üç adet 20 dakikalık şekerleme."},
        ),
        total_sleep_hours: 4.5,
        blocks: vec![
            SleepBlock::core("23:00", 210),
            SleepBlock::nap("06:30", 20),
            SleepBlock::nap("11:30", 20),
            SleepBlock::nap("16:30", 20),
        ],
        is_premium: false,
    }
}

fn segmented() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "segmented".to_string(),
        name: "Segmented".to_string(),
        description: LocalizedText::new(
            "Night sleep split into two cores with a quiet waking period between them.",
            "Arada sakin bir uyanıklık dönemi bulunan iki parçalı gece uykusu.",
        ),
        total_sleep_hours: 6.0,
        blocks: vec![SleepBlock::core("21:00", 210), SleepBlock::core("04:30", 150)],
        is_premium: false,
    }
}

fn dual_core() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "dual_core_1".to_string(),
        name: "Dual Core 1".to_string(),
        description: LocalizedText::new(
            "Dusk and dawn cores with a single midday nap.",
            "Akşam ve şafak çekirdekleri ile öğle saatinde tek şekerleme.",
        ),
        total_sleep_hours: 5.33,
        blocks: vec![
            SleepBlock::core("21:00", 210),
            SleepBlock::core("05:00", 90),
            SleepBlock::nap("13:00", 20),
        ],
        is_premium: false,
    }
}

fn triphasic() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "triphasic".to_string(),
        name: "Triphasic".to_string(),
        description: LocalizedText::new(
            "Three 90 minute cores placed around dusk, dawn and early afternoon.",
            "Akşam, şafak ve öğleden sonra yerleştirilmiş üç adet 90 dakikalık çekirdek.",
        ),
        total_sleep_hours: 4.5,
        blocks: vec![
            SleepBlock::core("21:30", 90),
            SleepBlock::core("05:00", 90),
            SleepBlock::core("13:30", 90),
        ],
        is_premium: false,
    }
}

fn everyman_e4() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "everyman_e4".to_string(),
        name: "Everyman 4".to_string(),
        description: LocalizedText::new(
            "A single sleep cycle at night backed by four naps.",
            "Gece tek uyku döngüsü ve dört şekerleme.",
        ),
        total_sleep_hours: 2.83,
        blocks: vec![
            SleepBlock::core("00:00", 90),
            SleepBlock::nap("05:00", 20),
            SleepBlock::nap("09:00", 20),
            SleepBlock::nap("13:00", 20),
            SleepBlock::nap("17:00", 20),
        ],
        is_premium: true,
    }
}

fn uberman() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "uberman".to_string(),
        name: "Uberman".to_string(),
        description: LocalizedText::new(
            indoc! {"
                Six 20 minute naps every four hours and no core sleep.
                Extremely rigid; a single missed nap derails adaptation."},
            "Dört saatte bir altı adet 20 dakikalık şekerleme, çekirdek uyku yok.",
        ),
        total_sleep_hours: 2.0,
        blocks: vec![
            SleepBlock::nap("00:00", 20),
            SleepBlock::nap("04:00", 20),
            SleepBlock::nap("08:00", 20),
            SleepBlock::nap("12:00", 20),
            SleepBlock::nap("16:00", 20),
            SleepBlock::nap("20:00", 20),
        ],
        is_premium: true,
    }
}

fn dymaxion() -> ScheduleTemplate {
    ScheduleTemplate {
        id: "dymaxion".to_string(),
        name: "Dymaxion".to_string(),
        description: LocalizedText::new(
            "Four 30 minute naps every six hours.",
            "Altı saatte bir dört adet 30 dakikalık şekerleme.",
        ),
        total_sleep_hours: 2.0,
        blocks: vec![
            SleepBlock::nap("00:00", 30),
            SleepBlock::nap("06:00", 30),
            SleepBlock::nap("12:00", 30),
            SleepBlock::nap("18:00", 30),
        ],
        is_premium: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, blocks: Vec<SleepBlock>) -> ScheduleTemplate {
        ScheduleTemplate {
            id: id.to_string(),
            name: id.to_string(),
            description: LocalizedText::new("", ""),
            total_sleep_hours: 0.0,
            blocks,
            is_premium: false,
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = ScheduleCatalog::builtin();
        let revalidated = ScheduleCatalog::new(catalog.templates().to_vec());
        assert!(revalidated.is_ok(), "{revalidated:?}");
        assert_eq!(catalog.version(), CATALOG_VERSION);
    }

    #[test]
    fn builtin_totals_match_blocks() {
        for t in ScheduleCatalog::builtin().iter() {
            let from_blocks = f64::from(t.scheduled_minutes()) / 60.0;
            assert!(
                (t.total_sleep_hours - from_blocks).abs() < 0.05,
                "{}: {} vs {}",
                t.id,
                t.total_sleep_hours,
                from_blocks
            );
            assert!(!t.description.en.is_empty());
            assert!(!t.description.tr.is_empty());
        }
    }

    #[test]
    fn builtin_has_free_and_premium_templates() {
        let catalog = ScheduleCatalog::builtin();
        assert!(catalog.get("monophasic").is_some_and(|t| !t.is_premium));
        assert!(catalog.get("uberman").is_some_and(|t| t.is_premium));
        assert!(catalog.free_templates().count() < catalog.len());
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn nap_count_ignores_core_blocks() {
        let catalog = ScheduleCatalog::builtin();
        assert_eq!(catalog.get("monophasic").map(|t| t.nap_count()), Some(0));
        assert_eq!(catalog.get("everyman").map(|t| t.nap_count()), Some(3));
        assert_eq!(catalog.get("uberman").map(|t| t.nap_count()), Some(6));
        assert_eq!(catalog.get("dual_core_1").map(|t| t.core_blocks().count()), Some(2));
    }

    #[test]
    fn block_start_parses_24h_time() {
        let block = SleepBlock::core("23:30", 90);
        assert_eq!(block.start_hour(), Some(23));
        assert_eq!(block.start_minutes(), Some(23 * 60 + 30));
        assert_eq!(SleepBlock::nap("25:00", 20).start(), None);
        assert_eq!(SleepBlock::nap("noon", 20).start(), None);
    }

    #[test]
    fn rejects_invalid_start_time() {
        let t = template("bad", vec![SleepBlock::core("24:10", 60)]);
        assert!(matches!(
            t.validate(0),
            Err(CatalogError::InvalidStartTime { block: 0, .. })
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        let t = template("bad", vec![SleepBlock::core("23:00", 0)]);
        assert!(matches!(t.validate(0), Err(CatalogError::ZeroDuration { .. })));
    }

    #[test]
    fn rejects_block_longer_than_a_day() {
        let whole_day = template("allday", vec![SleepBlock::core("00:00", 1440)]);
        assert!(whole_day.validate(0).is_ok());

        let t = template("forever", vec![SleepBlock::core("23:00", 1441)]);
        assert_eq!(
            t.validate(0),
            Err(CatalogError::DurationTooLong {
                schedule: "forever".into(),
                block: 0,
                minutes: 1441,
            })
        );
    }

    #[test]
    fn rejects_empty_blocks_and_id() {
        assert!(matches!(
            template("empty", vec![]).validate(0),
            Err(CatalogError::NoBlocks(_))
        ));
        assert!(matches!(
            template(" ", vec![SleepBlock::core("23:00", 60)]).validate(3),
            Err(CatalogError::EmptyId { index: 3 })
        ));
    }

    #[test]
    fn detects_overlap_across_midnight() {
        let t = template(
            "wrap",
            vec![SleepBlock::core("23:00", 120), SleepBlock::nap("00:30", 20)],
        );
        assert!(matches!(
            t.validate(0),
            Err(CatalogError::OverlappingBlocks { first: 0, second: 1, .. })
        ));
    }

    #[test]
    fn adjacent_blocks_do_not_overlap() {
        let t = template(
            "adjacent",
            vec![SleepBlock::core("22:00", 120), SleepBlock::nap("00:00", 20)],
        );
        assert!(t.validate(0).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let a = template("same", vec![SleepBlock::core("23:00", 60)]);
        let result = ScheduleCatalog::new(vec![a.clone(), a]);
        assert_eq!(result, Err(CatalogError::DuplicateId("same".into())));
    }

    #[test]
    fn toml_round_trip_preserves_order() {
        let catalog = ScheduleCatalog::builtin();
        let text = catalog.to_toml_string().unwrap();
        let parsed = ScheduleCatalog::from_toml_str(&text).unwrap();
        assert_eq!(parsed.ids(), catalog.ids());
    }

    #[test]
    fn parses_json_catalog() {
        let json = r#"{
            "schedules": [{
                "id": "nap-only",
                "name": "Nap Only",
                "description": {"en": "naps", "tr": "şekerlemeler"},
                "totalSleepHours": 1.0,
                "blocks": [
                    {"startTime": "12:00", "durationMinutes": 30, "isCore": false},
                    {"startTime": "18:00", "durationMinutes": 30, "isCore": false}
                ]
            }]
        }"#;
        let catalog = ScheduleCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.version(), CATALOG_VERSION);
        assert!(!catalog.templates()[0].is_premium);
    }

    #[test]
    fn malformed_catalog_is_parse_error() {
        let err = ScheduleCatalog::from_toml_str("schedules = 3").unwrap_err();
        assert!(matches!(err, CoreError::Catalog(CatalogError::ParseFailed(_))));
    }

    #[test]
    fn language_parse_and_lookup() {
        let text = LocalizedText::new("hello", "merhaba");
        assert_eq!(Language::parse("TR"), Some(Language::Tr));
        assert_eq!(Language::parse("de"), None);
        assert_eq!(text.get(Language::En), "hello");
        assert_eq!(text.get(Language::Tr), "merhaba");
    }
}
