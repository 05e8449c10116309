use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use vocab_model::CefrLevel;

const BUILTIN_DEFAULT: &str = include_str!("../../../profiles/default.json");
const BUILTIN_FULL: &str = include_str!("../../../profiles/full.json");

const PROFILE_KEYS: &[&str] = &[
    "schema_version",
    "name",
    "description",
    "levels",
    "min_unit_terms",
    "unit_minutes",
    "review_days",
    "fallback_focus",
    "core_skills",
];

const DEFAULT_LEVELS: [CefrLevel; 4] = [CefrLevel::A1, CefrLevel::A2, CefrLevel::B1, CefrLevel::B2];
/// One study day
const MAX_UNIT_MINUTES: u32 = 24 * 60;
const DEFAULT_REVIEW_DAYS: [u32; 4] = [1, 3, 7, 14];
const DEFAULT_CORE_SKILLS: [&str; 6] = [
    "essential_vocabulary",
    "basic_grammar",
    "listening_comprehension",
    "speaking_practice",
    "reading_skills",
    "writing_ability",
];

/// Scheduler settings: which levels to plan, unit sizing, review offsets,
/// and the core skill list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressionProfile {
    name: String,
    description: Option<String>,
    levels: Vec<CefrLevel>,
    min_unit_terms: usize,
    unit_minutes: u32,
    review_days: Vec<u32>,
    fallback_focus: String,
    core_skills: Vec<String>,
}

impl Default for ProgressionProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: None,
            levels: DEFAULT_LEVELS.to_vec(),
            min_unit_terms: 3,
            unit_minutes: 30,
            review_days: DEFAULT_REVIEW_DAYS.to_vec(),
            fallback_focus: "general".to_string(),
            core_skills: DEFAULT_CORE_SKILLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    schema_version: Option<u32>,
    name: Option<String>,
    description: Option<String>,
    levels: Option<Vec<String>>,
    min_unit_terms: Option<usize>,
    unit_minutes: Option<u32>,
    review_days: Option<Vec<u32>>,
    fallback_focus: Option<String>,
    core_skills: Option<Vec<String>>,
}

impl ProgressionProfile {
    /// Names accepted by [`ProgressionProfile::builtin`]
    pub const BUILTIN_NAMES: &'static [&'static str] = &["default", "full"];

    pub fn builtin(name: &str) -> Option<Result<Self>> {
        match name {
            "default" => Some(Self::from_bytes("default", BUILTIN_DEFAULT.as_bytes(), None)),
            "full" => Some(Self::from_bytes(
                "full",
                BUILTIN_FULL.as_bytes(),
                Some("default"),
            )),
            _ => None,
        }
    }

    /// Builtin profile by name, otherwise a profile file at that path
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        match Self::builtin(name_or_path) {
            Some(profile) => profile,
            None => {
                let path = Path::new(name_or_path);
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(name_or_path);
                Self::from_file(name, path)
            }
        }
    }

    /// Load a JSON or TOML profile layered over the default profile
    pub fn from_file(profile_name: &str, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        Self::from_bytes(profile_name, &bytes, Some("default"))
    }

    pub fn from_bytes(profile_name: &str, bytes: &[u8], base: Option<&str>) -> Result<Self> {
        let raw = parse_raw(bytes).with_context(|| {
            format!("Profile '{profile_name}' is not valid JSON/TOML configuration")
        })?;
        let merged_raw = if let Some(base_name) = base {
            let base_raw = builtin_raw(base_name)?;
            merge_raw_profiles(base_raw, raw)
        } else {
            raw
        };
        Self::from_raw(merged_raw, profile_name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Levels to schedule, ascending
    #[must_use]
    pub fn levels(&self) -> &[CefrLevel] {
        &self.levels
    }

    /// Smallest focus group that becomes a unit
    #[must_use]
    pub const fn min_unit_terms(&self) -> usize {
        self.min_unit_terms
    }

    /// Estimated study time per unit, minutes
    #[must_use]
    pub const fn unit_minutes(&self) -> u32 {
        self.unit_minutes
    }

    /// Review offsets in days from the unit start
    #[must_use]
    pub fn review_days(&self) -> &[u32] {
        &self.review_days
    }

    /// Focus area for records without tags
    #[must_use]
    pub fn fallback_focus(&self) -> &str {
        &self.fallback_focus
    }

    #[must_use]
    pub fn core_skills(&self) -> &[String] {
        &self.core_skills
    }

    /// Builder: override scheduled levels (sorted, deduplicated)
    #[must_use]
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = CefrLevel>) -> Self {
        let mut levels: Vec<CefrLevel> = levels.into_iter().collect();
        levels.sort();
        levels.dedup();
        self.levels = levels;
        self
    }

    fn from_raw(raw: RawProfile, fallback_name: &str) -> Result<Self> {
        if let Some(schema_version) = raw.schema_version {
            if schema_version != 1 {
                return Err(anyhow!(
                    "profile.schema_version {schema_version} is not supported (expected 1)"
                ));
            }
        }

        let defaults = Self::default();
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());

        let levels = match raw.levels {
            Some(levels) => parse_levels(&levels)?,
            None => defaults.levels,
        };

        let profile = Self {
            name,
            description: raw.description,
            levels,
            min_unit_terms: raw.min_unit_terms.unwrap_or(defaults.min_unit_terms),
            unit_minutes: raw.unit_minutes.unwrap_or(defaults.unit_minutes),
            review_days: raw.review_days.unwrap_or(defaults.review_days),
            fallback_focus: raw.fallback_focus.unwrap_or(defaults.fallback_focus),
            core_skills: raw.core_skills.unwrap_or(defaults.core_skills),
        };

        profile
            .validate()
            .with_context(|| format!("Invalid progression profile '{}'", profile.name))?;
        Ok(profile)
    }

    fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(anyhow!("profile.levels must not be empty"));
        }
        if self.levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(anyhow!(
                "profile.levels must be strictly ascending, got {:?}",
                self.levels.iter().map(|l| l.as_str()).collect::<Vec<_>>()
            ));
        }
        if self.min_unit_terms == 0 {
            return Err(anyhow!("profile.min_unit_terms must be >= 1"));
        }
        if self.unit_minutes == 0 || self.unit_minutes > MAX_UNIT_MINUTES {
            return Err(anyhow!(
                "profile.unit_minutes must be between 1 and {MAX_UNIT_MINUTES}, got {}",
                self.unit_minutes
            ));
        }
        if self.review_days.is_empty() {
            return Err(anyhow!("profile.review_days must not be empty"));
        }
        if self.review_days[0] == 0 || self.review_days.windows(2).any(|w| w[0] >= w[1]) {
            return Err(anyhow!(
                "profile.review_days must be strictly ascending day offsets >= 1, got {:?}",
                self.review_days
            ));
        }
        if self.fallback_focus.trim().is_empty() {
            return Err(anyhow!("profile.fallback_focus must not be empty"));
        }
        if self.core_skills.is_empty() {
            return Err(anyhow!("profile.core_skills must not be empty"));
        }
        Ok(())
    }
}

fn parse_levels(raw: &[String]) -> Result<Vec<CefrLevel>> {
    raw.iter()
        .enumerate()
        .map(|(i, level)| {
            level
                .parse::<CefrLevel>()
                .map_err(|err| anyhow!("profile.levels[{i}]: {err}"))
        })
        .collect()
}

fn builtin_raw(name: &str) -> Result<RawProfile> {
    match name {
        "default" => parse_raw(BUILTIN_DEFAULT.as_bytes()),
        "full" => parse_raw(BUILTIN_FULL.as_bytes()),
        other => Err(anyhow!("Base profile '{other}' not bundled")),
    }
}

fn merge_raw_profiles(base: RawProfile, overlay: RawProfile) -> RawProfile {
    RawProfile {
        schema_version: overlay.schema_version.or(base.schema_version),
        name: overlay.name,
        description: overlay.description,
        levels: overlay.levels.or(base.levels),
        min_unit_terms: overlay.min_unit_terms.or(base.min_unit_terms),
        unit_minutes: overlay.unit_minutes.or(base.unit_minutes),
        review_days: overlay.review_days.or(base.review_days),
        fallback_focus: overlay.fallback_focus.or(base.fallback_focus),
        core_skills: overlay.core_skills.or(base.core_skills),
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawProfile> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!(
                    "Profile is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                )
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML profile to JSON: {err}"))?
        }
    };

    validate_profile_value(&value)?;
    serde_json::from_value(value).map_err(|err| anyhow!("Profile parse error: {err}"))
}

fn validate_profile_value(value: &serde_json::Value) -> Result<()> {
    let Some(map) = value.as_object() else {
        return Err(anyhow!("profile must be an object"));
    };
    let unknown: Vec<String> = map
        .keys()
        .filter(|key| !PROFILE_KEYS.contains(&key.as_str()))
        .map(|key| format!("profile.{key}"))
        .collect();
    if !unknown.is_empty() {
        return Err(anyhow!("Unknown profile fields: {}", unknown.join(", ")));
    }
    Ok(())
}
