//! Data models for catalog entries, user profiles and generated paths.

use serde::{Deserialize, Deserializer, Serialize};

/// Proficiency tier of a resource or a learner.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// Parses the wire name of a level. Anything else yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Level::Beginner),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }
}

/// A single catalogued educational item.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Resource {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub platform: String,
    /// Free text such as "8 hours"; only the leading integer is used.
    pub duration: String,
    pub level: Level,
    pub url: String,
    pub tags: Vec<String>,
}

/// Learner profile posted to `/api/generate-path`.
///
/// Missing text fields default to empty strings. `timeAvailable` may be a
/// number or a numeric string, as HTML forms tend to send the latter.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub current_level: String,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub time_available: Option<f64>,
    #[serde(default)]
    pub interests: String,
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// One week of a learning path.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PathStep {
    pub week: usize,
    pub resource: Resource,
    pub focus: String,
    pub milestones: Vec<String>,
}

/// Generated learning path returned to the client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub path: Vec<PathStep>,
    /// `None` (serialized as `null`) when no weekly hours were given.
    pub estimated_weeks: Option<u64>,
    pub resources: Vec<Resource>,
    pub insights: Vec<String>,
}

/// Summary statistics for the landing page.
///
/// Only `total_resources` is computed; the rest are fixed showcase values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_resources: usize,
    pub average_completion_time: String,
    pub most_popular_field: String,
    pub success_rate: String,
    pub active_users: u32,
}

impl Stats {
    pub fn with_total(total_resources: usize) -> Self {
        Self {
            total_resources,
            average_completion_time: "8 weeks".into(),
            most_popular_field: "Web Development".into(),
            success_rate: "87%".into(),
            active_users: 1243,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_uses_type_key() {
        let json = r#"{
            "id": 9, "title": "Rust Book", "type": "book", "platform": "No Starch",
            "duration": "20 hours", "level": "intermediate",
            "url": "https://doc.rust-lang.org/book/", "tags": ["rust"]
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.kind, "book");
        assert_eq!(resource.level, Level::Intermediate);

        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(back["type"], "book");
        assert_eq!(back["level"], "intermediate");
    }

    #[test]
    fn test_profile_accepts_numeric_string() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"goal":"web","currentLevel":"beginner","timeAvailable":"7.5"}"#)
                .unwrap();
        assert_eq!(profile.time_available, Some(7.5));
        assert_eq!(profile.interests, "");
    }

    #[test]
    fn test_profile_missing_fields_default() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.goal, "");
        assert_eq!(profile.current_level, "");
        assert_eq!(profile.time_available, None);
    }

    #[test]
    fn test_profile_rejects_non_numeric_time() {
        let result = serde_json::from_str::<UserProfile>(r#"{"timeAvailable":"lots"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("advanced"), Some(Level::Advanced));
        assert_eq!(Level::parse("Advanced"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let value = serde_json::to_value(Stats::with_total(8)).unwrap();
        assert_eq!(value["totalResources"], 8);
        assert_eq!(value["averageCompletionTime"], "8 weeks");
        assert_eq!(value["mostPopularField"], "Web Development");
        assert_eq!(value["successRate"], "87%");
        assert_eq!(value["activeUsers"], 1243);
    }
}
