//! Rule-based learning path generation.
//!
//! The "recommendation" is a filter-and-slice over one catalog category:
//! pick a category from keywords in the goal, drop resources above the
//! learner's level, keep the first three, then lay them out one per week.

use rand::Rng;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::data::Catalog;
use crate::error::CatalogError;
use crate::models::{LearningPath, Level, PathStep, Resource, UserProfile};

/// Maximum number of resources in a path.
pub const MAX_STEPS: usize = 3;

/// Hours assumed for a resource whose duration has no leading number.
pub const FALLBACK_HOURS: u64 = 10;

/// Smallest weekly commitment accepted, six minutes a week.
pub const MIN_HOURS_PER_WEEK: f64 = 0.1;

/// Weeks per month used when converting weekly hours into capacity.
const WEEKS_PER_MONTH: f64 = 4.0;

/// Maps goal keywords onto a catalog category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: &'static str,
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["web", "frontend", "backend"],
        category: "web-development",
    },
    CategoryRule {
        keywords: &["data", "ai", "machine"],
        category: "data-science",
    },
    CategoryRule {
        keywords: &["mobile", "app"],
        category: "mobile-development",
    },
];

/// Picks the category for a goal. Matching is case-sensitive.
pub fn infer_category(goal: &str) -> Option<&'static str> {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| goal.contains(k)))
        .map(|rule| rule.category)
}

/// Whether a learner at `current_level` should see `resource`.
///
/// Unrecognised learner levels see everything, like advanced learners.
pub fn level_allows(current_level: Option<Level>, resource: &Resource) -> bool {
    match current_level {
        Some(Level::Beginner) => resource.level == Level::Beginner,
        Some(Level::Intermediate) => resource.level != Level::Advanced,
        Some(Level::Advanced) | None => true,
    }
}

/// Leading integer of a duration string such as "8 hours".
///
/// Leading whitespace and a sign are accepted; `None` when no digits follow.
pub fn parse_hours(duration: &str) -> Option<i64> {
    let s = duration.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Total hours of a set of resources, using `FALLBACK_HOURS` for unparseable durations.
pub fn total_hours(resources: &[Resource]) -> i64 {
    resources
        .iter()
        .map(|r| parse_hours(&r.duration).unwrap_or(FALLBACK_HOURS as i64))
        .fold(0, i64::saturating_add)
}

/// `ceil(total_hours / (hours_per_week * 4))`, clamped to `0..=u64::MAX`.
///
/// `hours_per_week` must be positive; callers validate it first. A quotient
/// too large for `u64` (or infinite) saturates rather than wrapping to zero.
pub fn estimate_weeks(total_hours: i64, hours_per_week: f64) -> u64 {
    let weeks = (total_hours as f64 / (hours_per_week * WEEKS_PER_MONTH)).ceil();
    if weeks.is_nan() || weeks <= 0.0 {
        0
    } else if weeks >= u64::MAX as f64 {
        u64::MAX
    } else {
        weeks as u64
    }
}

fn focus_for(week: usize, title: &str) -> String {
    let head = match title.split_once(':') {
        Some((left, _)) if !left.is_empty() => left,
        _ => title,
    };
    format!("Week {}: Focus on {}", week, head)
}

fn milestones_for(resource: &Resource) -> Vec<String> {
    let first_tag = resource.tags.first().map(String::as_str).unwrap_or_default();
    vec![
        format!("Complete {}", resource.title),
        "Build a small project using the concepts".to_string(),
        format!("Join a community discussion about {}", first_tag),
    ]
}

/// Renders a number the way a person would write it: `10`, not `10.0`.
fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 && hours.abs() < 1e15 {
        format!("{}", hours as i64)
    } else {
        hours.to_string()
    }
}

/// Builds the path for `profile` from `catalog` without any delay.
///
/// # Errors
///
/// Returns `CatalogError::InvalidRequest` when `timeAvailable` is given but
/// not finite or below `MIN_HOURS_PER_WEEK`. A missing `timeAvailable` is
/// accepted and leaves `estimated_weeks` unset.
pub fn build_path(catalog: &Catalog, profile: &UserProfile) -> Result<LearningPath, CatalogError> {
    let hours_per_week = match profile.time_available {
        None => None,
        Some(h) if h.is_finite() && h >= MIN_HOURS_PER_WEEK => Some(h),
        Some(_) => {
            return Err(CatalogError::InvalidRequest(format!(
                "timeAvailable must be at least {} hours per week",
                MIN_HOURS_PER_WEEK
            )))
        }
    };

    let current_level = Level::parse(&profile.current_level);
    let resources: Vec<Resource> = match infer_category(&profile.goal) {
        Some(category) => catalog
            .list_by_category(category)
            .iter()
            .filter(|r| level_allows(current_level, r))
            .take(MAX_STEPS)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let total = total_hours(&resources);
    let estimated_weeks = hours_per_week.map(|h| estimate_weeks(total, h));

    let path = resources
        .iter()
        .enumerate()
        .map(|(i, resource)| PathStep {
            week: i + 1,
            resource: resource.clone(),
            focus: focus_for(i + 1, &resource.title),
            milestones: milestones_for(resource),
        })
        .collect();

    let insights = vec![
        format!(
            "Based on your {} level, we recommend starting with fundamentals",
            profile.current_level
        ),
        match (hours_per_week, estimated_weeks) {
            (Some(h), Some(weeks)) => format!(
                "With {} hours/week, you can complete this path in {} weeks",
                format_hours(h),
                weeks
            ),
            _ => "Tell us your hours/week to get a completion estimate".to_string(),
        },
        format!(
            "Your interest in {} aligns well with these resources",
            profile.interests
        ),
    ];

    Ok(LearningPath {
        path,
        estimated_weeks,
        resources,
        insights,
    })
}

/// Generates learning paths with a simulated processing delay.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    latency_ms: Range<u64>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, latency_ms: Range<u64>) -> Self {
        Self {
            catalog,
            latency_ms,
        }
    }

    /// Waits a random time within the latency range, then builds the path.
    ///
    /// The wait is an async sleep so other requests keep being served.
    pub async fn generate_path(&self, profile: &UserProfile) -> Result<LearningPath, CatalogError> {
        if !self.latency_ms.is_empty() {
            let delay = rand::thread_rng().gen_range(self.latency_ms.clone());
            debug!("Simulating {}ms of processing", delay);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        build_path(&self.catalog, profile)
    }
}
