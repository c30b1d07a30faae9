use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::data::DEFAULT_CATEGORY;
use crate::error::CatalogError;
use crate::models::{LearningPath, Resource, Stats, UserProfile};
use crate::state::AppState;

/// Query parameters for the resource listing.
#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    #[serde(default, deserialize_with = "empty_string_as_none_str")]
    pub category: Option<String>,
}

fn empty_string_as_none_str<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Ok(Some(s)),
    }
}

/// GET /api/resources - Resources of one category, `web-development` by default.
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Json<Vec<Resource>> {
    let category = query.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
    let resources = state.catalog.list_by_category(category);
    if resources.is_empty() {
        warn!("No resources for category '{}'", category);
    }
    Json(resources.to_vec())
}

/// POST /api/generate-path - Mock personalised learning path.
pub async fn generate_path(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<LearningPath>, CatalogError> {
    let Json(profile) = payload.map_err(|rejection| {
        warn!("Rejected profile body: {}", rejection.body_text());
        CatalogError::InvalidRequest(rejection.body_text())
    })?;

    let path = state.recommender.generate_path(&profile).await?;
    info!(
        "Generated {}-step path ({:?} weeks) for goal {:?}",
        path.path.len(),
        path.estimated_weeks,
        profile.goal
    );
    Ok(Json(path))
}

/// GET /api/stats - Catalog size plus showcase numbers.
pub async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(Stats::with_total(state.catalog.total_resources()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Catalog;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Catalog::builtin(), 0..0))
    }

    #[tokio::test]
    async fn test_list_defaults_to_web_development() {
        let Json(resources) = list_resources(
            State(state()),
            Query(ResourceQuery { category: None }),
        )
        .await;
        let ids: Vec<u32> = resources.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_list_unknown_category() {
        let Json(resources) = list_resources(
            State(state()),
            Query(ResourceQuery {
                category: Some("underwater-basket-weaving".into()),
            }),
        )
        .await;
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_generate_path_handler() {
        let profile = UserProfile {
            goal: "data".into(),
            current_level: "beginner".into(),
            time_available: Some(5.0),
            interests: "stats".into(),
        };
        let Json(path) = generate_path(State(state()), Ok(Json(profile))).await.unwrap();
        assert_eq!(path.resources.len(), 1);
        assert_eq!(path.resources[0].id, 4);
        // 35 hours at 20 hours a month.
        assert_eq!(path.estimated_weeks, Some(2));
    }

    #[tokio::test]
    async fn test_generate_path_rejects_zero_time() {
        let profile = UserProfile {
            goal: "web".into(),
            time_available: Some(0.0),
            ..UserProfile::default()
        };
        let result = generate_path(State(state()), Ok(Json(profile))).await;
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_empty_category_is_none() {
            let query: ResourceQuery = serde_json::from_str(r#"{"category": ""}"#).unwrap();
            assert!(query.category.is_none());
        }
    }
}
