use axum::{extract::FromRequestParts, http::request::Parts};
use bootcamp_core::domain::{
    common::entities::app_errors::CoreError, query::value_objects::RawQuery,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Raw query-string pairs in request order, repeated keys included.
///
/// ```rust,ignore
/// async fn handler(AdvancedQuery(query): AdvancedQuery) -> Result<Response<T>, ApiError> {
///     // query: Vec<(String, String)>
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdvancedQuery(pub RawQuery);

impl<S> FromRequestParts<S> for AdvancedQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let pairs: RawQuery = serde_urlencoded::from_str(query_string)
            .map_err(|e| ApiError::from(CoreError::QueryTranslation(e.to_string())))?;

        Ok(AdvancedQuery(pairs))
    }
}

/// Directives accepted by every listing. Any other key filters on the
/// field of that name, with `field[lt|lte|gt|gte|eq|in]=value` for
/// comparisons.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdvancedQueryParams {
    /// Comma separated fields to include, or `-field` entries to exclude.
    pub select: Option<String>,
    /// Comma separated sort fields, `-` prefix for descending. Defaults to `-createdAt`.
    pub sort: Option<String>,
    /// 1-based page number.
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewQueryParams {
    pub select: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Adds the rating distribution of every matching review.
    pub percents: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<AdvancedQuery, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        AdvancedQuery::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_keeps_order_and_repeated_keys() {
        let uri = "/courses?cost%5Bgte%5D=100&category=design&category=finance";
        let AdvancedQuery(query) = extract(uri).await.unwrap();
        assert_eq!(
            query,
            vec![
                ("cost[gte]".to_string(), "100".to_string()),
                ("category".to_string(), "design".to_string()),
                ("category".to_string(), "finance".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_query_is_empty() {
        let AdvancedQuery(query) = extract("/courses").await.unwrap();
        assert!(query.is_empty());
    }
}
