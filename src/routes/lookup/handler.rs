use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use super::model::{CITIES, JOB_CATEGORIES, JOB_TYPES, LookupItem};
use crate::utils::success_to_api_response;

#[derive(Serialize)]
pub struct LookupsResponse {
    pub categories: &'static [LookupItem],
    pub job_types: &'static [LookupItem],
    pub cities: &'static [LookupItem],
}

/// Static taxonomies, no storage round trip.
pub async fn get_lookups() -> impl IntoResponse {
    (
        StatusCode::OK,
        success_to_api_response(LookupsResponse {
            categories: JOB_CATEGORIES,
            job_types: JOB_TYPES,
            cities: CITIES,
        }),
    )
}
