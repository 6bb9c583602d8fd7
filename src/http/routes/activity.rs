/// Account activity controller
///
/// Validates the account id and filter parameters, queries the store, and
/// returns the transaction list with the reference data the activity view
/// renders its filter controls from.
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::app_state::AppState;
use crate::domain::{
    month_options, type_options, ActivityCriteria, ActivityFilter, Transaction,
};
use crate::errors::ApiError;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub account_id: i64,
    pub transactions: Vec<Transaction>,
    pub months: Vec<String>,
    pub types: Vec<String>,
}

// GET /api/activity
pub async fn activity_get(
    criteria: web::Query<ActivityCriteria>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    render_activity(criteria.into_inner(), &state).await
}

// POST /api/activity (url-encoded form, same fields as the query string)
pub async fn activity_post(
    criteria: web::Form<ActivityCriteria>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    render_activity(criteria.into_inner(), &state).await
}

async fn render_activity(
    criteria: ActivityCriteria,
    state: &AppState,
) -> Result<HttpResponse, ApiError> {
    let account_id = parse_account_id(criteria.id.as_deref())?;
    let filter = ActivityFilter::from_criteria(&criteria)
        .map_err(|e| ApiError::BadRequest {
            reason: e.to_string(),
        })?;

    if !state
        .store
        .account_exists(account_id)
        .await
        .map_err(store_failure)?
    {
        return Err(ApiError::InvalidAccountId);
    }

    let transactions = state
        .store
        .list_activity(account_id, &filter)
        .await
        .map_err(store_failure)?;

    tracing::debug!(
        account_id,
        count = transactions.len(),
        ?filter,
        "activity listed"
    );

    Ok(HttpResponse::Ok().json(ActivityResponse {
        account_id,
        transactions,
        months: month_options(),
        types: type_options(),
    }))
}

/// Account id policy: absent/blank is missing; anything that is not a
/// positive integer is invalid. Unknown-but-numeric ids are rejected by the
/// caller after the store lookup, with the same invalid key.
fn parse_account_id(raw: Option<&str>) -> Result<i64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingAccountId)?;
    let id = raw
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidAccountId)?;
    if id <= 0 {
        return Err(ApiError::InvalidAccountId);
    }
    Ok(id)
}

fn store_failure(e: StoreError) -> ApiError {
    tracing::error!(error = %e, "store query failed");
    ApiError::Internal {
        reason: "store query failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{INVALID_ACCOUNT_ID, MISSING_ACCOUNT_ID};

    #[test]
    fn absent_or_blank_id_is_missing() {
        for raw in [None, Some(""), Some("   ")] {
            let err = parse_account_id(raw).unwrap_err();
            assert_eq!(err.message_key(), Some(MISSING_ACCOUNT_ID));
        }
    }

    #[test]
    fn non_numeric_id_is_invalid() {
        for raw in ["str", "12x", "1.5", "9999999999999999999999"] {
            let err = parse_account_id(Some(raw)).unwrap_err();
            assert_eq!(err.message_key(), Some(INVALID_ACCOUNT_ID));
        }
    }

    #[test]
    fn non_positive_id_is_invalid() {
        for raw in ["0", "-3"] {
            let err = parse_account_id(Some(raw)).unwrap_err();
            assert_eq!(err.message_key(), Some(INVALID_ACCOUNT_ID));
        }
    }

    #[test]
    fn positive_numeric_id_parses() {
        assert_eq!(parse_account_id(Some("12345")).unwrap(), 12345);
        assert_eq!(parse_account_id(Some(" 7 ")).unwrap(), 7);
    }
}
