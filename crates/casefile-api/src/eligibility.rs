//! Handler for the `/eligibility` endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/eligibility` | Body: `{"emigration_year":1936,"naturalization_year":1938,"case_id":"..."}`, all optional |

use axum::{Json, extract::State};
use casefile_core::{
  case::{CaseUpdate, ConfidenceBand},
  screening::{AncestorYears, Assessment, assess},
  store::CaseStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct EligibilityBody {
  pub emigration_year:     Option<i32>,
  pub naturalization_year: Option<i32>,
  pub case_id:             Option<Uuid>,
}

/// `POST /eligibility`
///
/// Runs the screening rule table and returns the verdict / confidence /
/// risks triple. With a `case_id`, the verdict and its confidence band are
/// written back onto the case.
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<EligibilityBody>,
) -> Result<Json<Assessment>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let years = AncestorYears {
    emigration_year:     body.emigration_year,
    naturalization_year: body.naturalization_year,
  };
  let assessment = assess(&years);

  if let Some(case_id) = body.case_id {
    state
      .store
      .get_case(case_id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or_else(|| ApiError::NotFound(format!("case {case_id} not found")))?;

    state
      .store
      .update_case(case_id, CaseUpdate {
        verdict: Some(assessment.verdict),
        confidence: Some(ConfidenceBand::from_score(assessment.confidence)),
        ..Default::default()
      })
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(assessment))
}
