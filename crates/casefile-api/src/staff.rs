//! Handlers for `/staff` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/staff` | All accounts; password hashes are never serialized |
//! | `POST` | `/staff` | Body: `{"email","password","role"?}`; 409 on duplicate email |
//!
//! There is no login endpoint; accounts exist so the password hash is in
//! place when one is added.

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use casefile_core::{
  staff::{NewStaff, Staff, StaffRole},
  store::CaseStore,
};
use rand_core::OsRng;
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub email:    String,
  pub password: String,
  #[serde(default)]
  pub role:     StaffRole,
}

/// `GET /staff`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Staff>>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let staff = state
    .store
    .list_staff()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(staff))
}

/// `POST /staff` — hashes the password and stores the account.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !body.email.contains('@') {
    return Err(ApiError::Validation(format!(
      "not an email address: {:?}",
      body.email
    )));
  }
  if body.password.len() < 8 {
    return Err(ApiError::Validation(
      "password must be at least 8 characters".into(),
    ));
  }

  if state
    .store
    .find_staff_by_email(&body.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some()
  {
    return Err(ApiError::Conflict(format!(
      "staff email already registered: {}",
      body.email
    )));
  }

  let salt = SaltString::generate(&mut OsRng);
  let password_hash = Argon2::default()
    .hash_password(body.password.as_bytes(), &salt)
    .map_err(|e| ApiError::Store(format!("password hashing failed: {e}").into()))?
    .to_string();

  let staff = state
    .store
    .create_staff(NewStaff {
      email: body.email,
      password_hash,
      role: body.role,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(staff)))
}
