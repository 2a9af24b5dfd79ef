//! Handler for the `/upload` endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/upload` | multipart file; optional `?case_id=` records evidence |
//!
//! The multipart body is read fully before the file is written and before
//! any metadata is persisted, so an aborted transfer leaves no evidence row
//! behind.

use axum::{
  Json,
  extract::{Multipart, Query, State},
};
use casefile_core::{evidence::NewEvidence, store::CaseStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// How much of a plain-text upload is kept as the stored excerpt.
const EXCERPT_CHARS: usize = 400;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
  pub case_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
  pub filename:     String,
  pub size:         usize,
  pub method:       String,
  pub pages:        u32,
  pub text_excerpt: String,
}

/// `POST /upload[?case_id=<id>]` — multipart body with one file field.
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<UploadParams>,
  mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // First field carrying a file wins; everything else is ignored.
  let mut upload = None;
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?
  {
    if field.file_name().is_some() {
      let filename = sanitize_filename(field.file_name().unwrap_or("upload.bin"));
      let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("truncated upload: {e}")))?;
      upload = Some((filename, data));
      break;
    }
  }

  let Some((filename, data)) = upload else {
    return Err(ApiError::Validation(
      "multipart body has no file field".into(),
    ));
  };

  let (method, pages, text_excerpt) = placeholder_extraction(&data);

  // The body is complete; now it may touch disk and the store.
  let file_id = Uuid::new_v4();
  let storage_path = state.upload_dir.join(format!("{file_id}-{filename}"));
  tokio::fs::create_dir_all(&state.upload_dir)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tokio::fs::write(&storage_path, &data)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if let Some(case_id) = params.case_id {
    state
      .store
      .get_case(case_id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or_else(|| ApiError::NotFound(format!("case {case_id} not found")))?;

    state
      .store
      .add_evidence(NewEvidence {
        case_id,
        filename: filename.clone(),
        storage_path: storage_path.to_string_lossy().into_owned(),
        method: method.clone(),
        pages,
        text_excerpt: text_excerpt.clone(),
      })
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(UploadResponse {
    filename,
    size: data.len(),
    method,
    pages,
    text_excerpt,
  }))
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
  let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
  if name.is_empty() {
    "upload.bin".to_string()
  } else {
    name.to_string()
  }
}

/// Placeholder for the real OCR pipeline: plain-text uploads contribute
/// their leading characters as the excerpt, anything binary contributes
/// nothing.
fn placeholder_extraction(data: &[u8]) -> (String, u32, String) {
  match std::str::from_utf8(data) {
    Ok(text) => (
      "text-excerpt".to_string(),
      1,
      text.chars().take(EXCERPT_CHARS).collect::<String>().trim().to_string(),
    ),
    Err(_) => ("placeholder".to_string(), 1, String::new()),
  }
}
