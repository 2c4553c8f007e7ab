//! Snippet rating upload route.
//!
//! `POST /rate_snippet` accepts a multipart form with a boolean `good`
//! field (optional, default false) and a binary `image` field, then
//! persists the image under its content hash via the image store.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use super::error::AppError;
use super::AppContext;
use crate::error::Error;
use crate::images::Rating;

/// Response body for a stored rating.
#[derive(Debug, Serialize)]
pub struct RateSnippetResponse {
    pub message: String,
    pub image_size: usize,
}

/// POST /rate_snippet
///
/// Reads the image field fully into memory, rejects payloads over the
/// configured limit, and stores the rest. The response reports the raw
/// upload size and never echoes the file path.
pub async fn rate_snippet(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<RateSnippetResponse>, AppError> {
    let mut good = false;
    let mut image: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Multipart(e.to_string()))?
    {
        // Copy the name out before the field is consumed below.
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("good") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::Multipart(e.to_string()))?;
                good = parse_bool(&text).ok_or_else(|| {
                    Error::Validation(format!("Invalid boolean for 'good': {text}"))
                })?;
            }
            Some("image") => {
                image = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| Error::Multipart(e.to_string()))?,
                );
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let data =
        image.ok_or_else(|| Error::Validation("Missing required field 'image'".to_string()))?;
    let image_size = data.len();

    let limit = ctx.config.storage.max_upload_bytes;
    if image_size as u64 > limit {
        tracing::warn!(size = image_size, limit, "Rejecting oversized upload");
        return Err(Error::PayloadTooLarge { limit }.into());
    }

    let rating = Rating::from_flag(good);
    let stored = ctx.store.store(&data, rating)?;

    tracing::debug!(
        digest = %stored.digest,
        rating = %rating,
        size = image_size,
        "Stored rated snippet"
    );

    Ok(Json(RateSnippetResponse {
        message: "Thank you for rating the snippet!".to_string(),
        image_size,
    }))
}

/// Parse the boolean text of the `good` form field.
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_truthy() {
        for s in ["true", "TRUE", "1", "yes", "on", " True "] {
            assert_eq!(parse_bool(s), Some(true), "{s:?}");
        }
    }

    #[test]
    fn parse_bool_falsy() {
        for s in ["false", "FALSE", "0", "no", "off"] {
            assert_eq!(parse_bool(s), Some(false), "{s:?}");
        }
    }

    #[test]
    fn parse_bool_invalid() {
        for s in ["", "maybe", "2", "goodness"] {
            assert_eq!(parse_bool(s), None, "{s:?}");
        }
    }
}
