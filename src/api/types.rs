//! Wire types for the remote API.
//!
//! Field names follow the service's JSON (camelCase); everything else in
//! the crate uses the domain types in [`crate::model`].

use crate::model::{PaintColor, Rgb, Token, User};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: Token,
    pub user: User,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
}

/// One element of `GET /favorites`: a reference to a catalog paint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FavoriteRef {
    #[serde(rename = "paintId")]
    pub paint_id: String,
    /// Swatch color, carried for display before catalog resolution.
    #[allow(dead_code)]
    pub rgb: Rgb,
}

/// Body of `POST /favorites`.
#[derive(Debug, Serialize)]
pub(crate) struct FavoriteAdd<'a> {
    #[serde(rename = "paintId")]
    pub paint_id: &'a str,
}

/// One element of `GET /history`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistorySummary {
    #[serde(rename = "baseImageId")]
    pub base_image_id: String,
    pub colors: Vec<PaintColor>,
}

/// Response of `GET /history/{baseImageId}/images`.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryImages {
    /// Content id of the base photo.
    #[serde(rename = "originalImage")]
    pub original_image: String,
    /// Rendered variants, in render order.
    #[serde(rename = "processedImages")]
    pub processed_images: Vec<ProcessedImage>,
}

/// One rendered variant reference.
#[derive(Debug, Deserialize)]
pub(crate) struct ProcessedImage {
    #[serde(rename = "processedImageHash")]
    pub processed_image_hash: String,
}

/// Body of `POST /reviews/{paintId}`.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewCreate<'a> {
    pub text: &'a str,
}
