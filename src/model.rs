//! Domain types shared across the client core.
//!
//! Everything here is plain data. Paints are immutable reference data
//! resolved from the catalog; history entries are immutable once cached
//! and are replaced wholesale, never mutated in place.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque bearer token for the current session.
///
/// Owned by `AuthSession`; valid from login until logout or auth failure.
/// The `Debug` impl is redacted so the token never leaks into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub(crate) String);

impl Token {
    /// The raw token value, for the `Authorization` header.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(..)")
    }
}

/// The authenticated user, replaced wholesale on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
}

/// An RGB triple (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An HSL triple (hue in degrees, saturation/lightness in percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Immutable catalog entry for one paint color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// Catalog identifier (stable across sessions).
    pub id: String,
    /// Manufacturer, e.g. "Benjamin Moore".
    pub brand: String,
    /// Marketing name, e.g. "Voile Pink".
    pub name: String,
    /// Manufacturer's color code, e.g. "2000-70".
    pub code: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    /// Product page on the manufacturer's site.
    pub url: String,
}

/// One color a history entry was rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintColor {
    #[serde(rename = "paintId")]
    pub paint_id: String,
    pub rgb: Rgb,
}

/// Content revision of a history entry, derived from its color list.
///
/// Lets the incremental refresh detect a remote entry that reappeared
/// with different colors and replace the cached copy, instead of
/// treating presence-by-id as proof of freshness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// Hash the ordered color list into a revision marker.
    pub fn of_colors(colors: &[PaintColor]) -> Self {
        let mut hasher = Sha256::new();
        for color in colors {
            hasher.update(color.paint_id.as_bytes());
            hasher.update([color.rgb.r, color.rgb.g, color.rgb.b]);
        }
        Self(hex::encode(hasher.finalize()))
    }
}

/// One cached history entry: a base photo plus its rendered variants.
///
/// Uniquely keyed by `base_image_id`. Immutable once cached; a new
/// fetch replaces the whole entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Content hash of the base photo, as issued by the remote store.
    pub base_image_id: String,
    /// Revision marker for staleness detection.
    pub revision: Revision,
    /// Raw bytes of the base photo.
    pub base_image: Vec<u8>,
    /// Identifiers of the rendered variants, in remote order. Bytes are
    /// fetched on demand via `HistoryCache::rendered_images`.
    pub rendered_image_ids: Vec<String>,
    /// The colors the variants were rendered with, in the same order.
    pub colors: Vec<PaintColor>,
}

/// A review of a paint, read/written via `ReviewService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "reviewerFirst")]
    pub reviewer_first: String,
    #[serde(rename = "reviewerLast")]
    pub reviewer_last: String,
    pub date: chrono::NaiveDate,
    pub text: String,
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn color(paint_id: &str, r: u8, g: u8, b: u8) -> PaintColor {
        PaintColor {
            paint_id: paint_id.into(),
            rgb: Rgb { r, g, b },
        }
    }

    #[test]
    fn revision_is_deterministic() {
        let colors = vec![color("bm-2000-70", 252, 226, 230)];
        assert_eq!(Revision::of_colors(&colors), Revision::of_colors(&colors));
    }

    #[test]
    fn revision_tracks_color_changes() {
        let green = vec![color("p1", 0, 255, 0)];
        let blue = vec![color("p1", 0, 0, 255)];
        assert_ne!(Revision::of_colors(&green), Revision::of_colors(&blue));
    }

    #[test]
    fn revision_is_order_sensitive() {
        let ab = vec![color("a", 1, 2, 3), color("b", 4, 5, 6)];
        let ba = vec![color("b", 4, 5, 6), color("a", 1, 2, 3)];
        assert_ne!(Revision::of_colors(&ab), Revision::of_colors(&ba));
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = Token("super-secret-value".into());
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret-value"));
    }

    #[test]
    fn paint_color_uses_wire_field_names() {
        let json = serde_json::to_string(&color("ppg1215-6", 206, 176, 42)).unwrap();
        assert!(json.contains("\"paintId\""));

        let parsed: PaintColor =
            serde_json::from_str(r#"{"paintId":"x","rgb":{"r":1,"g":2,"b":3}}"#).unwrap();
        assert_eq!(parsed.paint_id, "x");
    }

    #[test]
    fn review_date_round_trips() {
        let json = r#"{"reviewerFirst":"John","reviewerLast":"Doe","date":"2024-07-17","text":"ayo this slaps"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.date.to_string(), "2024-07-17");
        let back = serde_json::to_string(&review).unwrap();
        assert!(back.contains("2024-07-17"));
    }
}
