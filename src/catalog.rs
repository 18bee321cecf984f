//! Static paint catalog.
//!
//! Reference data only: the catalog resolves the `paint_id` references
//! returned by the remote favorites store to full [`Paint`] records.
//! Nothing in this core ever mutates a catalog entry.

use crate::model::{Hsl, Paint, Rgb};
use std::collections::HashMap;

/// Immutable `paint_id -> Paint` index.
pub struct PaintCatalog {
    by_id: HashMap<String, Paint>,
}

impl PaintCatalog {
    /// Build a catalog from the given paints. Later duplicates of an id
    /// win, matching "last shipped catalog row is current".
    pub fn new(paints: impl IntoIterator<Item = Paint>) -> Self {
        let by_id = paints.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { by_id }
    }

    /// The built-in reference swatches shipped with the app.
    pub fn builtin() -> Self {
        Self::new([
            paint(
                "bm-2000-70",
                "Benjamin Moore",
                "Voile Pink",
                "2000-70",
                (252, 226, 230),
                (351.0, 81.3, 93.7),
                "https://www.benjaminmoore.com/en-ca/paint-colours/colour/2000-70/voile-pink",
            ),
            paint(
                "ppg1215-6",
                "PPG",
                "Grass Daisy",
                "PPG1215-6",
                (206, 176, 42),
                (49.0, 66.1, 48.6),
                "https://www.ppgpaints.com/color/color-families/greens/grass-daisy",
            ),
            paint(
                "ppg1065-2",
                "PPG",
                "Fiesta",
                "PPG1065-2",
                (237, 216, 210),
                (13.0, 42.9, 87.6),
                "https://www.ppgpaints.com/color/color-families/oranges/fiesta",
            ),
            paint(
                "de5921",
                "Dunn Edwards",
                "Your Shadow",
                "DE5921",
                (120, 126, 147),
                (227.0, 11.1, 52.4),
                "https://www.dunnedwards.com/colors/browser/de5921",
            ),
        ])
    }

    /// Resolve a paint reference. `None` means the catalog shipped with
    /// this build does not know the id.
    pub fn get(&self, paint_id: &str) -> Option<&Paint> {
        self.by_id.get(paint_id)
    }

    /// All paints, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Paint> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn paint(
    id: &str,
    brand: &str,
    name: &str,
    code: &str,
    (r, g, b): (u8, u8, u8),
    (h, s, l): (f32, f32, f32),
    url: &str,
) -> Paint {
    Paint {
        id: id.into(),
        brand: brand.into(),
        name: name.into(),
        code: code.into(),
        rgb: Rgb { r, g, b },
        hsl: Hsl { h, s, l },
        url: url.into(),
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_known_ids() {
        let catalog = PaintCatalog::builtin();
        let voile = catalog.get("bm-2000-70").unwrap();
        assert_eq!(voile.brand, "Benjamin Moore");
        assert_eq!(voile.rgb, Rgb { r: 252, g: 226, b: 230 });
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = PaintCatalog::builtin();
        assert!(catalog.get("sherwin-7006").is_none());
    }

    #[test]
    fn later_duplicate_id_wins() {
        let mut first = PaintCatalog::builtin().get("de5921").unwrap().clone();
        first.name = "Old Name".into();
        let mut second = first.clone();
        second.name = "New Name".into();

        let catalog = PaintCatalog::new([first, second]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("de5921").unwrap().name, "New Name");
    }
}
