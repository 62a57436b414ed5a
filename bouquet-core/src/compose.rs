//! Composition generation: one arrangement per style preset from a
//! single selection.

use crate::placement::{self, PlacedEntity, StylePreset};
use crate::selection::Selection;
use crate::types::TimestampMs;
use log::debug;
use rand::Rng;

/// At most this many styles are used per generation call, even if the
/// preset list is longer.
const MAX_STYLES: usize = 4;

/// One generated arrangement. Immutable once produced.
///
/// `entities` is already in paint order; `price` is computed from the
/// originating selection and is identical across every composition of
/// the same generation call.
#[derive(Clone, Debug)]
pub struct Composition {
    pub id: String,
    pub style: StylePreset,
    pub entities: Vec<PlacedEntity>,
    pub price: u32,
}

/// Builds one [`Composition`] per style preset from the selection.
///
/// The selection is flattened once into per-unit instances; each style
/// then runs [`placement::place_instances`] over the same instance
/// list. The price is computed once from the original selection (not
/// per instance), so it is invariant across styles. Ids combine the
/// caller-supplied generation timestamp with the style index.
///
/// An empty selection yields an empty list; the caller is expected to
/// treat that as a no-op and keep any previously generated
/// compositions.
///
/// ### Parameters
/// - `selection` - The (already pruned) selection; read-only.
/// - `styles` - Ordered preset list, capped at four.
/// - `timestamp_ms` - Generation timestamp embedded into ids.
/// - `rng` - Explicit random source shared across all styles.
///
/// ### Returns
/// Compositions in style order; the first is conventionally the
/// active one.
pub fn generate_compositions(
    selection: &Selection,
    styles: &[StylePreset],
    timestamp_ms: TimestampMs,
    rng: &mut impl Rng,
) -> Vec<Composition> {
    if selection.is_empty() {
        return Vec::new();
    }

    let price = selection.total_price();
    let instances = selection.flatten();

    let mut compositions = Vec::with_capacity(styles.len().min(MAX_STYLES));
    for (idx, style) in styles.iter().take(MAX_STYLES).enumerate() {
        let entities = placement::place_instances(&instances, style, rng);
        compositions.push(Composition {
            id: format!("comp-{timestamp_ms}-{idx}"),
            style: *style,
            entities,
            price,
        });
    }

    debug!(
        "generated {} compositions from {} instances (price {})",
        compositions.len(),
        instances.len(),
        price
    );

    compositions
}
