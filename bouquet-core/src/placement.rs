//! Polar placement of selection instances for one style preset.
//!
//! Placement is a pure function: from a flattened instance list, a
//! style and an explicit random source it produces one
//! [`PlacedEntity`] per instance. Instances never interact — there is
//! no collision avoidance, and positions are deliberately left
//! unclamped so entities may render slightly outside the visible
//! square.

use crate::catalog::Item;
use crate::selection::Instance;
use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

/// A named parameter set applied by the composition generator to
/// produce one arrangement variant.
///
/// `spread` multiplies every tier's placement-radius range; `layered`
/// selects the ordering rule (sort by paint layer vs. uniform
/// shuffle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylePreset {
    pub name: &'static str,
    pub spread: f32,
    pub layered: bool,
}

/// The fixed, ordered style list. The generator walks these in order
/// and auto-selects the first.
pub const STYLE_PRESETS: [StylePreset; 4] = [
    StylePreset {
        name: "Classic",
        spread: 1.0,
        layered: true,
    },
    StylePreset {
        name: "Romantic",
        spread: 0.8,
        layered: true,
    },
    StylePreset {
        name: "Minimal",
        spread: 1.2,
        layered: false,
    },
    StylePreset {
        name: "Lush",
        spread: 0.9,
        layered: false,
    },
];

/// One positioned element of a composition. Immutable once produced.
///
/// `pos` is in percent coordinates: a polar offset from the canvas
/// center at (50, 50). `layer` is paint order only — higher draws
/// later — not a physical z-axis.
#[derive(Clone, Copy, Debug)]
pub struct PlacedEntity {
    pub item: Item,
    pub variant: Option<usize>,
    pub pos: Vec2,
    /// Degrees in [0, 360).
    pub rotation: f32,
    pub scale: f32,
    pub layer: u8,
}

/// Places every instance independently for the given style.
///
/// For each instance the algorithm draws an angle uniformly from
/// [0°, 360°), a placement radius uniformly from the instance tier's
/// range scaled by `style.spread`, and computes
///
/// ```text
/// x = 50 + cos(angle) * radius
/// y = 50 + sin(angle) * radius
/// ```
///
/// plus a uniform rotation in [0°, 360°) and a uniform scale from the
/// tier's scale range. The result is then ordered exactly one way:
/// layered styles sort ascending by paint layer (fillers first, focal
/// on top), unlayered styles get a uniform Fisher–Yates shuffle.
///
/// ### Parameters
/// - `instances` - Flattened selection, one element per unit of count.
/// - `style` - The preset controlling spread and ordering.
/// - `rng` - Explicit random source; fix the seed for reproducible
///   layouts.
///
/// ### Returns
/// One [`PlacedEntity`] per instance, in paint order.
pub fn place_instances(
    instances: &[Instance],
    style: &StylePreset,
    rng: &mut impl Rng,
) -> Vec<PlacedEntity> {
    let mut placed = Vec::with_capacity(instances.len());

    for inst in instances {
        let tier = inst.item.tier;

        let angle: f32 = rng.random_range(0.0..360.0);
        let r = tier.placement_radius();
        let radius = rng.random_range(r.start * style.spread..r.end * style.spread);

        let (sin, cos) = angle.to_radians().sin_cos();
        let pos = Vec2::new(50.0 + cos * radius, 50.0 + sin * radius);

        let rotation = rng.random_range(0.0..360.0);
        let s = tier.scale();
        let scale = rng.random_range(s.start..s.end);

        placed.push(PlacedEntity {
            item: inst.item,
            variant: inst.variant,
            pos,
            rotation,
            scale,
            layer: tier.layer(),
        });
    }

    // Exactly one ordering rule applies, never both.
    if style.layered {
        placed.sort_by_key(|e| e.layer);
    } else {
        placed.shuffle(rng);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tier;
    use crate::selection::Selection;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(id: &'static str, price: u32, tier: Tier) -> Item {
        Item {
            id,
            name: id,
            price,
            tier,
            colors: &[[200, 100, 100]],
        }
    }

    fn mixed_instances() -> Vec<Instance> {
        let mut sel = Selection::new();
        sel.add(item("rose", 150, Tier::Focal));
        sel.adjust("rose", 1);
        sel.add(item("tulip", 120, Tier::Secondary));
        sel.add(item("gypsophila", 50, Tier::Filler));
        sel.adjust("gypsophila", 2);
        sel.flatten()
    }

    #[test]
    fn places_one_entity_per_instance() {
        let instances = mixed_instances();
        let mut rng = StdRng::seed_from_u64(7);

        let placed = place_instances(&instances, &STYLE_PRESETS[0], &mut rng);
        assert_eq!(placed.len(), instances.len());
    }

    #[test]
    fn rotation_and_scale_stay_in_configured_ranges() {
        let instances = mixed_instances();
        let mut rng = StdRng::seed_from_u64(42);

        for style in &STYLE_PRESETS {
            for e in place_instances(&instances, style, &mut rng) {
                assert!((0.0..360.0).contains(&e.rotation), "rotation {}", e.rotation);
                let s = e.item.tier.scale();
                assert!(s.contains(&e.scale), "scale {} outside {:?}", e.scale, s);
            }
        }
    }

    #[test]
    fn position_is_polar_offset_from_center_within_spread() {
        let instances = mixed_instances();
        let mut rng = StdRng::seed_from_u64(3);

        for style in &STYLE_PRESETS {
            for e in place_instances(&instances, style, &mut rng) {
                let dist = (e.pos - Vec2::new(50.0, 50.0)).length();
                let r = e.item.tier.placement_radius();
                assert!(
                    dist >= r.start * style.spread - 1e-3 && dist < r.end * style.spread + 1e-3,
                    "distance {dist} outside scaled range for {:?}",
                    e.item.tier
                );
            }
        }
    }

    #[test]
    fn layered_styles_sort_ascending_by_layer() {
        let instances = mixed_instances();
        let mut rng = StdRng::seed_from_u64(11);

        let placed = place_instances(&instances, &STYLE_PRESETS[0], &mut rng);
        assert!(placed.windows(2).all(|w| w[0].layer <= w[1].layer));

        // Focal entities come last, i.e. paint on top.
        assert_eq!(placed.last().map(|e| e.layer), Some(3));
    }

    #[test]
    fn unlayered_styles_keep_the_full_multiset_of_items() {
        let instances = mixed_instances();
        let mut rng = StdRng::seed_from_u64(5);

        let placed = place_instances(&instances, &STYLE_PRESETS[2], &mut rng);

        let count = |id: &str| placed.iter().filter(|e| e.item.id == id).count();
        assert_eq!(count("rose"), 2);
        assert_eq!(count("tulip"), 1);
        assert_eq!(count("gypsophila"), 3);
    }

    #[test]
    fn fixed_seed_reproduces_the_exact_layout() {
        let instances = mixed_instances();

        let a = place_instances(
            &instances,
            &STYLE_PRESETS[1],
            &mut StdRng::seed_from_u64(99),
        );
        let b = place_instances(
            &instances,
            &STYLE_PRESETS[1],
            &mut StdRng::seed_from_u64(99),
        );

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.rotation, y.rotation);
            assert_eq!(x.scale, y.scale);
        }
    }

    #[test]
    fn empty_instance_list_places_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let placed = place_instances(&[], &STYLE_PRESETS[0], &mut rng);
        assert!(placed.is_empty());
    }
}
