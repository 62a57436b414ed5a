use std::ops::Range;

/// Placement tier of a catalog item.
///
/// The tier decides where an instance tends to land (focal items stay
/// near the center, fillers spread wide), how large it is drawn, and
/// its paint layer (higher layers draw later, i.e. on top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Focal,
    Secondary,
    Filler,
}

impl Tier {
    /// Placement-radius range in percent of the canvas half-extent.
    /// Ranges widen from focal to filler.
    pub fn placement_radius(self) -> Range<f32> {
        match self {
            Tier::Focal => 15.0..35.0,
            Tier::Secondary => 30.0..55.0,
            Tier::Filler => 45.0..80.0,
        }
    }

    /// Draw-scale range. Ranges shrink from focal to filler.
    pub fn scale(self) -> Range<f32> {
        match self {
            Tier::Focal => 1.1..1.5,
            Tier::Secondary => 0.9..1.25,
            Tier::Filler => 0.7..1.0,
        }
    }

    /// Paint layer: 3 for focal, 2 for secondary, 1 for filler.
    pub fn layer(self) -> u8 {
        match self {
            Tier::Focal => 3,
            Tier::Secondary => 2,
            Tier::Filler => 1,
        }
    }
}

/// A catalog item (flower or abstract shape).
///
/// The concrete catalog lives outside the core; everything here is
/// `'static` data so items stay `Copy` and cheap to duplicate per
/// placed instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    /// Unit price; composition prices are sums of these.
    pub price: u32,
    pub tier: Tier,
    /// Available color variants (RGB). A selection entry may pin one
    /// by index.
    pub colors: &'static [[u8; 3]],
}
