//! Moving-circle world with elastic boundary reflection.
//!
//! The world owns the live circle list exclusively; everything else
//! (gallery snapshots, renderers, exporters) only ever sees copies or
//! shared borrows. One [`World::step`] advances every circle by its
//! velocity and reflects it off the four edges, axis-independently.
//! Circle-circle collisions are deliberately not handled.

use glam::Vec2;
use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

/// The fixed set of spawn palettes (RGB). A
/// [`SimConfig::palette`] index selects one list.
pub const PALETTES: [&[[u8; 3]]; 3] = [
    // Sunset
    &[
        [255, 107, 157],
        [255, 23, 68],
        [255, 193, 7],
        [255, 87, 34],
        [255, 182, 193],
    ],
    // Lagoon
    &[
        [79, 195, 247],
        [0, 150, 136],
        [63, 81, 181],
        [129, 212, 250],
        [38, 198, 218],
    ],
    // Meadow
    &[
        [221, 160, 221],
        [144, 238, 144],
        [255, 255, 224],
        [147, 112, 219],
        [255, 215, 0],
    ],
];

/// A moving circular entity, mutated in place every tick.
///
/// After any step, `radius <= pos.x <= bounds.x - radius` and the
/// same on the y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub pos: Vec2,
    /// Velocity in pixels per tick.
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
}

/// Spawn parameters, clamped before any entity is created so a
/// degenerate radius can never occur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of circles, clamped to [5, 100].
    pub circle_count: usize,
    /// Base radius; actual radii are uniform in [size, 2·size).
    /// Clamped to [10, 50].
    pub circle_size: f32,
    /// Index into [`PALETTES`], clamped to the valid range.
    pub palette: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            circle_count: 30,
            circle_size: 20.0,
            palette: 0,
        }
    }
}

impl SimConfig {
    /// Returns a copy with every field forced into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            circle_count: self.circle_count.clamp(5, 100),
            circle_size: self.circle_size.clamp(10.0, 50.0),
            palette: self.palette.min(PALETTES.len() - 1),
        }
    }
}

/// Simulator state: [`Idle`](SimState::Idle) circles are static and
/// no ticking is scheduled; [`Running`](SimState::Running) means the
/// frame scheduler drives [`World::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    Idle,
    Running,
}

/// The circle world. Bounds are fixed logical pixels; the viewer maps
/// them onto whatever screen rectangle is available.
#[derive(Clone, Debug)]
pub struct World {
    pub circles: Vec<Circle>,
    pub bounds: Vec2,
    state: SimState,
}

impl World {
    /// Creates an empty, idle world with the given pixel bounds.
    pub fn new(bounds: Vec2) -> Self {
        Self {
            circles: Vec::new(),
            bounds,
            state: SimState::Idle,
        }
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn set_running(&mut self, running: bool) {
        self.state = if running {
            SimState::Running
        } else {
            SimState::Idle
        };
    }

    /// Replaces the circle list with a freshly spawned population.
    ///
    /// For each circle:
    /// - radius uniform in `[size, 2·size)`, additionally capped so a
    ///   circle always fits between opposite walls;
    /// - position uniform in `[radius, dim − radius]` per axis
    ///   (overlap between circles is permitted and unchecked);
    /// - velocity components uniform in `[-0.25, 0.25)` pixels/tick;
    /// - color uniform from the configured palette.
    ///
    /// ### Parameters
    /// - `cfg` - Spawn parameters; clamped via [`SimConfig::clamped`]
    ///   before use.
    /// - `rng` - Explicit random source.
    pub fn spawn(&mut self, cfg: SimConfig, rng: &mut impl Rng) {
        let cfg = cfg.clamped();
        let palette = PALETTES[cfg.palette];
        let max_radius = (self.bounds.min_element() * 0.5 - 1.0).max(1.0);

        self.circles.clear();
        self.circles.reserve(cfg.circle_count);
        for _ in 0..cfg.circle_count {
            let radius = rng
                .random_range(cfg.circle_size..cfg.circle_size * 2.0)
                .min(max_radius);
            let pos = Vec2::new(
                rng.random_range(radius..=self.bounds.x - radius),
                rng.random_range(radius..=self.bounds.y - radius),
            );
            let vel = Vec2::new(
                rng.random_range(-0.25..0.25),
                rng.random_range(-0.25..0.25),
            );
            let color = palette.choose(rng).copied().unwrap_or([255, 255, 255]);

            self.circles.push(Circle {
                pos,
                vel,
                radius,
                color,
            });
        }

        debug!(
            "spawned {} circles (size {}, palette {})",
            self.circles.len(),
            cfg.circle_size,
            cfg.palette
        );
    }

    /// Advances every circle by one tick.
    ///
    /// Each circle tentatively moves by its velocity; if the tentative
    /// position on an axis leaves `[radius, dim − radius]`, the
    /// velocity component on that axis flips sign and the position is
    /// clamped to the boundary that was crossed. The two axes are
    /// handled independently, which yields elastic reflection off the
    /// four edges. O(circle count), never blocks.
    ///
    /// This is the tick primitive: it advances unconditionally, so a
    /// single manual step also works while the world is idle. Whether
    /// ticks happen at all is decided by the frame scheduler.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for c in &mut self.circles {
            c.pos += c.vel;

            if c.pos.x < c.radius {
                c.pos.x = c.radius;
                c.vel.x = -c.vel.x;
            } else if c.pos.x > bounds.x - c.radius {
                c.pos.x = bounds.x - c.radius;
                c.vel.x = -c.vel.x;
            }

            if c.pos.y < c.radius {
                c.pos.y = c.radius;
                c.vel.y = -c.vel.y;
            } else if c.pos.y > bounds.y - c.radius {
                c.pos.y = bounds.y - c.radius;
                c.vel.y = -c.vel.y;
            }
        }
    }
}
