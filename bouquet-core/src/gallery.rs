//! In-memory snapshot store for simulator state.
//!
//! Snapshots are value types: saving deep-copies the live circle
//! list, loading deep-copies it back. The gallery never aliases live
//! state, so mutating the world after a save cannot corrupt a stored
//! snapshot and vice versa. The store lives only as long as the
//! process; nothing is persisted across restarts.

use crate::physics::{Circle, World};
use crate::types::{SnapshotId, TimestampMs};
use log::info;

/// An immutable capture of the circle list at one instant.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub circles: Vec<Circle>,
    pub timestamp_ms: TimestampMs,
}

/// Append-only, most-recent-first list of snapshots.
#[derive(Debug, Default)]
pub struct Gallery {
    snapshots: Vec<Snapshot>,
    next_id: SnapshotId,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots, most recent first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Deep-copies the world's current circles into a new snapshot and
    /// prepends it. Ids are monotonic and unique for the lifetime of
    /// this gallery.
    pub fn save(&mut self, world: &World, timestamp_ms: TimestampMs) -> SnapshotId {
        let id = self.next_id;
        self.next_id += 1;

        self.snapshots.insert(
            0,
            Snapshot {
                id,
                circles: world.circles.clone(),
                timestamp_ms,
            },
        );

        info!("saved snapshot {id} ({} circles)", self.snapshots[0].circles.len());
        id
    }

    /// Replaces the world's live circles with a deep copy of the
    /// snapshot's and forces the world idle — loading always pauses
    /// the animation, even if it was running.
    ///
    /// Returns `false` (leaving the world untouched) if no snapshot
    /// has the given id.
    pub fn load(&self, id: SnapshotId, world: &mut World) -> bool {
        let Some(snapshot) = self.snapshots.iter().find(|s| s.id == id) else {
            return false;
        };

        world.circles = snapshot.circles.clone();
        world.set_running(false);

        info!("loaded snapshot {id}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SimConfig;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn populated_world() -> World {
        let mut w = World::new(Vec2::new(800.0, 600.0));
        let mut rng = StdRng::seed_from_u64(8);
        w.spawn(SimConfig::default(), &mut rng);
        w
    }

    #[test]
    fn save_then_load_round_trips_despite_live_mutation() {
        let mut world = populated_world();
        let mut gallery = Gallery::new();

        let saved_circles = world.circles.clone();
        let id = gallery.save(&world, 1000);

        // Mutate the live world heavily after the save.
        for _ in 0..500 {
            world.step();
        }
        world.circles.truncate(3);

        assert!(gallery.load(id, &mut world));
        assert_eq!(world.circles, saved_circles);
    }

    #[test]
    fn load_forces_the_world_idle() {
        let mut world = populated_world();
        world.set_running(true);

        let mut gallery = Gallery::new();
        let id = gallery.save(&world, 1);

        assert!(gallery.load(id, &mut world));
        assert!(!world.is_running());
    }

    #[test]
    fn snapshots_are_isolated_from_later_world_mutation() {
        let mut world = populated_world();
        let mut gallery = Gallery::new();

        let id = gallery.save(&world, 1);
        let captured = gallery.snapshots()[0].circles.clone();

        for _ in 0..100 {
            world.step();
        }

        // The stored snapshot is unchanged.
        let stored = &gallery.snapshots().iter().find(|s| s.id == id).unwrap().circles;
        assert_eq!(*stored, captured);
    }

    #[test]
    fn save_orders_most_recent_first_with_unique_ids() {
        let world = populated_world();
        let mut gallery = Gallery::new();

        let a = gallery.save(&world, 1);
        let b = gallery.save(&world, 2);
        let c = gallery.save(&world, 3);

        let ids: Vec<_> = gallery.snapshots().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c, b, a]);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn load_with_unknown_id_is_a_no_op() {
        let mut world = populated_world();
        let before = world.circles.clone();

        let gallery = Gallery::new();
        assert!(!gallery.load(42, &mut world));
        assert_eq!(world.circles, before);
    }
}
