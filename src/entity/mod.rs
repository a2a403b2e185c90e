// ┌──────────────────────────────────────────────────────────────┐
// │  entity/                                                     │
// │  ├── mod.rs        World: targets + projectiles, by slot     │
// │  ├── target.rs     Target (the bubble)                       │
// │  ├── projectile.rs Projectile + its state machine            │
// │  └── state.rs      typed states Idle / Flying / Landed       │
// └──────────────────────────────────────────────────────────────┘
pub mod projectile;
pub mod state;
pub mod target;

pub use self::projectile::Projectile;
pub use self::target::Target;

use crate::geometry;
use crate::layout::Layout;
use anyhow::{ensure, Result};

/// Both collections are built once and never resized; slot `i` of one is
/// paired with slot `i` of the other.
pub struct World {
    targets: Vec<Target>,
    projectiles: Vec<Projectile>,
}

impl World {
    pub fn new(layout: &Layout) -> Result<Self> {
        layout.validate()?;

        let targets = layout
            .palette
            .iter()
            .enumerate()
            .map(|(slot, colors)| {
                Target::new(
                    slot,
                    layout.target_center(slot),
                    layout.radius,
                    &colors.rest,
                    &colors.hit,
                )
            })
            .collect::<Vec<_>>();

        let projectiles = targets
            .iter()
            .map(|target| {
                let origin = layout.launch_point(target.slot());
                let destination = geometry::approach_point(
                    target.center(),
                    target.radius(),
                    origin,
                    layout.clearance,
                );
                Projectile::new(target.slot(), origin, destination, layout.arrow)
            })
            .collect();

        Self::from_parts(targets, projectiles)
    }

    /// A half-paired world can't run, so mismatches fail here and never later
    pub fn from_parts(targets: Vec<Target>, projectiles: Vec<Projectile>) -> Result<Self> {
        ensure!(!targets.is_empty(), "World needs at least one target");
        ensure!(
            targets.len() == projectiles.len(),
            "{} targets but {} projectiles",
            targets.len(),
            projectiles.len()
        );
        for (index, (target, projectile)) in targets.iter().zip(&projectiles).enumerate() {
            ensure!(
                target.slot() == index && projectile.slot() == index,
                "Slot mismatch at index {}: target {} / projectile {}",
                index,
                target.slot(),
                projectile.slot()
            );
        }
        Ok(World {
            targets,
            projectiles,
        })
    }

    pub fn slots(&self) -> usize {
        self.targets.len()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn target(&self, slot: usize) -> Option<&Target> {
        self.targets.get(slot)
    }

    pub fn projectile(&self, slot: usize) -> Option<&Projectile> {
        self.projectiles.get(slot)
    }

    pub fn target_mut(&mut self, slot: usize) -> Option<&mut Target> {
        self.targets.get_mut(slot)
    }

    pub fn projectile_mut(&mut self, slot: usize) -> Option<&mut Projectile> {
        self.projectiles.get_mut(slot)
    }

    pub fn reset_all(&mut self) {
        self.targets.iter_mut().for_each(Target::reset);
        self.projectiles.iter_mut().for_each(Projectile::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Flight, Scheduler};
    use crate::engine::Point;
    use crate::layout::ArrowSize;

    #[test]
    fn builds_one_pair_per_palette_entry() {
        let world = World::new(&Layout::default()).unwrap();
        assert_eq!(world.slots(), 4);
        assert_eq!(world.projectiles().len(), 4);

        let target = world.target(1).unwrap();
        let projectile = world.projectile(1).unwrap();
        assert_eq!(target.center(), Point::new(80.0, 160.0));
        assert_eq!(target.color(), "#3b82f6");
        assert_eq!(projectile.origin(), Point::new(520.0, 160.0));
        assert_eq!(projectile.destination(), Point::new(120.0, 160.0));
        assert!(world.target(4).is_none());
    }

    #[test]
    fn invalid_layout_fails_construction() {
        let layout = Layout {
            radius: -5.0,
            ..Layout::default()
        };
        assert!(World::new(&layout).is_err());
    }

    #[test]
    fn mismatched_counts_fail_construction() {
        let targets = vec![
            Target::new(0, Point::new(80.0, 80.0), 30.0, "#fbbf24", "#6b7280"),
            Target::new(1, Point::new(80.0, 160.0), 30.0, "#3b82f6", "#6b7280"),
        ];
        let projectiles = vec![Projectile::new(
            0,
            Point::new(520.0, 80.0),
            Point::new(120.0, 80.0),
            ArrowSize::default(),
        )];
        let err = World::from_parts(targets, projectiles).err().unwrap();
        assert!(err.to_string().contains("2 targets but 1 projectiles"));
    }

    #[test]
    fn out_of_order_slots_fail_construction() {
        let targets = vec![Target::new(
            1,
            Point::new(80.0, 80.0),
            30.0,
            "#fbbf24",
            "#6b7280",
        )];
        let projectiles = vec![Projectile::new(
            1,
            Point::new(520.0, 80.0),
            Point::new(120.0, 80.0),
            ArrowSize::default(),
        )];
        assert!(World::from_parts(targets, projectiles).is_err());
    }

    #[test]
    fn reset_all_restores_every_slot() {
        let mut world = World::new(&Layout::default()).unwrap();
        let mut scheduler = Scheduler::new();
        for slot in 0..world.slots() {
            let handle = scheduler.issue(slot);
            let projectile = world.projectile_mut(slot).unwrap();
            projectile.launch(handle, Flight::new(0.0, 800.0));
            projectile.update(300.0);
        }
        world.target_mut(2).unwrap().mark_hit();

        world.reset_all();

        for (target, projectile) in world.targets().iter().zip(world.projectiles()) {
            assert!(!target.is_hit());
            assert_eq!(target.color(), target.rest_color());
            assert!(!projectile.is_moving());
            assert_eq!(projectile.position(), projectile.origin());
        }
    }
}
