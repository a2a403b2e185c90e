use crate::animation::{AnimationHandle, Flight, Scheduler};
use crate::engine::input::InputEvent;
use crate::engine::{Draw, Game, Point, Rect};
use crate::entity::World;
use crate::layout::Layout;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

/// ┌──────────────────────── Frame Flow ─────────────────────────────────┐
/// │                                                                     │
/// │  GameLoop (rAF)                                                     │
/// │     └─► Bubbles::update(now, events)                                │
/// │           ├─► Click  ─► Board::on_click ─► hit-test ─► launch(slot) │
/// │           ├─► Reset  ─► Board::reset ─► cancel + reset_all + draw   │
/// │           └─► Board::tick(now)                                      │
/// │                 └─► advance(handle) per pending flight              │
/// │                       ├─► move + draw       (still flying)          │
/// │                       └─► land + hit + draw (done)                  │
/// │                                                                     │
/// └─────────────────────────────────────────────────────────────────────┘
pub enum Bubbles {
    /// Holds the layout until the loop asks for initialization
    Loading(Layout),

    /// Live board
    Loaded(Board),
}

impl Bubbles {
    pub fn new(layout: Layout) -> Self {
        Bubbles::Loading(layout)
    }
}

#[async_trait(?Send)]
impl Game for Bubbles {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Bubbles::Loading(layout) => {
                let board = Board::new(layout).context("Failed to build the board")?;
                log!(
                    "Board ready : {} slots, {}ms flights",
                    board.world().slots(),
                    layout.flight_duration
                );
                Ok(Box::new(Bubbles::Loaded(board)))
            }
            Bubbles::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, now: f64, events: &[InputEvent], renderer: &dyn Draw) {
        if let Bubbles::Loaded(board) = self {
            for event in events {
                match *event {
                    InputEvent::Click {
                        raw,
                        surface_offset,
                    } => {
                        board.on_click(raw, surface_offset, now);
                    }
                    InputEvent::Reset => board.reset(renderer),
                }
            }
            board.tick(now, renderer);
        }
    }

    fn draw(&self, renderer: &dyn Draw) {
        if let Bubbles::Loaded(board) = self {
            board.render_frame(renderer);
        }
    }
}

/// What one advance did with a handle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// still flying, schedule it again
    Pending(AnimationHandle),
    /// arrived this tick, target is hit
    Landed,
    /// cancelled or superseded, nothing was touched
    Stale,
}

/// Everything the page needs in one place: entities, the flights in the air,
/// and the surface they're drawn on.
pub struct Board {
    world: World,
    scheduler: Scheduler,
    surface: Rect,
    flight_duration: f64,
}

impl Board {
    pub fn new(layout: &Layout) -> Result<Self> {
        Ok(Board {
            world: World::new(layout)?,
            scheduler: Scheduler::new(),
            surface: Rect::new(Point::ORIGIN, layout.surface),
            flight_duration: layout.flight_duration,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Launches every idle arrow whose target sits under the click.
    /// Overlapping targets all fire. Returns how many launched.
    pub fn on_click(&mut self, raw: Point, surface_offset: Point, now: f64) -> usize {
        let point = raw.relative_to(surface_offset);
        let slots = self
            .world
            .targets()
            .iter()
            .filter(|target| target.contains(point))
            .map(|target| target.slot())
            .collect::<Vec<_>>();

        slots
            .into_iter()
            .filter(|slot| self.launch(*slot, now))
            .count()
    }

    /// Starts a flight for `slot`. A no-op returning false while that arrow
    /// is already in the air.
    pub fn launch(&mut self, slot: usize, now: f64) -> bool {
        let Some(projectile) = self.world.projectile_mut(slot) else {
            return false;
        };
        if projectile.is_moving() {
            return false;
        }

        let handle = self.scheduler.issue(slot);
        projectile.launch(handle, Flight::new(now, self.flight_duration));
        self.scheduler.schedule(handle);
        log!("Launch slot {} at {:.1}", slot, now);
        true
    }

    /// Per-frame callback: advances every pending flight once
    pub fn tick(&mut self, now: f64, renderer: &dyn Draw) {
        for handle in self.scheduler.take_pending() {
            match self.advance(handle, now, renderer) {
                Step::Pending(handle) => self.scheduler.schedule(handle),
                Step::Landed => {}
                Step::Stale => log!("Dropped stale tick for slot {}", handle.slot()),
            }
        }
    }

    /// One animation step for one flight. Stale handles (cancelled by a
    /// reset, or replaced by a newer flight) change nothing and draw nothing.
    pub fn advance(&mut self, handle: AnimationHandle, now: f64, renderer: &dyn Draw) -> Step {
        if !self.scheduler.is_live(&handle) {
            return Step::Stale;
        }
        let slot = handle.slot();
        let landed = match self.world.projectile_mut(slot) {
            Some(projectile) if projectile.handle() == Some(handle) => projectile.update(now),
            _ => return Step::Stale,
        };
        self.render_frame(renderer);

        if !landed {
            return Step::Pending(handle);
        }

        if let Some(target) = self.world.target_mut(slot) {
            target.mark_hit();
        }
        log!("Slot {} hit at {:.1}", slot, now);
        self.render_frame(renderer);
        Step::Landed
    }

    pub fn reset(&mut self, renderer: &dyn Draw) {
        let cancelled = self.scheduler.cancel_all();
        self.world.reset_all();
        log!("Reset, {} flights cancelled", cancelled);
        self.render_frame(renderer);
    }

    /// Clear, then targets under projectiles
    pub fn render_frame(&self, renderer: &dyn Draw) {
        renderer.clear(&self.surface);
        for target in self.world.targets() {
            target.draw(renderer);
        }
        for projectile in self.world.projectiles() {
            projectile.draw(renderer);
        }
    }
}
