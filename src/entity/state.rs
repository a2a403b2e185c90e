//! Each projectile state is its own type, so a flight can only start from
//! `Idle` or `Landed`, and only a `Flying` projectile can be advanced in time:
//! - PUBLIC  : ProjectileState and ProjectileContext
//! - PRIVATE : the transitions that move the context around
//!
//! ProjectileStateMachine in projectile.rs wraps these for storage.
use crate::animation::{AnimationHandle, Flight};
use crate::engine::Point;
use crate::layout::ArrowSize;

#[derive(Debug, Copy, Clone)]
pub struct Idle;

#[derive(Debug, Copy, Clone)]
pub struct Flying {
    handle: AnimationHandle,
    flight: Flight,
}

#[derive(Debug, Copy, Clone)]
pub struct Landed;

pub enum IsFlying {
    Done(ProjectileState<Landed>),
    InProgress(ProjectileState<Flying>),
}

#[derive(Debug, Copy, Clone)]
/// Shared data for :
/// - motion  : position between origin and destination
/// - display : arrow dimensions
pub struct ProjectileContext {
    pub position: Point,
    pub origin: Point,
    pub destination: Point,
    pub size: ArrowSize,
}

#[derive(Debug, Copy, Clone)]
pub struct ProjectileState<S> {
    context: ProjectileContext,
    state: S,
}

/// generic methods shared between all states
impl<S> ProjectileState<S> {
    pub fn context(&self) -> &ProjectileContext {
        &self.context
    }

    /// any state can be put back on the rack
    pub fn reset(self) -> ProjectileState<Idle> {
        ProjectileState {
            context: self.context.at_origin(),
            state: Idle,
        }
    }
}

impl ProjectileState<Idle> {
    pub fn new(origin: Point, destination: Point, size: ArrowSize) -> Self {
        ProjectileState {
            context: ProjectileContext {
                position: origin,
                origin,
                destination,
                size,
            },
            state: Idle,
        }
    }

    pub fn launch(self, handle: AnimationHandle, flight: Flight) -> ProjectileState<Flying> {
        ProjectileState {
            context: self.context,
            state: Flying { handle, flight },
        }
    }
}

impl ProjectileState<Flying> {
    pub fn handle(&self) -> AnimationHandle {
        self.state.handle
    }

    pub fn flight(&self) -> Flight {
        self.state.flight
    }

    /// Returns an enum because a flight can:
    /// - End      (Done)
    /// - Continue (InProgress)
    pub fn update(mut self, now: f64) -> IsFlying {
        if self.state.flight.is_complete(now) {
            IsFlying::Done(self.land())
        } else {
            self.context = self
                .context
                .along_path(self.state.flight.eased_progress(now));
            IsFlying::InProgress(self)
        }
    }

    fn land(self) -> ProjectileState<Landed> {
        ProjectileState {
            context: self.context.at_destination(),
            state: Landed,
        }
    }
}

impl ProjectileState<Landed> {
    /// Going again always starts from the rack, not from the target
    pub fn launch(self, handle: AnimationHandle, flight: Flight) -> ProjectileState<Flying> {
        ProjectileState {
            context: self.context.at_origin(),
            state: Flying { handle, flight },
        }
    }
}

impl ProjectileContext {
    /// Unit vector of travel. Defaults to leftwards for a zero-length path.
    pub fn heading(&self) -> Point {
        self.origin
            .direction_to(self.destination)
            .unwrap_or(Point { x: -1.0, y: 0.0 })
    }

    fn along_path(mut self, eased: f64) -> Self {
        self.position = self.origin.lerp(self.destination, eased);
        self
    }

    // snap instead of lerp(1.0) so float drift can't leave it a hair short
    fn at_destination(mut self) -> Self {
        self.position = self.destination;
        self
    }

    fn at_origin(mut self) -> Self {
        self.position = self.origin;
        self
    }
}
