use crate::animation::{AnimationHandle, Flight};
use crate::engine::{Draw, Point};
use crate::entity::state::{Flying, Idle, IsFlying, Landed, ProjectileContext, ProjectileState};
use crate::layout::{ArrowSize, ARROW_COLOR, OUTLINE_COLOR};

/// ┌──────────────── State Transition Flow ──────────────────┐
/// │  From State  →  Event   →  To State                     │
/// ├─────────────────────────────────────────────────────────┤
/// │  Idle        →  Launch  →  Flying                       │
/// │  Landed      →  Launch  →  Flying (back at origin)      │
/// │  Flying      →  Update  →  Flying | Landed (when done)  │
/// │  any         →  Reset   →  Idle                         │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone)]
pub enum Event {
    Launch {
        handle: AnimationHandle,
        flight: Flight,
    },
    Update(f64),
    Reset,
}

#[derive(Debug, Copy, Clone)]
enum ProjectileStateMachine {
    Idle(ProjectileState<Idle>),
    Flying(ProjectileState<Flying>),
    Landed(ProjectileState<Landed>),
}

impl From<ProjectileState<Idle>> for ProjectileStateMachine {
    fn from(state: ProjectileState<Idle>) -> Self {
        ProjectileStateMachine::Idle(state)
    }
}

impl From<ProjectileState<Flying>> for ProjectileStateMachine {
    fn from(state: ProjectileState<Flying>) -> Self {
        ProjectileStateMachine::Flying(state)
    }
}

impl From<ProjectileState<Landed>> for ProjectileStateMachine {
    fn from(state: ProjectileState<Landed>) -> Self {
        ProjectileStateMachine::Landed(state)
    }
}

impl From<IsFlying> for ProjectileStateMachine {
    fn from(is_flying: IsFlying) -> Self {
        match is_flying {
            IsFlying::Done(landed_state) => landed_state.into(),
            IsFlying::InProgress(flying_state) => flying_state.into(),
        }
    }
}

impl ProjectileStateMachine {
    // consumes the current state; anything not listed (launching mid-flight,
    // updating while parked) leaves it untouched
    fn transition(self, event: Event) -> Self {
        use ProjectileStateMachine::*;
        match (self, event) {
            (Idle(state), Event::Launch { handle, flight }) => state.launch(handle, flight).into(),
            (Landed(state), Event::Launch { handle, flight }) => {
                state.launch(handle, flight).into()
            }
            (Flying(state), Event::Update(now)) => state.update(now).into(),
            (Idle(state), Event::Reset) => state.reset().into(),
            (Flying(state), Event::Reset) => state.reset().into(),
            (Landed(state), Event::Reset) => state.reset().into(),
            _ => self,
        }
    }

    fn context(&self) -> &ProjectileContext {
        use ProjectileStateMachine::*;
        match self {
            Idle(state) => state.context(),
            Flying(state) => state.context(),
            Landed(state) => state.context(),
        }
    }
}

pub struct Projectile {
    slot: usize,
    state: ProjectileStateMachine,
}

impl Projectile {
    pub fn new(slot: usize, origin: Point, destination: Point, size: ArrowSize) -> Self {
        Projectile {
            slot,
            state: ProjectileState::new(origin, destination, size).into(),
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn position(&self) -> Point {
        self.state.context().position
    }

    pub fn origin(&self) -> Point {
        self.state.context().origin
    }

    pub fn destination(&self) -> Point {
        self.state.context().destination
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, ProjectileStateMachine::Flying(_))
    }

    pub fn has_landed(&self) -> bool {
        matches!(self.state, ProjectileStateMachine::Landed(_))
    }

    /// Handle of the flight in progress, if any
    pub fn handle(&self) -> Option<AnimationHandle> {
        match self.state {
            ProjectileStateMachine::Flying(state) => Some(state.handle()),
            _ => None,
        }
    }

    /// false (and nothing changes) if already in the air
    pub fn launch(&mut self, handle: AnimationHandle, flight: Flight) -> bool {
        if self.is_moving() {
            return false;
        }
        self.state = self.state.transition(Event::Launch { handle, flight });
        true
    }

    /// true only on the update that completes the flight
    pub fn update(&mut self, now: f64) -> bool {
        let was_moving = self.is_moving();
        self.state = self.state.transition(Event::Update(now));
        was_moving && self.has_landed()
    }

    pub fn reset(&mut self) {
        self.state = self.state.transition(Event::Reset);
    }

    /// Body quad trailing behind a triangular head; `position` is where the
    /// two meet and the head points along the direction of travel
    pub fn draw(&self, renderer: &dyn Draw) {
        let context = self.state.context();
        let heading = context.heading();
        let across = Point::new(-heading.y, heading.x);
        let size = context.size;
        let position = context.position;
        let tail = position.advance(heading, -size.length);
        let half = size.thickness / 2.0;

        let body = [
            position.advance(across, half),
            tail.advance(across, half),
            tail.advance(across, -half),
            position.advance(across, -half),
        ];
        renderer.fill_polygon(&body, ARROW_COLOR);

        let head = [
            position.advance(across, size.head_half_width),
            position.advance(heading, size.head_length),
            position.advance(across, -size.head_half_width),
        ];
        renderer.fill_polygon(&head, ARROW_COLOR);
        renderer.stroke_polygon(&head, OUTLINE_COLOR, 1.0);
    }
}
