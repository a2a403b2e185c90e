//! Time-driven flights and the handles that keep them cancellable.
//!
//! Nothing here owns a timer. The host calls in with a timestamp once per
//! frame, and every pending handle is checked against the scheduler's current
//! generation before it may touch state. `cancel_all` bumps the generation, so
//! a handle captured before a reset stays dead even if the host still calls
//! back with it afterwards.

/// Default flight time in milliseconds
pub const FLIGHT_DURATION: f64 = 800.0;

/// Symmetric ease-in/ease-out on [0, 1]
/// - first half accelerates: 2p²
/// - second half mirrors it: 1 - (2 - 2p)² / 2
pub fn ease_in_out(progress: f64) -> f64 {
    if progress < 0.5 {
        2.0 * progress * progress
    } else {
        1.0 - (-2.0 * progress + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Flight {
    pub started_at: f64,
    pub duration: f64,
}

impl Flight {
    pub fn new(started_at: f64, duration: f64) -> Self {
        Flight {
            started_at,
            duration,
        }
    }

    /// Raw progress, 0.0 at launch, 1.0 once `duration` has elapsed
    pub fn progress(&self, now: f64) -> f64 {
        let elapsed = now - self.started_at;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn eased_progress(&self, now: f64) -> f64 {
        ease_in_out(self.progress(now))
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Ticket for one projectile's flight. Cheap to copy; only the scheduler
/// decides whether it still means anything.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnimationHandle {
    slot: usize,
    id: u64,
    generation: u64,
}

impl AnimationHandle {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    generation: u64,
    next_id: u64,
    pending: Vec<AnimationHandle>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, slot: usize) -> AnimationHandle {
        self.next_id += 1;
        AnimationHandle {
            slot,
            id: self.next_id,
            generation: self.generation,
        }
    }

    /// Queue a handle for the next frame
    pub fn schedule(&mut self, handle: AnimationHandle) {
        if self.is_live(&handle) {
            self.pending.push(handle);
        }
    }

    /// Hands over everything due this frame, leaving the queue empty
    pub fn take_pending(&mut self) -> Vec<AnimationHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_live(&self, handle: &AnimationHandle) -> bool {
        handle.generation == self.generation
    }

    /// Invalidates every handle issued so far, queued or not
    pub fn cancel_all(&mut self) -> usize {
        self.generation += 1;
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ease_endpoints_and_midpoint() {
        assert_relative_eq!(ease_in_out(0.0), 0.0);
        assert_relative_eq!(ease_in_out(0.5), 0.5);
        assert_relative_eq!(ease_in_out(1.0), 1.0);
        assert_relative_eq!(ease_in_out(0.25), 0.125);
        assert_relative_eq!(ease_in_out(0.75), 0.875);
    }

    #[test]
    fn ease_never_goes_backwards() {
        let mut previous = ease_in_out(0.0);
        for step in 1..=1000 {
            let eased = ease_in_out(step as f64 / 1000.0);
            assert!(eased >= previous, "dipped at step {}", step);
            previous = eased;
        }
    }

    #[test]
    fn flight_progress_is_clamped() {
        let flight = Flight::new(1000.0, FLIGHT_DURATION);
        assert_relative_eq!(flight.progress(900.0), 0.0);
        assert_relative_eq!(flight.progress(1400.0), 0.5);
        assert_relative_eq!(flight.progress(5000.0), 1.0);
        assert!(!flight.is_complete(1799.0));
        assert!(flight.is_complete(1800.0));
        assert_relative_eq!(flight.eased_progress(1200.0), 0.125);
    }

    #[test]
    fn cancel_all_kills_queued_and_detached_handles() {
        let mut scheduler = Scheduler::new();
        let queued = scheduler.issue(0);
        let detached = scheduler.issue(1);
        scheduler.schedule(queued);
        assert_eq!(scheduler.in_flight(), 1);

        assert_eq!(scheduler.cancel_all(), 1);
        assert_eq!(scheduler.in_flight(), 0);
        assert!(!scheduler.is_live(&queued));
        assert!(!scheduler.is_live(&detached));

        // a stale handle can't sneak back into the queue
        scheduler.schedule(detached);
        assert_eq!(scheduler.in_flight(), 0);

        let fresh = scheduler.issue(0);
        assert!(scheduler.is_live(&fresh));
        assert_ne!(fresh, queued);
    }

    #[test]
    fn take_pending_empties_the_queue() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.issue(2);
        let b = scheduler.issue(3);
        scheduler.schedule(a);
        scheduler.schedule(b);

        let due = scheduler.take_pending();
        assert_eq!(due, vec![a, b]);
        assert_eq!(scheduler.in_flight(), 0);
        assert_eq!(due[1].slot(), 3);
    }
}
