//! Speed-keyed turn queue and the engine lock state.
//!
//! Every scheduled entity carries a `ready_at` tick. The entity with the
//! smallest `ready_at` acts next; ties go to whichever was scheduled first.
//! After acting, an entity is rescheduled one turn delay later:
//!
//! - delay = BASE_TURN_DELAY × NORMAL_SPEED / speed
//!
//! Examples (NORMAL_SPEED = 100):
//! - speed 100: 7200 ticks per turn
//! - speed 200: 3600 ticks per turn (twice as many turns)
//! - speed 50: 14400 ticks per turn

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::entity::NORMAL_SPEED;
use crate::types::{EntityId, Tick};

/// Ticks between turns for an entity of [`NORMAL_SPEED`].
pub const BASE_TURN_DELAY: u64 = 7200;

/// Ticks an entity with `speed` waits between turns.
///
/// Speed is floored to 1 and the delay to one tick, so every turn moves the
/// clock forward and slower actors are always reached.
pub fn turn_delay(speed: u32) -> u64 {
    (BASE_TURN_DELAY * u64::from(NORMAL_SPEED) / u64::from(speed.max(1))).max(1)
}

/// Engine-level dispatch state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EngineState {
    /// No turns are processed until `unlock` is called.
    Locked,
    /// Turns are being dispatched.
    Running,
}

/// A queued turn for one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTurn {
    pub entity: EntityId,
    pub ready_at: Tick,
    speed: u32,
    sequence: u64,
}

impl Ord for ScheduledTurn {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.ready_at, self.sequence).cmp(&(other.ready_at, other.sequence))
    }
}

impl PartialOrd for ScheduledTurn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Turn order plus the lock that suspends dispatch while awaiting input.
///
/// A new scheduler starts locked and not started; `GameEngine::start` is the
/// first unlock.
#[derive(Clone, Debug)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<ScheduledTurn>>,
    clock: Tick,
    sequence: u64,
    state: EngineState,
    started: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            clock: Tick::ZERO,
            sequence: 0,
            state: EngineState::Locked,
            started: false,
        }
    }

    /// Returns the current timeline clock value.
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == EngineState::Locked
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_scheduled(&self, entity: EntityId) -> bool {
        self.queue.iter().any(|Reverse(turn)| turn.entity == entity)
    }

    /// Adds an entity; its first turn comes one delay after the current clock.
    pub fn schedule(&mut self, entity: EntityId, speed: u32) {
        let ready_at = self.clock + turn_delay(speed);
        self.push(entity, speed, ready_at);
    }

    /// Removes an entity from the turn order. Returns true if it was scheduled.
    pub fn unschedule(&mut self, entity: EntityId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|Reverse(turn)| turn.entity != entity);
        self.queue.len() != before
    }

    /// Pops the next turn, advances the clock to it and requeues the entity.
    pub fn next(&mut self) -> Option<ScheduledTurn> {
        let Reverse(turn) = self.queue.pop()?;
        self.clock = turn.ready_at;
        self.push(turn.entity, turn.speed, turn.ready_at + turn_delay(turn.speed));
        Some(turn)
    }

    /// Returns the next `count` actors in order without consuming any turns.
    pub fn upcoming(&self, count: usize) -> Vec<EntityId> {
        let mut preview = self.clone();
        (0..count)
            .map_while(|_| preview.next().map(|turn| turn.entity))
            .collect()
    }

    pub(crate) fn lock(&mut self) {
        self.state = EngineState::Locked;
    }

    pub(crate) fn run(&mut self) {
        self.started = true;
        self.state = EngineState::Running;
    }

    fn push(&mut self, entity: EntityId, speed: u32, ready_at: Tick) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.queue.push(Reverse(ScheduledTurn {
            entity,
            ready_at,
            speed,
            sequence,
        }));
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_inversely_proportional_to_speed() {
        assert_eq!(turn_delay(100), 7200);
        assert_eq!(turn_delay(200), 3600);
        assert_eq!(turn_delay(50), 14400);
        assert_eq!(turn_delay(0), turn_delay(1));
    }

    #[test]
    fn delay_never_reaches_zero() {
        assert_eq!(turn_delay(720_000), 1);
        assert_eq!(turn_delay(1_000_000), 1);
        assert_eq!(turn_delay(u32::MAX), 1);
    }

    #[test]
    fn extreme_speed_still_advances_the_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(EntityId(0), 100);
        scheduler.schedule(EntityId(1), u32::MAX);

        let first = scheduler.next().unwrap();
        let second = scheduler.next().unwrap();

        assert_eq!(first.entity, EntityId(1));
        assert!(second.ready_at > first.ready_at);
        assert!(scheduler.upcoming(8000).contains(&EntityId(0)));
    }

    #[test]
    fn faster_entity_gets_proportionally_more_turns() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(EntityId(0), 100);
        scheduler.schedule(EntityId(1), 200);

        let turns: Vec<EntityId> = (0..300)
            .map(|_| scheduler.next().unwrap().entity)
            .collect();
        let slow = turns.iter().filter(|&&e| e == EntityId(0)).count();
        let fast = turns.iter().filter(|&&e| e == EntityId(1)).count();

        assert_eq!(fast, 2 * slow);
    }

    #[test]
    fn ties_are_broken_by_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(EntityId(5), 100);
        scheduler.schedule(EntityId(2), 100);
        scheduler.schedule(EntityId(9), 100);

        assert_eq!(
            scheduler.upcoming(6),
            vec![
                EntityId(5),
                EntityId(2),
                EntityId(9),
                EntityId(5),
                EntityId(2),
                EntityId(9)
            ]
        );
    }

    #[test]
    fn next_advances_clock_to_ready_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(EntityId(0), 200);

        let turn = scheduler.next().unwrap();
        assert_eq!(turn.ready_at, Tick(3600));
        assert_eq!(scheduler.clock(), Tick(3600));

        scheduler.next().unwrap();
        assert_eq!(scheduler.clock(), Tick(7200));
    }

    #[test]
    fn upcoming_does_not_consume_turns() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(EntityId(0), 100);
        scheduler.schedule(EntityId(1), 300);

        let preview = scheduler.upcoming(4);
        let actual: Vec<EntityId> = (0..4).map(|_| scheduler.next().unwrap().entity).collect();

        assert_eq!(preview, actual);
    }

    #[test]
    fn unschedule_removes_entity() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(EntityId(0), 100);
        scheduler.schedule(EntityId(1), 100);

        assert!(scheduler.unschedule(EntityId(0)));
        assert!(!scheduler.unschedule(EntityId(0)));
        assert!(!scheduler.is_scheduled(EntityId(0)));
        assert_eq!(scheduler.upcoming(3), vec![EntityId(1); 3]);
    }

    #[test]
    fn new_scheduler_is_locked_and_not_started() {
        let scheduler = Scheduler::new();
        assert!(scheduler.is_locked());
        assert!(!scheduler.has_started());
        assert!(scheduler.is_empty());
    }
}
