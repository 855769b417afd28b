//! Turn dispatch.
//!
//! [`GameEngine`] borrows a [`Map`] (which owns the [`Scheduler`]) and an RNG
//! for the duration of one call. `start` and `unlock` dispatch turns in speed
//! order until the human actor is granted a turn, at which point the engine
//! locks and returns. Nothing runs again until the next `unlock`.

mod errors;
mod scheduler;

pub use errors::TurnError;
pub use scheduler::{BASE_TURN_DELAY, EngineState, ScheduledTurn, Scheduler, turn_delay};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::entity::Behavior;
use crate::map::{Map, MoveOutcome};
use crate::types::{CardinalDirection, EntityId, Tick};

/// What an entity did with a granted turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Human actor's turn; the engine is now locked until input arrives.
    AwaitingInput,
    /// The entity attempted a step; the outcome says whether it moved.
    Step(MoveOutcome),
    /// The entity spent its turn idle.
    Waited,
}

/// One dispatched turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub entity: EntityId,
    pub clock: Tick,
    pub action: TurnAction,
}

/// Engine facade over a map and the randomness its actors consume.
pub struct GameEngine<'a, R: Rng + ?Sized> {
    map: &'a mut Map,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> GameEngine<'a, R> {
    pub fn new(map: &'a mut Map, rng: &'a mut R) -> Self {
        Self { map, rng }
    }

    pub fn state(&self) -> EngineState {
        self.map.scheduler().state()
    }

    pub fn is_locked(&self) -> bool {
        self.map.scheduler().is_locked()
    }

    /// Leaves the initial locked state and dispatches until the human actor's turn.
    pub fn start(&mut self) -> Result<Vec<TurnRecord>, TurnError> {
        if self.map.scheduler().has_started() {
            return Err(TurnError::AlreadyStarted);
        }

        tracing::debug!(entities = self.map.entities().len(), "starting turn engine");
        self.dispatch()
    }

    /// Resumes dispatch after the human actor's turn has been resolved.
    pub fn unlock(&mut self) -> Result<Vec<TurnRecord>, TurnError> {
        let scheduler = self.map.scheduler();
        if !scheduler.has_started() {
            return Err(TurnError::NotStarted);
        }
        if !scheduler.is_locked() {
            return Err(TurnError::NotLocked);
        }

        tracing::debug!(clock = %scheduler.clock(), "unlocking turn engine");
        self.dispatch()
    }

    fn dispatch(&mut self) -> Result<Vec<TurnRecord>, TurnError> {
        if self.map.player().is_none() {
            return Err(TurnError::NoHumanActor);
        }

        self.map.scheduler_mut().run();
        let mut records = Vec::new();

        loop {
            let Some(turn) = self.map.scheduler_mut().next() else {
                self.map.scheduler_mut().lock();
                return Err(TurnError::NoActiveEntities);
            };

            let Some(behavior) = self.map.entity(turn.entity).map(|e| e.behavior()) else {
                self.map.scheduler_mut().lock();
                return Err(TurnError::UnknownEntity(turn.entity));
            };

            let action = self.act(turn.entity, behavior);
            tracing::trace!(entity = %turn.entity, clock = %turn.ready_at, ?action, "turn");
            records.push(TurnRecord {
                entity: turn.entity,
                clock: turn.ready_at,
                action,
            });

            if action == TurnAction::AwaitingInput {
                self.map.scheduler_mut().lock();
                return Ok(records);
            }
        }
    }

    fn act(&mut self, entity: EntityId, behavior: Behavior) -> TurnAction {
        match behavior {
            Behavior::Player => TurnAction::AwaitingInput,
            Behavior::Wanderer => {
                let direction = CardinalDirection::ALL
                    .choose(&mut *self.rng)
                    .copied()
                    .unwrap_or(CardinalDirection::North);
                let (dx, dy) = direction.delta();
                TurnAction::Step(self.map.try_move_by(entity, dx, dy))
            }
            Behavior::Stationary => TurnAction::Waited,
        }
    }
}
