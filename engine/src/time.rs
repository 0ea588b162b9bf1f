//! Turn scheduling.

use std::{collections::VecDeque, fmt};

use anyhow::{bail, Result};

/// Outcome of a single scheduler tick.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Tick {
    /// The rotation is empty, nothing happened.
    Idle,
    /// The head actor finished its turn.
    Acted,
    /// The head actor has energy to spend but its controller produced no
    /// action. Tick again once input has arrived.
    AwaitingInput,
}

/// Controller that turns a scheduled actor into a performed action.
///
/// Return the energy cost of the action performed, or `None` when the actor
/// cannot act yet, such as a player with an empty command queue. Costs must
/// be positive.
pub trait Dispatch<A> {
    fn dispatch(&mut self, actor: A) -> Option<i32>;
}

impl<A, F: FnMut(A) -> Option<i32>> Dispatch<A> for F {
    fn dispatch(&mut self, actor: A) -> Option<i32> {
        self(actor)
    }
}

#[derive(Copy, Clone, Debug)]
struct Slot<A> {
    actor: A,
    speed: i32,
    energy: i32,
}

/// Round-robin energy scheduler.
///
/// Each tick moves the head actor to the tail of the rotation, grants it one
/// helping of energy equal to its speed, and lets it act until the energy
/// runs out. Energy deficits carry over, so an actor with twice the speed of
/// another performs twice the actions over time.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    rotation: VecDeque<Slot<A>>,
    /// Actor whose turn stopped in `AwaitingInput`, resumed by the next
    /// tick without a new rotation or energy grant.
    suspended: Option<A>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Scheduler {
            rotation: VecDeque::new(),
            suspended: None,
        }
    }
}

impl<A: Copy + Eq + fmt::Debug> Scheduler<A> {
    /// Enroll an actor at the tail of the rotation with zero energy.
    pub fn add(&mut self, actor: A, speed: i32) -> Result<()> {
        if self.contains(actor) {
            bail!("{actor:?} is already in the rotation");
        }
        debug_assert!(speed > 0, "non-positive speed {speed}");
        self.rotation.push_back(Slot {
            actor,
            speed,
            energy: 0,
        });
        Ok(())
    }

    /// Drop an actor from the rotation, clearing its suspended turn if it
    /// had one.
    pub fn remove(&mut self, actor: A) -> Result<()> {
        let Some(idx) = self.rotation.iter().position(|s| s.actor == actor) else {
            bail!("{actor:?} is not in the rotation");
        };
        self.rotation.remove(idx);
        if self.suspended == Some(actor) {
            self.suspended = None;
        }
        Ok(())
    }

    /// Run one actor's turn.
    ///
    /// The dispatcher is consulted for every action while the actor has
    /// energy left. A `None` from the dispatcher suspends the turn with the
    /// energy balance intact.
    pub fn tick(&mut self, dispatcher: &mut impl Dispatch<A>) -> Tick {
        let actor = match self.suspended.take() {
            Some(actor) => actor,
            None => {
                if self.rotation.is_empty() {
                    return Tick::Idle;
                }
                self.rotation.rotate_left(1);
                let tail = self.rotation.len() - 1;
                let slot = &mut self.rotation[tail];
                slot.energy += slot.speed;
                slot.actor
            }
        };

        loop {
            match self.energy(actor) {
                // An actor gone from the rotation is done for the turn.
                None => return Tick::Acted,
                Some(energy) if energy <= 0 => return Tick::Acted,
                Some(_) => {}
            }
            match dispatcher.dispatch(actor) {
                None => {
                    self.suspended = Some(actor);
                    return Tick::AwaitingInput;
                }
                Some(cost) => {
                    debug_assert!(cost > 0, "non-positive action cost {cost}");
                    if let Some(slot) =
                        self.rotation.iter_mut().find(|s| s.actor == actor)
                    {
                        slot.energy -= cost;
                    }
                }
            }
        }
    }

    /// Current energy balance of an enrolled actor.
    pub fn energy(&self, actor: A) -> Option<i32> {
        self.rotation
            .iter()
            .find(|s| s.actor == actor)
            .map(|s| s.energy)
    }

    pub fn contains(&self, actor: A) -> bool {
        self.rotation.iter().any(|s| s.actor == actor)
    }

    pub fn len(&self) -> usize {
        self.rotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotation.is_empty()
    }
}
