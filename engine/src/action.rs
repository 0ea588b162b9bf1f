//! Entities doing things

use crate::{ecs::*, prelude::*, BASE_ACTION_COST};

impl Entity {
    /// Carry out an action, returning its energy cost.
    ///
    /// Actions that fail to accomplish anything still consume the turn.
    pub fn execute(&self, r: &mut impl AsMut<World>, action: Action) -> i32 {
        use Action::*;
        let r = r.as_mut();

        match action {
            Wait => {}
            Bump(dir) => self.bump(r, dir),
            Attack(target) => self.attack(r, target),
        }
        action.cost()
    }

    /// Step towards the given direction, interacting with whatever is in
    /// the way.
    fn bump(&self, r: &mut impl AsMut<World>, dir: IVec2) {
        let r = r.as_mut();
        debug_assert!(
            dir != IVec2::ZERO && dir.x.abs() <= 1 && dir.y.abs() <= 1,
            "bad step {dir}"
        );

        let Some(pos) = self.pos(r) else { return };
        let dest = pos + dir;

        match r.obstacle_at(dest) {
            Obstacle::Clear => self.place(r, dest),
            Obstacle::Entity(e) if e.is_door(r) => r.toggle_door(e),
            Obstacle::Entity(e) if e.is_mob(r) && self.is_enemy(r, &e) => {
                self.attack(r, e)
            }
            // Walked into a wall or a friend, the turn is wasted.
            Obstacle::Entity(_) | Obstacle::Terrain => {}
        }
    }

    fn attack(&self, r: &mut impl AsMut<World>, target: Entity) {
        let r = r.as_mut();

        let dmg = self.get::<Fighter>(r).attack - target.get::<Fighter>(r).defense;
        target.take_damage(r, *self, dmg.max(0));
    }

    pub(crate) fn take_damage(
        &self,
        r: &mut impl AsMut<World>,
        attacker: Entity,
        amount: i32,
    ) {
        let r = r.as_mut();

        if amount <= 0 {
            log::info!(
                "{} hits {} but does no damage",
                attacker.name(r),
                self.name(r)
            );
            return;
        }

        let mut health = self.get::<Health>(r);
        health.hp -= amount;
        self.set(r, health);
        log::info!(
            "{} hits {} for {} damage",
            attacker.name(r),
            self.name(r),
            amount
        );

        if health.hp <= 0 {
            self.die(r);
        }
    }

    fn die(&self, r: &mut impl AsMut<World>) {
        let r = r.as_mut();
        log::info!("{} dies", self.name(r));
        r.kill(*self);
    }
}

/// Atomic single-turn actions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Action {
    Wait,
    // Step into the given direction, or interact with whatever is in the
    // way, opening doors and attacking mobs.
    Bump(IVec2),
    // Direct melee attack on a target that is already in reach.
    Attack(Entity),
}

impl Action {
    /// Energy debited from the actor when the action completes.
    pub fn cost(self) -> i32 {
        BASE_ACTION_COST
    }
}
