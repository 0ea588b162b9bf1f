//! Mobs figuring out what to do on their own.
use crate::prelude::*;

impl Entity {
    /// Decide on the next action on the mob's own initiative.
    pub fn decide(&self, r: &impl AsRef<World>) -> Action {
        let r = r.as_ref();

        let Some(pos) = self.pos(r) else {
            return Action::Wait;
        };
        let Some(player) = r.player() else {
            return Action::Wait;
        };
        let Some(player_pos) = player.pos(r) else {
            return Action::Wait;
        };

        // Lurk until the player's light reaches the mob.
        if !player.sees(r, pos) {
            return Action::Wait;
        }

        if (player_pos - pos).dist2() <= 2 {
            return Action::Attack(player);
        }

        // March straight at the player, terrain be damned.
        Action::Bump(pos.step_towards(&player_pos))
    }

    pub fn is_enemy(&self, r: &impl AsRef<World>, other: &Entity) -> bool {
        self.is_player(r) != other.is_player(r)
    }
}

/// Player input, queued up until the player's turn comes around.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    Wait,
    Move(IVec2),
}

impl Command {
    pub(crate) fn action(self) -> Action {
        match self {
            Command::Wait => Action::Wait,
            Command::Move(dir) => Action::Bump(dir),
        }
    }
}
