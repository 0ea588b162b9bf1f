//! Game logic layer machinery.

/// How far can the player see.
pub const FOV_RADIUS: i32 = 10;

/// Energy debited from an actor for one completed action.
pub const BASE_ACTION_COST: i32 = 100;

mod action;
pub use action::Action;

mod ai;
pub use ai::Command;

pub mod ecs;

mod entity;
pub use entity::Entity;

mod fov;
pub use crate::fov::{Fov, Lightmap};

mod level;
pub use level::{Level, Obstacle, World};

pub mod mapgen;

mod placement;
pub use placement::Placement;

pub mod prelude;

mod tile;
pub use tile::Tile;

mod time;
pub use time::{Dispatch, Scheduler, Tick};
