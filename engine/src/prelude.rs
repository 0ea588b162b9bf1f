pub use crate::{
    Action, Command, Dispatch, Entity, Fov, Level, Lightmap, Obstacle,
    Scheduler, Tick, Tile, World,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashMap, HashSet, VecExt, DIR_4, DIR_8};
