//! Entity component system and the game's component set.

use derive_more::{Deref, DerefMut};

use crate::prelude::*;

/// Obstruction imposed on a cell by the entity standing in it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Blocker {
    pub blocks_sight: bool,
    pub blocks_movement: bool,
}

/// Openable barrier, payload is whether it stands open.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Door(pub bool);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Fighter {
    /// Damage dealt with a landed blow.
    pub attack: i32,
    /// Damage soaked from incoming blows.
    pub defense: i32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Health { hp: max, max }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Icon(pub char);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct IsMob(pub bool);

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Name(pub String);

/// Energy granted per full turn of the scheduler rotation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Speed(pub i32);

////////////////////////////////

/// Entity component system. Stores all the data of game entities.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);

impl Ecs {
    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (&self.0).into_iter().map(|he| Entity(he.entity()))
    }
}
