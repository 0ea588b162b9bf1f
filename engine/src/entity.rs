//! Generic entity logic.
use derive_more::Deref;
use hecs::Component;

use crate::{ecs::*, prelude::*};

// Wrapper type so entity methods can be written as direct impls instead of a
// trait on hecs::Entity.
/// Game entity identifier datatype. All the actual contents live in the ECS.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug, Deref)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<World>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<World>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else {
            r.ecs.insert_one(**self, val).expect("Entity::set failed");
        }
    }

    /// Access a component using a closure.
    ///
    /// Use for complex components that aren't just atomic values.
    pub(crate) fn with<T: Component + Default, U>(
        &self,
        r: &impl AsRef<World>,
        f: impl Fn(&T) -> U,
    ) -> U {
        let r = r.as_ref();
        let scratch = T::default();
        if let Ok(c) = r.ecs.get::<&T>(**self) {
            f(&*c)
        } else {
            f(&scratch)
        }
    }

    pub fn pos(&self, r: &impl AsRef<World>) -> Option<IVec2> {
        r.as_ref().placement.pos_of(*self)
    }

    /// Put the entity on the map, detaching it from any previous cell.
    pub fn place(&self, r: &mut impl AsMut<World>, pos: impl Into<IVec2>) {
        let r = r.as_mut();
        let pos = pos.into();
        r.placement.insert(pos, *self);
        r.refresh_fov(*self);
        // An opaque entity arriving in a cell changes lines of sight the
        // same way terrain edits do.
        if self.blocks_sight(r) {
            r.refresh_fov_around(pos);
        }
    }

    pub fn icon(&self, r: &impl AsRef<World>) -> char {
        match self.get::<Icon>(r) {
            Icon('\0') => '�',
            Icon(c) => c,
        }
    }

    /// Mobs draw over doors and other scenery.
    pub fn draw_layer(&self, r: &impl AsRef<World>) -> i32 {
        if self.is_mob(r) {
            return 1;
        }
        0
    }

    pub fn name(&self, r: &impl AsRef<World>) -> String {
        self.get::<Name>(r).0
    }

    pub fn is_alive(&self, r: &impl AsRef<World>) -> bool {
        self.pos(r).is_some()
    }

    pub fn is_player(&self, r: &impl AsRef<World>) -> bool {
        r.as_ref().player() == Some(*self)
    }

    pub fn is_mob(&self, r: &impl AsRef<World>) -> bool {
        self.get::<IsMob>(r).0
    }

    pub fn is_door(&self, r: &impl AsRef<World>) -> bool {
        r.as_ref().ecs.satisfies::<&Door>(**self).unwrap_or(false)
    }

    pub fn blocks_sight(&self, r: &impl AsRef<World>) -> bool {
        self.get::<Blocker>(r).blocks_sight
    }

    pub fn blocks_movement(&self, r: &impl AsRef<World>) -> bool {
        self.get::<Blocker>(r).blocks_movement
    }

    pub fn hp(&self, r: &impl AsRef<World>) -> i32 {
        self.get::<Health>(r).hp
    }

    pub(crate) fn speed(&self, r: &impl AsRef<World>) -> i32 {
        self.get::<Speed>(r).0
    }

    /// Return whether the entity's field of view reaches the given cell.
    pub fn sees(&self, r: &impl AsRef<World>, pos: impl Into<IVec2>) -> bool {
        let pos = pos.into();
        self.with(r, |fov: &Fov| fov.lightmap.contains_key(&pos))
    }

    /// Light intensity the entity perceives at the given cell, zero when
    /// out of sight.
    pub fn light_at(&self, r: &impl AsRef<World>, pos: impl Into<IVec2>) -> f32 {
        let pos = pos.into();
        self.with(r, |fov: &Fov| {
            fov.lightmap.get(&pos).copied().unwrap_or(0.0)
        })
    }
}
