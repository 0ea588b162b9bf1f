//! Line of sight and map reveal logic.

use derive_more::{Deref, DerefMut};
use fov::ShadowCaster;

use crate::prelude::*;

/// Light intensity perceived in each visible cell.
#[derive(Clone, Debug, Default, PartialEq, Deref, DerefMut)]
pub struct Lightmap(HashMap<IVec2, f32>);

/// Sight of an entity.
///
/// The lightmap holds every cell the entity currently sees and fades with
/// distance from the entity. It is rebuilt whenever the entity moves or the
/// terrain around it changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fov {
    pub radius: i32,
    pub lightmap: Lightmap,
}

impl Fov {
    pub fn new(radius: i32) -> Self {
        Fov {
            radius,
            lightmap: Lightmap::default(),
        }
    }
}

impl World {
    /// Rebuild an entity's lightmap from its current position.
    ///
    /// Does nothing for entities that have no sight. The entity's own cell
    /// is always lit at full intensity.
    pub fn refresh_fov(&mut self, e: Entity) {
        if !self.ecs.satisfies::<&Fov>(*e).unwrap_or(false) {
            return;
        }
        let Some(origin) = e.pos(self) else {
            return;
        };
        let radius = e.with(self, |fov: &Fov| fov.radius);

        let mut lightmap = Lightmap::default();
        lightmap.insert(origin, 1.0);
        {
            let r = &*self;
            let mut caster = ShadowCaster::new(
                |x, y| r.blocks_sight(ivec2(x, y)),
                |x, y, intensity| {
                    lightmap.insert(ivec2(x, y), intensity);
                },
            );
            caster.calculate_light(origin.x, origin.y, radius);
        }

        if e.is_player(self) {
            let tiles = &self.tiles;
            self.seen
                .extend(lightmap.keys().filter(|&&p| tiles.contains(p)));
        }
        e.set(self, Fov { radius, lightmap });
    }

    /// Refresh every sighted entity whose field of view can reach the given
    /// cell.
    pub(crate) fn refresh_fov_around(&mut self, pos: IVec2) {
        let mut sighted = Vec::new();
        for (he, fov) in self.ecs.query::<&Fov>().iter() {
            sighted.push((Entity(he), fov.radius));
        }
        for (e, radius) in sighted {
            let Some(origin) = e.pos(self) else {
                continue;
            };
            if (pos - origin).dist2() < radius * radius {
                self.refresh_fov(e);
            }
        }
    }
}
