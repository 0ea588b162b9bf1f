//! Level state and the turn loop that drives it.

use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};
use derive_more::{Deref, DerefMut};
use util::Grid;

use crate::{ecs::*, mapgen::MONSTERS, prelude::*, Placement, FOV_RADIUS};

/// Main data container for the game state.
pub struct World {
    pub(crate) tiles: Grid<Tile>,
    pub(crate) ecs: Ecs,
    pub(crate) placement: Placement,
    pub(crate) player: Option<Entity>,
    /// Commands waiting for the player's next chance to act.
    pub(crate) commands: VecDeque<Command>,
    /// Cells the player has seen at some point.
    pub(crate) seen: HashSet<IVec2>,
    /// Entities that died during the current turn, their scheduler slots
    /// are released once the turn finishes.
    pub(crate) graveyard: Vec<Entity>,
}

impl World {
    fn new(dim: impl Into<IVec2>) -> Self {
        World {
            tiles: Grid::new(dim, Tile::default()),
            ecs: Default::default(),
            placement: Default::default(),
            player: None,
            commands: VecDeque::new(),
            seen: HashSet::default(),
            graveyard: Vec::new(),
        }
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn dim(&self) -> IVec2 {
        self.tiles.dim()
    }

    /// Terrain at the given cell, out of bounds reads as undug space.
    pub fn tile(&self, pos: impl Into<IVec2>) -> Tile {
        self.tiles.get(pos).copied().unwrap_or_default()
    }

    /// Change terrain, refreshing nearby fields of view when the cell's
    /// opacity changes.
    pub fn set_tile(&mut self, pos: impl Into<IVec2>, tile: Tile) {
        let pos = pos.into();
        let Some(cell) = self.tiles.get_mut(pos) else {
            return;
        };
        let opacity_changed = cell.blocks_sight() != tile.blocks_sight();
        *cell = tile;
        if opacity_changed {
            self.refresh_fov_around(pos);
        }
    }

    pub fn blocks_sight(&self, pos: impl Into<IVec2>) -> bool {
        let pos = pos.into();
        self.tile(pos).blocks_sight()
            || self.placement.entities_at(pos).any(|e| e.blocks_sight(self))
    }

    pub fn blocks_movement(&self, pos: impl Into<IVec2>) -> bool {
        !matches!(self.obstacle_at(pos), Obstacle::Clear)
    }

    /// What, if anything, stands in the way at the given cell.
    pub fn obstacle_at(&self, pos: impl Into<IVec2>) -> Obstacle {
        let pos = pos.into();
        if self.tile(pos).blocks_movement() {
            return Obstacle::Terrain;
        }
        if let Some(e) = self
            .placement
            .entities_at(pos)
            .find(|e| e.blocks_movement(self))
        {
            return Obstacle::Entity(e);
        }
        Obstacle::Clear
    }

    /// Return whether the player currently sees the given cell.
    pub fn player_sees(&self, pos: impl Into<IVec2>) -> bool {
        self.player.map_or(false, |p| p.sees(self, pos))
    }

    /// Return whether the player has ever seen the given cell.
    pub fn is_seen(&self, pos: impl Into<IVec2>) -> bool {
        self.seen.contains(&pos.into())
    }

    /// Map glyph for the cell, entities drawn over terrain.
    pub fn glyph(&self, pos: impl Into<IVec2>) -> char {
        let pos = pos.into();
        self.placement
            .entities_at(pos)
            .max_by_key(|e| e.draw_layer(self))
            .map_or_else(|| char::from(self.tile(pos)), |e| e.icon(self))
    }

    /// Flip a door between open and closed, adjusting its obstruction.
    pub fn toggle_door(&mut self, door: Entity) {
        if !door.is_door(self) {
            return;
        }
        let Some(pos) = door.pos(self) else {
            return;
        };

        let open = !door.get::<Door>(self).0;
        let blocker = Blocker {
            blocks_sight: !open,
            blocks_movement: !open,
        };
        let icon = Icon(if open { '/' } else { '+' });
        // Closed is the component's default value, insert directly so the
        // door stays a door.
        if self.ecs.insert(*door, (Door(open), blocker, icon)).is_err() {
            return;
        }

        log::info!("door at {pos} {}", if open { "opens" } else { "closes" });
        self.refresh_fov_around(pos);
    }

    /// Remove an entity from play.
    pub(crate) fn kill(&mut self, e: Entity) {
        let vacated = if e.blocks_sight(self) { e.pos(self) } else { None };
        self.placement.remove(e);
        if self.player == Some(e) {
            self.player = None;
        }
        let _ = self.ecs.despawn(*e);
        self.graveyard.push(e);
        if let Some(pos) = vacated {
            self.refresh_fov_around(pos);
        }
    }
}

impl AsRef<World> for World {
    fn as_ref(&self) -> &World {
        self
    }
}

impl AsMut<World> for World {
    fn as_mut(&mut self) -> &mut World {
        self
    }
}

/// Contents of a cell from a mover's point of view.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Obstacle {
    Clear,
    /// Cell terrain cannot be walked through.
    Terrain,
    /// An entity stands in the cell.
    Entity(Entity),
}

impl Dispatch<Entity> for World {
    fn dispatch(&mut self, actor: Entity) -> Option<i32> {
        if !actor.is_alive(self) {
            log::warn!("dispatch: dead actor in rotation");
            return Some(crate::BASE_ACTION_COST);
        }

        let action = if actor.is_player(self) {
            self.commands.pop_front()?.action()
        } else {
            actor.decide(self)
        };
        Some(actor.execute(self, action))
    }
}

////////////////////////////////

/// Top level game state, a world plus the turn scheduler driving it.
#[derive(Deref, DerefMut)]
pub struct Level {
    #[deref]
    #[deref_mut]
    world: World,
    scheduler: Scheduler<Entity>,
}

impl Level {
    pub fn new(dim: impl Into<IVec2>) -> Self {
        Level {
            world: World::new(dim),
            scheduler: Scheduler::default(),
        }
    }

    /// Build a level from an ASCII map.
    ///
    /// Terrain glyphs are those of `Tile`, `+` and `/` are closed and open
    /// doors, `@` is the player and lowercase letters are monsters, all
    /// standing on floor. Mobs join the rotation in reading order.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> =
            text.lines().filter(|line| !line.is_empty()).collect();
        let height = rows.len() as i32;
        let width =
            rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        if width == 0 || height == 0 {
            bail!("empty map");
        }

        let mut level = Level::new(ivec2(width, height));
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let pos = ivec2(x as i32, y as i32);
                match c {
                    '@' => {
                        level.set_tile(pos, Tile::Floor);
                        level.add_player(pos)?;
                    }
                    '+' => {
                        level.set_tile(pos, Tile::Floor);
                        level.add_door(pos, false)?;
                    }
                    '/' => {
                        level.set_tile(pos, Tile::Floor);
                        level.add_door(pos, true)?;
                    }
                    c if c.is_ascii_lowercase() => {
                        let (name, icon) = MONSTERS
                            .iter()
                            .find(|(_, icon)| *icon == c)
                            .ok_or_else(|| anyhow!("unknown mob glyph {c:?}"))?;
                        level.set_tile(pos, Tile::Floor);
                        level.add_monster(pos, name, *icon)?;
                    }
                    _ => {
                        let tile = Tile::try_from(c).map_err(|_| {
                            anyhow!("unrecognized map glyph {c:?}")
                        })?;
                        level.set_tile(pos, tile);
                    }
                }
            }
        }
        Ok(level)
    }

    /// Render the level with the same glyphs `from_ascii` reads.
    pub fn to_ascii(&self) -> String {
        let dim = self.dim();
        let mut out = String::new();
        for y in 0..dim.y {
            for x in 0..dim.x {
                out.push(self.glyph(ivec2(x, y)));
            }
            out.push('\n');
        }
        out
    }

    /// Put the player on the map and enroll it in the rotation.
    pub fn add_player(&mut self, pos: impl Into<IVec2>) -> Result<Entity> {
        let pos = pos.into();
        if self.world.player.is_some() {
            bail!("player already exists");
        }
        if self.world.blocks_movement(pos) {
            bail!("spawn cell {pos} is blocked");
        }

        let player = Entity(self.world.ecs.spawn((
            Name("player".into()),
            Icon('@'),
            Speed(100),
            Health::new(100),
            Fighter {
                attack: 1,
                defense: 0,
            },
            IsMob(true),
            Blocker {
                blocks_sight: false,
                blocks_movement: true,
            },
            Fov::new(FOV_RADIUS),
        )));
        self.world.player = Some(player);
        player.place(&mut self.world, pos);

        let speed = player.speed(&self.world);
        self.scheduler.add(player, speed)?;
        Ok(player)
    }

    /// Spawn a monster and enroll it in the rotation.
    pub fn add_monster(
        &mut self,
        pos: impl Into<IVec2>,
        name: &str,
        icon: char,
    ) -> Result<Entity> {
        let pos = pos.into();
        if self.world.blocks_movement(pos) {
            bail!("spawn cell {pos} is blocked");
        }

        let mob = Entity(self.world.ecs.spawn((
            Name(name.into()),
            Icon(icon),
            Speed(80),
            Health::new(2),
            Fighter {
                attack: 1,
                defense: 0,
            },
            IsMob(true),
            Blocker {
                blocks_sight: false,
                blocks_movement: true,
            },
        )));
        mob.place(&mut self.world, pos);

        let speed = mob.speed(&self.world);
        self.scheduler.add(mob, speed)?;
        Ok(mob)
    }

    /// Spawn a door. Closed doors block sight and movement.
    pub fn add_door(
        &mut self,
        pos: impl Into<IVec2>,
        open: bool,
    ) -> Result<Entity> {
        let pos = pos.into();
        if self.world.blocks_movement(pos) {
            bail!("spawn cell {pos} is blocked");
        }

        let door = Entity(self.world.ecs.spawn((
            Name("door".into()),
            Icon(if open { '/' } else { '+' }),
            Door(open),
            Blocker {
                blocks_sight: !open,
                blocks_movement: !open,
            },
        )));
        door.place(&mut self.world, pos);
        Ok(door)
    }

    /// Queue a player command for the next time the player gets to act.
    pub fn push_command(&mut self, command: Command) {
        self.world.commands.push_back(command);
    }

    /// Run one actor's turn and bury the dead afterwards.
    pub fn tick(&mut self) -> Tick {
        let ret = self.scheduler.tick(&mut self.world);
        for e in std::mem::take(&mut self.world.graveyard) {
            if self.scheduler.remove(e).is_err() {
                log::warn!("graveyard entity was not scheduled");
            }
        }
        ret
    }

    pub fn scheduler(&self) -> &Scheduler<Entity> {
        &self.scheduler
    }
}

impl AsRef<World> for Level {
    fn as_ref(&self) -> &World {
        &self.world
    }
}

impl AsMut<World> for Level {
    fn as_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
