//! Excavating new levels.

use anyhow::{bail, Result};
use rand::prelude::*;
use util::RngExt;

use crate::prelude::*;

/// Hard cap on rooms dug into one level.
const MAX_ROOMS: usize = 100;

/// Room edge length range, outer walls included.
const ROOM_SIZE: std::ops::RangeInclusive<i32> = 7..=12;

/// Chance for a gate between two rooms to get a door.
const DOOR_CHANCE: f64 = 0.75;

/// Chance for a generated door to start out open.
const OPEN_DOOR_CHANCE: f64 = 0.1;

/// Mob types that show up in the catacombs.
pub(crate) const MONSTERS: &[(&str, char)] =
    &[("orc", 'o'), ("goblin", 'g'), ("rat", 'r')];

/// Footprint of a dug room, outer walls included.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Room {
    pub pos: IVec2,
    pub dim: IVec2,
}

impl Room {
    pub fn center(&self) -> IVec2 {
        self.pos + self.dim / 2
    }

    /// Random cell inside the walls.
    fn interior(&self, rng: &mut (impl Rng + ?Sized)) -> IVec2 {
        self.pos
            + ivec2(
                rng.gen_range(1..self.dim.x - 1),
                rng.gen_range(1..self.dim.y - 1),
            )
    }
}

/// Dig a dungeon of walled rooms into an undug level.
///
/// Rooms grow outward from a seed room in the middle and get joined by
/// gates punched through the shared double wall. Most gates carry a
/// closed door, the occasional one stands open. Output is deterministic
/// for a fixed RNG state.
pub fn generate(
    level: &mut Level,
    rng: &mut (impl Rng + ?Sized),
) -> Result<Vec<Room>> {
    let dim = level.dim();
    let mut rooms = Vec::new();

    let size = room_size(rng);
    let seed = Room {
        pos: (dim - size) / 2,
        dim: size,
    };
    if !has_space(level, &seed) {
        bail!("{}x{} level is too small for a room", dim.x, dim.y);
    }
    dig(level, &seed);
    rooms.push(seed);

    for _ in 0..(dim.x * dim.y * 2) {
        if rooms.len() >= MAX_ROOMS {
            break;
        }

        let src = rooms[rng.gen_range(0..rooms.len())];
        let dir = DIR_4[rng.gen_range(0..DIR_4.len())];
        let size = room_size(rng);

        // Gate cell on the source room's wall, biased towards the middle
        // of the wall. The new room goes on the far side of the gate,
        // placed so the gate lands between its own interior columns or
        // rows.
        let (gate, pos) = match (dir.x, dir.y) {
            (0, -1) => {
                let gate = ivec2(
                    rng.triangular(src.pos.x + 1, src.pos.x + src.dim.x - 2),
                    src.pos.y,
                );
                (
                    gate,
                    ivec2(
                        gate.x - rng.triangular(1, size.x - 2),
                        gate.y - size.y,
                    ),
                )
            }
            (0, 1) => {
                let gate = ivec2(
                    rng.triangular(src.pos.x + 1, src.pos.x + src.dim.x - 2),
                    src.pos.y + src.dim.y - 1,
                );
                (
                    gate,
                    ivec2(gate.x - rng.triangular(1, size.x - 2), gate.y + 1),
                )
            }
            (-1, 0) => {
                let gate = ivec2(
                    src.pos.x,
                    rng.triangular(src.pos.y + 1, src.pos.y + src.dim.y - 2),
                );
                (
                    gate,
                    ivec2(
                        gate.x - size.x,
                        gate.y - rng.triangular(1, size.y - 2),
                    ),
                )
            }
            _ => {
                let gate = ivec2(
                    src.pos.x + src.dim.x - 1,
                    rng.triangular(src.pos.y + 1, src.pos.y + src.dim.y - 2),
                );
                (
                    gate,
                    ivec2(gate.x + 1, gate.y - rng.triangular(1, size.y - 2)),
                )
            }
        };

        let room = Room { pos, dim: size };
        if has_space(level, &room) {
            dig(level, &room);
            connect(level, gate, dir, rng)?;
            rooms.push(room);
        }
    }

    Ok(rooms)
}

/// Drop the player and a scattering of monsters into the dug rooms.
///
/// The player starts at the center of a random room. Spawn cells that
/// turn out to be taken are skipped, so sparsely populated levels are
/// normal.
pub fn populate(
    level: &mut Level,
    rooms: &[Room],
    rng: &mut (impl Rng + ?Sized),
) -> Result<Entity> {
    if rooms.is_empty() {
        bail!("no rooms to populate");
    }

    let start = rooms[rng.gen_range(0..rooms.len())];
    let player = level.add_player(start.center())?;

    for room in rooms {
        for _ in 0..rng.gen_range(0..=3) {
            let pos = room.interior(rng);
            if level.blocks_movement(pos) {
                continue;
            }
            let (name, icon) = MONSTERS[rng.gen_range(0..MONSTERS.len())];
            level.add_monster(pos, name, icon)?;
        }
    }

    Ok(player)
}

fn room_size(rng: &mut (impl Rng + ?Sized)) -> IVec2 {
    ivec2(rng.gen_range(ROOM_SIZE), rng.gen_range(ROOM_SIZE))
}

/// Check that the room lies in bounds and over entirely undug ground.
fn has_space(level: &Level, room: &Room) -> bool {
    let dim = level.dim();
    if room.pos.x < 0
        || room.pos.y < 0
        || room.pos.x + room.dim.x > dim.x
        || room.pos.y + room.dim.y > dim.y
    {
        return false;
    }

    (0..room.dim.y).all(|y| {
        (0..room.dim.x)
            .all(|x| level.tile(room.pos + ivec2(x, y)) == Tile::Empty)
    })
}

fn dig(level: &mut Level, room: &Room) {
    for y in 0..room.dim.y {
        for x in 0..room.dim.x {
            let on_wall =
                x == 0 || y == 0 || x == room.dim.x - 1 || y == room.dim.y - 1;
            let tile = if on_wall { Tile::Wall } else { Tile::Floor };
            level.set_tile(room.pos + ivec2(x, y), tile);
        }
    }
}

/// Open a passage through the double wall at the gate cell.
fn connect(
    level: &mut Level,
    gate: IVec2,
    dir: IVec2,
    rng: &mut (impl Rng + ?Sized),
) -> Result<()> {
    let tunnel = [gate, gate + dir];
    for p in tunnel {
        level.set_tile(p, Tile::Floor);
    }

    if rng.gen_bool(DOOR_CHANCE) {
        let open = rng.gen_bool(OPEN_DOOR_CHANCE);
        level.add_door(tunnel[rng.gen_range(0..tunnel.len())], open)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use util::srng;

    use super::*;

    fn dug(seed: u64) -> (Level, Vec<Room>) {
        let mut rng = srng(&seed);
        let mut level = Level::new([48, 48]);
        let rooms = generate(&mut level, &mut rng).unwrap();
        (level, rooms)
    }

    #[test]
    fn rooms_stay_in_bounds_and_apart() {
        for seed in 0..4u64 {
            let (level, rooms) = dug(seed);
            assert!(rooms.len() > 1);
            for (i, room) in rooms.iter().enumerate() {
                assert!(room.pos.x >= 0 && room.pos.y >= 0);
                let far = room.pos + room.dim;
                assert!(far.x <= level.dim().x && far.y <= level.dim().y);
                for other in &rooms[i + 1..] {
                    assert!(!overlaps(room, other), "{room:?} and {other:?}");
                }
            }
        }
    }

    fn overlaps(a: &Room, b: &Room) -> bool {
        a.pos.x < b.pos.x + b.dim.x
            && b.pos.x < a.pos.x + a.dim.x
            && a.pos.y < b.pos.y + b.dim.y
            && b.pos.y < a.pos.y + a.dim.y
    }

    #[test]
    fn rooms_are_connected() {
        for seed in 0..4u64 {
            let (level, rooms) = dug(seed);

            // Flood fill over walkable terrain. Door entities don't
            // block here since gates are dug into floor.
            let mut open = vec![rooms[0].center()];
            let mut reached = HashSet::default();
            while let Some(pos) = open.pop() {
                if !reached.insert(pos) {
                    continue;
                }
                for dir in DIR_4 {
                    let next = pos + dir;
                    if level.tile(next).is_walkable()
                        && !reached.contains(&next)
                    {
                        open.push(next);
                    }
                }
            }

            for room in &rooms {
                assert!(reached.contains(&room.center()), "stranded {room:?}");
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let (a, rooms_a) = dug(123);
        let (b, rooms_b) = dug(123);
        assert_eq!(rooms_a, rooms_b);
        assert_eq!(a.to_ascii(), b.to_ascii());
    }

    #[test]
    fn doors_sit_on_dug_gates() {
        for seed in 0..4u64 {
            let (level, _) = dug(seed);
            for e in level.ecs.iter() {
                if e.is_door(&level) {
                    let pos = e.pos(&level).unwrap();
                    assert_eq!(level.tile(pos), Tile::Floor);
                }
            }
        }
    }

    #[test]
    fn tiny_level_is_rejected() {
        let mut rng = srng(&1u64);
        let mut level = Level::new([6, 6]);
        assert!(generate(&mut level, &mut rng).is_err());
    }

    #[test]
    fn population_places_the_player() {
        let mut rng = srng(&7u64);
        let mut level = Level::new([48, 48]);
        let rooms = generate(&mut level, &mut rng).unwrap();
        let player = populate(&mut level, &rooms, &mut rng).unwrap();

        assert_eq!(level.player(), Some(player));
        assert!(player.is_player(&level));
        let pos = player.pos(&level).unwrap();
        assert_eq!(level.tile(pos), Tile::Floor);
        // The player's light is computed on placement.
        assert!(level.player_sees(pos + ivec2(1, 0)));
    }
}
