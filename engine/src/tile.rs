/// Specific terrain in a single game world map cell.
///
/// ```
/// use engine::Tile;
///
/// assert_eq!(Tile::try_from('#'), Ok(Tile::Wall));
/// assert!(Tile::Wall.blocks_sight());
/// assert!(Tile::Floor.is_walkable());
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub enum Tile {
    /// Undug space outside the excavated level.
    #[default]
    Empty,
    Wall,
    Floor,
}

use Tile::*;

impl Tile {
    pub fn blocks_sight(self) -> bool {
        matches!(self, Empty | Wall)
    }

    pub fn blocks_movement(self) -> bool {
        matches!(self, Empty | Wall)
    }

    pub fn is_walkable(self) -> bool {
        !self.blocks_movement()
    }
}

impl TryFrom<char> for Tile {
    type Error = &'static str;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            ' ' => Ok(Empty),
            '#' => Ok(Wall),
            '.' => Ok(Floor),
            _ => Err("invalid terrain char"),
        }
    }
}

impl From<Tile> for char {
    fn from(val: Tile) -> Self {
        // NB. This must match Tile's TryFrom inputs above.
        match val {
            Empty => ' ',
            Wall => '#',
            Floor => '.',
        }
    }
}
