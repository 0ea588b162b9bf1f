use std::ops::{Index, IndexMut};

use glam::{ivec2, IVec2};

/// Dense 2D array addressed by integer vectors.
///
/// Positions outside the `[0, dim)` rectangle are not stored, accessors
/// answer `None` for them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid<T> {
    dim: IVec2,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(dim: impl Into<IVec2>, init: T) -> Self {
        let dim = dim.into();
        assert!(dim.x > 0 && dim.y > 0, "degenerate grid");
        Grid {
            dim,
            data: vec![init; (dim.x * dim.y) as usize],
        }
    }
}

impl<T> Grid<T> {
    pub fn dim(&self) -> IVec2 {
        self.dim
    }

    pub fn contains(&self, pos: impl Into<IVec2>) -> bool {
        let pos = pos.into();
        pos.x >= 0 && pos.x < self.dim.x && pos.y >= 0 && pos.y < self.dim.y
    }

    pub fn get(&self, pos: impl Into<IVec2>) -> Option<&T> {
        let pos = pos.into();
        self.contains(pos).then(|| &self.data[self.idx(pos)])
    }

    pub fn get_mut(&mut self, pos: impl Into<IVec2>) -> Option<&mut T> {
        let pos = pos.into();
        if self.contains(pos) {
            let i = self.idx(pos);
            Some(&mut self.data[i])
        } else {
            None
        }
    }

    /// Iterate cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        let w = self.dim.x;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, c)| (ivec2(i as i32 % w, i as i32 / w), c))
    }

    fn idx(&self, pos: IVec2) -> usize {
        (pos.y * self.dim.x + pos.x) as usize
    }
}

impl<T> Index<IVec2> for Grid<T> {
    type Output = T;

    fn index(&self, pos: IVec2) -> &T {
        self.get(pos).expect("Grid: position out of bounds")
    }
}

impl<T> IndexMut<IVec2> for Grid<T> {
    fn index_mut(&mut self, pos: IVec2) -> &mut T {
        self.get_mut(pos).expect("Grid: position out of bounds")
    }
}
