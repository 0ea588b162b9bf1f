use glam::{ivec2, IVec2};

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

/// 4 directions, clock face order.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in taxicab metric.
    fn taxi_len(&self) -> i32;

    /// Squared euclidean length of the vector.
    fn dist2(&self) -> i32;

    /// Unit step from this point towards another one, rounded to the
    /// nearest of the 8 grid directions.
    ///
    /// ```
    /// # use glam::ivec2;
    /// # use util::VecExt;
    ///
    /// assert_eq!(ivec2(0, 0).step_towards(&ivec2(5, 0)), ivec2(1, 0));
    /// assert_eq!(ivec2(0, 0).step_towards(&ivec2(-3, -3)), ivec2(-1, -1));
    /// assert_eq!(ivec2(0, 0).step_towards(&ivec2(2, 1)), ivec2(1, 0));
    /// assert_eq!(ivec2(0, 0).step_towards(&ivec2(0, 0)), ivec2(0, 0));
    /// ```
    fn step_towards(&self, other: &Self) -> Self;
}

impl VecExt for IVec2 {
    fn taxi_len(&self) -> i32 {
        self[0].abs() + self[1].abs()
    }

    fn dist2(&self) -> i32 {
        self[0] * self[0] + self[1] * self[1]
    }

    fn step_towards(&self, other: &Self) -> Self {
        let d = *other - *self;
        if d == IVec2::ZERO {
            return IVec2::ZERO;
        }
        let dist = (d.dist2() as f32).sqrt();
        ivec2(
            (d.x as f32 / dist).round() as i32,
            (d.y as f32 / dist).round() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn step_is_unit(ax: i8, ay: i8, bx: i8, by: i8) -> bool {
        let a = ivec2(ax as i32, ay as i32);
        let b = ivec2(bx as i32, by as i32);
        let s = a.step_towards(&b);
        s.x.abs() <= 1 && s.y.abs() <= 1 && ((a == b) == (s == IVec2::ZERO))
    }

    #[test]
    fn metrics() {
        assert_eq!(ivec2(3, -4).taxi_len(), 7);
        assert_eq!(ivec2(3, -4).dist2(), 25);
        assert_eq!(ivec2(0, 0).dist2(), 0);
    }

    #[test]
    fn steps() {
        // Cardinal and diagonal rays head straight for the target.
        assert_eq!(ivec2(4, 4).step_towards(&ivec2(4, 9)), ivec2(0, 1));
        assert_eq!(ivec2(4, 4).step_towards(&ivec2(9, 9)), ivec2(1, 1));
        assert_eq!(ivec2(4, 4).step_towards(&ivec2(0, 0)), ivec2(-1, -1));

        // Shallow angles round to the dominant axis.
        assert_eq!(ivec2(0, 0).step_towards(&ivec2(5, 1)), ivec2(1, 0));
        assert_eq!(ivec2(0, 0).step_towards(&ivec2(-1, 5)), ivec2(0, 1));

        // In-between angles keep the diagonal component.
        assert_eq!(ivec2(0, 0).step_towards(&ivec2(3, 2)), ivec2(1, 1));
    }

    #[test]
    fn dirs_are_unit_steps() {
        for d in DIR_8 {
            assert!(d.dist2() == 1 || d.dist2() == 2);
            assert_eq!(IVec2::ZERO.step_towards(&d), d);
        }
        for d in DIR_4 {
            assert_eq!(d.taxi_len(), 1);
        }
    }
}
