/// Light attenuation policy over squared distances.
pub trait Falloff {
    /// Intensity in (0, 1] for a lit cell at squared distance `dist2` from
    /// the origin, given the squared sight radius `radius2`.
    fn intensity(&self, dist2: i32, radius2: i32) -> f32;
}

/// Default attenuation, intensity drops linearly in the squared distance.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Falloff for Linear {
    fn intensity(&self, dist2: i32, radius2: i32) -> f32 {
        1.0 - dist2 as f32 / radius2 as f32
    }
}

/// No attenuation, every visible cell is fully lit.
#[derive(Copy, Clone, Debug, Default)]
pub struct Flat;

impl Falloff for Flat {
    fn intensity(&self, _dist2: i32, _radius2: i32) -> f32 {
        1.0
    }
}
