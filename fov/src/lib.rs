//! Generic field-of-view computation.

mod caster;
pub use caster::ShadowCaster;

mod falloff;
pub use falloff::{Falloff, Flat, Linear};
