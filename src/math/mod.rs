pub mod ease;
pub mod rng;
mod vec2;

/// Two component vector. Doubles as a complex number where
/// rotation is needed, `x` being the real part.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
