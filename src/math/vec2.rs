use std::ops::*;

use super::Vec2;

impl<T> Neg for Vec2<T>
where
    T: Neg<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn neg(self) -> Vec2<T> {
        Vec2::<T> {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T> Add for Vec2<T>
where
    T: Add<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn add(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T> AddAssign for Vec2<T>
where
    T: Add<Output = T> + Copy,
{
    fn add_assign(&mut self, other: Vec2<T>) {
        *self = *self + other;
    }
}

impl<T> Sub for Vec2<T>
where
    T: Sub<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn sub(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> SubAssign for Vec2<T>
where
    T: Sub<Output = T> + Copy,
{
    fn sub_assign(&mut self, other: Vec2<T>) {
        *self = *self - other;
    }
}

// Complex product, used for rotations.
impl<T> Mul<Vec2<T>> for Vec2<T>
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn mul(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x * other.x - self.y * other.y,
            y: self.x * other.y + self.y * other.x,
        }
    }
}

impl<T> Mul<T> for Vec2<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Vec2<T>;

    fn mul(self, other: T) -> Vec2<T> {
        Vec2::<T> {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl<T> Vec2<T>
where
    T: Copy + Neg<Output = T>,
{
    pub fn conj(self) -> Vec2<T> {
        Vec2::<T> {
            x: self.x,
            y: -self.y,
        }
    }
}

impl Vec2<f32> {
    pub const fn new(x: f32, y: f32) -> Vec2<f32> {
        Vec2::<f32> { x, y }
    }

    pub const fn zero() -> Vec2<f32> {
        Vec2::<f32> { x: 0.0, y: 0.0 }
    }

    pub const fn splat(v: f32) -> Vec2<f32> {
        Vec2::<f32> { x: v, y: v }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f32) -> Vec2<f32> {
        let (y, x) = angle.sin_cos();
        Vec2::<f32> { x, y }
    }

    pub fn mag(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn dot(self, other: Vec2<f32>) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn center(self) -> Vec2<f32> {
        Vec2::<f32> {
            x: self.x / 2.0,
            y: self.y / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_by_conjugate_undoes_rotation() {
        let v = Vec2::new(0.3, -0.8);
        let n = Vec2::from_angle(1.1);

        let back = (v * n.conj()) * n;

        assert!((back.x - v.x).abs() < 1e-6);
        assert!((back.y - v.y).abs() < 1e-6);
    }

    #[test]
    fn complex_product_rotates_quarter_turn() {
        let v = Vec2::new(1.0, 0.0) * Vec2::from_angle(std::f32::consts::FRAC_PI_2);

        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mag_of_three_four() {
        assert!((Vec2::new(3.0, 4.0).mag() - 5.0).abs() < 1e-6);
    }
}
