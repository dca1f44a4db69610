use std::ops::{Add, Mul, Neg, Sub};

/// A point or direction in world space (x, y), measured in tiles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    #[inline]
    pub fn unit(self) -> Option<Vec2> {
        let m = self.magnitude();
        if m == 0.0 { None } else { Some(self * (1.0 / m)) }
    }

    /// Counter-clockwise rotation by `t` radians
    #[inline]
    pub fn rotate(self, t: f32) -> Vec2 {
        let (s, c) = t.sin_cos();
        Vec2 {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }

    #[inline]
    pub fn rotate90(self) -> Vec2 {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }

    /// dy/dx. Infinite (or NaN) for vertical vectors, callers must special-case `x == 0`.
    #[inline]
    pub fn slope(self) -> f32 {
        self.y / self.x
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, n: f32) -> Vec2 {
        Vec2::new(self.x * n, self.y * n)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Ordered pair of points. Used for the camera plane and for player-to-hit traces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    #[inline]
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn rotate(self, t: f32) -> Segment {
        Segment::new(self.a.rotate(t), self.b.rotate(t))
    }

    /// Point at fraction `n` from `a` to `b`. `n` outside [0, 1] extrapolates.
    #[inline]
    pub fn lerp(self, n: f32) -> Vec2 {
        self.a + (self.b - self.a) * n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        let v = Vec2::new(3.25, -1.5);
        assert_eq!(v.rotate(0.0), v);
    }

    #[test]
    fn rotate_quarter_turn_matches_rotate90() {
        let v = Vec2::new(2.0, 1.0);
        assert!(approx(v.rotate(FRAC_PI_2), v.rotate90()));
    }

    #[test]
    fn rotate_half_turn_negates() {
        let v = Vec2::new(1.0, 4.0);
        assert!(approx(v.rotate(PI), -v));
    }

    #[test]
    fn unit_of_zero_is_none() {
        assert_eq!(Vec2::ZERO.unit(), None);
    }

    #[test]
    fn unit_keeps_direction() {
        let u = Vec2::new(3.0, 4.0).unit().unwrap();
        assert!(approx(u, Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn slope_of_horizontal_vector_is_zero() {
        assert_eq!(Vec2::new(2.0, 0.0).slope(), 0.0);
        assert!(Vec2::new(0.0, 1.0).slope().is_infinite());
    }

    #[test]
    fn segment_lerp_endpoints_and_extrapolation() {
        let s = Segment::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 5.0));
        assert_eq!(s.lerp(0.0), s.a);
        assert_eq!(s.lerp(1.0), s.b);
        assert!(approx(s.lerp(0.5), Vec2::new(2.0, 3.0)));
        assert!(approx(s.lerp(-0.5), Vec2::new(0.0, -1.0)));
    }
}
