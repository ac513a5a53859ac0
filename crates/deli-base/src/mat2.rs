use std::ops::Mul;

use crate::Vec2;

/// Column-major 2x2 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2<T> {
    pub cols: [Vec2<T>; 2],
}

impl<T> Mat2<T> {
    pub fn from_cols(c0: Vec2<T>, c1: Vec2<T>) -> Self {
        Self { cols: [c0, c1] }
    }
}

impl Mat2<f32> {
    /// Counter-clockwise rotation by `angle` radians in a y-up frame, which is
    /// clockwise on screen when y grows downwards.
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(Vec2::new(cos, sin), Vec2::new(-sin, cos))
    }

    pub fn transpose(self) -> Self {
        Self::from_cols(
            Vec2::new(self.cols[0].x, self.cols[1].x),
            Vec2::new(self.cols[0].y, self.cols[1].y),
        )
    }
}

impl Mul<Vec2<f32>> for Mat2<f32> {
    type Output = Vec2<f32>;
    fn mul(self, rhs: Vec2<f32>) -> Vec2<f32> {
        Vec2::new(
            self.cols[0].x * rhs.x + self.cols[1].x * rhs.y,
            self.cols[0].y * rhs.x + self.cols[1].y * rhs.y,
        )
    }
}
