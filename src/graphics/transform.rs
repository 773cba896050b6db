//! 2D affine transforms for the display canvas

use libm::{cosf, sinf};

/// Affine map `(x, y) -> (a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Clockwise rotation (y axis pointing down) around `(cx, cy)`.
    pub fn rotation(degrees: f32, cx: f32, cy: f32) -> Self {
        let radians = degrees.to_radians();
        let (sin, cos) = (sinf(radians), cosf(radians));
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: cx - cos * cx + sin * cy,
            ty: cy - sin * cx - cos * cy,
        }
    }

    /// `self` applied after `inner`.
    pub fn then_inner(self, inner: Self) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            tx: self.a * inner.tx + self.c * inner.ty + self.tx,
            ty: self.b * inner.tx + self.d * inner.ty + self.ty,
        }
    }

    /// Pre-concatenate a rotation, like a canvas `rotate` call: later
    /// drawing is rotated first, then mapped by the existing transform.
    pub fn rotate_about(self, degrees: f32, cx: f32, cy: f32) -> Self {
        self.then_inner(Self::rotation(degrees, cx, cy))
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }
}
