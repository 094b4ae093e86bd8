use glam::{Mat4, Vec2, Vec3};

/// Accumulates transforms, each push multiplying onto the current top.
#[derive(Debug)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    pub fn push(&mut self, transform: Mat4) {
        let current = self.current();
        self.stack.push(current * transform);
    }

    /// The identity at the bottom is never popped.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }
}

/// Position and orientation of the fan in clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanTransform {
    pub offset: Vec2,
    /// degrees
    pub angle: f32,
    pub axis: Vec3,
}

impl Default for FanTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            angle: 10.0,
            axis: Vec3::Z,
        }
    }
}

impl FanTransform {
    /// translate(offset) * rotate(angle, axis)
    pub fn matrix(&self) -> Mat4 {
        let mut ts = TransformStack::new();
        ts.push(Mat4::from_translation(self.offset.extend(0.0)));
        ts.push(Mat4::from_axis_angle(self.axis.normalize(), self.angle.to_radians()));
        ts.current()
    }
}
