use crate::transform::FanTransform;

const BASE_SPEED: f32 = 2.5;
const STEP_SCALE: f32 = 0.1;

#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    pub const ALL: [Arrow; 4] = [Arrow::Up, Arrow::Down, Arrow::Left, Arrow::Right];

    /// Facing the fan snaps to while the key is held, in degrees.
    pub fn angle(self) -> f32 {
        match self {
            Arrow::Up => 98.0,
            Arrow::Down => -85.0,
            Arrow::Left => -100.0,
            Arrow::Right => 10.0,
        }
    }
}

/// Applies the held arrow keys for one frame. Keys are handled in
/// [`Arrow::ALL`] order so with several held the last one sets the angle.
pub fn apply_arrows(
    transform: &mut FanTransform,
    held: impl Fn(Arrow) -> bool,
    delta_time: f32,
) {
    let step = BASE_SPEED * delta_time * STEP_SCALE;
    for arrow in Arrow::ALL {
        if !held(arrow) {
            continue;
        }
        transform.angle = arrow.angle();
        match arrow {
            Arrow::Up => transform.offset.y += step,
            Arrow::Down => transform.offset.y -= step,
            Arrow::Left => transform.offset.x -= step,
            Arrow::Right => transform.offset.x += step,
        }
    }
}
