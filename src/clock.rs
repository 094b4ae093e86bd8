/// Time between consecutive frames, in seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    last_frame: f32,
}

impl FrameClock {
    pub fn new(start: f32) -> Self {
        Self { last_frame: start }
    }

    pub fn tick(&mut self, now: f32) -> f32 {
        let delta = now - self.last_frame;
        self.last_frame = now;
        delta
    }
}
