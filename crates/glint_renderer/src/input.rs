//! Per-frame input fed back by the display driver.

/// Held movement keys, in the usual WASD + Space/Shift layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementKeys {
    /// Collapse opposing keys into `(forward, right, up)` axes in `[-1, 1]`.
    pub fn axes(&self) -> (f64, f64, f64) {
        fn axis(positive: bool, negative: bool) -> f64 {
            f64::from(u8::from(positive)) - f64::from(u8::from(negative))
        }
        (
            axis(self.forward, self.back),
            axis(self.right, self.left),
            axis(self.up, self.down),
        )
    }
}

/// Everything the camera consumes between two frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds elapsed since the previous frame
    pub delta_time: f64,
    /// Movement along the look direction
    pub forward: f64,
    /// Strafe along the camera's right vector
    pub right: f64,
    /// Movement along the world up axis
    pub up: f64,
    /// Raw horizontal look delta (e.g. relative mouse x)
    pub look_horizontal: f64,
    /// Raw vertical look delta (e.g. relative mouse y)
    pub look_vertical: f64,
    /// Flip the look-enabled state before applying this input
    pub toggle_look: bool,
}

impl FrameInput {
    /// Input that only advances time.
    pub fn idle(delta_time: f64) -> Self {
        Self {
            delta_time,
            ..Default::default()
        }
    }

    /// Build from held keys and a relative look delta.
    pub fn from_keys(delta_time: f64, keys: MovementKeys, look: (f64, f64)) -> Self {
        let (forward, right, up) = keys.axes();
        Self {
            delta_time,
            forward,
            right,
            up,
            look_horizontal: look.0,
            look_vertical: look.1,
            toggle_look: false,
        }
    }

    pub fn with_toggle_look(mut self) -> Self {
        self.toggle_look = true;
        self
    }

    /// True when applying this input cannot change the camera.
    pub fn is_idle(&self) -> bool {
        !self.toggle_look
            && self.forward == 0.0
            && self.right == 0.0
            && self.up == 0.0
            && self.look_horizontal == 0.0
            && self.look_vertical == 0.0
    }
}
