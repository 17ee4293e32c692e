use glam::Vec3;

/// Eye translation applied per polled tick while a movement key is held.
pub const MOVE_STEP: f32 = 0.001;

/// Pan angle in radians applied per polled tick while a pan key is held.
pub const PAN_STEP: f32 = 0.0002;

/// A camera operation produced by whatever input frontend is running.
///
/// The apps translate held keys into these once per tick; the scene's
/// camera rig consumes them. Selection only changes which camera source
/// feeds the next frame's constants and never touches object transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Switch to one of the fixed cameras by index.
    SelectFixed(usize),
    /// Switch to the free-look camera.
    SelectFreeLook,
    /// Translate the free-look eye by a raw (unscaled) delta.
    Move(Vec3),
    /// Accumulate free-look yaw by an angle in radians.
    PanYaw(f32),
    /// Accumulate free-look pitch by an angle in radians.
    PanPitch(f32),
}

impl CameraAction {
    /// A movement step along a unit axis, using the fixed step size.
    pub fn step(axis: Vec3) -> Self {
        Self::Move(axis * MOVE_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_scales_axis() {
        let a = CameraAction::step(Vec3::X);
        assert_eq!(a, CameraAction::Move(Vec3::new(MOVE_STEP, 0.0, 0.0)));
    }

    #[test]
    fn steps_are_the_inherited_constants() {
        // These match the per-poll increments the demo has always used.
        assert_eq!(MOVE_STEP, 0.001);
        assert_eq!(PAN_STEP, 0.0002);
    }
}
