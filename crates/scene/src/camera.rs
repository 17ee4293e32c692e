use glam::{Mat4, Vec3};
use orrery_input::CameraAction;

/// Field of view shared by every camera in the demo.
const FOV: f32 = 90.0_f32.to_radians();

/// A fixed viewpoint: eye/at/up with view and projection computed once
/// at construction. Immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
    aspect: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, at: Vec3, up: Vec3, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            at,
            up,
            aspect,
            near,
            far,
            view: Mat4::look_at_rh(eye, at, up),
            projection: Mat4::perspective_rh(FOV, aspect, near, far),
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

/// The free-look camera: an eye position and accumulated yaw/pitch from
/// which the view direction is derived on every update.
///
/// Translation deltas are applied raw; they are NOT scaled by frame
/// delta time, unlike object animation. Inherited behavior, kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookCamera {
    eye: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
}

impl LookCamera {
    pub fn new(eye: Vec3, up: Vec3, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            eye,
            up,
            yaw: 0.0,
            pitch: 0.0,
            aspect,
            near,
            far,
            view: Mat4::IDENTITY,
            projection: Mat4::perspective_rh(FOV, aspect, near, far),
        };
        camera.recompute_view();
        camera
    }

    /// View direction from accumulated yaw and pitch.
    ///
    /// Yaw and pitch contribute independently: the result is the sum of
    /// the yaw-rotated and pitch-rotated forward (-Z) axes, not a
    /// composed rotation. Zero accumulated rotation gives a vector
    /// straight down -Z, so the view matrix is unchanged from
    /// construction until a nonzero pan arrives.
    pub fn direction(&self) -> Vec3 {
        let yawed = Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let pitched = Vec3::new(0.0, self.pitch.sin(), -self.pitch.cos());
        yawed + pitched
    }

    /// Translate the eye by a raw delta. Additive: applying two deltas
    /// in sequence lands on the same position as their vector sum.
    pub fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.recompute_view();
    }

    /// Accumulate yaw by an angle in radians.
    pub fn pan_yaw(&mut self, angle: f32) {
        self.yaw += angle;
        self.recompute_view();
    }

    /// Accumulate pitch by an angle in radians.
    pub fn pan_pitch(&mut self, angle: f32) {
        self.pitch += angle;
        self.recompute_view();
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    fn recompute_view(&mut self) {
        self.view = Mat4::look_to_rh(self.eye, self.direction(), self.up);
    }
}

/// Which camera source feeds the frame constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCamera {
    /// One of the fixed cameras, by index into the rig's list.
    Fixed(usize),
    /// The free-look camera.
    FreeLook,
}

/// The camera set for a running scene: a small fixed list of viewpoints,
/// one free-look camera, and the active selector.
///
/// Selecting a camera changes which source the next frame's constants
/// are read from and nothing else.
pub struct CameraRig {
    fixed: Vec<Camera>,
    look: LookCamera,
    active: ActiveCamera,
}

impl CameraRig {
    /// Starts on the free-look camera.
    pub fn new(fixed: Vec<Camera>, look: LookCamera) -> Self {
        Self {
            fixed,
            look,
            active: ActiveCamera::FreeLook,
        }
    }

    /// The demo rig: five fixed cameras 12 units out along each axis
    /// looking at the origin, and a free-look camera 6 units back.
    pub fn demo(aspect: f32) -> Self {
        let (near, far) = (0.5, 10_000.0);
        let at = Vec3::ZERO;
        let fixed = vec![
            Camera::new(Vec3::new(0.0, 0.0, 12.0), at, Vec3::Y, aspect, near, far),
            Camera::new(Vec3::new(0.0, 0.0, -12.0), at, Vec3::Y, aspect, near, far),
            Camera::new(Vec3::new(0.0, 12.0, 0.0), at, Vec3::X, aspect, near, far),
            Camera::new(Vec3::new(0.0, -12.0, 0.0), at, -Vec3::X, aspect, near, far),
            Camera::new(Vec3::new(12.0, 0.0, 0.0), at, Vec3::Y, aspect, near, far),
        ];
        let look = LookCamera::new(Vec3::new(0.0, 0.0, 6.0), Vec3::Y, aspect, near, far);
        Self::new(fixed, look)
    }

    /// Switch the active source. Fixed indices past the end of the list
    /// clamp to the last fixed camera; with no fixed cameras the rig
    /// stays on free-look.
    pub fn select(&mut self, camera: ActiveCamera) {
        self.active = match camera {
            ActiveCamera::Fixed(i) if !self.fixed.is_empty() => {
                ActiveCamera::Fixed(i.min(self.fixed.len() - 1))
            }
            ActiveCamera::Fixed(_) => ActiveCamera::FreeLook,
            ActiveCamera::FreeLook => ActiveCamera::FreeLook,
        };
    }

    pub fn active(&self) -> ActiveCamera {
        self.active
    }

    pub fn look(&self) -> &LookCamera {
        &self.look
    }

    /// Route one camera action.
    pub fn apply(&mut self, action: CameraAction) {
        match action {
            CameraAction::SelectFixed(i) => self.select(ActiveCamera::Fixed(i)),
            CameraAction::SelectFreeLook => self.select(ActiveCamera::FreeLook),
            CameraAction::Move(delta) => self.look.translate(delta),
            CameraAction::PanYaw(angle) => self.look.pan_yaw(angle),
            CameraAction::PanPitch(angle) => self.look.pan_pitch(angle),
        }
    }

    pub fn eye(&self) -> Vec3 {
        match self.active {
            ActiveCamera::Fixed(i) => self.fixed[i].eye(),
            ActiveCamera::FreeLook => self.look.eye(),
        }
    }

    pub fn view(&self) -> Mat4 {
        match self.active {
            ActiveCamera::Fixed(i) => self.fixed[i].view(),
            ActiveCamera::FreeLook => self.look.view(),
        }
    }

    pub fn projection(&self) -> Mat4 {
        match self.active {
            ActiveCamera::Fixed(i) => self.fixed[i].projection(),
            ActiveCamera::FreeLook => self.look.projection(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_camera_matrices_are_set_at_construction() {
        let cam = Camera::new(
            Vec3::new(0.0, 0.0, 12.0),
            Vec3::ZERO,
            Vec3::Y,
            16.0 / 9.0,
            0.5,
            10_000.0,
        );
        assert_eq!(cam.view(), Mat4::look_at_rh(cam.eye(), Vec3::ZERO, Vec3::Y));
        // A valid projection, no NaN.
        assert!(!cam.projection().col(0).x.is_nan());
    }

    #[test]
    fn fixed_selection_is_independent_of_free_look_state() {
        let mut rig = CameraRig::demo(1.0);
        rig.select(ActiveCamera::Fixed(2));
        let view_before = rig.view();
        let eye_before = rig.eye();

        // Mutate the free-look camera heavily; camera 2 must not move.
        rig.look.translate(Vec3::new(5.0, -3.0, 8.0));
        rig.look.pan_yaw(1.2);
        rig.look.pan_pitch(-0.4);

        assert_eq!(rig.view(), view_before);
        assert_eq!(rig.eye(), eye_before);
    }

    #[test]
    fn each_fixed_camera_yields_its_own_matrices() {
        let mut rig = CameraRig::demo(1.0);
        let mut views = Vec::new();
        for i in 0..5 {
            rig.select(ActiveCamera::Fixed(i));
            views.push(rig.view());
        }
        for i in 0..5 {
            for j in (i + 1)..5 {
                assert_ne!(views[i], views[j]);
            }
        }
    }

    #[test]
    fn out_of_range_fixed_index_clamps() {
        let mut rig = CameraRig::demo(1.0);
        rig.select(ActiveCamera::Fixed(99));
        assert_eq!(rig.active(), ActiveCamera::Fixed(4));
    }

    #[test]
    fn translation_is_additive() {
        let mut one = LookCamera::new(Vec3::ZERO, Vec3::Y, 1.0, 0.5, 100.0);
        let mut two = one;

        one.translate(Vec3::new(0.25, -0.5, 1.0));
        one.translate(Vec3::new(0.75, 0.5, 2.0));
        two.translate(Vec3::new(1.0, 0.0, 3.0));

        assert_eq!(one.eye(), two.eye());
        assert_eq!(one.view(), two.view());
    }

    #[test]
    fn zero_pan_leaves_view_unchanged() {
        let mut cam = LookCamera::new(Vec3::new(0.0, 0.0, 6.0), Vec3::Y, 1.0, 0.5, 100.0);
        let before = cam.view();
        cam.pan_yaw(0.0);
        cam.pan_pitch(0.0);
        assert_eq!(cam.view(), before);
    }

    #[test]
    fn direction_starts_straight_ahead() {
        let cam = LookCamera::new(Vec3::ZERO, Vec3::Y, 1.0, 0.5, 100.0);
        assert_eq!(cam.direction(), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn pan_turns_the_direction() {
        let mut cam = LookCamera::new(Vec3::ZERO, Vec3::Y, 1.0, 0.5, 100.0);
        let ahead = cam.direction();
        cam.pan_yaw(0.3);
        let turned = cam.direction();
        assert_ne!(turned, ahead);
        // Yaw alone leaves the vertical component untouched.
        assert_eq!(turned.y, ahead.y);
    }

    #[test]
    fn selection_does_not_move_the_free_look_camera() {
        let mut rig = CameraRig::demo(1.0);
        let eye = rig.look().eye();
        rig.select(ActiveCamera::Fixed(0));
        rig.select(ActiveCamera::FreeLook);
        assert_eq!(rig.look().eye(), eye);
        assert_eq!(rig.eye(), eye);
    }
}
