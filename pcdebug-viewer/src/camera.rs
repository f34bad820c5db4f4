//! Orbit camera for the viewer window

use nalgebra::{Matrix4, Perspective3, Point3, Rotation3, Unit, Vector3};

/// Closest the eye may get to its target
const MIN_DISTANCE: f32 = 1e-3;

/// An orbit camera around a look-at point
///
/// `front` points from the target towards the eye, so the eye sits at
/// `target + front * distance`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Point3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub distance: f32,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(target: Point3<f32>, front: Vector3<f32>, up: Vector3<f32>, distance: f32) -> Self {
        let mut camera = Self {
            target,
            front: Vector3::z(),
            up: Vector3::y(),
            distance: distance.max(MIN_DISTANCE),
            fov: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        };
        camera.orient(front, up);
        camera.update_clip_planes();
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.target + self.front * self.distance
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position(), &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Look at `target` from direction `front`, keeping the distance
    pub fn look_at(&mut self, target: Point3<f32>, front: Vector3<f32>) {
        self.target = target;
        let up = self.up;
        self.orient(front, up);
    }

    /// Pull back so a sphere of `radius` around the target fills the view
    pub fn frame(&mut self, radius: f32) {
        let half_fov = (self.fov * 0.5).max(1e-3);
        self.distance = (radius / half_fov.sin()).max(MIN_DISTANCE);
        self.update_clip_planes();
    }

    /// Scale the distance; positive steps move the eye closer
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (1.0 - amount)).max(MIN_DISTANCE);
        self.update_clip_planes();
    }

    /// Rotate the eye around the target by yaw and pitch angles in radians
    pub fn orbit(&mut self, horizontal: f32, vertical: f32) {
        let yaw = Rotation3::from_axis_angle(&Unit::new_normalize(self.up), -horizontal);
        let front = yaw * self.front;

        let right = self.up.cross(&front);
        let Some(right) = Unit::try_new(right, 1e-6) else {
            return;
        };
        let pitch = Rotation3::from_axis_angle(&right, vertical);
        let pitched = pitch * front;

        // Stop short of the poles
        if pitched.dot(&self.up).abs() < 0.995 {
            self.front = pitched.normalize();
        } else {
            self.front = front.normalize();
        }
    }

    /// Shift target and eye in the view plane, scaled by distance
    pub fn pan(&mut self, horizontal: f32, vertical: f32) {
        let right = self.up.cross(&self.front).normalize();
        let up = self.front.cross(&right).normalize();
        self.target += (-right * horizontal + up * vertical) * self.distance;
    }

    /// Set the viewing direction and an approximate up vector
    pub fn orient(&mut self, front: Vector3<f32>, up: Vector3<f32>) {
        if let Some(front) = front.try_normalize(1e-6) {
            self.front = front;
        }
        // Re-orthogonalize up; fall back to another axis when parallel to front
        let candidate = up - self.front * up.dot(&self.front);
        self.up = candidate
            .try_normalize(1e-6)
            .or_else(|| {
                let alt = Vector3::z();
                (alt - self.front * alt.dot(&self.front)).try_normalize(1e-6)
            })
            .unwrap_or_else(Vector3::x);
    }

    fn update_clip_planes(&mut self) {
        self.near = (self.distance * 0.001).max(1e-4);
        self.far = (self.distance * 100.0).max(self.near * 10.0);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin(), Vector3::z(), Vector3::y(), 5.0)
    }
}
