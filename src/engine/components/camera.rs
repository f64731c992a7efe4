use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// Look-at camera. View and projection math is delegated to nalgebra; this
/// only tracks where the camera sits and what it looks at.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Move the camera and its target together, keeping the view direction.
    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.position += delta;
        self.target += delta;
    }
}

pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    Perspective3::new(aspect, fov_y_degrees.to_radians(), near, far).to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn translate_moves_position_and_target_together() {
        let mut camera = Camera::new(Point3::new(0.0, 0.5, 1.0), Point3::origin());
        camera.translate(Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(camera.position.x, 1.0);
        assert_relative_eq!(camera.target.x, 1.0);
        assert_relative_eq!(camera.position.y, 0.5);
    }
}
