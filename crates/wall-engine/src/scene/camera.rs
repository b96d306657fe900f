use cgmath::{Matrix4, Point3, Vector3};

use crate::math;

/// Look-at camera. The view matrix is derived once from eye/target/up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    active: bool,
    eye: Point3<f32>,
    target: Point3<f32>,
    up: Vector3<f32>,
    view: Matrix4<f32>,
}

impl Camera {
    pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        Self {
            active: true,
            eye,
            target,
            up,
            view: math::look_at(eye, target, up),
        }
    }

    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn eye(&self) -> Point3<f32> {
        self.eye
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
