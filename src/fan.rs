use std::mem;

use glam::Vec3;

use crate::config::{FAN_RADIUS, FAN_SEGMENTS};

// --- FAN VERTICES ---
/// Centre vertex followed by the rim. The angle step divides the full circle
/// into `segments` but the last three rim points are left out, leaving a
/// notch in the disc.
pub fn create_fan(radius: f32, segments: usize) -> Vec<Vec3> {
    let rim = segments.saturating_sub(3);
    let increment = std::f32::consts::TAU / segments.max(1) as f32;

    let mut vertices = Vec::with_capacity(rim + 1);
    vertices.push(Vec3::ZERO);
    for i in 0..rim {
        let angle = i as f32 * increment;
        vertices.push(Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0));
    }
    vertices
}

/// A fan uploaded to the GPU.
#[derive(Debug)]
pub struct FanMesh {
    vao: u32,
    vbo: u32,
    count: i32,
}

impl FanMesh {
    /// Requires a current GL context.
    pub fn new() -> Self {
        Self::upload(&create_fan(FAN_RADIUS, FAN_SEGMENTS))
    }

    // --- UPLOAD FAN TO GPU ---
    pub fn upload(vertices: &[Vec3]) -> Self {
        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (vertices.len() * mem::size_of::<Vec3>()) as isize,
                vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
            // position attribute
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                mem::size_of::<Vec3>() as i32,
                std::ptr::null(),
            );
            gl::EnableVertexAttribArray(0);
        }

        log::debug!("uploaded fan with {} vertices", vertices.len());

        Self {
            vao,
            vbo,
            count: vertices.len() as i32,
        }
    }

    pub fn vertex_count(&self) -> i32 {
        self.count
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLE_FAN, 0, self.count);
        }
    }

    pub fn delete(self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}
