//! Arrow-key driven triangle fan rendered with OpenGL, plus a stand alone
//! first person [`camera::Camera`] with jump and crouch handling.

pub mod camera;
pub mod clock;
pub mod config;
pub mod fan;
pub mod input;
pub mod shaders;
pub mod transform;

pub use camera::{Camera, CameraMovement, CameraSettings, VerticalMotion};
