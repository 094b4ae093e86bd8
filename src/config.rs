use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "Transformation basics";

pub const SCR_WIDTH: u32 = 800;
pub const SCR_HEIGHT: u32 = 800;

pub const CLEAR_COLOUR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

// fan
pub const FAN_SEGMENTS: usize = 40;
pub const FAN_RADIUS: f32 = 0.2;

// camera defaults
pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;
pub const JUMP_HEIGHT: f32 = 0.25;
pub const CROUCH_HEIGHT: f32 = -0.15;

pub const SHADER_DIR_VAR: &str = "TRANSFORMATION_BASICS_SHADER_DIR";
const DEFAULT_SHADER_DIR: &str = "shaders";

/// Runtime settings for the demo binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub shader_dir: PathBuf,
    pub shader_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from(DEFAULT_SHADER_DIR),
            shader_name: "shader".to_string(),
        }
    }
}

impl Config {
    /// Defaults, with the shader directory taken from the environment if set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(SHADER_DIR_VAR).filter(|d| !d.is_empty()) {
            config.shader_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn vertex_shader_path(&self) -> PathBuf {
        self.shader_dir.join(format!("{}.vert", self.shader_name))
    }

    pub fn fragment_shader_path(&self) -> PathBuf {
        self.shader_dir.join(format!("{}.frag", self.shader_name))
    }
}
