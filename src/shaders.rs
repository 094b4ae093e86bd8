use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};

use gl::types::GLchar;
use glam::Mat4;

#[derive(Debug)]
pub enum ShaderError {
    /// Could not read the source file
    Io(PathBuf, std::io::Error),
    /// Source or uniform name contains a nul byte
    InvalidSource(String),
    Compile(String),
    Link(String),
}

impl std::fmt::Display for ShaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderError::Io(p, e) => write!(f, "Error reading shader {}: {}", p.display(), e),
            ShaderError::InvalidSource(n) => write!(f, "Shader input {} contains a nul byte", n),
            ShaderError::Compile(e) => write!(f, "Shader compilation failed: {}", e),
            ShaderError::Link(e) => write!(f, "Shader linking failed: {}", e),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io(_, e) => Some(e),
            _ => None,
        }
    }
}

fn info_log(raw: &[GLchar]) -> String {
    // the driver nul terminates non-empty logs
    if raw.is_empty() {
        return String::new();
    }
    unsafe { CStr::from_ptr(raw.as_ptr()) }
        .to_string_lossy()
        .trim_end()
        .to_string()
}

pub fn compile_shader(source: &str, shader_type: u32) -> Result<u32, ShaderError> {
    let c_source = CString::new(source)
        .map_err(|_| ShaderError::InvalidSource("source".to_string()))?;
    let shader = unsafe { gl::CreateShader(shader_type) };
    unsafe {
        gl::ShaderSource(shader, 1, &c_source.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);
        let mut success: i32 = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        if success != i32::from(gl::TRUE) {
            let mut len: i32 = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut error = vec![0 as GLchar; len.max(0) as usize];
            gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), error.as_mut_ptr());
            gl::DeleteShader(shader);
            return Err(ShaderError::Compile(info_log(&error)));
        }
    }
    Ok(shader)
}

pub fn create_shader_program(vertex_src: &str, fragment_src: &str) -> Result<u32, ShaderError> {
    let vertex_shader = compile_shader(vertex_src, gl::VERTEX_SHADER)?;
    let fragment_shader = match compile_shader(fragment_src, gl::FRAGMENT_SHADER) {
        Ok(s) => s,
        Err(e) => {
            unsafe { gl::DeleteShader(vertex_shader) };
            return Err(e);
        }
    };
    let program = unsafe { gl::CreateProgram() };
    unsafe {
        gl::AttachShader(program, vertex_shader);
        gl::AttachShader(program, fragment_shader);
        gl::LinkProgram(program);
        gl::DeleteShader(vertex_shader);
        gl::DeleteShader(fragment_shader);
        let mut success: i32 = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        if success != i32::from(gl::TRUE) {
            let mut len: i32 = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut error = vec![0 as GLchar; len.max(0) as usize];
            gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), error.as_mut_ptr());
            gl::DeleteProgram(program);
            return Err(ShaderError::Link(info_log(&error)));
        }
    }
    Ok(program)
}

/// A linked vertex + fragment program.
#[derive(Debug)]
pub struct ShaderProgram {
    id: u32,
}

impl ShaderProgram {
    pub fn from_source(vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let id = create_shader_program(vertex_src, fragment_src)?;
        Ok(Self { id })
    }

    pub fn from_files(vertex: &Path, fragment: &Path) -> Result<Self, ShaderError> {
        let read = |p: &Path| {
            std::fs::read_to_string(p).map_err(|e| ShaderError::Io(p.to_path_buf(), e))
        };
        let vertex_src = read(vertex)?;
        let fragment_src = read(fragment)?;
        log::info!("compiling {} and {}", vertex.display(), fragment.display());
        Self::from_source(&vertex_src, &fragment_src)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    pub fn uniform_location(&self, name: &str) -> Result<i32, ShaderError> {
        let c_name = CString::new(name).map_err(|_| ShaderError::InvalidSource(name.to_string()))?;
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        if location < 0 {
            log::warn!("uniform {} not found in program {}", name, self.id);
        }
        Ok(location)
    }

    /// Program must be in use.
    pub fn set_mat4(&self, name: &str, value: &Mat4) -> Result<(), ShaderError> {
        let location = self.uniform_location(name)?;
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, value.to_cols_array().as_ptr());
        }
        Ok(())
    }

    pub fn delete(self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}
