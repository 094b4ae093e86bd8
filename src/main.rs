use std::collections::HashSet;
use std::ffi::CStr;

use anyhow::{Context as _, anyhow};
use glfw::{Action, Context, Key, OpenGlProfileHint};

use transformation_basics::clock::FrameClock;
use transformation_basics::config::{self, Config};
use transformation_basics::fan::FanMesh;
use transformation_basics::input::{Arrow, apply_arrows};
use transformation_basics::shaders::ShaderProgram;
use transformation_basics::transform::FanTransform;

fn arrow_key(arrow: Arrow) -> Key {
    match arrow {
        Arrow::Up => Key::Up,
        Arrow::Down => Key::Down,
        Arrow::Left => Key::Left,
        Arrow::Right => Key::Right,
    }
}

fn gl_version() -> String {
    let version = unsafe { gl::GetString(gl::VERSION) };
    if version.is_null() {
        return "unknown".to_string();
    }
    unsafe { CStr::from_ptr(version as *const _) }
        .to_string_lossy()
        .into_owned()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let mut glfw = glfw::init(glfw::fail_on_errors)
        .map_err(|e| anyhow!("Failed to initialise GLFW: {:?}", e))?;
    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
    #[cfg(target_os = "macos")]
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

    let Some((mut window, events)) = glfw.create_window(
        config::SCR_WIDTH,
        config::SCR_HEIGHT,
        config::PROGRAM_NAME,
        glfw::WindowMode::Windowed,
    ) else {
        log::error!("Failed to create GLFW window");
        return Err(anyhow!("Failed to create GLFW window"));
    };

    window.make_current();
    window.set_key_polling(true);
    window.set_framebuffer_size_polling(true);

    gl::load_with(|symbol| {
        window.get_proc_address(symbol) as *const _
    });
    if !gl::Viewport::is_loaded() {
        log::error!("Failed to load OpenGL function pointers");
        return Err(anyhow!("Failed to load OpenGL function pointers"));
    }
    log::info!("OpenGL {}", gl_version());

    let shader = ShaderProgram::from_files(
        &config.vertex_shader_path(),
        &config.fragment_shader_path(),
    )
    .with_context(|| format!("loading shaders from {}", config.shader_dir.display()))?;

    let fan = FanMesh::new();

    let mut transform = FanTransform::default();
    let mut keys_pressed: HashSet<Key> = HashSet::new();
    let mut clock = FrameClock::new(glfw.get_time() as f32);

    let [r, g, b, a] = config::CLEAR_COLOUR;

    while !window.should_close() {
        let delta = clock.tick(glfw.get_time() as f32);

        glfw.poll_events();
        for (_, event) in glfw::flush_messages(&events) {
            match event {
                glfw::WindowEvent::Key(Key::Escape, _, Action::Press, _) => window.set_should_close(true),
                glfw::WindowEvent::Key(key, _, Action::Press, _) => { keys_pressed.insert(key); },
                glfw::WindowEvent::Key(key, _, Action::Release, _) => { keys_pressed.remove(&key); },
                glfw::WindowEvent::FramebufferSize(width, height) => unsafe {
                    gl::Viewport(0, 0, width, height);
                },
                _ => {}
            }
        }

        apply_arrows(&mut transform, |arrow| keys_pressed.contains(&arrow_key(arrow)), delta);

        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        shader.use_program();
        shader.set_mat4("transform", &transform.matrix())?;
        fan.draw();

        window.swap_buffers();
    }

    fan.delete();
    shader.delete();

    Ok(())
}
