use std::fmt;
use std::sync::mpsc::Receiver;

use glfw::Context;

use crate::graphics::device::{Device, DeviceError, GlDevice};
use crate::graphics::render::{Renderer, DEFAULT_CLEAR_COLOR};
use crate::graphics::Color;

const GL_MAJOR_VERSION: u32 = 3;
const GL_MINOR_VERSION: u32 = 3;

/// `WindowError` represents an error that occurred in the window system.
#[derive(Debug)]
pub enum WindowError {
    /// GLFW itself could not be initialized.
    InitError(String),
    /// The OS refused to create the window or its GL context.
    CreationError,
    /// The GL function table could not be loaded from the new context.
    ContextError(DeviceError),
}

impl From<DeviceError> for WindowError {
    fn from(e: DeviceError) -> Self {
        WindowError::ContextError(e)
    }
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindowError::InitError(what) => write!(f, "Failed to initialize GLFW: {}", what),
            WindowError::CreationError => write!(f, "Failed to create GLFW window"),
            WindowError::ContextError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WindowError {}

/// Helper for constructing windows.
pub struct WindowBuilder<'a> {
    window_title: &'a str,
    width: u32,
    height: u32,
    vsync: bool,
    clear_color: Color,
}

impl<'a> WindowBuilder<'a> {
    /// Create a new `WindowBuilder` with the given title and size in pixels.
    pub fn new(window_title: &'a str, width: u32, height: u32) -> Self {
        WindowBuilder {
            window_title: window_title,
            width: width,
            height: height,
            vsync: true,
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// Enable/disable vsync.
    pub fn with_vsync(mut self, enable: bool) -> Self {
        self.vsync = enable;

        self
    }

    /// Set the color the renderer clears to each frame.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;

        self
    }

    /// Build the window.
    ///
    /// Requests a GL 3.3 core context (the hints go in before the window is
    /// created), makes it current, and loads the GL function table before
    /// any other GL call can happen.
    pub fn build(self) -> Result<Window, WindowError> {
        let mut glfw =
            glfw::init(glfw::FAIL_ON_ERRORS).map_err(|e| WindowError::InitError(e.to_string()))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(
            GL_MAJOR_VERSION,
            GL_MINOR_VERSION,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(
                self.width,
                self.height,
                self.window_title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationError)?;

        window.make_current();
        window.set_close_polling(true);
        glfw.set_swap_interval(if self.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        let mut device = GlDevice::load(|symbol| window.get_proc_address(symbol) as *const _)?;

        // The framebuffer can be larger than the requested window size on
        // hidpi surfaces; the viewport has to match the framebuffer.
        let (fb_width, fb_height) = window.get_framebuffer_size();
        device.set_viewport(fb_width as u32, fb_height as u32);
        info!(
            "created {}x{} window (framebuffer {}x{}), GL {}.{} core",
            self.width, self.height, fb_width, fb_height, GL_MAJOR_VERSION, GL_MINOR_VERSION
        );

        let renderer = Renderer::new(device, self.clear_color);

        Ok(Window {
            glfw: glfw,
            window: window,
            events: events,
            renderer: renderer,
        })
    }
}

/// `Window` is responsible for creating and managing the application window
/// and underlying GL context.
pub struct Window {
    // Handles to windowing resources we need to hold onto. If the glfw
    // window gets dropped, the context goes with it and no GL call is safe.
    glfw: glfw::Glfw,
    window: glfw::Window,
    events: Receiver<(f64, glfw::WindowEvent)>,
    renderer: Renderer<GlDevice>,
}

impl Window {
    /// Whether the platform has asked the window to close (e.g. the user
    /// clicked the close button). The render loop should stop once this
    /// turns true.
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Ask the window to close; the next `should_close` returns true.
    pub fn close(&mut self) {
        self.window.set_should_close(true);
    }

    /// Finish the frame: swap the back buffer onto the screen, then poll
    /// the platform and return an iterator over the events that arrived
    /// since the last call.
    pub fn present(&mut self) -> glfw::FlushedMessages<'_, (f64, glfw::WindowEvent)> {
        self.window.swap_buffers();
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
    }

    /// Get a mutable reference to the underlying renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<GlDevice> {
        &mut self.renderer
    }

    /// Get an immutable reference to the underlying renderer.
    pub fn renderer(&self) -> &Renderer<GlDevice> {
        &self.renderer
    }
}
