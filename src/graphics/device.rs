//! A narrow abstraction over the GL function table.
//!
//! The renderer is generic over [`Device`] so that the same setup and draw
//! sequences can run against the real driver or against a recording mock in
//! tests. Handles are plain newtypes around GL object names; every fallible
//! driver call returns a [`DeviceError`] instead of failing silently.

use std::ffi::CString;
use std::fmt;
use std::os::raw::c_void;
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

use crate::graphics::{Color, Vertex};

/// Identifies which programmable pipeline stage a shader feeds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per fragment.
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// A compiled (but not yet linked) shader object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShaderHandle(pub(crate) u32);

/// A linked shader program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgramHandle(pub(crate) u32);

/// A buffer object holding vertex data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BufferHandle(pub(crate) u32);

/// A vertex array object describing how buffer contents feed the pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexArrayHandle(pub(crate) u32);

/// `DeviceError` represents a failure reported by the GPU driver.
#[derive(Debug)]
pub enum DeviceError {
    /// The GL function table could not be loaded from the current context.
    ContextLoad(String),
    /// Shader compilation failed; carries the driver's info log.
    Compile {
        /// The stage whose shader failed to compile.
        stage: ShaderStage,
        /// The driver's compile log.
        log: String,
    },
    /// Program linking failed; carries the driver's info log.
    Link {
        /// The driver's link log.
        log: String,
    },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceError::ContextLoad(what) => write!(f, "failed to load GL functions: {}", what),
            DeviceError::Compile { stage, log } => {
                write!(f, "{} shader failed to compile: {}", stage, log.trim_end())
            }
            DeviceError::Link { log } => {
                write!(f, "shader program failed to link: {}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for DeviceError {}

/// The subset of the GL interface the bootstrap needs.
///
/// Setup operations return `Result`; the per-frame operations (clear, draw)
/// are infallible at this level, as GL itself reports nothing from them
/// without an explicit `glGetError` round trip.
pub trait Device {
    /// Compile a shader for the given stage from GLSL source.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str)
        -> Result<ShaderHandle, DeviceError>;

    /// Link a vertex/fragment shader pair into a program. The shader objects
    /// remain alive and must be deleted separately; the program keeps the
    /// compiled code.
    fn link_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, DeviceError>;

    /// Delete a shader object.
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Create a vertex array/buffer pair, upload `vertices` as static data,
    /// and describe the single position attribute at location 0. Both
    /// objects are left unbound.
    fn upload_vertices(&mut self, vertices: &[Vertex]) -> (VertexArrayHandle, BufferHandle);

    /// Set the viewport to cover a `width` x `height` framebuffer.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear the color buffer to `color`.
    fn clear(&mut self, color: Color);

    /// Draw `count` vertices starting at `first` as triangles, using the
    /// given program and vertex array. Both dependencies are parameters;
    /// nothing here relies on previously-bound state.
    fn draw_triangles(
        &mut self,
        program: ProgramHandle,
        vertices: VertexArrayHandle,
        first: i32,
        count: i32,
    );

    /// Delete a program object.
    fn delete_program(&mut self, program: ProgramHandle);

    /// Delete a buffer object.
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// Delete a vertex array object.
    fn delete_vertex_array(&mut self, vertices: VertexArrayHandle);
}

/// The production [`Device`]: thin wrappers around the `gl` crate's
/// function table.
///
/// Only obtainable through [`GlDevice::load`], which requires a current GL
/// context, so holding a `GlDevice` implies the table behind these calls is
/// populated.
pub struct GlDevice(());

impl GlDevice {
    /// Load the GL function table through `loader` and verify that the core
    /// entry points actually resolved.
    ///
    /// The context the symbols are loaded from must be current on this
    /// thread.
    pub fn load<F>(mut loader: F) -> Result<GlDevice, DeviceError>
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(|symbol| loader(symbol));
        // A context below 3.3 core (or a dead loader) leaves these null, and
        // calling through a null function pointer is immediate UB, so check
        // a representative from each family we use.
        if !(gl::CreateShader::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::BufferData::is_loaded()
            && gl::DrawArrays::is_loaded())
        {
            return Err(DeviceError::ContextLoad(
                "OpenGL 3.3 core entry points missing from the current context".to_string(),
            ));
        }
        Ok(GlDevice(()))
    }
}

/// Read back a shader object's info log.
unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written: GLsizei = 0;
    gl::GetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Read back a program object's info log.
unsafe fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written: GLsizei = 0;
    gl::GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

impl Device for GlDevice {
    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<ShaderHandle, DeviceError> {
        let source = CString::new(source).map_err(|_| DeviceError::Compile {
            stage,
            log: "shader source contains an interior NUL byte".to_string(),
        })?;
        unsafe {
            let shader = gl::CreateShader(stage.gl_enum());
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut status: GLint = 0;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
            if status != GLint::from(gl::TRUE) {
                let log = shader_info_log(shader);
                gl::DeleteShader(shader);
                return Err(DeviceError::Compile { stage, log });
            }
            Ok(ShaderHandle(shader))
        }
    }

    fn link_program(
        &mut self,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle, DeviceError> {
        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex.0);
            gl::AttachShader(program, fragment.0);
            gl::LinkProgram(program);

            let mut status: GLint = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status != GLint::from(gl::TRUE) {
                let log = program_info_log(program);
                gl::DeleteProgram(program);
                return Err(DeviceError::Link { log });
            }
            // Detach so that a later delete_shader actually frees the
            // objects instead of leaving them flagged until the program
            // goes away.
            gl::DetachShader(program, vertex.0);
            gl::DetachShader(program, fragment.0);
            Ok(ProgramHandle(program))
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        unsafe {
            gl::DeleteShader(shader.0);
        }
    }

    fn upload_vertices(&mut self, vertices: &[Vertex]) -> (VertexArrayHandle, BufferHandle) {
        unsafe {
            let mut vao: GLuint = 0;
            let mut vbo: GLuint = 0;
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            let bytes: &[u8] = bytemuck::cast_slice(vertices);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                std::mem::size_of::<Vertex>() as GLsizei,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(0);

            // Unbind so later state changes can't touch this mesh by
            // accident.
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);

            (VertexArrayHandle(vao), BufferHandle(vbo))
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
        }
    }

    fn clear(&mut self, color: Color) {
        unsafe {
            gl::ClearColor(color.r, color.g, color.b, color.a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn draw_triangles(
        &mut self,
        program: ProgramHandle,
        vertices: VertexArrayHandle,
        first: i32,
        count: i32,
    ) {
        unsafe {
            gl::UseProgram(program.0);
            gl::BindVertexArray(vertices.0);
            gl::DrawArrays(gl::TRIANGLES, first, count);
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        unsafe {
            gl::DeleteProgram(program.0);
        }
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        unsafe {
            gl::DeleteBuffers(1, &buffer.0);
        }
    }

    fn delete_vertex_array(&mut self, vertices: VertexArrayHandle) {
        unsafe {
            gl::DeleteVertexArrays(1, &vertices.0);
        }
    }
}
