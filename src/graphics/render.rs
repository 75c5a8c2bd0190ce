use std::fmt;

use crate::graphics::device::{
    BufferHandle, Device, DeviceError, ProgramHandle, ShaderStage, VertexArrayHandle,
};
use crate::graphics::{Color, Vertex};


/// Pass-through vertex shader for the default pipeline: forwards the
/// position attribute at location 0 into clip space with `w = 1.0`.
pub const TRIANGLE_VERTEX_SHADER: &str = include_str!("render/shader/triangle.vert");

/// Fragment shader for the default pipeline: a constant orange-brown.
pub const TRIANGLE_FRAGMENT_SHADER: &str = include_str!("render/shader/triangle.frag");

/// Background color the renderer clears to unless the window builder says
/// otherwise.
pub const DEFAULT_CLEAR_COLOR: Color = Color::rgba(0.07, 0.13, 0.17, 1.0);

/// Error type for the renderer.
#[derive(Debug)]
pub enum RenderError {
    /// Error from the device layer.
    DeviceError(DeviceError),
}

impl From<DeviceError> for RenderError {
    fn from(e: DeviceError) -> Self {
        RenderError::DeviceError(e)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::DeviceError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// A linked shader pipeline.
///
/// Deliberately neither `Copy` nor `Clone`: [`Renderer::dispose_pipeline`]
/// consumes it, so the underlying program object cannot be released twice.
#[derive(Debug)]
pub struct Pipeline {
    program: ProgramHandle,
}

/// Geometry uploaded to the device: a vertex array/buffer pair plus the
/// vertex count. Move-only for the same reason as [`Pipeline`].
#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArrayHandle,
    vertex_buffer: BufferHandle,
    vertex_count: i32,
}

impl Mesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }
}

/// `Renderer` drives a [`Device`] through the bootstrap's draw sequences.
///
/// Every operation names its dependencies explicitly -- a draw call takes
/// the pipeline and mesh it uses as parameters rather than picking up
/// whatever happens to be bound.
pub struct Renderer<D: Device> {
    device: D,
    clear_color: Color,
}

impl<D: Device> Renderer<D> {
    /// Create a renderer over `device`, clearing to `clear_color`.
    pub fn new(device: D, clear_color: Color) -> Renderer<D> {
        Renderer {
            device,
            clear_color,
        }
    }

    /// Compile the given vertex/fragment source pair and link it into a
    /// [`Pipeline`].
    ///
    /// The intermediate shader objects are deleted as soon as the link
    /// succeeds; the program object retains the compiled code. On any
    /// failure, everything created so far is deleted before the error is
    /// returned.
    pub fn create_pipeline(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Pipeline, RenderError> {
        let vertex = self
            .device
            .compile_shader(ShaderStage::Vertex, vertex_source)?;
        let fragment = match self
            .device
            .compile_shader(ShaderStage::Fragment, fragment_source)
        {
            Ok(fragment) => fragment,
            Err(e) => {
                self.device.delete_shader(vertex);
                return Err(e.into());
            }
        };
        let program = match self.device.link_program(vertex, fragment) {
            Ok(program) => program,
            Err(e) => {
                self.device.delete_shader(vertex);
                self.device.delete_shader(fragment);
                return Err(e.into());
            }
        };
        // The program holds the linked code; the shader objects are dead
        // weight from here on.
        self.device.delete_shader(vertex);
        self.device.delete_shader(fragment);
        debug!("pipeline linked: {:?}", program);
        Ok(Pipeline { program })
    }

    /// Upload `vertices` into a fresh vertex array/buffer pair.
    pub fn upload_mesh(&mut self, vertices: &[Vertex]) -> Mesh {
        let (vertex_array, vertex_buffer) = self.device.upload_vertices(vertices);
        debug!(
            "uploaded {} vertices into {:?}/{:?}",
            vertices.len(),
            vertex_array,
            vertex_buffer
        );
        Mesh {
            vertex_array,
            vertex_buffer,
            vertex_count: vertices.len() as i32,
        }
    }

    /// Clear the color buffer to the configured background color.
    pub fn clear(&mut self) {
        self.device.clear(self.clear_color);
    }

    /// Draw the whole mesh as triangles through the given pipeline.
    pub fn draw(&mut self, pipeline: &Pipeline, mesh: &Mesh) {
        self.device
            .draw_triangles(pipeline.program, mesh.vertex_array, 0, mesh.vertex_count);
    }

    /// Release the mesh's GPU objects. Consumes the mesh.
    pub fn dispose_mesh(&mut self, mesh: Mesh) {
        self.device.delete_vertex_array(mesh.vertex_array);
        self.device.delete_buffer(mesh.vertex_buffer);
    }

    /// Release the pipeline's program object. Consumes the pipeline.
    pub fn dispose_pipeline(&mut self, pipeline: Pipeline) {
        self.device.delete_program(pipeline.program);
    }

    /// The background color this renderer clears to.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Change the background color.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }
}
