/// Abstraction over the GL function table.
pub mod device;

/// Low-level rendering subsystem.
pub mod render;

/// A single point of geometry fed to the vertex stage.
///
/// The layout is what the default pipeline expects: one 3-float position
/// attribute at location 0, tightly packed.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in normalized device coordinates.
    pub pos: [f32; 3],
}

/// An RGBA color with floating-point components in `[0.0, 1.0]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Create a color from the four components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color::rgba(r, g, b, 1.0)
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Color::rgba(c[0], c[1], c[2], c[3])
    }
}

/// The vertices of an equilateral triangle centered on the origin, with a
/// unit-length base on the lower edge and the apex pointing up.
///
/// The base sits at height `-0.5 * sqrt(3) / 3` and the apex at
/// `0.5 * sqrt(3) * 2 / 3`, which puts the centroid at the origin.
pub fn equilateral_triangle() -> [Vertex; 3] {
    let base = -0.5 * 3.0f32.sqrt() / 3.0;
    let apex = 0.5 * 3.0f32.sqrt() * 2.0 / 3.0;
    [
        Vertex {
            pos: [-0.5, base, 0.0],
        },
        Vertex {
            pos: [0.5, base, 0.0],
        },
        Vertex {
            pos: [0.0, apex, 0.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn triangle_is_equilateral() {
        let [a, b, c] = equilateral_triangle();
        let side = |p: Vertex, q: Vertex| {
            ((p.pos[0] - q.pos[0]).powi(2) + (p.pos[1] - q.pos[1]).powi(2)).sqrt()
        };
        assert!((side(a, b) - 1.0).abs() < EPSILON);
        assert!((side(b, c) - 1.0).abs() < EPSILON);
        assert!((side(c, a) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn triangle_heights() {
        let [a, b, c] = equilateral_triangle();
        let expected_base = -0.5 * 3.0f32.sqrt() / 3.0;
        let expected_apex = 0.5 * 3.0f32.sqrt() * 2.0 / 3.0;
        assert!((a.pos[1] - expected_base).abs() < EPSILON);
        assert!((b.pos[1] - expected_base).abs() < EPSILON);
        assert!((c.pos[1] - expected_apex).abs() < EPSILON);
        // All three sit on the z = 0 plane.
        assert_eq!(a.pos[2], 0.0);
        assert_eq!(b.pos[2], 0.0);
        assert_eq!(c.pos[2], 0.0);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        // The attribute descriptor in the device layer assumes a 12-byte
        // stride with no padding.
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
    }

    #[test]
    fn color_conversions() {
        assert_eq!(Color::from((0.2, 0.2, 0.2)), Color::rgb(0.2, 0.2, 0.2));
        assert_eq!(
            Color::from([0.8, 0.3, 0.02, 1.0]),
            Color::rgba(0.8, 0.3, 0.02, 1.0)
        );
    }
}
