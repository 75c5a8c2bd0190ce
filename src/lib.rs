//! `kindling` is a small bootstrap library for getting an OpenGL window on
//! screen with a minimum of ceremony: one window, one shader pipeline, one
//! triangle.
//!
//! # Example
//!
//! ```no_run
//! extern crate kindling;
//! use kindling::*;
//!
//! pub fn main() {
//!     let mut window = window::WindowBuilder::new("kindling", 800, 800)
//!         .build()
//!         .unwrap();
//!     let (pipeline, mesh) = {
//!         let renderer = window.renderer_mut();
//!         let pipeline = renderer
//!             .create_pipeline(
//!                 graphics::render::TRIANGLE_VERTEX_SHADER,
//!                 graphics::render::TRIANGLE_FRAGMENT_SHADER,
//!             )
//!             .unwrap();
//!         let mesh = renderer.upload_mesh(&graphics::equilateral_triangle());
//!         (pipeline, mesh)
//!     };
//!     'main: loop {
//!         if window.should_close() {
//!             break 'main;
//!         }
//!         let renderer = window.renderer_mut();
//!         renderer.clear();
//!         renderer.draw(&pipeline, &mesh);
//!         for (_, event) in window.present() {
//!             println!("{:?}", event);
//!         }
//!     }
//!     let renderer = window.renderer_mut();
//!     renderer.dispose_mesh(mesh);
//!     renderer.dispose_pipeline(pipeline);
//! }
//! ```

#![deny(missing_docs)]

#[allow(unused)]
#[macro_use]
extern crate log;

/// Routines for creating and managing the application window.
pub mod window;

/// API for interacting with the low-level rendering system.
pub mod graphics;
