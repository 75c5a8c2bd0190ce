//! Full bootstrap variant: an 800x800 window with an orange equilateral
//! triangle redrawn every frame until the window is closed.

use log::{debug, info};

use kindling::graphics::{equilateral_triangle, render};
use kindling::window::WindowBuilder;

const WINDOW_TITLE: &str = "kindling";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 800;

fn main() {
    env_logger::init();
    info!("starting up");

    let mut window = match WindowBuilder::new(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT).build() {
        Ok(window) => window,
        Err(e) => {
            println!("{}", e);
            std::process::exit(-1);
        }
    };

    let (pipeline, mesh) = {
        let renderer = window.renderer_mut();
        let pipeline = match renderer.create_pipeline(
            render::TRIANGLE_VERTEX_SHADER,
            render::TRIANGLE_FRAGMENT_SHADER,
        ) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                println!("{}", e);
                std::process::exit(-1);
            }
        };
        let mesh = renderer.upload_mesh(&equilateral_triangle());
        (pipeline, mesh)
    };

    let mut fps = 0.0;
    let mut frame = 0;
    let mut last = std::time::Instant::now();
    'main: loop {
        if window.should_close() {
            break 'main;
        }

        let renderer = window.renderer_mut();
        renderer.clear();
        renderer.draw(&pipeline, &mesh);
        for (_, event) in window.present() {
            debug!("window event: {:?}", event);
        }

        frame += 1;
        if frame > 120 {
            frame = 0;
            info!("{:.0} fps", fps);
        }
        let dt = last.elapsed().as_secs_f64();
        let new_fps = 1.0 / dt;
        fps = 0.9 * fps + 0.1 * new_fps;
        last = std::time::Instant::now();
    }

    // GPU objects go before the window; the context has to outlive them.
    let renderer = window.renderer_mut();
    renderer.dispose_mesh(mesh);
    renderer.dispose_pipeline(pipeline);
    info!("clean shutdown");
}
