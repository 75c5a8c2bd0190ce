//! Minimal bootstrap variant: an 800x800 window cleared to the background
//! color every frame, with no geometry drawn.

use log::debug;

use kindling::window::WindowBuilder;

fn main() {
    env_logger::init();

    let mut window = match WindowBuilder::new("blank", 800, 800).build() {
        Ok(window) => window,
        Err(e) => {
            println!("{}", e);
            std::process::exit(-1);
        }
    };

    while !window.should_close() {
        // Redraw unconditionally; with double buffering there is no
        // guarantee an untouched back buffer keeps last frame's contents.
        window.renderer_mut().clear();
        for (_, event) in window.present() {
            debug!("window event: {:?}", event);
        }
    }
}
