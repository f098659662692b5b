//! Interactive viewer: the demo scene with a spinning cube.
//!
//! Keys: `S` flat/smooth shading, `C` backface culling, `P` perspective
//! correction, `L` light on/off, `Esc` quit.

use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use softraster::prelude::*;
use softraster::window::{FrameLimiter, Window, WindowEvent};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
/// Cube spin, radians per millisecond.
const SPIN_RATE: f64 = 0.0008;

fn main() -> Result<(), String> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .map_err(|e| e.to_string())?;

    let mut window = Window::new("softraster", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut engine = Engine::new(RenderConfig {
        width: WINDOW_WIDTH,
        height: WINDOW_HEIGHT,
        ..Default::default()
    })
    .map_err(|e| e.to_string())?;
    let mut frame_limiter = FrameLimiter::new(&window);

    let light = PointLight::default();
    let mut light_on = true;
    let mut smooth = true;
    let mut angle = 0.0;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => engine.resize(w, h).map_err(|e| e.to_string())?,
            WindowEvent::ToggleShading => {
                smooth = !smooth;
                info!("smooth shading: {smooth}");
            }
            WindowEvent::ToggleCulling => {
                let culling = !engine.config().backface_culling;
                engine.set_backface_culling(culling);
                info!("backface culling: {culling}");
            }
            WindowEvent::ToggleInterpolation => {
                let next = match engine.config().interpolation {
                    Interpolation::PerspectiveCorrect => Interpolation::Linear,
                    Interpolation::Linear => Interpolation::PerspectiveCorrect,
                };
                engine.set_interpolation(next);
                info!("interpolation: {next}");
            }
            WindowEvent::ToggleLight => {
                light_on = !light_on;
                info!("light: {light_on}");
            }
            WindowEvent::None => {}
        }

        let delta_ms = frame_limiter.wait_and_get_delta(&window);
        angle += delta_ms as f64 * SPIN_RATE;

        let scene = demo_scene(angle, smooth);
        let frame = engine.render(&scene, light_on.then_some(&light));
        window.present(frame)?;
    }

    Ok(())
}
