//! Headless renderer: draws the demo scene and writes it to an image file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use softraster::prelude::*;

/// Render the demo scene (a cube over a floor) to an image.
#[derive(Parser, Debug)]
#[command(name = "softraster", version, about)]
struct Args {
    /// Output file; the format follows the extension
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Half of the horizontal field of view, in degrees
    #[arg(long, default_value_t = 30.0)]
    fov_half: f64,

    #[arg(long, default_value_t = 0.1)]
    near: f64,

    #[arg(long, default_value_t = 1000.0)]
    far: f64,

    /// Render at N times the resolution and box-filter down (1 to 4)
    #[arg(short, long, default_value_t = 1)]
    supersample: u32,

    /// Cube rotation about the vertical axis, in degrees
    #[arg(long, default_value_t = 30.0)]
    angle: f64,

    /// Shade the cube once per face instead of per vertex
    #[arg(long)]
    flat: bool,

    /// Draw every polygon in its base color without lighting
    #[arg(long)]
    unlit: bool,

    /// Light position in camera space
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true,
          default_values_t = [-10.0, 10.0, 5.0])]
    light: Vec<f64>,

    #[arg(long, default_value_t = 20.0)]
    intensity: f64,

    /// Brightness floor, 0 to 1
    #[arg(long, default_value_t = 0.25)]
    ambient: f64,

    /// Interpolate depth and shading linearly in screen space
    #[arg(long)]
    linear: bool,

    /// Draw back faces too
    #[arg(long)]
    no_cull: bool,

    /// More output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            near: self.near,
            far: self.far,
            fov_half: self.fov_half.to_radians(),
            backface_culling: !self.no_cull,
            interpolation: if self.linear {
                Interpolation::Linear
            } else {
                Interpolation::PerspectiveCorrect
            },
            supersample: self.supersample,
            ..Default::default()
        }
    }

    fn light(&self) -> Option<PointLight> {
        match self.light.as_slice() {
            [x, y, z] if !self.unlit => Some(PointLight::new(
                Vec3::new(*x, *y, *z),
                self.intensity,
                self.ambient,
            )),
            _ => None,
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn run(args: &Args) -> Result<(), RenderError> {
    let mut engine = Engine::new(args.config())?;
    let scene = demo_scene(args.angle.to_radians(), !args.flat);
    let light = args.light();

    let frame = engine.render(&scene, light.as_ref());
    frame.save(&args.output)?;

    let stats = engine.stats();
    info!(
        "wrote {} ({}x{}): {} of {} polygons drawn, {} pixels",
        args.output.display(),
        args.width,
        args.height,
        stats.polygons_drawn(),
        stats.polygons_submitted,
        stats.pixels_written
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = TermLogger::init(
        args.log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
