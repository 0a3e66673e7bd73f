#![forbid(unsafe_code)]

use std::{
    error::Error,
    io::{self, Write},
    path::PathBuf,
    sync::atomic::AtomicBool,
};

use core::num::NonZeroU32;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use fractallib::{
    palette_from_hex, render, Driver as LibDriver, Fractal, Light, Options, Oversampling as LibOversampling,
    PaletteMode as LibPaletteMode, RenderSettings, Status, View,
};

use crate::command_line_interface::{Cli, Colorize as CliColorize, Driver as CliDriver, Oversampling as CliOversampling, PaletteMode as CliPaletteMode, Shading as CliShading};

mod command_line_interface;
mod resolution;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    if let Some(jobs) = args.jobs {
        ThreadPoolBuilder::new().num_threads(jobs.get()).build_global()?;
    }

    let width = args.resolution.x_resolution();
    let height = args.resolution.y_resolution();

    let fractal = match args.julia {
        Some(seed) => Fractal::Julia {
            seed,
            max_iter: args.max_iterations,
        },
        None => Fractal::Mandelbrot {
            max_iter: args.max_iterations,
        },
    };

    let zoom = 2.0_f64.powf(args.zoom);
    let imag_distance = 3.0 / zoom;
    let real_distance = f64::from(width.get()) / f64::from(height.get()) * imag_distance;
    let view = View::new(
        (args.real_center - real_distance / 2.0, args.imag_center - imag_distance / 2.0),
        (real_distance, imag_distance),
    );

    let palette_refs: Vec<&str> = args.palette.iter().map(String::as_str).collect();
    let palette = palette_from_hex(args.palette_len, &palette_refs, args.interior_color.as_deref()).map_err(|e| Box::new(e) as Box<dyn Error>)?;

    let settings = build_settings(&args);

    if args.verbose {
        give_user_feedback(&args, width, height);
    }

    let progress_bar = if args.verbose {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let status_cb = progress_bar.as_ref().map(|pb| {
        move |status: Status| {
            pb.set_position((status.progress * 100.0).round() as u64);
        }
    });
    let on_status: Option<&(dyn Fn(Status) + Sync)> = status_cb.as_ref().map(|f| f as &(dyn Fn(Status) + Sync));

    let cancel = AtomicBool::new(false);

    let outcome = render(&fractal, view, &palette, &settings, width, height, driver(args.driver), on_status, &cancel)
        .map_err(|e| Box::new(e) as Box<dyn Error>)?;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    if args.verbose {
        _ = write!(io::stdout(), "\rEncoding and saving image");
    }

    let out_path = PathBuf::from(&args.output_path);
    outcome.into_image().save(&out_path)?;

    if args.verbose {
        _ = writeln!(io::stdout(), "\rSaved image as {}                       ", out_path.display());
    }

    Ok(())
}

fn build_settings(args: &Cli) -> RenderSettings {
    let mut options = Options::empty();
    if args.orbits {
        options = options.union(Options::ORBITS);
    }
    if args.inside_distance {
        options = options.union(Options::INSIDE_DISTANCE);
    }
    match args.shading {
        CliShading::None => {}
        CliShading::Simple3D => options = options.union(Options::SIMPLE_3D),
        CliShading::BlinnPhong3D => options = options.union(Options::BLINN_PHONG_3D),
    }

    RenderSettings {
        colorize: match args.colorize {
            CliColorize::Iterations => fractallib::Colorize::Iterations,
            CliColorize::Distance => fractallib::Colorize::Distance,
            CliColorize::Potential => fractallib::Colorize::Potential,
        },
        palette_mode: match args.palette_mode {
            CliPaletteMode::Linear => LibPaletteMode::Linear,
            CliPaletteMode::Modulo => LibPaletteMode::Modulo,
            CliPaletteMode::Hue => LibPaletteMode::Hue,
            CliPaletteMode::HueDyn => LibPaletteMode::HueDyn,
            CliPaletteMode::LchDyn => LibPaletteMode::LchDyn,
        },
        options,
        stripes: args.stripes,
        steps: args.steps,
        ncycle: args.ncycle.max(1),
        oversampling: match args.oversampling {
            CliOversampling::X1 => LibOversampling::X1,
            CliOversampling::X2 => LibOversampling::X2,
            CliOversampling::X3 => LibOversampling::X3,
        },
        light: Light {
            angle: args.light_angle,
            elevation: args.light_elevation,
            opacity: args.light_opacity,
            ambient: args.light_ambient,
            diffuse: args.light_diffuse,
            specular: args.light_specular,
            shininess: args.light_shininess,
            gamma: args.gamma,
        },
    }
}

const fn driver(d: CliDriver) -> LibDriver {
    match d {
        CliDriver::Vectorized => LibDriver::Vectorized,
        CliDriver::SqemRecursive => LibDriver::SqemRecursive,
        CliDriver::SqemLinear => LibDriver::SqemLinear,
    }
}

/// Output some basic information about what the program will be rendering.
fn give_user_feedback(args: &Cli, width: NonZeroU32, height: NonZeroU32) {
    let kind = if args.julia.is_some() { "Julia set" } else { "Mandelbrot set" };
    let mut header = format!("---- Generating a {kind} image with a resolution of {width} by {height} pixels", width = width.get(), height = height.get());
    if args.zoom > 0.0 {
        header += &format!(" zoomed by a factor of {}", 2.0_f64.powf(args.zoom));
    }
    header += " ----";
    println!("{header}");
}
