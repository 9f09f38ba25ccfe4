//! # Program Demo
//!
//! Authors a short pick and place program, logs the description of every
//! action and writes the queue as JSON for the program compiler.
//!
//! Usage: `program_demo [OUTPUT_JSON]`. Frame defaults are read from
//! `$MOTION_SW_ROOT/params/frame_defaults.toml` when available.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::{eyre::WrapErr, Result};
use log::{info, warn};

use motion_lib::{
    frame::{self, Frame},
    geom::{Joints, Rotation, Vector},
    MotionType, Program, ReferenceCs,
};
use util::{
    logger::{logger_init, LevelFilter},
    params,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Parameter file holding the frame defaults, relative to the params directory.
const FRAME_DEFAULTS_FILE: &str = "frame_defaults.toml";

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    logger_init(LevelFilter::Trace, None::<&str>).wrap_err("Failed to initialise logging")?;

    // ---- FRAME DEFAULTS ----

    match params::get_params_dir() {
        Ok(mut path) => {
            path.push(FRAME_DEFAULTS_FILE);
            let defaults = frame::load_frame_defaults(&path)
                .wrap_err_with(|| format!("Could not load frame defaults from {:?}", path))?;
            info!("Frame defaults loaded from {:?}", path);
            info!("    Speed: {} mm/s, zone: {} mm", defaults.speed, defaults.zone);
        }
        Err(e) => warn!("Using built in frame defaults: {}", e),
    }

    // ---- TARGETS ----

    let pick = Frame::new(Vector::new(300.0, -150.0, 50.0));
    let mut place = Frame::new(Vector::new(300.0, 150.0, 50.0));
    place.orientation.rotate_global(&Rotation::from_axis_angle(&Vector::Z_AXIS, 90.0));

    info!("Pick target:  {}", pick.robtarget_declaration());
    info!("Place target: {}", place.robtarget_declaration());
    info!(
        "Transfer distance: {} mm",
        Frame::distance_between(&pick, &place)
    );

    // ---- PROGRAM ----

    let mut program = Program::new();
    let approach = Vector::new(0.0, 0.0, 100.0);

    program.comment("Pick and place demo");
    program.push_settings();
    program.motion(MotionType::Joint);
    program.coordinates(ReferenceCs::World);
    program.speed_to(pick.speed as i32);
    program.zone_to(pick.zone as i32);
    program.joints_to(Joints::new(0.0, 0.0, 0.0, 0.0, 90.0, 0.0));

    program.transform_to(pick.position + approach, pick.orientation);
    program.motion(MotionType::Linear);
    program.move_by(-approach);
    program.wait(500);
    program.message("Part picked");
    program.move_by(approach);

    program.transform(place.position - pick.position, place.orientation / pick.orientation, true);
    program.move_by(-approach);
    program.wait(500);
    program.message("Part placed");
    program.move_by(approach);
    program.pop_settings();

    for action in program.actions() {
        info!("{:3}: {}", action.id(), action);
    }

    // ---- OUTPUT ----

    let json = program
        .to_json()
        .wrap_err("Could not serialise the program")?;

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, json).wrap_err_with(|| format!("Could not write {}", path))?;
            info!("Program written to {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
