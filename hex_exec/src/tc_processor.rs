//! # Telecommand processor module
//!
//! The telecommand processor maps each TC onto the gait engines. Height and
//! speed are clamped here before the engines ever see them, and commands that
//! need the legs are skipped when no leg position store is attached.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use embedded_hal::blocking::delay::DelayUs;
use log::{debug, info, warn};

// Internal
use comms_if::tc::{
    Tc, 
    gait_ctrl::{
        GaitCmd, GaitType,
        DEFAULT_WALK_STEP_LENGTH_MM, DEFAULT_WALK_STEP_HEIGHT_MM,
        DEFAULT_WAVE_STEP_LENGTH_MM, DEFAULT_WAVE_STEP_HEIGHT_MM,
        DEFAULT_RIPPLE_STEP_LENGTH_MM, DEFAULT_RIPPLE_STEP_HEIGHT_MM,
        DEFAULT_ROTATE_STEP_HEIGHT_MM
    }
};
use crate::{
    data_store::DataStore,
    gait_ctrl::{GaitCtrl, GaitCtrlError, MAX_STAND_HEIGHT_MM, MIN_STAND_HEIGHT_MM},
    leg::LegPositionStore,
    ripple_gait::RippleGait
};
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Distance covered by one step of a planar walking command.
///
/// Units: millimeters
pub const WALK_VECTOR_STEP_MM: f64 = 30.0;

/// Rotation per step of a turn command.
///
/// Units: degrees
pub const TURN_STEP_DEG: f64 = 15.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The result of executing a telecommand, which the dispatcher reports back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TcOutcome {
    /// The command completed.
    Done,

    /// A setting was updated, the value is the one actually applied.
    Applied(f64),

    /// The command needs the legs but no leg position store is attached.
    Unavailable,

    /// The command was stopped by a cancellation request.
    Cancelled,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
pub fn exec<S, D>(ds: &mut DataStore<S, D>, tc: &Tc) -> TcOutcome 
where
    S: LegPositionStore,
    D: DelayUs<u32>
{
    ds.num_tcs += 1;

    match tc {
        Tc::SetHeight(h) => {
            let h = ds.gait_ctrl.config.set_stand_height(*h);
            debug!("Stand height set to {:.1} mm", h);

            if let Some(ref mut legs) = ds.legs {
                ds.gait_ctrl.stand(legs, None);
            }
            TcOutcome::Applied(h)
        },
        Tc::SetSpeed(s) => {
            let s = ds.gait_ctrl.config.set_speed(*s);
            debug!("Speed set to {:.2}", s);
            TcOutcome::Applied(s)
        },
        Tc::SetSmoothing { enabled, steps } => {
            ds.gait_ctrl.config.set_smoothing(*enabled, *steps);
            debug!(
                "Smoothing {}, {} steps", 
                if *enabled { "enabled" } else { "disabled" }, 
                ds.gait_ctrl.config.smooth_steps
            );
            TcOutcome::Done
        },
        Tc::SetGait(g) => {
            info!("Walking gait set to {}", g);
            ds.gait_type = *g;
            TcOutcome::Done
        },
        Tc::CenterAll => match ds.legs {
            Some(ref mut legs) => {
                legs.center_all();
                TcOutcome::Done
            },
            None => unavailable(tc)
        },
        Tc::Stop => match ds.legs {
            Some(ref mut legs) => {
                ds.gait_ctrl.stand(legs, None);
                TcOutcome::Done
            },
            None => unavailable(tc)
        },
        Tc::WalkVector { dx_mm, dy_mm } => match ds.legs {
            Some(ref mut legs) => outcome(walk_vector(
                &mut ds.gait_ctrl, &mut ds.ripple_gait, legs, ds.gait_type, *dx_mm, *dy_mm
            )),
            None => unavailable(tc)
        },
        Tc::Turn { angle_deg } => match ds.legs {
            Some(ref mut legs) => outcome(turn(&mut ds.gait_ctrl, legs, *angle_deg)),
            None => unavailable(tc)
        },
        Tc::Gait(cmd) => match ds.legs {
            Some(ref mut legs) => outcome(exec_gait_cmd(
                &mut ds.gait_ctrl, &mut ds.ripple_gait, legs, cmd
            )),
            None => unavailable(tc)
        }
    }
}

/// Run a single gait command against the given legs.
pub fn exec_gait_cmd<S, D>(
    gait_ctrl: &mut GaitCtrl<D>,
    ripple_gait: &mut RippleGait<D>,
    legs: &mut S,
    cmd: &GaitCmd
) -> Result<(), GaitCtrlError>
where
    S: LegPositionStore + ?Sized,
    D: DelayUs<u32>
{
    match *cmd {
        GaitCmd::Walk { 
            direction_deg, steps, step_length_mm, step_height_mm, cycle_time_s 
        } => gait_ctrl.walk(
            legs, direction_deg, steps, step_length_mm, step_height_mm, cycle_time_s
        ),
        GaitCmd::WaveWalk { 
            direction_deg, steps, step_length_mm, step_height_mm, leg_time_s 
        } => gait_ctrl.wave_walk(
            legs, direction_deg, steps, step_length_mm, step_height_mm, leg_time_s
        ),
        GaitCmd::RippleWalk { 
            direction_deg, steps, step_length_mm, step_height_mm, phase_time_s 
        } => ripple_gait.walk(
            legs, 
            &gait_ctrl.config, 
            direction_deg, 
            steps, 
            step_length_mm, 
            step_height_mm, 
            phase_time_s
        ),
        GaitCmd::Rotate { angle_deg, steps, step_height_mm, cycle_time_s } => 
            gait_ctrl.rotate(legs, angle_deg, steps, step_height_mm, cycle_time_s),
        GaitCmd::Stand { height_mm } => {
            gait_ctrl.stand(legs, height_mm.map(clamp_height));
            Ok(())
        },
        GaitCmd::Sit { height_mm } => {
            gait_ctrl.sit(legs, Some(clamp_height(height_mm)));
            Ok(())
        },
        GaitCmd::Squat { offset_mm } => {
            gait_ctrl.squat(legs, offset_mm);
            Ok(())
        },
        GaitCmd::ResetPositions => {
            gait_ctrl.reset_positions(legs);
            Ok(())
        },
        GaitCmd::TiltForward { offset_mm } => {
            gait_ctrl.tilt_forward(legs, offset_mm);
            Ok(())
        },
        GaitCmd::TiltBack { offset_mm } => {
            gait_ctrl.tilt_back(legs, offset_mm);
            Ok(())
        },
        GaitCmd::TiltLeft { offset_mm } => {
            gait_ctrl.tilt_left(legs, offset_mm);
            Ok(())
        },
        GaitCmd::TiltRight { offset_mm } => {
            gait_ctrl.tilt_right(legs, offset_mm);
            Ok(())
        },
        GaitCmd::Twist { angle_deg } => {
            gait_ctrl.twist(legs, angle_deg);
            Ok(())
        },
        GaitCmd::BootUp => gait_ctrl.boot_up(legs),
        GaitCmd::ShutDown => gait_ctrl.shut_down(legs),
    }
}

/// Walk by a planar displacement with the given gait.
///
/// The direction is that of the displacement and one step is taken per 
/// 30 mm of distance, at least one. Step sizes are the gait's defaults.
pub fn walk_vector<S, D>(
    gait_ctrl: &mut GaitCtrl<D>,
    ripple_gait: &mut RippleGait<D>,
    legs: &mut S,
    gait_type: GaitType,
    dx_mm: f64,
    dy_mm: f64
) -> Result<(), GaitCtrlError>
where
    S: LegPositionStore + ?Sized,
    D: DelayUs<u32>
{
    let direction_deg = dy_mm.atan2(dx_mm).to_degrees();
    let steps = ((dx_mm.hypot(dy_mm) / WALK_VECTOR_STEP_MM) as u32).max(1);

    debug!("Walk vector ({:.1}, {:.1}) mm: {} {} steps", dx_mm, dy_mm, steps, gait_type);

    let cmd = match gait_type {
        GaitType::Tripod => GaitCmd::Walk {
            direction_deg,
            steps,
            step_length_mm: DEFAULT_WALK_STEP_LENGTH_MM,
            step_height_mm: DEFAULT_WALK_STEP_HEIGHT_MM,
            cycle_time_s: None
        },
        GaitType::Wave => GaitCmd::WaveWalk {
            direction_deg,
            steps,
            step_length_mm: DEFAULT_WAVE_STEP_LENGTH_MM,
            step_height_mm: DEFAULT_WAVE_STEP_HEIGHT_MM,
            leg_time_s: None
        },
        GaitType::Ripple => GaitCmd::RippleWalk {
            direction_deg,
            steps,
            step_length_mm: DEFAULT_RIPPLE_STEP_LENGTH_MM,
            step_height_mm: DEFAULT_RIPPLE_STEP_HEIGHT_MM,
            phase_time_s: None
        },
    };

    exec_gait_cmd(gait_ctrl, ripple_gait, legs, &cmd)
}

/// Turn in place by `angle_deg`, split into steps of at most 15 degrees.
pub fn turn<S, D>(gait_ctrl: &mut GaitCtrl<D>, legs: &mut S, angle_deg: f64) 
    -> Result<(), GaitCtrlError>
where
    S: LegPositionStore + ?Sized,
    D: DelayUs<u32>
{
    let steps = ((angle_deg / TURN_STEP_DEG).trunc().abs() as u32).max(1);

    debug!("Turn {:.1} deg in {} steps", angle_deg, steps);

    gait_ctrl.rotate(
        legs, angle_deg / steps as f64, steps, DEFAULT_ROTATE_STEP_HEIGHT_MM, None
    )
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn outcome(result: Result<(), GaitCtrlError>) -> TcOutcome {
    match result {
        Ok(()) => TcOutcome::Done,
        Err(GaitCtrlError::Cancelled { .. }) => TcOutcome::Cancelled
    }
}

/// Heights carried by gait commands get the same range as `SetHeight`.
fn clamp_height(height_mm: f64) -> f64 {
    let clamped = clamp(height_mm, MIN_STAND_HEIGHT_MM, MAX_STAND_HEIGHT_MM);
    if clamped != height_mm {
        debug!("Height {:.1} mm clamped to {:.1} mm", height_mm, clamped);
    }
    clamped
}

fn unavailable(tc: &Tc) -> TcOutcome {
    warn!("Legs unavailable, ignoring {:?}", tc);
    TcOutcome::Unavailable
}
