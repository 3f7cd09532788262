//! Main hexapod executable entry point.
//!
//! # Architecture
//!
//! The executable:
//!
//!     - Initialises the session, logging and parameters
//!     - Builds a simulated leg position store at its neutral pose
//!     - Executes either a single gait command given on the command line or 
//!       every telecommand of a timestamped script
//!     - Logs the final position of every leg
//!
//! Ctrl-C cancels the running gait at its next sub-phase boundary and stops
//! the script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::WrapErr};
use log::{debug, info, warn};
use std::{path::PathBuf, thread, time::Duration};
use structopt::StructOpt;

// Internal
use comms_if::tc::{Tc, gait_ctrl::{GaitCmd, GaitType}};
use hex_lib::{
    cancel::CancelToken,
    data_store::DataStore,
    delay::HostDelay,
    gait_ctrl::{canonical_stance, GaitCtrlParams},
    leg::{LegId, SimLegStore},
    params::HexExecParams,
    tc_processor::{self, TcOutcome},
};
use util::{
    archive::Archiver,
    logger::{logger_init, parse_level},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingTcs},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Period at which the script is polled for new telecommands.
const SCRIPT_POLL_PERIOD_S: f64 = 0.05;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "hex_exec", about = "Hexapod locomotion executable")]
struct Opts {
    /// Executable parameter file, relative to the params directory
    #[structopt(long, default_value = "hex_exec.toml")]
    params: String,

    /// Gait used by planar walk commands (tripod, wave or ripple)
    #[structopt(long)]
    gait: Option<GaitType>,

    /// Telecommand script to execute
    #[structopt(long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Single gait command to execute
    #[structopt(subcommand)]
    cmd: Option<GaitCmd>,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "hex_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Load the exec parameters first as they set the log level
    let exec_params: HexExecParams = util::params::load(&opts.params)
        .wrap_err("Could not load exec params")?;

    // Initialise logger
    let log_level = parse_level(&exec_params.log_level)
        .wrap_err("Invalid log level in exec params")?;
    logger_init(log_level, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Hexapod Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let gait_params: GaitCtrlParams = util::params::load(&exec_params.gait_ctrl_params)
        .wrap_err("Could not load gait control params")?;

    info!("Parameters loaded");

    // ---- INITIALISE LEGS ----

    let neutral = match exec_params.neutral_pos {
        Some(n) => n,
        None => {
            let gait = gait_params.gait.clamped();
            canonical_stance(
                &gait_params.leg_mount_angles_deg, 
                gait.stance_width_mm, 
                gait.stand_height_mm
            )
        }
    };

    let mut legs = SimLegStore::new(neutral);

    if exec_params.archive_demands {
        let archiver = Archiver::from_path(&session, "legs/demands.csv")
            .wrap_err("Failed to create the leg demand archive")?;
        info!("Archiving leg demands to {:?}", archiver.path());
        legs = legs.with_archiver(archiver);
    }

    // ---- INITIALISE ENGINES ----

    let mut ds = DataStore::new(gait_params, HostDelay, Some(legs));
    if let Some(gait) = opts.gait {
        ds.gait_type = gait;
    }
    info!("Walking gait: {}", ds.gait_type);

    let cancel = CancelToken::new();
    ds.set_cancel_token(cancel.clone());
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())
            .wrap_err("Failed to install the Ctrl-C handler")?;
    }

    info!("Initialisation complete\n");

    // ---- EXECUTION ----

    match (opts.cmd, opts.script) {
        (Some(cmd), _) => {
            exec_tc(&mut ds, &Tc::Gait(cmd));
        },
        (None, Some(path)) => {
            info!("Loading script from {:?}", path);

            let mut si = ScriptInterpreter::new(&path)
                .wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} TCs\n",
                si.get_duration(),
                si.get_num_tcs()
            );

            run_script(&mut ds, &mut si, &cancel);
        },
        (None, None) => warn!("No command or script given, nothing to do")
    }

    // ---- SHUTDOWN ----

    if let Some(ref legs) = ds.legs {
        info!("Final leg positions after {} demands:", legs.num_demands());
        for (leg, pos) in LegId::ALL.iter().zip(legs.positions().iter()) {
            info!(
                "    {}: ({:7.2}, {:7.2}, {:7.2}) mm", 
                leg, pos.x_mm, pos.y_mm, pos.z_mm
            );
        }
    }

    info!("End of execution");

    Ok(())
}

/// Execute every TC in the script at its scheduled time.
fn run_script(
    ds: &mut DataStore<SimLegStore, HostDelay>, 
    si: &mut ScriptInterpreter,
    cancel: &CancelToken
) {
    loop {
        if cancel.is_cancelled() {
            warn!("Script cancelled");
            break;
        }

        match si.get_pending_tcs() {
            PendingTcs::None => {
                thread::sleep(Duration::from_secs_f64(SCRIPT_POLL_PERIOD_S))
            },
            PendingTcs::Some(tcs) => {
                for tc in tcs.iter() {
                    exec_tc(ds, tc);
                }
            },
            PendingTcs::EndOfScript => {
                info!("End of script reached");
                break;
            }
        }
    }
}

/// Execute a single TC and log its outcome.
fn exec_tc(ds: &mut DataStore<SimLegStore, HostDelay>, tc: &Tc) {
    debug!("Executing {:?}", tc);

    match tc_processor::exec(ds, tc) {
        TcOutcome::Done => info!("OK"),
        TcOutcome::Applied(v) => info!("OK: {}", v),
        TcOutcome::Unavailable => warn!("ERR: legs unavailable"),
        TcOutcome::Cancelled => warn!("ERR: cancelled")
    }
}
