//! Session management
//!
//! A session is one run of an executable. It owns the epoch all log and
//! archive timestamps are measured from, and a directory
//! `$HEX_SW_ROOT/<sessions_dir>/<exec>_<timestamp>/` holding the log file and
//! an `arch/` directory for CSV archives.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// strftime format of the session directory timestamp.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the archive directory inside a session.
const ARCH_DIR_NAME: &str = "arch";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Paths of the current session
#[derive(Clone, Debug)]
pub struct Session {
    /// The root directory for this session
    pub session_root: PathBuf,

    /// The root directory for this session's archives
    pub arch_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("The software root environment variable (HEX_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error("A session has already been started by this process")]
    AlreadyStarted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start the session for this process.
    ///
    /// Sets the session epoch and creates `{exec_name}_{timestamp}` inside
    /// `$HEX_SW_ROOT/{sessions_dir}`. May only be called once per process.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let root = crate::host::get_hex_sw_root()
            .map_err(|_| SessionError::SwRootNotSet)?;

        SESSION_EPOCH.try_init_once(Utc::now)
            .map_err(|_| SessionError::AlreadyStarted)?;
        let epoch = get_epoch().ok_or(SessionError::AlreadyStarted)?;

        let mut sessions_root = root;
        sessions_root.push(sessions_dir);

        Self::create_in(&sessions_root, exec_name, epoch)
    }

    /// Create the session directories for a session started at `epoch`
    /// inside `sessions_root`, without touching the process epoch.
    pub fn create_in(
        sessions_root: &Path,
        exec_name: &str,
        epoch: &DateTime<Utc>
    ) -> Result<Self, SessionError> {
        let session_root = sessions_root.join(
            format!("{}_{}", exec_name, epoch.format(TIMESTAMP_FORMAT))
        );
        let arch_root = session_root.join(ARCH_DIR_NAME);

        // Creating the archive dir creates the session root too
        fs::create_dir_all(&arch_root).map_err(SessionError::CannotCreateDir)?;

        Ok(Session {
            log_file_path: session_root.join(format!("{}.log", exec_name)),
            session_root,
            arch_root,
        })
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// Returns zero if no session has been started yet.
pub fn get_elapsed_seconds() -> f64 {
    match get_epoch() {
        Some(e) => time::duration_to_seconds(Utc::now() - *e)
            .unwrap_or(std::f64::NAN),
        None => 0.0,
    }
}

/// The session's epoch, `None` if no session has been started yet.
pub fn get_epoch() -> Option<&'static DateTime<Utc>> {
    SESSION_EPOCH.get()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_in() {
        let root = std::env::temp_dir().join("hex_sw_session_test");
        let epoch = DateTime::parse_from_rfc3339("2021-03-04T05:06:07Z")
            .unwrap()
            .with_timezone(&Utc);

        let session = Session::create_in(&root, "hex_exec", &epoch).unwrap();

        assert_eq!(session.session_root, root.join("hex_exec_20210304_050607"));
        assert_eq!(session.arch_root, session.session_root.join("arch"));
        assert_eq!(session.log_file_path, session.session_root.join("hex_exec.log"));
        assert!(session.arch_root.is_dir());

        // Creating the same session twice is harmless
        assert!(Session::create_in(&root, "hex_exec", &epoch).is_ok());

        fs::remove_dir_all(&root).ok();
    }
}
