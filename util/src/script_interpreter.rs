//! # Script interpreter
//!
//! Replays telecommands from a script file against the session clock.
//!
//! A script is a sequence of `<time_s>: <tc_json>;` entries, for example:
//!
//! ```text
//! 0.0: {"type": "GAIT", "payload": "BootUp"};
//! 2.0: {"type": "SET_SPEED", "payload": 0.5};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Pattern matching a single script entry.
const ENTRY_PATTERN: &str = r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A telecommand scheduled at a script time.
#[derive(Debug)]
struct Command {
    exec_time_s: f64,
    tc: Tc
}

/// Replays a script of timed telecommands.
///
/// Poll with `get_pending_tcs` (session time) or `get_pending_tcs_at` to take
/// the telecommands which have become due.
pub struct ScriptInterpreter {
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script contains no entries")]
    ScriptEmpty,

    #[error("Invalid script entry pattern: {0}")]
    BadPattern(regex::Error),

    #[error("Invalid timestamp `{0}`, expected seconds such as 1.0")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError),

    #[error("Entry at {0} s is earlier than the entry before it")]
    OutOfOrder(f64)
}

/// Result of polling the interpreter for commands.
#[derive(Debug)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Load the script at `script_path`.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = script_path.as_ref();
        if !path.is_file() {
            return Err(ScriptError::ScriptNotFound(path.to_path_buf()));
        }

        let script = fs::read_to_string(path)
            .map_err(ScriptError::ScriptLoadError)?;

        Self::from_script_str(&script)
    }

    /// Build an interpreter from the text of a script.
    ///
    /// Entries must be in non-decreasing time order.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {
        let re = RegexBuilder::new(ENTRY_PATTERN)
            .multi_line(true)
            .build()
            .map_err(ScriptError::BadPattern)?;

        let mut cmds = VecDeque::new();
        let mut last_time_s = 0.0;

        for cap in re.captures_iter(script) {
            let (time_str, tc_str) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(tc)) => (t.as_str(), tc.as_str()),
                _ => continue
            };

            let exec_time_s: f64 = time_str.parse()
                .map_err(|_| ScriptError::InvalidTimestamp(time_str.to_string()))?;
            if exec_time_s < last_time_s {
                return Err(ScriptError::OutOfOrder(exec_time_s));
            }
            last_time_s = exec_time_s;

            let tc = Tc::from_json(tc_str)
                .map_err(|e| ScriptError::InvalidTc(exec_time_s, e))?;

            cmds.push_back(Command { exec_time_s, tc });
        }

        if cmds.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(Self { cmds })
    }

    /// Take the TCs due at the current session time.
    pub fn get_pending_tcs(&mut self) -> PendingTcs {
        self.get_pending_tcs_at(get_elapsed_seconds())
    }

    /// Take the TCs due at `current_time_s`.
    ///
    /// Gait commands block for their whole choreography, so several entries
    /// may fall due in one poll. They are returned in script order.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let num_due = self.cmds.iter()
            .take_while(|c| c.exec_time_s <= current_time_s)
            .count();

        match num_due {
            0 => PendingTcs::None,
            n => PendingTcs::Some(self.cmds.drain(..n).map(|c| c.tc).collect())
        }
    }

    /// Number of TCs still to be taken.
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Script time of the last entry.
    pub fn get_duration(&self) -> f64 {
        self.cmds.back().map_or(0.0, |c| c.exec_time_s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCRIPT: &str = r#"
        0.0: {"type": "GAIT", "payload": "BootUp"};
        1.5: {"type": "SET_SPEED", "payload": 0.5};
        1.5: {"type": "CENTER_ALL"};
        4.0: {"type": "GAIT", "payload": "ShutDown"};
    "#;

    #[test]
    fn test_script_timing() {
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_tcs(), 4);
        assert_eq!(si.get_duration(), 4.0);

        match si.get_pending_tcs_at(0.1) {
            PendingTcs::Some(v) => assert_eq!(v.len(), 1),
            p => panic!("Expected one pending TC, got {:?}", p)
        }

        assert!(matches!(si.get_pending_tcs_at(1.0), PendingTcs::None));

        match si.get_pending_tcs_at(2.0) {
            PendingTcs::Some(v) => {
                assert_eq!(v.len(), 2);
                assert_eq!(v[0], Tc::SetSpeed(0.5));
                assert_eq!(v[1], Tc::CenterAll);
            },
            p => panic!("Expected two pending TCs, got {:?}", p)
        }

        assert!(matches!(si.get_pending_tcs_at(10.0), PendingTcs::Some(_)));
        assert!(matches!(si.get_pending_tcs_at(10.0), PendingTcs::EndOfScript));
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("nothing to see here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_script_str(r#"1.0: {"type": "DANCE"};"#),
            Err(ScriptError::InvalidTc(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::from_script_str(
                "2.0: {\"type\": \"CENTER_ALL\"};\n1.0: {\"type\": \"CENTER_ALL\"};"
            ),
            Err(ScriptError::OutOfOrder(_))
        ));
        assert!(matches!(
            ScriptInterpreter::new("/no/such/script.hsc"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
