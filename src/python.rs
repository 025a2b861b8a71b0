//! Python environment probing
//!
//! The extension needs the interpreter's headers and numpy's headers, and
//! inherits the compiler flags the interpreter was built with. Each value is
//! asked for explicitly by running the interpreter; numpy is imported in a
//! child process so nothing global is toggled in ours.

use crate::extensions::FlagSet;
use std::path::PathBuf;
use std::process::Command;

const INCLUDE_SCRIPT: &str = "import sysconfig; print(sysconfig.get_paths()['include'])";

const NUMPY_SCRIPT: &str = "import numpy; print(numpy.get_include())";

const FLAGS_SCRIPT: &str = "import sysconfig; \
    print(' '.join(filter(None, [sysconfig.get_config_var(v) for v in ('CFLAGS', 'CCSHARED')])))";

/// Handle on a Python interpreter used for probing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonProbe {
    interpreter: String,
}

impl PythonProbe {
    #[must_use]
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Probe the interpreter from `PYTHON`, else the platform default name
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(crate::env_vars::python().unwrap_or_else(|| default_interpreter().to_string()))
    }

    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Directory holding `Python.h`
    #[must_use]
    pub fn include_dir(&self) -> Option<PathBuf> {
        self.run(INCLUDE_SCRIPT).map(PathBuf::from)
    }

    /// Directory holding numpy's C headers (`numpy/arrayobject.h`)
    #[must_use]
    pub fn numpy_include(&self) -> Option<PathBuf> {
        self.run(NUMPY_SCRIPT).map(PathBuf::from)
    }

    /// Compiler flags the interpreter was configured with (`CFLAGS` + `CCSHARED`)
    #[must_use]
    pub fn compiler_flags(&self) -> Option<FlagSet> {
        self.run(FLAGS_SCRIPT).map(|flags| FlagSet::parse(&flags))
    }

    fn run(&self, script: &str) -> Option<String> {
        let output = match Command::new(&self.interpreter).args(["-c", script]).output() {
            Ok(output) => output,
            Err(e) => {
                crate::debug!("Failed to run {}: {e}", self.interpreter);
                return None;
            }
        };

        if !output.status.success() {
            crate::debug!(
                "{} exited with {}: {}",
                self.interpreter,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        let value = String::from_utf8(output.stdout).ok()?.trim().to_string();

        (!value.is_empty()).then_some(value)
    }
}

/// Interpreter name tried when `PYTHON` is unset
#[must_use]
pub const fn default_interpreter() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}
