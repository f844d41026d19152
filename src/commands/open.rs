use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{VoxError, VoxResult};
use crate::terminal::Console;
use crate::utils::path_utils;

/// The platform's "open with the associated application" helper.
#[derive(Clone, Debug)]
pub struct Opener {
    program: String,
    leading_args: Vec<String>,
}

impl Opener {
    #[cfg(windows)]
    pub fn native() -> Self {
        // `start` treats the first quoted argument as a window title.
        Opener {
            program: "cmd".to_string(),
            leading_args: vec!["/C".to_string(), "start".to_string(), String::new()],
        }
    }

    #[cfg(target_os = "macos")]
    pub fn native() -> Self {
        Self::with_program("open")
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    pub fn native() -> Self {
        Self::with_program("xdg-open")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Opener {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn open(&self, target: &Path) -> VoxResult<()> {
        let executable = path_utils::find_executable(&self.program)
            .ok_or_else(|| VoxError::ExternalTool(format!("'{}' was not found on PATH", self.program)))?;

        debug!("Opening {} with {}", target.display(), executable.display());
        let status = Command::new(&executable)
            .args(&self.leading_args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| VoxError::ExternalTool(format!("failed to launch '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(VoxError::ExternalTool(format!("'{}' exited with {}", self.program, status)));
        }
        Ok(())
    }
}

pub fn open_path(console: &mut Console, opener: &Opener, path: &Path) -> VoxResult<()> {
    let target = console.resolve(path);
    if !target.exists() {
        return Err(VoxError::NotFound(path.to_path_buf()));
    }

    opener.open(&target)?;
    console.line(format!("Opened '{}'.", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{ScriptedPrompter, SharedBuffer};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Console, SharedBuffer) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("doc.txt"), "hi").unwrap();
        let buffer = SharedBuffer::new();
        let console = Console::new(Box::new(buffer.clone()), Box::new(ScriptedPrompter::new([])), dir.path());
        (dir, console, buffer)
    }

    #[test]
    fn test_missing_helper_is_external_tool_error() {
        let (_dir, mut console, _) = setup();
        let opener = Opener::with_program("voxcmd-no-such-opener");

        let err = open_path(&mut console, &opener, Path::new("doc.txt")).unwrap_err();
        assert!(matches!(err, VoxError::ExternalTool(_)));
    }

    #[test]
    fn test_missing_target_is_not_found() {
        let (_dir, mut console, _) = setup();
        let opener = Opener::with_program("voxcmd-no-such-opener");

        let err = open_path(&mut console, &opener, Path::new("absent.pdf")).unwrap_err();
        assert!(matches!(err, VoxError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_exit_status() {
        let (_dir, mut console, buffer) = setup();

        open_path(&mut console, &Opener::with_program("true"), Path::new("doc.txt")).unwrap();
        assert!(buffer.contents().contains("Opened 'doc.txt'."));

        let err = open_path(&mut console, &Opener::with_program("false"), Path::new("doc.txt")).unwrap_err();
        assert!(matches!(err, VoxError::ExternalTool(_)));
    }
}
