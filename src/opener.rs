//! Opening streaming links in the system browser.

use crate::error::{AppError, Result};
use log::debug;
use std::process::{Command, Stdio};

const NO_ARGS: &[&str] = &[];
// `start` treats the first quoted argument as a window title
const WINDOWS_START: &[&str] = &["/C", "start", ""];

/// The platform's URL opener command and leading arguments.
pub fn opener_command() -> Result<(&'static str, &'static [&'static str])> {
    match std::env::consts::OS {
        "linux" | "freebsd" | "openbsd" | "netbsd" => Ok(("xdg-open", NO_ARGS)),
        "macos" => Ok(("open", NO_ARGS)),
        "windows" => Ok(("cmd", WINDOWS_START)),
        other => Err(AppError::Opener(format!("OS '{}' is not supported", other))),
    }
}

/// Only web links are handed to the opener.
pub fn is_openable(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Launch the opener for `url`, detached from the terminal.
pub fn open_url(url: &str) -> Result<()> {
    if !is_openable(url) {
        return Err(AppError::InvalidInput(format!("not a web link: {}", url)));
    }

    let (program, args) = opener_command()?;
    debug!("Opening {} with {}", url, program);

    Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| AppError::Opener(format!("failed to start {}: {}", program, e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_openable() {
        assert!(is_openable("https://open.spotify.com/search/x"));
        assert!(is_openable("http://example.com"));
        assert!(!is_openable("covers/001.jpg"));
        assert!(!is_openable("file:///etc/passwd"));
    }

    #[test]
    fn test_open_rejects_non_web_links() {
        let err = open_url("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_uses_xdg_open() {
        let (program, args) = opener_command().unwrap();
        assert_eq!(program, "xdg-open");
        assert!(args.is_empty());
    }
}
