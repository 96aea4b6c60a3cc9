//! Opening rendered charts in the desktop image viewer.

use std::path::Path;
use std::process::Command;

/// Program that opens a file with its default application
fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Open `path` without waiting for the viewer to exit
pub fn show(path: &Path) {
    match Command::new(opener()).arg(path).spawn() {
        Ok(child) => log::debug!("opened {} (pid {})", path.display(), child.id()),
        Err(e) => eprintln!("Warning: could not open {}: {}", path.display(), e),
    }
}
