//! Font registration for chart text.
//!
//! Text is laid out and rasterized with plotters' `ab_glyph` backend, which
//! only knows fonts registered at runtime. Everything in a chart uses the
//! "sans-serif" family, so one regular and one bold face are registered under
//! that name.

use crate::error::PlotError;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable naming a TrueType font file
pub const FONT_ENV: &str = "BENCHPLOT_FONT";

const FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<PathBuf> = OnceLock::new();

/// Register a font unless one already is; returns the regular face's path.
///
/// An explicit path (or `BENCHPLOT_FONT`) is the only candidate when given,
/// otherwise the well-known system locations are tried in order.
pub fn ensure(explicit: Option<&Path>) -> Result<&'static Path, PlotError> {
    if let Some(path) = REGISTERED.get() {
        return Ok(path.as_path());
    }

    let candidates = candidates(explicit);
    for path in &candidates {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::trace!("font {}: {}", path.display(), e);
                continue;
            }
        };
        let regular: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        if !register(FontStyle::Normal, regular, path) {
            continue;
        }

        let bold = bold_variant(path).and_then(|bold_path| {
            let bytes = std::fs::read(&bold_path).ok()?;
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            register(FontStyle::Bold, bytes, &bold_path).then_some(())
        });
        // Reuse the regular face for titles
        if bold.is_none() && !register(FontStyle::Bold, regular, path) {
            log::warn!("no bold face registered, chart titles will not render");
        }

        log::debug!("registered font {}", path.display());
        return Ok(REGISTERED.get_or_init(|| path.clone()).as_path());
    }

    Err(PlotError::FontUnavailable {
        tried: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Register `bytes` as the `style` face of the chart font family
fn register(style: FontStyle, bytes: &'static [u8], path: &Path) -> bool {
    match register_font(FAMILY, style, bytes) {
        Ok(()) => true,
        Err(_) => {
            log::warn!("{} is not a usable TrueType font", path.display());
            false
        }
    }
}

fn candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    if let Some(path) = std::env::var_os(FONT_ENV) {
        return vec![PathBuf::from(path)];
    }
    SYSTEM_FONTS.iter().map(PathBuf::from).collect()
}

/// `DejaVuSans.ttf` -> `DejaVuSans-Bold.ttf`, `Foo-Regular.ttf` -> `Foo-Bold.ttf`
fn bold_variant(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let base = stem.strip_suffix("-Regular").unwrap_or(stem);
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{base}-Bold.{ext}"),
        None => format!("{base}-Bold"),
    };
    Some(path.with_file_name(name))
}
