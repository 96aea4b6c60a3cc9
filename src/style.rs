//! Fixed display styles for the linked-list implementations.

use serde::Serialize;

/// Marker glyph drawn at every data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    /// Dash length and gap in points, `None` for a continuous line
    pub fn dash_pattern(self) -> Option<(f64, f64)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((7.5, 3.0)),
            LineStyle::DashDot => Some((10.0, 2.5)),
            LineStyle::Dotted => Some((1.5, 3.0)),
        }
    }
}

/// Plain RGB triple, converted to a plotters color at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const CYAN: Rgb = Rgb(0, 191, 191);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const LIME: Rgb = Rgb(0, 255, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const GRAY: Rgb = Rgb(128, 128, 128);

/// Default color cycle for charts without a style table
pub const PALETTE: [Rgb; 4] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplStyle {
    pub label: &'static str,
    pub marker: Marker,
    pub color: Rgb,
    pub line: LineStyle,
}

const STYLES: [(&str, ImplStyle); 7] = [
    (
        "lockfree",
        ImplStyle { label: "Lock-free", marker: Marker::Square, color: BLACK, line: LineStyle::Dashed },
    ),
    (
        "lazy",
        ImplStyle { label: "Lazy list", marker: Marker::TriangleUp, color: BLUE, line: LineStyle::Solid },
    ),
    (
        "lazy_racefree",
        ImplStyle { label: "Lazy (race-free)", marker: Marker::TriangleUp, color: CYAN, line: LineStyle::Dashed },
    ),
    (
        "optimistic",
        ImplStyle { label: "Optimistic", marker: Marker::TriangleDown, color: GREEN, line: LineStyle::DashDot },
    ),
    (
        "optimistic_racefree",
        ImplStyle {
            label: "Optimistic (race-free)",
            marker: Marker::TriangleDown,
            color: LIME,
            line: LineStyle::Dotted,
        },
    ),
    (
        "fine",
        ImplStyle { label: "Fine-grained", marker: Marker::Circle, color: RED, line: LineStyle::Solid },
    ),
    (
        "coarse",
        ImplStyle { label: "Coarse-grained", marker: Marker::Diamond, color: ORANGE, line: LineStyle::Dotted },
    ),
];

/// Order in which implementations appear in the linked-list charts
pub const PREFERRED_ORDER: [&str; 7] = [
    "coarse",
    "fine",
    "optimistic",
    "optimistic_racefree",
    "lazy",
    "lazy_racefree",
    "lockfree",
];

/// Look up the display style for an implementation name
pub fn lookup(name: &str) -> Option<&'static ImplStyle> {
    STYLES.iter().find(|(key, _)| *key == name).map(|(_, style)| style)
}
