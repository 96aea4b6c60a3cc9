//! Embedded spinlock benchmark timings.
//!
//! Shared counter benchmark, 1M increments split across the threads. Times
//! are wall-clock seconds per run.

use crate::style::Marker;
use clap::ValueEnum;

/// One lock implementation's timings, aligned by index with the thread counts
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    pub label: &'static str,
    pub marker: Marker,
    pub times: &'static [f64],
}

#[derive(Debug, Clone, Copy)]
pub struct SpinlockDataset {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub output: &'static str,
    /// Figure size in inches
    pub figure: (f64, f64),
    pub threads: &'static [u32],
    pub variants: &'static [Variant],
    /// Single-thread reference time drawn as the "Ideal" line
    pub ideal: f64,
    /// Step between labelled thread counts, `None` to label every count
    pub tick_step: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetName {
    /// 8-thread laptop run
    Laptop,
    /// 24-thread Intel Xeon run on the Turing machine
    Turing24,
}

impl DatasetName {
    pub fn dataset(self) -> &'static SpinlockDataset {
        match self {
            DatasetName::Laptop => &LAPTOP,
            DatasetName::Turing24 => &TURING_24,
        }
    }
}

pub static LAPTOP: SpinlockDataset = SpinlockDataset {
    title: "Shared Counter Benchmark: Time vs Threads",
    subtitle: "1M increments",
    output: "benchmark_time_plot.png",
    figure: (10.0, 6.0),
    threads: &[1, 2, 3, 4, 5, 6, 7, 8],
    variants: &[
        Variant {
            label: "TAS",
            marker: Marker::Circle,
            times: &[0.012, 0.057, 0.093, 0.106, 0.216, 0.407, 0.479, 0.607],
        },
        Variant {
            label: "TTAS",
            marker: Marker::Square,
            times: &[0.015, 0.050, 0.075, 0.085, 0.193, 0.229, 0.239, 0.259],
        },
        Variant {
            label: "Backoff",
            marker: Marker::TriangleUp,
            times: &[0.016, 0.040, 0.051, 0.058, 0.080, 0.113, 0.130, 0.168],
        },
    ],
    ideal: 0.015,
    tick_step: None,
};

pub static TURING_24: SpinlockDataset = SpinlockDataset {
    title: "Shared Counter Benchmark: Time vs Threads (Turing - Intel Xeon)",
    subtitle: "1M increments",
    output: "benchmark_time_turing_24threads.png",
    figure: (12.0, 7.0),
    threads: &[
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
    ],
    variants: &[
        Variant {
            label: "TAS",
            marker: Marker::Circle,
            times: &[
                0.040, 0.189, 0.351, 0.718, 0.860, 0.987, 1.043, 1.287, 1.141, 1.225, 1.314, 1.431,
                1.397, 1.559, 1.743, 2.015, 2.106, 2.267, 2.657, 2.879, 2.990, 3.013, 3.267, 3.531,
            ],
        },
        Variant {
            label: "TTAS",
            marker: Marker::Square,
            times: &[
                0.041, 0.179, 0.387, 0.531, 0.570, 0.666, 0.564, 0.620, 0.508, 0.561, 0.572, 0.617,
                0.636, 0.637, 0.615, 0.787, 0.916, 1.002, 1.273, 1.268, 1.182, 1.296, 1.364, 1.537,
            ],
        },
        Variant {
            label: "Backoff",
            marker: Marker::TriangleUp,
            times: &[
                0.048, 0.219, 0.193, 0.425, 0.463, 0.574, 0.200, 0.275, 0.302, 0.343, 0.396, 0.421,
                0.437, 0.460, 0.509, 0.647, 0.774, 0.820, 1.042, 1.116, 1.106, 1.249, 1.234, 1.344,
            ],
        },
        Variant {
            label: "ALock",
            marker: Marker::Diamond,
            times: &[
                0.099, 0.638, 0.544, 0.529, 0.510, 0.509, 0.353, 0.366, 0.330, 0.351, 0.357, 0.335,
                0.337, 0.352, 0.380, 0.481, 0.391, 0.392, 0.396, 0.417, 0.423, 0.423, 0.450, 0.424,
            ],
        },
    ],
    ideal: 0.057,
    tick_step: Some(2),
};
