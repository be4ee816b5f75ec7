use std::fmt;

/// Token written for values that cannot be computed.
pub const UNAVAILABLE: &str = "N/A";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Map HEVC aliases to one name; everything else passes through.
pub fn canonical_codec(codec: &str) -> String {
    if codec.eq_ignore_ascii_case("hevc") || codec.eq_ignore_ascii_case("h265") {
        "HEVC".to_string()
    } else {
        codec.to_string()
    }
}

pub fn format_resolution(width: u32, height: u32) -> String {
    format!("{}x{}", width, height)
}

/// Format seconds as HH:MM:SS, truncating fractions. Negative or
/// non-finite input formats as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Replace commas so a value can never split a CSV field.
pub fn sanitize(value: &str) -> String {
    value.replace(',', "_")
}

/// Average data rate of a file, or an explicit marker when it can't be
/// derived. Never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataRate {
    Mbps(f64),
    Unavailable,
}

impl DataRate {
    /// `(size_mb * 8) / duration`, rounded to two decimals.
    pub fn compute(size_mb: f64, duration_secs: Option<f64>) -> Self {
        let duration = match duration_secs {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => return DataRate::Unavailable,
        };

        let rounded = ((size_mb * 8.0 / duration) * 100.0).round() / 100.0;
        if rounded.is_finite() && rounded > 0.0 {
            DataRate::Mbps(rounded)
        } else {
            DataRate::Unavailable
        }
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataRate::Mbps(rate) => write!(f, "{:.2}", rate),
            DataRate::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}
