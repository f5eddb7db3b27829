//! Human-readable banding of a schedule's fitness score.

/// Quality band a fitness score falls into.
///
/// Boundaries are inclusive at 98, 90 and 75. Anything below 75 is `Poor`,
/// and so is a score that could not be read at all (`NaN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitnessBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl FitnessBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 98.0 {
            Self::Excellent
        } else if score >= 90.0 {
            Self::Good
        } else if score >= 75.0 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    /// Severity marker shown in front of the message.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Excellent | Self::Good => "🟢",
            Self::Average => "🟡",
            Self::Poor => "🔴",
        }
    }

    /// Short headline.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent schedule!",
            Self::Good => "Good schedule.",
            Self::Average => "Average schedule.",
            Self::Poor => "Poor schedule!",
        }
    }

    /// Explanation following the headline.
    pub fn detail(self) -> &'static str {
        match self {
            Self::Excellent => "Very high fitness, near-perfect constraint satisfaction",
            Self::Good => "Minor issues, but most constraints are satisfied",
            Self::Average => "Consider revising input data; some constraints not met",
            Self::Poor => "Many conflicts or constraints violated, please check input",
        }
    }

    /// Markup rendered into the `fitnessInterpretation` element.
    pub fn html(self) -> String {
        format!(
            "{} <strong>{}</strong> ({})",
            self.marker(),
            self.headline(),
            self.detail()
        )
    }
}

/// Interpretation markup for a score.
pub fn get_fitness_interpretation(score: f64) -> String {
    FitnessBand::from_score(score).html()
}

/// Read a score back from its rendered text.
///
/// Mirrors `parseFloat`: leading whitespace is skipped and the longest
/// numeric prefix is used, so `"97.5%"` reads as `97.5`. Returns `NaN` when
/// there is no numeric prefix.
pub fn parse_displayed_score(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut best = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
                best = end;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return f64::NAN;
    }
    s[..best].parse().unwrap_or(f64::NAN)
}
