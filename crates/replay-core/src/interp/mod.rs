//! Continuous-signal reconstruction from sparse samples.
//!
//! [`PiecewiseCubic`] holds one axis; [`VectorInterpolant`] bundles three axes
//! over shared knots; [`SlidingWindow`] keeps the last four samples of the
//! reconstructed channel group and rebuilds the interpolant on every slide.

mod cubic;
mod window;

pub use cubic::PiecewiseCubic;
pub use window::{SlidingWindow, WINDOW_LEN};

use crate::error::{Error, Result};
use crate::types::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interpolant strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolantKind {
    /// Natural-boundary cubic spline.
    #[default]
    NaturalCubic,
    /// Shape-preserving monotone cubic (PCHIP).
    Pchip,
}

impl InterpolantKind {
    pub fn build(self, x: &[f64], y: &[f64]) -> Result<PiecewiseCubic> {
        match self {
            InterpolantKind::NaturalCubic => PiecewiseCubic::natural(x, y),
            InterpolantKind::Pchip => PiecewiseCubic::pchip(x, y),
        }
    }
}

impl fmt::Display for InterpolantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolantKind::NaturalCubic => f.write_str("natural-cubic"),
            InterpolantKind::Pchip => f.write_str("pchip"),
        }
    }
}

impl FromStr for InterpolantKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "natural-cubic" | "natural" | "cubic" => Ok(InterpolantKind::NaturalCubic),
            "pchip" | "shape-preserving" | "monotone" => Ok(InterpolantKind::Pchip),
            other => Err(Error::InvalidConfig(format!(
                "unknown interpolant '{other}' (expected natural-cubic or pchip)"
            ))),
        }
    }
}

/// Three independent per-axis interpolants over the same knots.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorInterpolant {
    axes: [PiecewiseCubic; 3],
}

impl VectorInterpolant {
    pub fn build(kind: InterpolantKind, x: &[f64], values: &[Vec3]) -> Result<Self> {
        let column = |axis: usize| values.iter().map(|v| v[axis]).collect::<Vec<_>>();
        Ok(Self {
            axes: [
                kind.build(x, &column(0))?,
                kind.build(x, &column(1))?,
                kind.build(x, &column(2))?,
            ],
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.axes[0].domain()
    }

    pub fn evaluate(&self, x: f64) -> Result<Vec3> {
        Ok([
            self.axes[0].evaluate(x)?,
            self.axes[1].evaluate(x)?,
            self.axes[2].evaluate(x)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("pchip".parse::<InterpolantKind>().unwrap(), InterpolantKind::Pchip);
        assert_eq!(
            "Natural-Cubic".parse::<InterpolantKind>().unwrap(),
            InterpolantKind::NaturalCubic
        );
        assert_eq!("cubic".parse::<InterpolantKind>().unwrap(), InterpolantKind::NaturalCubic);
        assert!("linear".parse::<InterpolantKind>().is_err());
        assert_eq!(InterpolantKind::Pchip.to_string(), "pchip");
    }

    #[test]
    fn test_vector_interpolant_axes_independent() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let values = [[0.0, 5.0, -1.0], [1.0, 5.0, -2.0], [2.0, 5.0, -3.0], [3.0, 5.0, -4.0]];
        let interp = VectorInterpolant::build(InterpolantKind::NaturalCubic, &x, &values).unwrap();
        let [a, b, c] = interp.evaluate(1.5).unwrap();
        assert!((a - 1.5).abs() < 1e-12);
        assert!((b - 5.0).abs() < 1e-12);
        assert!((c + 2.5).abs() < 1e-12);
        assert_eq!(interp.domain(), (0.0, 3.0));
    }
}
