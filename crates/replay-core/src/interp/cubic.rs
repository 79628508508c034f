//! Piecewise cubic polynomials: natural cubic spline and PCHIP.

use crate::error::{Error, Result};

/// A piecewise cubic over strictly increasing knots.
///
/// Segment `i` covers `[knots[i], knots[i + 1]]` and evaluates
/// `a + b·dx + c·dx² + d·dx³` with `dx = x − knots[i]`.
/// Evaluation outside `[knots[0], knots[n − 1]]` is an error, never a clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseCubic {
    knots: Vec<f64>,
    coeffs: Vec<[f64; 4]>,
}

impl PiecewiseCubic {
    /// Natural-boundary cubic spline (second derivative zero at both ends).
    pub fn natural(x: &[f64], y: &[f64]) -> Result<Self> {
        validate_knots(x, y)?;
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        // Second derivatives at each knot; M[0] = M[n-1] = 0.
        let mut m = vec![0.0; n];
        if n > 2 {
            let interior = n - 2;
            let mut diag = vec![0.0; interior];
            let mut rhs = vec![0.0; interior];
            for i in 0..interior {
                let k = i + 1;
                diag[i] = 2.0 * (h[k - 1] + h[k]);
                rhs[i] = 6.0 * ((y[k + 1] - y[k]) / h[k] - (y[k] - y[k - 1]) / h[k - 1]);
            }

            // Thomas algorithm; sub- and super-diagonals are h[k-1] and h[k].
            for i in 1..interior {
                let w = h[i] / diag[i - 1];
                diag[i] -= w * h[i];
                rhs[i] -= w * rhs[i - 1];
            }
            m[interior] = rhs[interior - 1] / diag[interior - 1];
            for i in (0..interior - 1).rev() {
                m[i + 1] = (rhs[i] - h[i + 1] * m[i + 2]) / diag[i];
            }
        }

        let coeffs = (0..n - 1)
            .map(|i| {
                let slope = (y[i + 1] - y[i]) / h[i];
                [
                    y[i],
                    slope - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0,
                    m[i] / 2.0,
                    (m[i + 1] - m[i]) / (6.0 * h[i]),
                ]
            })
            .collect();

        Ok(Self {
            knots: x.to_vec(),
            coeffs,
        })
    }

    /// Shape-preserving monotone cubic (Fritsch-Carlson slopes, PCHIP end conditions).
    pub fn pchip(x: &[f64], y: &[f64]) -> Result<Self> {
        validate_knots(x, y)?;
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

        let mut d = vec![0.0; n];
        if n == 2 {
            d[0] = delta[0];
            d[1] = delta[0];
        } else {
            for k in 1..n - 1 {
                let (m0, m1) = (delta[k - 1], delta[k]);
                if sign(m0) == 0 || sign(m0) != sign(m1) {
                    continue;
                }
                let w1 = 2.0 * h[k] + h[k - 1];
                let w2 = h[k] + 2.0 * h[k - 1];
                d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
            }
            d[0] = pchip_edge(h[0], h[1], delta[0], delta[1]);
            d[n - 1] = pchip_edge(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
        }

        let coeffs = (0..n - 1)
            .map(|i| {
                let (d0, d1, s) = (d[i], d[i + 1], delta[i]);
                [
                    y[i],
                    d0,
                    (3.0 * s - 2.0 * d0 - d1) / h[i],
                    (d0 + d1 - 2.0 * s) / (h[i] * h[i]),
                ]
            })
            .collect();

        Ok(Self {
            knots: x.to_vec(),
            coeffs,
        })
    }

    /// Closed interval on which evaluation is defined.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn evaluate(&self, x: f64) -> Result<f64> {
        let (start, end) = self.domain();
        if !(start..=end).contains(&x) {
            return Err(Error::OutOfDomain { at: x, start, end });
        }
        let segment = self
            .knots
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(self.coeffs.len() - 1);
        let dx = x - self.knots[segment];
        let [a, b, c, d] = self.coeffs[segment];
        Ok(a + dx * (b + dx * (c + dx * d)))
    }
}

/// Sign with zero mapped to zero, unlike `f64::signum`.
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn pchip_edge(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

fn validate_knots(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::InvalidConfig(format!(
            "knot count {} does not match value count {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::InsufficientSamples {
            needed: 2,
            available: x.len(),
        });
    }
    if let Some(w) = x.windows(2).find(|w| !(w[1] > w[0])) {
        return Err(Error::InvalidConfig(format!(
            "knots must be strictly increasing, got {} then {}",
            w[0], w[1]
        )));
    }
    if let Some(v) = y.iter().find(|v| !v.is_finite()) {
        return Err(Error::InvalidConfig(format!("non-finite knot value {v}")));
    }
    Ok(())
}
