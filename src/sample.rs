// SPDX: CC0-1.0

use crate::{Interval, Number, Point};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Step count for hosts that sample without choosing a density.
pub const DEFAULT_STEPS: usize = 1000;

/// Below this magnitude, sinc is taken to be exactly 1.
pub const SINC_EPSILON: Number = 1e-8;

pub type Sample = Point<Number>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    #[default]
    #[serde(alias = "Sin")]
    Sine,
    #[serde(alias = "Cos")]
    Cosine,
    #[serde(rename = "Sinc")]
    NormalizedSinc,
}

impl FunctionKind {
    pub const fn exhaustive() -> &'static [FunctionKind] {
        &[Self::Sine, Self::Cosine, Self::NormalizedSinc]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::NormalizedSinc => "sinc",
        }
    }

    #[inline]
    pub fn apply(&self, arg: Number) -> Number {
        match self {
            Self::Sine => arg.sin(),
            Self::Cosine => arg.cos(),
            Self::NormalizedSinc => sinc(arg),
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown function '{0}'")]
pub struct ParseKindErr(pub String);

impl FromStr for FunctionKind {
    type Err = ParseKindErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sin" | "sine" => Ok(Self::Sine),
            "cos" | "cosine" => Ok(Self::Cosine),
            "sinc" => Ok(Self::NormalizedSinc),
            _ => Err(ParseKindErr(s.trim().to_string())),
        }
    }
}

/// `sin(t) / t`, continuous at zero.
#[inline]
pub fn sinc(t: Number) -> Number {
    if t.abs() < SINC_EPSILON {
        1.0
    } else {
        t.sin() / t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    #[serde(alias = "Amplitude")]
    pub amplitude: Number,
    #[serde(alias = "Frequency")]
    pub frequency: Number,
    #[serde(alias = "Phase")]
    pub phase: Number,
    #[serde(alias = "Offset")]
    pub offset: Number,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
            offset: 0.0,
        }
    }
}

impl fmt::Display for ShapeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeParams")
            .field("amplitude", &self.amplitude)
            .field("frequency", &self.frequency)
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .finish()
    }
}

/// Value of `kind` shaped by `params` at `x`.
#[inline]
pub fn value_at(kind: FunctionKind, params: &ShapeParams, x: Number) -> Number {
    let arg = params.frequency * x + params.phase;
    params.amplitude * kind.apply(arg) + params.offset
}

/// Sample `kind` over `domain` at `steps + 1` evenly spaced points, both ends
/// included. Zero steps yields nothing.
pub fn evaluate(
    kind: FunctionKind,
    params: &ShapeParams,
    domain: Interval,
    steps: usize,
) -> Vec<Sample> {
    if steps == 0 {
        return Vec::new();
    }
    let dx = domain.span() / steps as Number;
    (0..=steps)
        .map(|i| {
            let x = domain.min + i as Number * dx;
            Point {
                x,
                y: value_at(kind, params, x),
            }
        })
        .collect()
}

/// [`evaluate`] at [`DEFAULT_STEPS`].
pub fn evaluate_default(
    kind: FunctionKind,
    params: &ShapeParams,
    domain: Interval,
) -> Vec<Sample> {
    evaluate(kind, params, domain, DEFAULT_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Number, b: Number) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn steps_plus_one_samples_spanning_the_domain() {
        let params = ShapeParams {
            amplitude: 2.5,
            frequency: 3.0,
            phase: -1.0,
            offset: 0.5,
        };
        for kind in FunctionKind::exhaustive() {
            for steps in [1, 2, 7, 1200] {
                let domain = Interval::new(-3.3, 12.1);
                let series = evaluate(*kind, &params, domain, steps);
                assert_eq!(series.len(), steps + 1);
                assert_eq!(series[0].x, domain.min);
                assert!(close(series[steps].x, domain.max));
                assert!(series.windows(2).all(|w| w[0].x < w[1].x));
            }
        }
    }

    #[test]
    fn zero_steps_is_empty() {
        let series = evaluate(
            FunctionKind::Cosine,
            &ShapeParams::default(),
            Interval::new(-1.0, 1.0),
            0,
        );
        assert!(series.is_empty());
    }

    #[test]
    fn default_density() {
        let domain = Interval::new(-10.0, 10.0);
        let series = evaluate_default(FunctionKind::Sine, &ShapeParams::default(), domain);
        assert_eq!(series.len(), DEFAULT_STEPS + 1);
        assert_eq!(
            series,
            evaluate(FunctionKind::Sine, &ShapeParams::default(), domain, 1000)
        );
    }

    #[test]
    fn sinc_singularity_is_removed() {
        let params = ShapeParams {
            amplitude: 4.0,
            frequency: 2.0,
            phase: 0.0,
            offset: -1.5,
        };
        // x = 0 lands exactly on arg = 0
        let series = evaluate(
            FunctionKind::NormalizedSinc,
            &params,
            Interval::new(-1.0, 1.0),
            2,
        );
        assert_eq!(series[1].x, 0.0);
        assert_eq!(series[1].y, 4.0 * 1.0 - 1.5);

        let arg: Number = 2.0 * 0.75;
        assert!(close(
            value_at(FunctionKind::NormalizedSinc, &params, 0.75),
            4.0 * arg.sin() / arg - 1.5
        ));
        assert_eq!(sinc(5e-9), 1.0);
        assert!(close(sinc(1e-8), (1e-8 as Number).sin() / 1e-8));
    }

    #[test]
    fn sine_and_cosine_follow_the_shape() {
        let params = ShapeParams {
            amplitude: -2.0,
            frequency: 0.5,
            phase: 0.25,
            offset: 3.0,
        };
        let x: Number = 1.7;
        let arg = 0.5 * x + 0.25;
        assert!(close(
            value_at(FunctionKind::Sine, &params, x),
            -2.0 * arg.sin() + 3.0
        ));
        assert!(close(
            value_at(FunctionKind::Cosine, &params, x),
            -2.0 * arg.cos() + 3.0
        ));
    }

    #[test]
    fn sampling_is_deterministic() {
        let params = ShapeParams::default();
        let domain = Interval::new(-10.0, 10.0);
        let a = evaluate(FunctionKind::NormalizedSinc, &params, domain, 333);
        let b = evaluate(FunctionKind::NormalizedSinc, &params, domain, 333);
        assert!(a
            .iter()
            .zip(&b)
            .all(|(p, q)| p.x.to_bits() == q.x.to_bits() && p.y.to_bits() == q.y.to_bits()));
    }

    #[test]
    fn kind_names_parse() {
        assert_eq!("Sine".parse::<FunctionKind>(), Ok(FunctionKind::Sine));
        assert_eq!("cos".parse::<FunctionKind>(), Ok(FunctionKind::Cosine));
        assert_eq!(" SINC ".parse::<FunctionKind>(), Ok(FunctionKind::NormalizedSinc));
        assert_eq!(
            "tan".parse::<FunctionKind>(),
            Err(ParseKindErr(String::from("tan")))
        );
    }
}
