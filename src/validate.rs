// SPDX: CC0-1.0

//! Promotion of user-entered text into bounded numbers.
//!
//! Every check here is a pure function of its inputs; the caller owns the
//! text and decides what to do with the verdict.

use crate::{Interval, Number};
use core::{f64::consts::TAU, fmt, str::FromStr};
use thiserror::Error;

/// Largest magnitude accepted for either bound of an axis interval.
pub const RANGE_LIMIT: Number = 1000.0;

/// Largest magnitude accepted for amplitude and offset.
pub const LEVEL_LIMIT: Number = 100.0;

/// Upper bound of frequency (lower bound is exclusive zero).
pub const FREQUENCY_LIMIT: Number = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }

    pub const fn min_field(&self) -> Field {
        match self {
            Self::X => Field::XMin,
            Self::Y => Field::YMin,
        }
    }

    pub const fn max_field(&self) -> Field {
        match self {
            Self::X => Field::XMax,
            Self::Y => Field::YMax,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-editable numeric field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Amplitude,
    Frequency,
    Phase,
    Offset,
    XMin,
    XMax,
    YMin,
    YMax,
}

impl Field {
    pub const fn exhaustive() -> &'static [Field] {
        &[
            Self::Amplitude,
            Self::Frequency,
            Self::Phase,
            Self::Offset,
            Self::XMin,
            Self::XMax,
            Self::YMin,
            Self::YMax,
        ]
    }

    pub const fn params() -> &'static [Field] {
        &[Self::Amplitude, Self::Frequency, Self::Phase, Self::Offset]
    }

    pub const fn bounds() -> &'static [Field] {
        &[Self::XMin, Self::XMax, Self::YMin, Self::YMax]
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Amplitude => "amplitude",
            Self::Frequency => "frequency",
            Self::Phase => "phase",
            Self::Offset => "offset",
            Self::XMin => "xmin",
            Self::XMax => "xmax",
            Self::YMin => "ymin",
            Self::YMax => "ymax",
        }
    }

    /// The axis this field bounds, or `None` for a shape parameter.
    pub const fn axis(&self) -> Option<Axis> {
        match self {
            Self::XMin | Self::XMax => Some(Axis::X),
            Self::YMin | Self::YMax => Some(Axis::Y),
            Self::Amplitude | Self::Frequency | Self::Phase | Self::Offset => None,
        }
    }

    pub fn in_range(&self, val: Number) -> bool {
        match self {
            Self::Amplitude | Self::Offset => (-LEVEL_LIMIT..=LEVEL_LIMIT).contains(&val),
            Self::Frequency => val > 0.0 && val <= FREQUENCY_LIMIT,
            Self::Phase => (-TAU..=TAU).contains(&val),
            Self::XMin | Self::XMax | Self::YMin | Self::YMax => {
                (-RANGE_LIMIT..=RANGE_LIMIT).contains(&val)
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct ParseFieldErr(pub String);

impl FromStr for Field {
    type Err = ParseFieldErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::exhaustive()
            .iter()
            .find(|field| field.name() == key)
            .copied()
            .ok_or_else(|| ParseFieldErr(s.trim().to_string()))
    }
}

/// Why a piece of text was rejected. `Display` is the message shown next to
/// the offending field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidateErr {
    #[error("enter a numeric {field}")]
    NotNumeric { field: Field },

    #[error("{}", range_message(.field))]
    OutOfRange { field: Field },

    #[error("{axis}min must be less than {axis}max")]
    Unordered { axis: Axis },
}

impl ValidateErr {
    pub const fn is_not_numeric(&self) -> bool {
        matches!(self, Self::NotNumeric { .. })
    }
}

fn range_message(field: &Field) -> &'static str {
    match field {
        Field::Amplitude => "amplitude must be between -100 and 100",
        Field::Frequency => "frequency must be greater than 0 and at most 100",
        Field::Phase => "phase must be between -2π and 2π",
        Field::Offset => "offset must be between -100 and 100",
        Field::XMin => "xmin must be between -1000 and 1000",
        Field::XMax => "xmax must be between -1000 and 1000",
        Field::YMin => "ymin must be between -1000 and 1000",
        Field::YMax => "ymax must be between -1000 and 1000",
    }
}

/// Parse text as a finite real number, ignoring surrounding whitespace.
pub fn parse_number(text: &str) -> Option<Number> {
    text.trim()
        .parse::<Number>()
        .ok()
        .filter(|val| val.is_finite())
}

/// Validate a single field in isolation.
pub fn validate(field: Field, text: &str) -> Result<Number, ValidateErr> {
    let val = parse_number(text).ok_or(ValidateErr::NotNumeric { field })?;
    if field.in_range(val) {
        Ok(val)
    } else {
        Err(ValidateErr::OutOfRange { field })
    }
}

/// Validate a pair of bounds: both must parse, then be ordered, then lie
/// within [`RANGE_LIMIT`].
pub fn interval(axis: Axis, min_text: &str, max_text: &str) -> Result<Interval, ValidateErr> {
    let (min_field, max_field) = (axis.min_field(), axis.max_field());
    let min = parse_number(min_text).ok_or(ValidateErr::NotNumeric { field: min_field })?;
    let max = parse_number(max_text).ok_or(ValidateErr::NotNumeric { field: max_field })?;
    if min >= max {
        return Err(ValidateErr::Unordered { axis });
    }
    for (field, val) in [(min_field, min), (max_field, max)] {
        if !field.in_range(val) {
            return Err(ValidateErr::OutOfRange { field });
        }
    }
    Ok(Interval::new(min, max))
}
