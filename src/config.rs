//! Serializable description of a spatial ordering

use crate::{AxisSelection, Bounds, CurveKind, NumBits, SpatialComparator};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an ordering setting from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The name does not designate an axis selection
    #[error("unknown axis selection `{0}`, expected one of xyz, xy, xz, yz")]
    UnknownAxisSelection(String),

    /// The name does not designate a space-filling curve
    #[error("unknown curve `{0}`, expected morton (or z-order) or hilbert")]
    UnknownCurve(String),
}

impl FromStr for AxisSelection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xyz" => Ok(Self::Xyz),
            "xy" => Ok(Self::Xy),
            "xz" => Ok(Self::Xz),
            "yz" => Ok(Self::Yz),
            _ => Err(ParseError::UnknownAxisSelection(s.to_owned())),
        }
    }
}

impl fmt::Display for AxisSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Xyz => "xyz",
            Self::Xy => "xy",
            Self::Xz => "xz",
            Self::Yz => "yz",
        };
        f.write_str(name)
    }
}

impl FromStr for CurveKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morton" | "zorder" | "z-order" => Ok(Self::Morton),
            "hilbert" => Ok(Self::Hilbert),
            _ => Err(ParseError::UnknownCurve(s.to_owned())),
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Morton => "morton",
            Self::Hilbert => "hilbert",
        })
    }
}

/// Settings of a spatial ordering
///
/// The default configuration orders along a 3D Hilbert curve at full
/// precision.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Axes that take part in the ordering
    pub axes: AxisSelection,

    /// Curve to order along
    pub curve: CurveKind,

    /// Bits of precision per axis, `None` meaning as many as the curve allows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<NumBits>,
}

impl SortConfig {
    /// Build a comparator that applies this ordering within some bounds
    pub fn comparator<F>(&self, bounds: Bounds, position: F) -> SpatialComparator<F> {
        let bits = self.bits.unwrap_or_else(|| self.curve.max_bits(self.axes));
        SpatialComparator::with_bits(self.axes, self.curve, bounds, bits, position)
    }
}
