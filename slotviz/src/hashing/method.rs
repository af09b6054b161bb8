//! The closed set of hash methods selectable in the visualizer.
use super::{Division, Multiplication};
use slotviz_core::{IndexStrategy, SlotVizError};
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Hash method used for computing slot indices.
///
/// Switching the method only affects operations issued afterwards. Already stored slots are
/// never migrated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMethod {
    /// See [`Division`].
    #[default]
    Division,
    /// See [`Multiplication`].
    Multiplication,
}

impl HashMethod {
    /// All selectable methods, in the order they are presented.
    pub const ALL: [HashMethod; 2] = [HashMethod::Division, HashMethod::Multiplication];

    /// Selector name of the method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HashMethod::Division => "division",
            HashMethod::Multiplication => "multiplication",
        }
    }
}

impl IndexStrategy for HashMethod {
    #[inline]
    fn compute(&self, code: u32, capacity: NonZeroUsize) -> usize {
        match self {
            HashMethod::Division => Division.compute(code, capacity),
            HashMethod::Multiplication => Multiplication.compute(code, capacity),
        }
    }
}

impl Display for HashMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashMethod {
    type Err = SlotVizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| SlotVizError::UnknownHashMethod(s.to_string()))
    }
}
