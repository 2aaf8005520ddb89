//! Page margins – a composite option serialized ahead of every other flag.

use serde::{Deserialize, Serialize};

use crate::flags::{FlagSet, FlagValue, OptionFlag};

/// Distances from each page edge, in millimetres.
///
/// Each side is independent; an unset side is left to the renderer default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub right: Option<i32>,
}

impl Margins {
    /// Margins with no side set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The same margin on all four sides.
    pub fn uniform(mm: i32) -> Self {
        Self {
            top: Some(mm),
            bottom: Some(mm),
            left: Some(mm),
            right: Some(mm),
        }
    }

    /// Top/bottom and left/right pairs.
    pub fn symmetric(vertical: i32, horizontal: i32) -> Self {
        Self {
            top: Some(vertical),
            bottom: Some(vertical),
            left: Some(horizontal),
            right: Some(horizontal),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

impl FlagSet for Margins {
    const FLAGS: &'static [OptionFlag<Self>] = &[
        OptionFlag { flag: "-T", value: |m| FlagValue::int(m.top) },
        OptionFlag { flag: "-B", value: |m| FlagValue::int(m.bottom) },
        OptionFlag { flag: "-L", value: |m| FlagValue::int(m.left) },
        OptionFlag { flag: "-R", value: |m| FlagValue::int(m.right) },
    ];
}
