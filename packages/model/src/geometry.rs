use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of an object inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl Origin {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Sizing mode of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sizing {
    /// Fixed size in pixels
    Fixed(i32),
    /// Fill the space the parent makes available
    Fill,
    /// Shrink to the content
    #[default]
    Wrap,
}

impl FromStr for Sizing {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "match_parent" | "fill_parent" => Ok(Sizing::Fill),
            "wrap_content" => Ok(Sizing::Wrap),
            other => match other.parse::<f64>() {
                Ok(px) if px.is_finite() && (i32::MIN as f64..=i32::MAX as f64).contains(&px.trunc()) => {
                    Ok(Sizing::Fixed(px.trunc() as i32))
                }
                _ => Err(ModelError::invalid_sizing(other)),
            },
        }
    }
}

impl TryFrom<String> for Sizing {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sizing> for String {
    fn from(value: Sizing) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Sizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sizing::Fixed(px) => write!(f, "{}", px),
            Sizing::Fill => write!(f, "match_parent"),
            Sizing::Wrap => write!(f, "wrap_content"),
        }
    }
}

/// Inner spacing of an object, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn uniform(all: i32) -> Self {
        Self {
            left: all,
            top: all,
            right: all,
            bottom: all,
        }
    }

    /// Padding from a declared list: one value for every side, or four values
    /// in left, top, right, bottom order. Any other count yields `None`.
    pub fn from_declared(values: &[i32]) -> Option<Self> {
        match values {
            [all] => Some(Self::uniform(*all)),
            [left, top, right, bottom] => Some(Self {
                left: *left,
                top: *top,
                right: *right,
                bottom: *bottom,
            }),
            _ => None,
        }
    }
}

/// Layout axis of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Construction parameters handed to the host when an object is built
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutParams {
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub width: Sizing,
    #[serde(default)]
    pub height: Sizing,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
}
