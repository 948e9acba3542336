//! Style values written to targets

use std::fmt;

/// Output unit for an animated numeric property
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Bare number (opacity)
    #[default]
    None,
    /// Pixel length (height, scroll offsets, geometry)
    Px,
}

impl Unit {
    /// The unit conventionally used for a property name.
    ///
    /// Opacity is the only unitless property the engine animates; every other
    /// property is treated as a pixel length.
    pub fn for_property(name: &str) -> Self {
        match name {
            "opacity" => Unit::None,
            _ => Unit::Px,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Px => "px",
        }
    }
}

/// A value written through a [`StyleSink`](crate::StyleSink)
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// Unitless number
    Number(f32),
    /// Pixel length
    Px(f32),
    /// Non-numeric keyword such as `hidden`
    Keyword(&'static str),
}

impl StyleValue {
    /// Build a numeric value carrying the given unit
    pub fn with_unit(value: f32, unit: Unit) -> Self {
        match unit {
            Unit::None => StyleValue::Number(value),
            Unit::Px => StyleValue::Px(value),
        }
    }

    /// Numeric part of the value, if any
    pub fn numeric(&self) -> Option<f32> {
        match self {
            StyleValue::Number(v) | StyleValue::Px(v) => Some(*v),
            StyleValue::Keyword(_) => None,
        }
    }

    pub fn unit(&self) -> Option<Unit> {
        match self {
            StyleValue::Number(_) => Some(Unit::None),
            StyleValue::Px(_) => Some(Unit::Px),
            StyleValue::Keyword(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(v) => write!(f, "{}", v),
            StyleValue::Px(v) => write!(f, "{}px", v),
            StyleValue::Keyword(k) => f.write_str(k),
        }
    }
}
