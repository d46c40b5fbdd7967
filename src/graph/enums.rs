use core::fmt;

use serde::{Deserialize, Serialize};

pub trait RevertibleEnum {
    fn reversed(&self) -> Self;
}

/// Which end of a directed edge a vertex sits at.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EdgeEnd {
    Tail,
    Head,
}

impl RevertibleEnum for EdgeEnd {
    fn reversed(&self) -> Self {
        match self {
            EdgeEnd::Tail => EdgeEnd::Head,
            EdgeEnd::Head => EdgeEnd::Tail,
        }
    }
}

/// Rotational sense of a flip cycle, as seen on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockDirection {
    CW,
    CCW,
}

impl RevertibleEnum for ClockDirection {
    fn reversed(&self) -> Self {
        match self {
            ClockDirection::CW => ClockDirection::CCW,
            ClockDirection::CCW => ClockDirection::CW,
        }
    }
}

impl ClockDirection {
    pub fn reversed_if(&self, cond: bool) -> Self {
        if cond {
            self.reversed()
        } else {
            *self
        }
    }
}

impl fmt::Display for ClockDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockDirection::CW => write!(f, "cw"),
            ClockDirection::CCW => write!(f, "ccw"),
        }
    }
}

/// Side of a directed edge with respect to its direction of travel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl RevertibleEnum for Side {
    fn reversed(&self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Label of an inner edge in a regular edge labeling.
///
/// Blue edges point from south to north (the head's rectangle lies on top of
/// the tail's rectangle), red edges point from west to east.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    Red,
    Blue,
}

impl RevertibleEnum for EdgeColor {
    fn reversed(&self) -> Self {
        match self {
            EdgeColor::Red => EdgeColor::Blue,
            EdgeColor::Blue => EdgeColor::Red,
        }
    }
}

impl fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeColor::Red => write!(f, "red"),
            EdgeColor::Blue => write!(f, "blue"),
        }
    }
}
