//! Page events a host feeds into the behavior layer.

use crate::dom::NodeId;

/// The page finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loaded;

/// The viewport moved to `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrolled {
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkClicked {
    pub node: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBlurred {
    pub node: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSubmitted {
    pub node: NodeId,
}

/// Latest scroll offset, published on a watch channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset(pub f64);
