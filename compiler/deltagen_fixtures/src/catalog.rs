//! Flat and nested models.

use std::cell::Cell;
use std::rc::Rc;

use deltagen_macros::TrackDelta;

pub mod deltas {
    include!(concat!(env!("OUT_DIR"), "/catalog.deltas.rs"));
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct TestModel {
    pub name: String,
    pub value: i32,
    pub is_active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Child {
    pub value: i32,
    pub label: String,
}

/// A parent reaching `Child` through every supported wrapper.
#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Parent {
    pub name: String,
    pub child: Child,
    pub spare: Option<Child>,
    pub boxed: Box<Child>,
}

/// Nested types from another module resolve through the import.
#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Listing {
    pub title: String,
    pub tags: Vec<String>,
    pub origin: Option<crate::graph::Node>,
}

/// Single-threaded shared and interior-mutable fields.
#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Note {
    pub body: Rc<str>,
    pub views: Cell<u32>,
}
