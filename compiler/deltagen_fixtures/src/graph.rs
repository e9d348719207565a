//! Self-referential and mutually referential models.

use deltagen_macros::TrackDelta;

pub mod deltas {
    include!(concat!(env!("OUT_DIR"), "/graph.deltas.rs"));
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Self>>,
}

impl Node {
    /// A chain of `values.len()` nodes, first value at the head.
    pub fn chain(values: &[i32]) -> Option<Node> {
        values.iter().rev().fold(None, |next, &value| {
            Some(Node {
                value,
                next: next.map(Box::new),
            })
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Left {
    pub id: u32,
    pub right: Option<Box<Right>>,
}

#[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
pub struct Right {
    pub id: u32,
    pub left: Option<Box<Left>>,
}
