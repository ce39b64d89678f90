//! Geometry and scene composition core for 2D vector graphics.
//!
//! Vector outlines are stored as [data::PathData] command/point streams,
//! built either incrementally or from shape primitives. [paint::Shape] ties
//! a path to fill and transform attributes and tracks pending changes for a
//! renderer; [paint::Scene] composes owned drawables into a hierarchy and
//! answers aggregate bounds queries.

#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod data;
pub mod paint;
