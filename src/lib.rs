//! StackTics: under-bed box packing optimization.
//!
//! A heuristic 3D bin-packing engine that places a heterogeneous set of
//! boxes inside a rectangular, optionally rounded-corner, container
//! ("bed"), subject to collision, support, load, and fragility
//! constraints, plus an HTTP layer exposing it over `/optimize`.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod geometry;
