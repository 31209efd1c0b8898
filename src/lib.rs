//! Numeric Frenet–Serret frame engine for parametric space curves.
//!
//! Three scalar expressions of `t` are compiled into a curve `r(t)`, which is
//! differentiated by central finite differences and turned into a moving
//! frame (T, N, B). The curve can be sampled densely into a polyline or
//! sparsely into a sequence of frames; [`session::Session`] ties these
//! together for an interactive front end.

pub mod error;
pub mod expression;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod session;
pub mod tessellation;

pub use error::{FrenetError, Result};
