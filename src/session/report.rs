use std::fmt;

use crate::math::{format_vector_opt, Vector3};
use crate::operations::{Degeneracy, ResolvedFrame};

/// Display-ready vectors for the frame at the current `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub t: f64,
    pub position: String,
    pub velocity: String,
    pub acceleration: String,
    pub tangent: String,
    pub normal: String,
    pub binormal: String,
    pub degeneracy: Option<Degeneracy>,
}

impl FrameReport {
    /// Report for `t`. Without a frame every vector reads
    /// [`MISSING_VECTOR`](crate::math::format::MISSING_VECTOR).
    #[must_use]
    pub fn new(t: f64, resolved: Option<&ResolvedFrame>) -> Self {
        let show = |pick: fn(&ResolvedFrame) -> Vector3| {
            format_vector_opt(resolved.map(pick).as_ref())
        };
        Self {
            t,
            position: show(|r| r.position.coords),
            velocity: show(|r| r.velocity),
            acceleration: show(|r| r.acceleration),
            tangent: show(|r| r.frame.tangent),
            normal: show(|r| r.frame.normal),
            binormal: show(|r| r.frame.binormal),
            degeneracy: resolved.and_then(|r| r.degeneracy),
        }
    }

    /// Placeholder report for a `t` where no frame could be computed.
    #[must_use]
    pub fn missing(t: f64) -> Self {
        Self::new(t, None)
    }
}

impl From<&ResolvedFrame> for FrameReport {
    fn from(resolved: &ResolvedFrame) -> Self {
        Self::new(resolved.t, Some(resolved))
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "t = {:.2}", self.t)?;
        writeln!(f, "r   = {}", self.position)?;
        writeln!(f, "r'  = {}", self.velocity)?;
        writeln!(f, "r'' = {}", self.acceleration)?;
        writeln!(f, "T   = {}", self.tangent)?;
        writeln!(f, "N   = {}", self.normal)?;
        write!(f, "B   = {}", self.binormal)?;
        match self.degeneracy {
            Some(Degeneracy::ZeroVelocity) => write!(f, "\n(zero velocity: fallback frame)"),
            Some(Degeneracy::Collinear) => write!(f, "\n(locally straight: arbitrary normal)"),
            None => Ok(()),
        }
    }
}
