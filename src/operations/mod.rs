mod differentiate;
mod frames_along;
mod frenet_frame;
mod sample_range;

pub use differentiate::{Derivatives, Differentiator};
pub use frames_along::{FrameSample, FrameSequence, FramesAlong, DEFAULT_MAX_FRAMES};
pub use frenet_frame::{
    build_frame, Degeneracy, FrameAt, FrameTolerance, FrenetFrame, ResolvedFrame,
};
pub use sample_range::{validate_step, SampleRange};
