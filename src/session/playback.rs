use crate::operations::SampleRange;

/// Default playback speed, in `t` units per second.
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

/// Animates the current parameter across the sample range.
///
/// The caller drives it once per rendered frame with the elapsed wall-clock
/// time; pausing takes effect at the next call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    speed: f64,
    playing: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYBACK_SPEED)
    }
}

impl Playback {
    /// Creates a paused playback at `speed` t-units per second.
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            playing: false,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flips between playing and paused, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Returns the parameter after `elapsed_secs` of playback from `t`.
    ///
    /// Passing `t_max` wraps around to `t_min`. While paused, or for a
    /// non-positive or non-finite elapsed time, `t` is returned clamped.
    #[must_use]
    pub fn advance(&self, range: &SampleRange, t: f64, elapsed_secs: f64) -> f64 {
        let t = range.clamp(t);
        if !self.playing || !(elapsed_secs.is_finite() && elapsed_secs > 0.0) {
            return t;
        }
        let next = t + self.speed * elapsed_secs;
        if next <= range.t_max() {
            return range.clamp(next);
        }
        let overshoot = (next - range.t_min()) % range.span();
        range.clamp(range.t_min() + overshoot)
    }
}
