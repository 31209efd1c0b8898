use crate::error::{Result, TessellationError};

/// Length of a single-frame arrow.
const FRAME_LENGTH: f64 = 0.5;

/// Shaft and head dimensions for frame arrows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    length: f64,
    head_length: f64,
    head_width: f64,
}

impl ArrowStyle {
    /// Creates a new arrow style.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is not positive, or a head dimension is
    /// negative or longer than the arrow.
    pub fn new(length: f64, head_length: f64, head_width: f64) -> Result<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(TessellationError::InvalidParameters(
                "arrow length must be positive".to_owned(),
            )
            .into());
        }
        if ![head_length, head_width]
            .iter()
            .all(|head| (0.0..=length).contains(head))
        {
            return Err(TessellationError::InvalidParameters(
                "arrow head must fit within the arrow length".to_owned(),
            )
            .into());
        }
        Ok(Self {
            length,
            head_length,
            head_width,
        })
    }

    /// Style of the frame at the current `t`: heads sized as 20% of the
    /// length and 20% of the head length.
    #[must_use]
    pub fn single() -> Self {
        let head_length = FRAME_LENGTH * 0.2;
        Self {
            length: FRAME_LENGTH,
            head_length,
            head_width: head_length * 0.2,
        }
    }

    /// Style of the frames drawn all along the curve: shorter, with
    /// relatively larger heads.
    #[must_use]
    pub fn overlay() -> Self {
        Self {
            length: FRAME_LENGTH * 0.8,
            head_length: FRAME_LENGTH * 0.15,
            head_width: FRAME_LENGTH * 0.1,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn head_length(&self) -> f64 {
        self.head_length
    }

    #[must_use]
    pub fn head_width(&self) -> f64 {
        self.head_width
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self::single()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_with_valid_dimensions() {
        let style = ArrowStyle::new(2.0, 0.4, 0.1).unwrap();
        assert!((style.length() - 2.0).abs() < f64::EPSILON);
        assert!((style.head_length() - 0.4).abs() < f64::EPSILON);
        assert!((style.head_width() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn new_with_zero_length_fails() {
        assert!(ArrowStyle::new(0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn head_longer_than_arrow_fails() {
        assert!(ArrowStyle::new(1.0, 1.5, 0.1).is_err());
        assert!(ArrowStyle::new(1.0, 0.2, -0.1).is_err());
    }

    #[test]
    fn presets() {
        let single = ArrowStyle::single();
        assert!((single.length() - 0.5).abs() < f64::EPSILON);
        assert!((single.head_length() - 0.1).abs() < 1e-12);
        assert!((single.head_width() - 0.02).abs() < 1e-12);

        let overlay = ArrowStyle::overlay();
        assert!((overlay.length() - 0.4).abs() < 1e-12);
        assert!((overlay.head_length() - 0.075).abs() < 1e-12);
        assert!((overlay.head_width() - 0.05).abs() < 1e-12);
    }
}
