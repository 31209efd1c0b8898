use super::Vector3;

/// Placeholder shown when a vector is not available.
pub const MISSING_VECTOR: &str = "[-, -, -]";

/// Formats a vector for display as `[x.xxx, y.yyy, z.zzz]`.
#[must_use]
pub fn format_vector(v: &Vector3) -> String {
    format!("[{:.3}, {:.3}, {:.3}]", v.x, v.y, v.z)
}

/// Like [`format_vector`], but renders [`MISSING_VECTOR`] for `None`.
#[must_use]
pub fn format_vector_opt(v: Option<&Vector3>) -> String {
    v.map_or_else(|| MISSING_VECTOR.to_owned(), format_vector)
}
