use std::{fmt::Display, ops::Range};

/// Checks that `range` is well-formed and, if `limit` is given, ends at or before it.
///
/// Fails with `InvalidInput` naming the offending range.
pub fn verify_range<T>(range: &Range<T>, limit: Option<T>) -> std::io::Result<()>
where
    T: PartialOrd + Display,
{
    if range.start > range.end {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid range {}..{}", range.start, range.end),
        ));
    }
    match limit {
        Some(limit) if range.end > limit => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("range {}..{} exceeds {limit}", range.start, range.end),
        )),
        _ => Ok(()),
    }
}
