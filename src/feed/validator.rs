use crate::error::{Error, Result};
use tracing::debug;

/// Work out how many items to extract.
///
/// An unset limit means every item in the feed. A set limit must lie in
/// `[1, total]`.
pub fn resolve_limit(requested: Option<usize>, total: usize) -> Result<usize> {
    match requested {
        None => {
            debug!("No limit given, using all {} items", total);
            Ok(total)
        }
        Some(limit) if limit == 0 || limit > total => {
            Err(Error::LimitOutOfRange { requested: limit, total })
        }
        Some(limit) => Ok(limit),
    }
}
