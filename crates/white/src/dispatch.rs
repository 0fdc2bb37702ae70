//! Method dispatch.

use mk_series::Segment;

use crate::config::WhiteConfig;
use crate::error::WhiteError;
use crate::method::PwMethod;
use crate::prewhite::{Whitened, prewhite};

/// Pre-whitens `segment` with `method`.
///
/// [`PwMethod::None`] returns the segment unchanged. For
/// [`PwMethod::ThreePw`] the VCTFPW series is returned, since it carries
/// the slope of that method; its significance needs the full
/// [`prewhite`] output.
///
/// # Errors
///
/// Returns [`WhiteError::InvalidConfig`] for an invalid `config`.
pub fn prewhiten(
    segment: &Segment,
    method: PwMethod,
    config: &WhiteConfig,
) -> Result<Whitened, WhiteError> {
    if method == PwMethod::None {
        config.validate()?;
        return Ok(Whitened {
            segment: segment.clone(),
            applied: PwMethod::None,
            ak: f64::NAN,
        });
    }
    let all = prewhite(segment, config)?;
    Ok(all
        .get(method)
        .cloned()
        .expect("every method but None has a series"))
}
