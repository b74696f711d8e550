//! Engine result conversion.

use crate::Result;

/// Map an engine result onto the boundary error model
pub(crate) fn convert_result<T>(result: contrail_core::Result<T>) -> Result<T> {
    result.map_err(Into::into)
}
