use super::FormView;
use crate::navigation::decode_param;
use tracing::warn;

/// Mounts the form from an optional `data` parameter value.
///
/// A malformed value is logged and ignored, leaving an empty form.
pub fn entry(param: Option<&str>) -> FormView {
    let initial = param.and_then(|raw| match decode_param(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Error parsing user data: {e}");
            None
        }
    });
    FormView::mount(initial)
}
