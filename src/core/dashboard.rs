//! Dashboard helpers
//!
//! Diagnostic values are published into the [`ParameterStore`] as read-only
//! entries. A full store only costs the diagnostic, so failures are logged
//! and otherwise ignored.

use drivebase_core::parameters::{ParamValue, ParameterStore};

/// Publish a read-only diagnostic value
pub fn publish(store: &mut ParameterStore, name: &str, value: impl Into<ParamValue>) {
    if store.publish(name, value).is_err() {
        crate::log_warn!("Dashboard: cannot publish {}", name);
    }
}
