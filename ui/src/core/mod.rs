//! Platform-agnostic logic shared by every dashboard view.

pub mod format;
pub mod materialize;
pub mod normalize;
pub mod snapshot;
pub mod timing;
