//! Configuration structures for packaging operations.
//!
//! This module holds the release target, the per-platform lookup table, the
//! asset layout and the builder that assembles them into [`Settings`].

mod assets;
mod builder;
mod core;
mod platform;
mod target;

// Re-export all public types
pub use assets::{AssetFilter, AssetSource, FilterPolicy};
pub use builder::{DEFAULT_PRODUCT_NAME, SettingsBuilder};
pub use self::core::{BuildCommand, Settings};
pub use platform::{Platform, PlatformProfile};
pub use target::{ReleaseTarget, validate_version};
