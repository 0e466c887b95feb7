//! Per-entry predicates for selective tree copies.

use crate::bundler::settings::{AssetFilter, FilterPolicy};

/// Builds the inclusion predicate used while copying one asset source.
///
/// [`FilterPolicy::CopyAll`] accepts everything. [`FilterPolicy::ExcludeDesignFiles`]
/// rejects the files `filter` matches and keeps every directory.
pub fn entry_filter(
    filter: &AssetFilter,
    policy: FilterPolicy,
) -> impl Fn(&walkdir::DirEntry) -> bool + Send + 'static {
    let filter = match policy {
        FilterPolicy::CopyAll => None,
        FilterPolicy::ExcludeDesignFiles => Some(filter.clone()),
    };

    move |entry: &walkdir::DirEntry| match &filter {
        None => true,
        Some(filter) => {
            let excluded = filter.should_exclude(entry.path(), entry.file_type().is_dir());
            if excluded {
                log::debug!("skipping design file {}", entry.path().display());
            }
            !excluded
        }
    }
}
