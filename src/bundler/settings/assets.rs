//! Asset sources and the design-file exclusion rule.

use std::path::{Path, PathBuf};

/// How a source tree is filtered while it is copied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Every entry is copied.
    #[default]
    CopyAll,
    /// Design-tool files are skipped, see [`AssetFilter`].
    ExcludeDesignFiles,
}

/// One asset directory copied into the staging tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetSource {
    /// Source directory, relative to the project root.
    pub source: PathBuf,
    /// Destination, relative to the staging root.
    pub dest: PathBuf,
    /// Filter applied during the copy.
    pub filter: FilterPolicy,
}

impl AssetSource {
    /// Source copied to the same relative path in the staging tree.
    pub fn new(path: impl Into<PathBuf>, filter: FilterPolicy) -> Self {
        let path = path.into();
        Self {
            dest: path.clone(),
            source: path,
            filter,
        }
    }

    /// Source copied under a different destination path.
    pub fn with_dest(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        filter: FilterPolicy,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            filter,
        }
    }

    /// Built-in Gokoban layout.
    pub fn defaults() -> Vec<AssetSource> {
        vec![
            AssetSource::new("levels", FilterPolicy::CopyAll),
            AssetSource::new("audio", FilterPolicy::CopyAll),
            AssetSource::new("img", FilterPolicy::ExcludeDesignFiles),
            AssetSource::new("gui", FilterPolicy::ExcludeDesignFiles),
            AssetSource::new("gopher", FilterPolicy::CopyAll),
        ]
    }
}

/// Extension-based exclusion of author-only source assets.
///
/// The rule is data: which extensions count as design files comes from
/// settings, not from code.
///
/// # Examples
///
/// ```
/// use gokoban_release::bundler::AssetFilter;
/// use std::path::Path;
///
/// let filter = AssetFilter::default();
/// assert!(filter.should_exclude(Path::new("img/crate.xcf"), false));
/// assert!(!filter.should_exclude(Path::new("img/crate.png"), false));
/// assert!(!filter.should_exclude(Path::new("img/scenes.blend"), true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetFilter {
    extensions: Vec<String>,
}

impl AssetFilter {
    /// Filter for the given extensions; a leading dot is ignored.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    /// Excluded extensions, lowercase and without dots.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether an entry must be left out of the release.
    ///
    /// Directories are never excluded so traversal always descends into them.
    pub fn should_exclude(&self, path: &Path, is_dir: bool) -> bool {
        if is_dir {
            return false;
        }

        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();

        // suffix match, so a bare `.xcf` counts as well
        self.extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

impl Default for AssetFilter {
    /// GIMP layered images and Blender scenes.
    fn default() -> Self {
        Self::new(["xcf", "blend"])
    }
}
