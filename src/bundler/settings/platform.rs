//! Release platforms and their per-platform packaging profile.

use std::{fmt, path::PathBuf, str::FromStr};

/// Dependency folder shared by both Windows flavours, relative to the project root.
const WINDOWS_DEPENDENCY_DIR: &str = "dist/win";

/// Sound decoding, audio output and C runtime libraries the Windows build loads at startup.
const WINDOWS_DEPENDENCIES: &[&str] = &[
    "libogg.dll",
    "libvorbis.dll",
    "libvorbisfile.dll",
    "OpenAL32.dll",
    "vcruntime140.dll",
];

/// Target platform for a release.
///
/// The set is closed: adding a platform means adding a variant here and a
/// row in [`PlatformProfile::defaults_for`].
///
/// # Examples
///
/// ```
/// use gokoban_release::bundler::Platform;
///
/// let platform: Platform = "win-debug".parse().unwrap();
/// assert_eq!(platform, Platform::WindowsDebug);
/// assert_eq!(platform.to_string(), "win-debug");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Platform {
    /// Windows release build, no console window
    #[value(name = "win")]
    WindowsRelease,
    /// Windows build with the console attached for log output
    #[value(name = "win-debug")]
    WindowsDebug,
    /// Linux build
    #[value(name = "linux")]
    Linux,
}

impl Platform {
    /// Every supported platform, in CLI order.
    pub const ALL: [Platform; 3] = [
        Platform::WindowsRelease,
        Platform::WindowsDebug,
        Platform::Linux,
    ];

    /// Name used on the command line and in archive names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::WindowsRelease => "win",
            Platform::WindowsDebug => "win-debug",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown platform '{s}' (expected one of: {})",
                    Platform::ALL.map(|p| p.as_str()).join(", ")
                )
            })
    }
}

/// Everything that differs between platforms.
///
/// Build flags and shared libraries are looked up here instead of being
/// branched on inside each stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Extra arguments appended to the build command.
    pub build_flags: Vec<String>,

    /// Suffix appended to the product name to form the executable file name.
    pub executable_suffix: String,

    /// Folder holding the shared libraries, relative to the project root.
    pub dependency_dir: PathBuf,

    /// Shared libraries copied next to the executable, in order.
    pub dependencies: Vec<String>,
}

impl PlatformProfile {
    /// Built-in profile for `platform`.
    pub fn defaults_for(platform: Platform) -> Self {
        let windows_dependencies = || {
            WINDOWS_DEPENDENCIES
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>()
        };

        match platform {
            Platform::WindowsRelease => Self {
                build_flags: vec!["-ldflags".into(), "-H=windowsgui".into()],
                executable_suffix: ".exe".into(),
                dependency_dir: PathBuf::from(WINDOWS_DEPENDENCY_DIR),
                dependencies: windows_dependencies(),
            },
            Platform::WindowsDebug => Self {
                build_flags: Vec::new(),
                executable_suffix: ".exe".into(),
                dependency_dir: PathBuf::from(WINDOWS_DEPENDENCY_DIR),
                dependencies: windows_dependencies(),
            },
            Platform::Linux => Self {
                build_flags: Vec::new(),
                executable_suffix: String::new(),
                dependency_dir: PathBuf::new(),
                dependencies: Vec::new(),
            },
        }
    }
}
