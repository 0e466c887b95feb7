//! Shared fixtures: a throwaway game project and a fake build toolchain.

#![allow(dead_code)]

use gokoban_release::bundler::{BuildCommand, Platform, Settings, SettingsBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WINDOWS_DLLS: [&str; 5] = [
    "libogg.dll",
    "libvorbis.dll",
    "libvorbisfile.dll",
    "OpenAL32.dll",
    "vcruntime140.dll",
];

/// Temporary project laid out like the game repository.
pub struct Project {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("gokoban");

        write(&root, "levels/01.json", "level one");
        write(&root, "levels/02.json", "level two");
        write(&root, "levels/drafts/03.xcf", "unfiltered draft");
        write(&root, "audio/music/theme.ogg", "music");
        write(&root, "audio/sfx/click.ogg", "click");
        write(&root, "img/floor.png", "png");
        write(&root, "img/floor.xcf", "layered");
        write(&root, "img/.xcf", "hidden layered");
        write(&root, "img/models/crate.blend", "scene");
        write(&root, "img/models/crate.png", "png");
        write(&root, "gui/title.png", "png");
        write(&root, "gui/title.XCF", "layered");
        write(&root, "gui/buttons/next.png", "png");
        write(&root, "gopher/gopher.obj", "mesh");
        write(&root, "gopher/gopher.blend", "unfiltered scene");
        write(&root, "LICENSE", "MIT");
        write(&root, "README.md", "# Gokoban");
        for dll in WINDOWS_DLLS {
            write(&root, &format!("dist/win/{dll}"), dll);
        }

        Self { _tmp: tmp, root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Settings whose toolchain writes the executable and records its flags.
    pub fn settings(&self) -> Settings {
        self.settings_with(fake_build())
    }

    pub fn settings_with(&self, build: BuildCommand) -> Settings {
        SettingsBuilder::new()
            .project_root(&self.root)
            .build_command(build)
            .build()
            .expect("valid settings")
    }

    /// `release.toml` that wires the fake toolchain in for CLI runs.
    pub fn write_manifest(&self, build: &BuildCommand) {
        let args = build
            .args
            .iter()
            .map(|a| format!("{a:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        write(
            &self.root,
            "release.toml",
            &format!("[build]\nprogram = {:?}\nargs = [{args}]\n", build.program),
        );
    }
}

/// Toolchain stand-in: writes both executable names, records its arguments
/// and leaves a marker so tests can tell whether it ran.
pub fn fake_build() -> BuildCommand {
    script(
        "printf '%s\\n' \"$@\" > build-args.txt; \
         touch build-ran; \
         printf 'binary' > gokoban; chmod +x gokoban; \
         printf 'binary' > gokoban.exe",
    )
}

/// Toolchain stand-in that fails.
pub fn failing_build() -> BuildCommand {
    script("touch build-ran; exit 7")
}

/// Toolchain stand-in that succeeds without producing anything.
pub fn empty_build() -> BuildCommand {
    script("touch build-ran")
}

fn script(body: &str) -> BuildCommand {
    BuildCommand {
        program: "sh".into(),
        args: vec!["-c".into(), body.into(), "fake-go".into()],
    }
}

pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("has parent")).expect("create parent");
    fs::write(path, contents).expect("write fixture file");
}

/// File entries (directories left out) of a zip archive.
pub fn zip_files(path: &Path) -> BTreeSet<String> {
    let file = fs::File::open(path).expect("open archive");
    let archive = zip::ZipArchive::new(file).expect("read archive");
    archive
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .map(String::from)
        .collect()
}

pub fn archive_name(platform: Platform, version: &str) -> String {
    format!("gokoban-{platform}-{version}.zip")
}
