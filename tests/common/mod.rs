//! Common test utilities for homebrew-go-resources integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use homebrew_go_resources::test_utils::TestGit;

/// Command for the built binary with no ambient configuration leaking in.
pub fn cli() -> Command {
    let mut cmd = Command::cargo_bin("homebrew-go-resources").unwrap();
    cmd.env_remove("HOMEBREW_GO_RESOURCES_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// A throwaway GOPATH with `src/` created, symlinks resolved.
pub struct TestGopath {
    _temp: TempDir,
    root: PathBuf,
}

impl TestGopath {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let root = temp.path().canonicalize()?;
        std::fs::create_dir_all(root.join("src"))?;
        Ok(Self {
            _temp: temp,
            root,
        })
    }

    /// `$GOPATH/src`
    pub fn src(&self) -> PathBuf {
        self.root.join("src")
    }

    /// Directory of `import_path` under `src/`.
    pub fn package_dir(&self, import_path: &str) -> PathBuf {
        self.src().join(import_path)
    }

    /// Create a committed git checkout for `import_path` with the given `origin`.
    pub fn git_checkout(&self, import_path: &str, origin: Option<&str>) -> Result<TestGit> {
        let git = TestGit::init_with_commit(self.package_dir(import_path))?;
        if let Some(origin) = origin {
            git.remote_add("origin", origin)?;
        }
        Ok(git)
    }

    /// Create a sub-package directory inside an existing checkout.
    pub fn sub_package(&self, import_path: &str) -> Result<PathBuf> {
        let dir = self.package_dir(import_path);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("sub.go"), "package sub\n")?;
        Ok(dir)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// A shell script standing in for `go`, answering from canned JSON files.
///
/// `go list -e -json [pkg]` prints the listing; `go list -e -find -json <path>`
/// prints the location registered for `<path>`.
#[cfg(unix)]
pub struct FakeGo {
    dir: PathBuf,
}

#[cfg(unix)]
impl FakeGo {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        use std::os::unix::fs::PermissionsExt;

        let dir = dir.into();
        std::fs::create_dir_all(dir.join("find"))?;
        let script = dir.join("go");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\n\
                 if [ \"$3\" = \"-find\" ]; then\n  \
                   f=\"{dir}/find/$(printf '%s' \"$5\" | tr / _).json\"\n  \
                   [ -f \"$f\" ] || {{ echo \"cannot find package $5\" >&2; exit 1; }}\n  \
                   cat \"$f\"\n\
                 else\n  \
                   cat \"{dir}/list.json\"\n\
                 fi\n",
                dir = dir.display()
            ),
        )?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
        Ok(Self {
            dir,
        })
    }

    /// Root listing with its dependency import paths.
    pub fn listing(&self, import_path: &str, dir: &Path, deps: &[&str]) -> Result<&Self> {
        let listing = serde_json::json!({
            "ImportPath": import_path,
            "Dir": dir,
            "Deps": deps,
        });
        std::fs::write(self.dir.join("list.json"), listing.to_string())?;
        Ok(self)
    }

    /// Location of one package, reported under the GOPATH `root`.
    pub fn package(&self, import_path: &str, dir: &Path, root: &Path, standard: bool) -> Result<&Self> {
        let location = serde_json::json!({
            "ImportPath": import_path,
            "Dir": dir,
            "Root": root,
            "Goroot": standard,
            "Standard": standard,
        });
        let name = format!("{}.json", import_path.replace('/', "_"));
        std::fs::write(self.dir.join("find").join(name), location.to_string())?;
        Ok(self)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("go")
    }

    /// Config file selecting this fake as the Go toolchain.
    pub fn write_config(&self) -> Result<PathBuf> {
        let config = self.dir.join("config.toml");
        std::fs::write(&config, format!("[tools]\ngo = {:?}\n", self.path().display().to_string()))?;
        Ok(config)
    }
}
