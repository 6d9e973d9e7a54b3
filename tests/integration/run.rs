//! Successful runs of the binary, with `go` replaced by a scripted stand-in.

use predicates::prelude::*;

use crate::common::{FakeGo, TestGopath, cli};

/// GOPATH with a committed root checkout and a fake `go` that lists `deps`.
fn app_with_deps(gopath: &TestGopath, deps: &[&str]) -> FakeGo {
    gopath.git_checkout("example.com/app", Some("git@example.com:me/app.git")).unwrap();
    let app = gopath.package_dir("example.com/app");

    let go = FakeGo::new(gopath.path().join("bin")).unwrap();
    go.listing("example.com/app", &app, deps).unwrap();
    go.package("example.com/app", &app, gopath.path(), false).unwrap();
    go.package("fmt", std::path::Path::new("/usr/lib/go/src/fmt"), std::path::Path::new("/usr/lib/go"), true)
        .unwrap();
    go
}

#[test]
fn test_only_standard_and_own_packages_prints_empty_fragment() {
    let gopath = TestGopath::new().unwrap();
    let util = gopath.sub_package("example.com/app/util").unwrap();
    let go = app_with_deps(&gopath, &["fmt", "example.com/app/util"]);
    go.package("example.com/app/util", &util, gopath.path(), false).unwrap();

    cli()
        .current_dir(gopath.package_dir("example.com/app"))
        .arg("--config")
        .arg(go.write_config().unwrap())
        .assert()
        .code(0)
        .stdout("\n\n");
}

#[test]
fn test_git_dependency_prints_one_resource() {
    let gopath = TestGopath::new().unwrap();
    let bar = gopath.git_checkout("github.com/foo/bar", Some("git@github.com:foo/bar")).unwrap();
    let go = app_with_deps(&gopath, &["fmt", "github.com/foo/bar"]);
    go.package("github.com/foo/bar", bar.repo_path(), gopath.path(), false).unwrap();

    let expected = format!(
        concat!(
            "\n",
            "\n  go_resource \"github.com/foo/bar\" do\n",
            "    url \"https://github.com/foo/bar.git\",\n",
            "      :revision => \"{}\"\n",
            "  end\n",
            "\n",
        ),
        bar.rev_parse_head().unwrap(),
    );

    cli()
        .current_dir(gopath.package_dir("example.com/app"))
        .arg("--config")
        .arg(go.write_config().unwrap())
        .assert()
        .code(0)
        .stdout(expected);
}

#[test]
fn test_unlocatable_dependency_fails() {
    let gopath = TestGopath::new().unwrap();
    let go = app_with_deps(&gopath, &["github.com/gone/away"]);

    cli()
        .current_dir(gopath.package_dir("example.com/app"))
        .arg("--config")
        .arg(go.write_config().unwrap())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("github.com/gone/away"));
}
