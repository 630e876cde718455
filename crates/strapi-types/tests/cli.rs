//! End-to-end tests for the strapi-types binary.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ARTICLE: &str = r#"{
    "info": {"singularName": "article"},
    "attributes": {
        "title": {"type": "string"},
        "hero": {"type": "component", "component": "layout.hero"}
    }
}"#;

const HERO: &str = r#"{"attributes": {"heading": {"type": "text"}}}"#;

/// `<tmp>/backend` is the Strapi project; `<tmp>/frontend` is its sibling.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().unwrap(),
        };
        ws.write("src/api/article/content-types/article/schema.json", ARTICLE);
        ws.write("src/components/layout/hero.json", HERO);
        ws
    }

    fn backend(&self) -> std::path::PathBuf {
        self.dir.path().join("backend")
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.backend().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(&self, path: impl AsRef<Path>) -> String {
        fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("strapi-types").unwrap();
        cmd.current_dir(self.backend())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("RUST_LOG");
        cmd
    }
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn backend_only_by_default() {
    let ws = Workspace::new();
    let output = ws.cmd().output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let types = ws.read("backend/src/types/types.ts");
    assert!(types.contains("export interface APIArticle {\n  id: number;\n  title: string;"));
    assert!(types.contains("hero: ComponentsLayoutHeros;"));
    assert!(types.contains("export interface ComponentsLayoutHeros {"));
    assert!(!ws.dir.path().join("frontend").exists());

    assert!(stderr(&output).contains("created types for backend:"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 declarations (1 entities, 1 components), 0 skipped"));
}

#[test]
fn frontend_token_writes_identical_copy() {
    let ws = Workspace::new();
    let output = ws.cmd().arg("frontend").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        ws.read("backend/src/types/types.ts"),
        ws.read("frontend/src/types/types.ts")
    );
    assert!(stderr(&output).contains("created types for frontend:"));
}

#[test]
fn unknown_tokens_are_ignored() {
    let ws = Workspace::new();
    let output = ws.cmd().arg("mobile").output().unwrap();

    assert!(output.status.success());
    assert!(stderr(&output).contains("ignoring unknown target `mobile`"));
    assert!(!ws.dir.path().join("frontend").exists());
}

#[test]
fn flags_override_destination_and_layout() {
    let ws = Workspace::new();
    let out = ws.dir.path().join("generated");
    let output = ws
        .cmd()
        .args(["--compact", "--file-name", "strapi.d.ts", "--out"])
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let types = ws.read("generated/strapi.d.ts");
    assert!(types.starts_with("export interface APIArticle {id: number;title: string;"));
}

#[test]
fn root_flag_replaces_current_dir() {
    let ws = Workspace::new();
    let output = Command::cargo_bin("strapi-types")
        .unwrap()
        .current_dir(ws.dir.path())
        .env("XDG_CONFIG_HOME", ws.dir.path().join("xdg"))
        .arg("--root")
        .arg(ws.backend())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(ws.backend().join("src/types/types.ts").exists());
}

#[test]
fn project_config_is_applied() {
    let ws = Workspace::new();
    ws.write(
        "strapi-types.toml",
        r#"
[paths]
backend_out = "types"

[output]
file_name = "api.ts"
layout = "compact"
"#,
    );

    let output = ws.cmd().output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(ws.read("backend/types/api.ts").contains("{id: number;title: string;"));
}

#[test]
fn flags_beat_config() {
    let ws = Workspace::new();
    ws.write("strapi-types.toml", "[output]\nfile_name = \"api.ts\"\n");

    let output = ws.cmd().args(["--file-name", "cli.ts"]).output().unwrap();
    assert!(output.status.success());
    assert!(ws.backend().join("src/types/cli.ts").exists());
    assert!(!ws.backend().join("src/types/api.ts").exists());
}

#[test]
fn invalid_config_fails() {
    let ws = Workspace::new();
    ws.write("strapi-types.toml", "[output]\nlayout = \"sideways\"\n");

    let output = ws.cmd().output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("strapi-types.toml"));
}

#[test]
fn broken_schema_is_skipped_unless_strict() {
    let ws = Workspace::new();
    ws.write("src/api/broken/content-types/broken/schema.json", "{");

    let lenient = ws.cmd().output().unwrap();
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("1 skipped"));

    let strict = ws.cmd().arg("--strict").output().unwrap();
    assert!(!strict.status.success());
    // Output is still written before the strict check fails the run.
    assert!(ws.read("backend/src/types/types.ts").contains("APIArticle"));
}

#[test]
fn strict_passes_without_components_dir() {
    let ws = Workspace::new();
    fs::remove_dir_all(ws.backend().join("src/components")).unwrap();

    let output = ws.cmd().arg("--strict").output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 declarations (1 entities, 0 components), 0 skipped"));
}

#[test]
fn collision_error_policy_fails_without_writing() {
    let ws = Workspace::new();
    ws.write(
        "src/api/article-v2/content-types/article-v2/schema.json",
        r#"{"info": {"singularName": "article"}, "attributes": {}}"#,
    );

    let output = ws.cmd().args(["--on-collision", "error"]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("APIArticle"));
    assert!(!ws.backend().join("src/types").exists());
}

#[test]
fn unknown_collision_policy_is_rejected() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--on-collision", "newest"]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown collision policy"));
}

#[test]
fn failed_backend_write_still_writes_frontend() {
    let ws = Workspace::new();
    let blocker = ws.dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let output = ws
        .cmd()
        .arg("frontend")
        .arg("--out")
        .arg(blocker.join("types"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("backend output failed"));
    assert!(ws.dir.path().join("frontend/src/types/types.ts").exists());
}
