//! End-to-end tests of the jekyll-docker binary against a fake engine.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Directory holding the fake `docker`, written once per test binary so no
/// test forks while the script is still open for writing.
fn fake_bin_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!("jekyll-docker-fake-bin-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("docker");
        std::fs::copy(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake-docker.sh"),
            &script,
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        let opener = dir.join("xdg-open");
        std::fs::write(&opener, "#!/bin/sh\necho \"xdg-open $*\" >> \"$FAKE_DOCKER_LOG\"\n").unwrap();
        std::fs::set_permissions(&opener, std::fs::Permissions::from_mode(0o755)).unwrap();
        dir
    })
}

struct Sandbox {
    _root: tempfile::TempDir,
    home: PathBuf,
    project: PathBuf,
    engine_log: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("site");
        std::fs::create_dir_all(&project).unwrap();
        Self {
            home: root.path().join("state"),
            engine_log: root.path().join("engine.log"),
            project,
            _root: root,
        }
    }

    /// Pre-create the state directory with the given config content.
    fn with_config(self, content: &str) -> Self {
        std::fs::create_dir_all(&self.home).unwrap();
        std::fs::write(self.home.join("config"), content).unwrap();
        self
    }

    fn cmd(&self) -> Command {
        let path = format!(
            "{}:{}",
            fake_bin_dir().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = Command::cargo_bin("jekyll-docker").unwrap();
        cmd.current_dir(&self.project)
            .env("JEKYLL_DOCKER_HOME", &self.home)
            .env("PATH", path)
            .env("FAKE_DOCKER_LOG", &self.engine_log)
            .env_remove("RUST_LOG");
        cmd
    }

    fn engine_calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.engine_log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn position(&self, subcommand: &str) -> Option<usize> {
        self.engine_calls()
            .iter()
            .position(|call| call.split_whitespace().next() == Some(subcommand))
    }

    fn invoked(&self, subcommand: &str) -> bool {
        self.position(subcommand).is_some()
    }
}

fn bound_port() -> (std::net::TcpListener, u16) {
    let listener = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

fn free_port() -> u16 {
    bound_port().1
}

#[test]
fn first_run_creates_state_and_second_run_keeps_it() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jekyll-docker "));

    let config = std::fs::read_to_string(sandbox.home.join("config")).unwrap();
    assert!(config.contains("DOCKER_IMAGE=jekyll-docker:latest"));
    assert!(config.contains("JEKYLL_PORT=4000"));
    assert!(sandbox.home.join("jekyll-docker.log").is_file());
    assert!(sandbox.home.join("templates/Dockerfile").is_file());
    assert!(sandbox.home.join("templates/dockerignore").is_file());

    std::fs::write(sandbox.home.join("config"), "JEKYLL_PORT=4001\n").unwrap();
    sandbox.cmd().arg("version").assert().success();
    assert_eq!(
        std::fs::read_to_string(sandbox.home.join("config")).unwrap(),
        "JEKYLL_PORT=4001\n"
    );
}

#[test]
fn help_shows_configuration() {
    let sandbox = Sandbox::new().with_config("DOCKER_IMAGE=blog:dev\nJEKYLL_PORT=4123\n");
    for args in [&[][..], &["help"][..], &["--help"][..], &["-h"][..]] {
        sandbox
            .cmd()
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains("serve-detached"))
            .stdout(predicate::str::contains("DOCKER_IMAGE=blog:dev"))
            .stdout(predicate::str::contains("JEKYLL_PORT=4123"));
    }
    assert!(sandbox.engine_calls().is_empty());
}

#[test]
fn unknown_command_fails() {
    Sandbox::new().cmd().arg("deploy").assert().failure();
}

#[test]
fn missing_engine_aborts_before_any_operation() {
    let sandbox = Sandbox::new().with_config("CONTAINER_ENGINE=jekyll-docker-no-engine\n");
    sandbox
        .cmd()
        .arg("stop")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn build_image_skips_existing_image() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("build-image")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert!(!sandbox.invoked("build"));
    assert!(!sandbox.project.join("Dockerfile").exists());
}

#[test]
fn build_image_force_builds() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["build-image", "--force"])
        .assert()
        .success();
    assert!(sandbox.invoked("build"));
    assert!(
        sandbox
            .engine_calls()
            .contains(&"build -t jekyll-docker:latest .".to_string())
    );
    assert!(sandbox.project.join("Dockerfile").is_file());
}

#[test]
fn failed_build_propagates_exit_code() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["build-image", "--force"])
        .env("FAKE_BUILD_EXIT", "7")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("build -t jekyll-docker:latest"));
}

#[test]
fn init_scaffolds_empty_directory() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("init")
        .env("FAKE_IMAGE_EXISTS", "0")
        .assert()
        .success()
        .stdout(predicate::str::contains("jekyll-docker serve"));

    assert!(sandbox.project.join("Dockerfile").is_file());
    assert!(sandbox.project.join(".dockerignore").is_file());
    let build = sandbox.position("build").expect("image build");
    let run = sandbox.position("run").expect("scaffold run");
    assert!(build < run);
    assert!(sandbox.engine_calls()[run].contains("jekyll new . --force"));
}

#[test]
fn serve_refuses_bound_port() {
    let (_listener, port) = bound_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\n", port));

    for command in ["serve", "serve-detached"] {
        sandbox
            .cmd()
            .arg(command)
            .assert()
            .code(1)
            .stderr(predicate::str::contains(format!("Port {} is already in use", port)));
    }
    assert!(!sandbox.invoked("run"));
}

#[test]
fn serve_detached_replaces_existing_container() {
    let port = free_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\nUSER_ID=501\nGROUP_ID=20\n", port));
    sandbox
        .cmd()
        .arg("serve-detached")
        .env("FAKE_CONTAINER_EXISTS", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("http://localhost:{}", port)))
        .stdout(predicate::str::contains("jekyll-docker stop"));

    let stop = sandbox.position("stop").expect("old container stopped");
    let rm = sandbox.position("rm").expect("old container removed");
    let run = sandbox.position("run").expect("server started");
    assert!(stop < rm && rm < run);

    let run_call = &sandbox.engine_calls()[run];
    assert!(run_call.starts_with("run -d --name jekyll-serve"));
    assert!(run_call.contains("--user 501:20"));
    assert!(run_call.contains(&format!("-p {}:4000", port)));
}

#[test]
fn serve_runs_foreground_container_after_replacing_old_one() {
    let port = free_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\nUSER_ID=501\nGROUP_ID=20\n", port));
    sandbox
        .cmd()
        .arg("serve")
        .env("FAKE_CONTAINER_EXISTS", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("http://localhost:{}", port)));

    let stop = sandbox.position("stop").expect("old container stopped");
    let rm = sandbox.position("rm").expect("old container removed");
    let run = sandbox.position("run").expect("server started");
    assert!(stop < rm && rm < run);

    let run_call = &sandbox.engine_calls()[run];
    assert!(run_call.starts_with("run --rm --name jekyll-serve -v "), "{run_call}");
    assert!(!run_call.contains(" -it "), "{run_call}");
    assert!(run_call.contains(":/srv/jekyll -w /srv/jekyll --user 501:20"));
    assert!(run_call.contains(&format!("-p {}:4000 jekyll-docker:latest sh -c", port)));
    assert!(run_call.contains("jekyll serve --host 0.0.0.0 --port 4000"));
}

#[test]
fn serve_builds_missing_image_first() {
    let port = free_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\n", port));
    sandbox
        .cmd()
        .arg("serve-detached")
        .env("FAKE_IMAGE_EXISTS", "0")
        .assert()
        .success();

    let build = sandbox.position("build").expect("image built");
    let run = sandbox.position("run").expect("server started");
    assert!(build < run);
    assert!(sandbox.project.join("Dockerfile").is_file());
}

#[test]
fn stop_tolerates_container_removed_on_stop() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("stop")
        .env("FAKE_CONTAINER_EXISTS", "1")
        .env("FAKE_RM_GONE", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Server stopped"));
    assert!(sandbox.invoked("rm"));
}

#[test]
fn serve_detached_replaces_auto_removed_container() {
    let port = free_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\n", port));
    sandbox
        .cmd()
        .arg("serve-detached")
        .env("FAKE_CONTAINER_EXISTS", "1")
        .env("FAKE_RM_GONE", "1")
        .assert()
        .success();
    assert!(sandbox.invoked("run"));
}

#[test]
fn stop_reports_other_rm_failures() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("stop")
        .env("FAKE_CONTAINER_EXISTS", "1")
        .env("FAKE_RM_EXIT", "2")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rm jekyll-serve"));
}

#[cfg(target_os = "linux")]
#[test]
fn open_declined_only_opens_browser() {
    let port = free_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\n", port));
    sandbox
        .cmd()
        .arg("open")
        .write_stdin("n\n")
        .assert()
        .success();

    assert!(!sandbox.invoked("run"));
    assert!(
        sandbox
            .engine_calls()
            .contains(&format!("xdg-open http://localhost:{}", port))
    );
}

#[cfg(target_os = "linux")]
#[test]
fn open_with_yes_starts_server_then_browser() {
    let port = free_port();
    let sandbox = Sandbox::new().with_config(&format!("JEKYLL_PORT={}\n", port));
    sandbox.cmd().args(["open", "--yes"]).assert().success();

    let run = sandbox.position("run").expect("server started");
    let opener = sandbox.position("xdg-open").expect("browser opened");
    assert!(run < opener);
    assert!(sandbox.engine_calls()[run].starts_with("run -d --name jekyll-serve"));
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_home_path_is_accepted() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let sandbox = Sandbox::new();
    let home = sandbox
        .project
        .parent()
        .unwrap()
        .join(OsStr::from_bytes(b"st\xffate"));
    sandbox
        .cmd()
        .arg("--home")
        .arg(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jekyll-docker "));
    assert!(home.join("config").is_file());
}

#[test]
fn stop_without_container_is_noop() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("No container named jekyll-serve"));
    assert!(!sandbox.invoked("stop"));
    assert!(!sandbox.invoked("rm"));
}

#[test]
fn stop_removes_existing_container() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("stop")
        .env("FAKE_CONTAINER_EXISTS", "1")
        .assert()
        .success();
    let calls = sandbox.engine_calls();
    assert!(calls.contains(&"stop jekyll-serve".to_string()));
    assert!(calls.contains(&"rm jekyll-serve".to_string()));
}

#[test]
fn empty_arguments_are_usage_errors() {
    let sandbox = Sandbox::new();
    for args in [&["exec", ""][..], &["exec"][..], &["add-gem", ""][..], &["add-gem"][..]] {
        sandbox
            .cmd()
            .args(args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Missing required argument"));
    }
    assert!(sandbox.engine_calls().is_empty());
    assert!(!sandbox.project.join(".bundle").exists());
}

#[test]
fn exec_runs_shell_command_in_container() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["exec", "bundle exec jekyll build"])
        .assert()
        .success();

    assert!(sandbox.project.join(".bundle").is_dir());
    let calls = sandbox.engine_calls();
    let run = calls.iter().find(|c| c.starts_with("run ")).expect("run call");
    assert!(run.starts_with("run --rm -v "));
    assert!(run.ends_with("jekyll-docker:latest sh -c bundle exec jekyll build"));
}

#[test]
fn exec_failure_propagates_exit_code() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["exec", "false"])
        .env("FAKE_RUN_EXIT", "3")
        .assert()
        .code(3);
}

#[test]
fn add_gem_uses_bundle_add() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add-gem", "jekyll-feed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restart the server"));
    assert!(
        sandbox
            .engine_calls()
            .iter()
            .any(|c| c.starts_with("run ") && c.ends_with("bundle add jekyll-feed"))
    );
}

#[test]
fn new_post_writes_dated_file() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["new-post", "Hello, Jekyll World!"])
        .assert()
        .success();

    let today = chrono::Local::now().format("%Y-%m-%d");
    let path = sandbox
        .project
        .join("_posts")
        .join(format!("{}-hello-jekyll-world.md", today));
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("title: \"Hello, Jekyll World!\""));
    assert!(content.contains("layout: post"));
    assert!(sandbox.engine_calls().is_empty());
}

#[test]
fn new_post_requires_title() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["new-post", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required argument: title"));
    assert!(!sandbox.project.join("_posts").exists());
}

#[test]
fn clean_respects_confirmation() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("clean")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    assert!(!sandbox.invoked("stop"));

    sandbox.cmd().args(["clean", "--yes"]).assert().success();
    assert!(sandbox.invoked("stop"));
    assert!(sandbox.invoked("rm"));
}

#[test]
fn clean_all_removes_image() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("clean-all")
        .write_stdin("y\n")
        .assert()
        .success();
    assert!(
        sandbox
            .engine_calls()
            .contains(&"rmi -f jekyll-docker:latest".to_string())
    );
}

#[test]
fn fix_permissions_on_own_files() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.project.join("Gemfile"), "source 'https://rubygems.org'\n").unwrap();
    sandbox
        .cmd()
        .arg("fix-permissions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ownership fixed"));
}

#[test]
fn log_lines_are_timestamped() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("stop").assert().success();

    let log = std::fs::read_to_string(sandbox.home.join("jekyll-docker.log")).unwrap();
    let line_format =
        predicate::str::is_match(r"(?m)^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] \[INFO\] Invoked: ").unwrap();
    assert!(line_format.eval(log.as_str()), "unexpected log contents:\n{log}");
}
