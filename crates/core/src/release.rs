//! Built-in release lifecycle targets
//!
//! The target set is closed: it is declared here once per run from the
//! project configuration, the detected platform and the environment snapshot,
//! and cannot be extended from the command line.
//!
//! | target        | prerequisites                   |
//! |---------------|---------------------------------|
//! | `clean`       |                                 |
//! | `clean-cfg`   |                                 |
//! | `clean-test`  |                                 |
//! | `clean-all`   | clean, clean-cfg, clean-test    |
//! | `dev-install` |                                 |
//! | `build`       | clean                           |
//! | `publish`     | build                           |
//! | `test`        | clean-test                      |
//! | `docs-html`   |                                 |
//! | `docs-pdf`    |                                 |
//! | `docs`        | docs-html, docs-pdf             |

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::configs::lifecycle::LifecycleConfig;
use crate::configs::targets::{Command, Target};
use crate::execution::environment::EnvironmentSnapshot;
use crate::platform::{platform_config_dirs, Platform};
use crate::registry::TargetRegistry;
use crate::types::LifecycleResult;

/// Every target name accepted on the command line
pub const TARGET_NAMES: [&str; 11] = [
    "build",
    "publish",
    "dev-install",
    "test",
    "docs",
    "docs-pdf",
    "docs-html",
    "clean-all",
    "clean",
    "clean-cfg",
    "clean-test",
];

/// Inputs the release targets are declared from
pub struct ReleaseContext<'a> {
    pub config: &'a LifecycleConfig,
    pub platform: Platform,
    pub env: &'a EnvironmentSnapshot,
    pub project_root: &'a Path,
}

impl ReleaseContext<'_> {
    fn python(&self) -> Command {
        Command::new(self.config.python_for(self.platform))
    }

    fn test_app_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.test_app_dir)
    }
}

pub fn release_registry(ctx: &ReleaseContext<'_>) -> LifecycleResult<TargetRegistry> {
    TargetRegistry::from_targets(release_targets(ctx))
}

pub fn release_targets(ctx: &ReleaseContext<'_>) -> Vec<Target> {
    let config = ctx.config;

    let clean = Target::new("clean")
        .describe("Remove build artifacts and Python bytecode caches")
        .command(remove_build_artifacts(ctx.platform));

    let config_dirs: Vec<String> = platform_config_dirs(ctx.platform, &config.package, ctx.env)
        .into_iter()
        .map(|dir| dir.display().to_string())
        .collect();
    if config_dirs.is_empty() {
        warn!(platform = %ctx.platform, "no configuration directory could be determined");
    }
    let mut clean_cfg = Target::new("clean-cfg")
        .describe("Remove the package's per-user configuration directories");
    if !config_dirs.is_empty() {
        clean_cfg = clean_cfg.command(remove_paths(ctx.platform, &config_dirs));
    }

    let clean_test = Target::new("clean-test")
        .describe("Remove test caches, coverage data and isolated test state")
        .command(remove_paths(
            ctx.platform,
            &[
                ".pytest_cache".to_string(),
                ".coverage".to_string(),
                "htmlcov".to_string(),
                ctx.test_app_dir().display().to_string(),
            ],
        ));

    let clean_all = Target::new("clean-all")
        .describe("Run every cleanup target")
        .requires(["clean", "clean-cfg", "clean-test"]);

    let dev_install = Target::new("dev-install")
        .describe("Install packaging tools and the package in editable mode")
        .command(ctx.python().args([
            "-m", "pip", "install", "--upgrade", "pip", "setuptools", "wheel", "build", "twine",
        ]))
        .command(ctx.python().args(["-m", "pip", "install", "-e", "."]));

    let build = Target::new("build")
        .describe("Build the source distribution and wheel into dist/")
        .requires(["clean"])
        .command(ctx.python().args([
            "-m", "build", "--sdist", "--wheel", "--outdir", "dist",
        ]))
        .produces_artifact();

    // twine expands the dist/* pattern itself
    let publish = Target::new("publish")
        .describe("Verify and upload the built distributions, then push tags")
        .requires(["build"])
        .command(ctx.python().args(["-m", "twine", "check", "dist/*"]))
        .command(ctx.python().args(["-m", "twine", "upload", "dist/*"]))
        .command(Command::new("git").args(["push", "--follow-tags"]));

    let test = Target::new("test")
        .describe("Run the test suite against an isolated application-data directory")
        .requires(["clean-test"])
        .command(
            ctx.python()
                .args(["-m", "pytest", config.tests_dir.as_str()])
                .env(
                    config.app_dir_env.as_str(),
                    ctx.test_app_dir().display().to_string(),
                ),
        );

    let docs_html = Target::new("docs-html")
        .describe("Render the HTML documentation")
        .command(ctx.python().args([
            "-m".to_string(),
            "sphinx".to_string(),
            "-b".to_string(),
            "html".to_string(),
            config.docs_dir.clone(),
            format!("{}/html", config.docs_build_dir),
        ]));

    let docs_pdf = Target::new("docs-pdf")
        .describe("Render the PDF documentation")
        .command(ctx.python().args([
            "-m",
            "sphinx",
            "-M",
            "latexpdf",
            config.docs_dir.as_str(),
            config.docs_build_dir.as_str(),
        ]));

    let docs = Target::new("docs")
        .describe("Render the documentation in every format")
        .requires(["docs-html", "docs-pdf"]);

    vec![
        build,
        publish,
        dev_install,
        test,
        docs,
        docs_pdf,
        docs_html,
        clean_all,
        clean,
        clean_cfg,
        clean_test,
    ]
}

/// Remove literal paths; absent paths are not an error
fn remove_paths(platform: Platform, paths: &[String]) -> Command {
    if platform.is_windows() {
        let quoted: Vec<String> = paths.iter().map(|p| powershell_quote(p)).collect();
        powershell(&format!(
            "Remove-Item -LiteralPath {} -Recurse -Force -ErrorAction SilentlyContinue; exit 0",
            quoted.join(",")
        ))
    } else {
        Command::new("rm").args(["-rf", "--"]).args(paths.iter().cloned())
    }
}

fn remove_build_artifacts(platform: Platform) -> Command {
    if platform.is_windows() {
        powershell(
            "Remove-Item -Path 'build','dist','.eggs','*.egg-info' -Recurse -Force -ErrorAction SilentlyContinue; \
             Get-ChildItem -Path . -Recurse -Directory -Filter __pycache__ | \
             Remove-Item -Recurse -Force -ErrorAction SilentlyContinue; exit 0",
        )
    } else {
        Command::new("sh").args([
            "-c",
            "rm -rf -- build dist .eggs *.egg-info && find . -type d -name __pycache__ -prune -exec rm -rf {} +",
        ])
    }
}

fn powershell(script: &str) -> Command {
    Command::new("powershell").args(["-NoProfile", "-NonInteractive", "-Command", script])
}

fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
