#![allow(dead_code)]
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A wrapper around a temporary Gradle project directory.
pub struct TestProject {
    /// The temporary directory. When this is dropped, the directory and its contents are removed.
    pub temp_dir: TempDir,
    /// The root directory for the generated project.
    pub root: PathBuf,
}

impl TestProject {
    /// Create a new project with the given name and a Kotlin source file.
    pub fn new(project_name: &str) -> IoResult<Self> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path().join(project_name);
        let src = root.join("src").join("main").join("kotlin");
        fs::create_dir_all(&src)?;
        fs::write(
            src.join("Main.kt"),
            "package demo\n\nfun main() {\n    val count: Int = \"three\"\n    println(count)\n}\n",
        )?;
        Ok(TestProject { temp_dir, root })
    }

    /// Returns a reference to the project root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Where the default report lands inside this project.
    pub fn report_path(&self) -> PathBuf {
        self.root
            .join("build/reports/gradle_errors/gradle_errors_report.txt")
    }
}

/// Create a project whose `./gradlew` prints `stdout` and `stderr`, records its
/// arguments in `args.txt`, and exits with `exit_code`.
/// `{ROOT}` in either output is replaced by the project root.
#[cfg(unix)]
pub fn create_fake_gradle_project(
    name: &str,
    stdout: &str,
    stderr: &str,
    exit_code: i32,
) -> IoResult<TestProject> {
    let body = format!(
        "echo \"$@\" > args.txt\n\
         cat <<'GRADLE_STDOUT'\n{}\nGRADLE_STDOUT\n\
         cat >&2 <<'GRADLE_STDERR'\n{}\nGRADLE_STDERR\n",
        stdout.trim_end(),
        stderr.trim_end(),
    );
    create_scripted_gradle_project(name, &body, exit_code)
}

/// Create a project whose `./gradlew` runs the shell `body` and exits with `exit_code`.
/// `{ROOT}` in the body is replaced by the project root.
#[cfg(unix)]
pub fn create_scripted_gradle_project(
    name: &str,
    body: &str,
    exit_code: i32,
) -> IoResult<TestProject> {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::new(name)?;
    let body = body.replace("{ROOT}", &project.root.display().to_string());
    let script = format!("#!/bin/sh\n{}\nexit {}\n", body.trim_end(), exit_code);
    let wrapper = project.root.join("gradlew");
    fs::write(&wrapper, script)?;
    let mut perms = fs::metadata(&wrapper)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&wrapper, perms)?;
    Ok(project)
}
