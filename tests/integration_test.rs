// End-to-end runs of the gradle-pretty binary against a fake `./gradlew`.
mod common {
    pub mod test_prelude;
    pub mod test_utils;
}

use common::test_prelude::*;

#[cfg(unix)]
use common::test_utils::{create_fake_gradle_project, create_scripted_gradle_project, TestProject};

#[cfg(unix)]
fn gradle_pretty(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("gradle-pretty").unwrap();
    cmd.current_dir(project.path())
        .env("NO_COLOR", "1")
        .env("HOME", project.path())
        .env_remove("GRADLE_PRETTY_WRAPPER")
        .env_remove("GRADLE_PRETTY_REPORT")
        .env_remove("GRADLE_PRETTY_REPORT_DIR")
        .env_remove("GRADLE_PRETTY_CONTEXT");
    cmd
}

#[cfg(unix)]
const COMPILE_ERRORS: &str = "\
e: file://{ROOT}/src/main/kotlin/Main.kt:4:22 Type mismatch: inferred type is String but Int was expected
e: file://{ROOT}/src/main/kotlin/Main.kt:4:9 Variable 'count' is never used
e: file:///does/not/exist/Gone.kt:1:1 Unresolved reference: gone
FAILURE: Build failed with an exception.
BUILD FAILED in 1s
";

#[test]
fn missing_arguments_is_a_usage_error() {
    Command::cargo_bin("gradle-pretty")
        .unwrap()
        .assert()
        .code(1)
        .stderr(contains("Usage: gradle-pretty"));
}

#[cfg(unix)]
#[test]
fn successful_build() -> Result<(), Box<dyn std::error::Error>> {
    let project = create_fake_gradle_project(
        "ok_project",
        "> Task :app:compileKotlin\n> Task :app:build UP-TO-DATE\nBUILD SUCCESSFUL in 2s",
        "",
        0,
    )?;

    gradle_pretty(&project)
        .args(["build", "--info"])
        .assert()
        .success()
        .stdout(contains("▶ Running:"))
        .stdout(contains("❯ Task: app:compileKotlin OK"))
        .stdout(contains("✔ BUILD SUCCESSFUL"))
        .stdout(contains("✔ Done"))
        .stdout(contains("Duration:"))
        .stdout(contains("Kotlin compilation errors").not());

    let args = std::fs::read_to_string(project.path().join("args.txt"))?;
    assert_eq!(args.trim(), "build --info");
    Ok(())
}

#[cfg(unix)]
#[test]
fn failed_build_summarises_and_writes_report() -> Result<(), Box<dyn std::error::Error>> {
    let project = create_fake_gradle_project(
        "failed_project",
        "> Task :app:compileKotlin FAILED",
        COMPILE_ERRORS,
        1,
    )?;

    gradle_pretty(&project)
        .env("GRADLE_PRETTY_REPORT", "always")
        .arg("assemble")
        .assert()
        .code(1)
        .stdout(contains("❯ Task: app:compileKotlin FAILED"))
        .stdout(contains("✖ BUILD FAILED"))
        .stdout(contains("⚠ Kotlin compilation errors:"))
        .stdout(contains("📂 file://~/src/main/kotlin/Main.kt"))
        .stdout(contains("→ L4:22 Type mismatch"))
        .stdout(contains("✖ Failed"))
        .stdout(contains("Report saved to"));

    let report = std::fs::read_to_string(project.report_path())?;
    assert!(report.starts_with("Gradle Kotlin Compilation Errors Report - "));
    assert!(report.contains("📄 file://~/src/main/kotlin/Main.kt"));
    assert!(report.contains("  → Line 4:22: Type mismatch: inferred type is String but Int was expected"));
    assert!(report.contains("  → Line 4:9: Variable 'count' is never used"));
    assert_eq!(report.matches("⚠ Context around line 4:").count(), 1);
    assert!(report.contains(">>    4 |     val count: Int = \"three\""));
    assert!(report.contains("📄 file:///does/not/exist/Gone.kt"));
    assert_eq!(report.matches("[Could not read file:").count(), 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn interleaved_stdout_and_stderr_keep_their_order() -> Result<(), Box<dyn std::error::Error>> {
    let body: String = (1..=8)
        .map(|n| format!("echo '> Task :t{n}'\necho 'e: stderr-{n}' >&2\n"))
        .collect();
    let project = create_scripted_gradle_project("interleaved", &body, 0)?;

    let output = gradle_pretty(&project)
        .arg("build")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output)?;

    let mut last = 0;
    for n in 1..=8 {
        for needle in [format!("❯ Task: t{n} OK"), format!("stderr-{n}")] {
            let at = stdout
                .find(&needle)
                .unwrap_or_else(|| panic!("{needle:?} missing from:\n{stdout}"));
            assert!(at > last, "{needle:?} printed out of order:\n{stdout}");
            last = at;
        }
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn piped_stdin_declines_the_report() -> Result<(), Box<dyn std::error::Error>> {
    let project = create_fake_gradle_project("piped_project", "", COMPILE_ERRORS, 1)?;

    gradle_pretty(&project)
        .arg("build")
        .assert()
        .code(1)
        .stdout(contains("Non-interactive mode detected"))
        .stdout(contains("Report saved to").not());

    assert!(!project.report_path().exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn exit_code_is_propagated() -> Result<(), Box<dyn std::error::Error>> {
    let project = create_fake_gradle_project(
        "exit_code",
        "e: java.lang.OutOfMemoryError: Java heap space\nBUILD FAILED in 9s",
        "",
        7,
    )?;

    gradle_pretty(&project)
        .arg("build")
        .assert()
        .code(7)
        .stdout(contains("java.lang.OutOfMemoryError: Java heap space"))
        .stdout(contains("✖ Failed"))
        // no compiler errors, so nothing to ask about
        .stdout(contains("Non-interactive mode detected").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn unknown_wrapper_fails_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let project = TestProject::new("no_wrapper")?;
    gradle_pretty(&project)
        .env("GRADLE_PRETTY_WRAPPER", project.path().join("missing-gradlew"))
        .arg("build")
        .assert()
        .code(1)
        .stderr(contains("failed to start"));
    Ok(())
}
