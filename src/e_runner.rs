use crate::e_config::{ReportMode, Settings};
use crate::e_fmt::format_duration_secs;
use crate::e_prompts::Confirm;
use crate::e_render::Renderer;
use crate::prelude::*;
use crate::{Analysis, Block, BuildAnalyzer, ReportFormatter, ReportWriter, StyleTag};
use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use std::io::{BufRead, BufReader, Read, Write};
use std::thread::{self, JoinHandle};
use which::which;

pub const REPORT_QUESTION: &str = "Generate an error report with source context?";

// Global shared container for the currently running build process.
pub static GLOBAL_CHILD: Lazy<Arc<Mutex<Option<Child>>>> = Lazy::new(|| Arc::new(Mutex::new(None)));

/// Registers a global Ctrl+C handler once.
/// The handler kills the running build if there is one.
pub fn register_ctrlc_handler() -> Result<()> {
    ctrlc::set_handler(move || {
        let mut child_lock = match GLOBAL_CHILD.lock() {
            Ok(lock) => lock,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(child) = child_lock.as_mut() {
            eprintln!("Ctrl+C pressed, terminating Gradle...");
            let _ = child.kill();
        } else {
            eprintln!("Ctrl+C pressed, no build running. Exiting.");
            exit(130);
        }
    })
    .context("failed to install Ctrl+C handler")
}

/// Finds the command to run: the configured wrapper, `./gradlew`, or `gradle` on `PATH`.
pub fn resolve_wrapper(settings: &Settings, cwd: &Path) -> Result<PathBuf> {
    if let Some(wrapper) = &settings.wrapper {
        log::debug!("using configured wrapper {}", wrapper.display());
        return Ok(wrapper.clone());
    }
    let local = cwd.join(if cfg!(windows) { "gradlew.bat" } else { "gradlew" });
    if local.is_file() {
        log::debug!("using project wrapper {}", local.display());
        return Ok(local);
    }
    match which("gradle") {
        Ok(gradle) => {
            log::debug!("no wrapper in {}, falling back to {}", cwd.display(), gradle.display());
            Ok(gradle)
        }
        Err(e) => bail!(
            "no Gradle wrapper in {} and `gradle` is not on PATH ({})",
            cwd.display(),
            e
        ),
    }
}

/// Runs the build, streams its output through the analyzer and returns the exit code to propagate.
pub fn run_build(
    settings: &Settings,
    gradle_args: &[String],
    renderer: &dyn Renderer,
    confirm: &dyn Confirm,
    out: &mut dyn Write,
) -> Result<i32> {
    let cwd = env::current_dir().context("cannot determine working directory")?;
    let wrapper = resolve_wrapper(settings, &cwd)?;

    renderer.emit(
        out,
        &Block::new(
            StyleTag::Info,
            format!("▶ Running: {} {}\n", wrapper.display(), gradle_args.join(" ")),
        ),
    )?;

    let start = Instant::now();
    let (lines, reader) = spawn_build(&wrapper, gradle_args, &cwd)?;

    let mut analyzer = BuildAnalyzer::new(ReportFormatter::new());
    for line in lines {
        let blocks = analyzer.feed(&line);
        renderer.emit_all(out, &blocks)?;
        out.flush()?;
    }
    if reader.join().is_err() {
        log::warn!("output reader thread panicked");
    }
    let exit_code = wait_for_build()?;
    let analysis = analyzer.finish();

    renderer.emit_all(out, &analysis.summary)?;
    renderer.emit(
        out,
        &Block::new(
            StyleTag::None,
            format!("\n⏱  Duration: {}", format_duration_secs(start.elapsed())),
        ),
    )?;
    if exit_code == 0 {
        renderer.emit(out, &Block::new(StyleTag::Success, "✔ Done"))?;
    } else {
        renderer.emit(out, &Block::new(StyleTag::Failure, "✖ Failed"))?;
        finish_failed_build(&analysis, settings, renderer, confirm, out)?;
    }
    Ok(exit_code)
}

/// Offers (or skips) the error report after a failed build.
///
/// A failing report write is shown to the user but does not change the build's exit code.
pub fn finish_failed_build(
    analysis: &Analysis,
    settings: &Settings,
    renderer: &dyn Renderer,
    confirm: &dyn Confirm,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    if !analysis.has_compiler_errors() {
        return Ok(None);
    }
    out.flush()?;
    let wanted = match settings.report_mode {
        ReportMode::Always => true,
        ReportMode::Never => false,
        ReportMode::Ask => confirm.confirm(REPORT_QUESTION),
    };
    if !wanted {
        log::debug!("report declined");
        return Ok(None);
    }

    let writer = ReportWriter::new().with_context_radius(settings.context_radius);
    match writer.write(&analysis.groups, &settings.report_path()) {
        Ok(path) => {
            renderer.emit(
                out,
                &Block::new(
                    StyleTag::Success,
                    format!("\n📁 Report saved to {}", path.display()),
                ),
            )?;
            Ok(Some(path))
        }
        Err(e) => {
            log::error!("report write failed: {:#}", e);
            renderer.emit(
                out,
                &Block::new(StyleTag::Failure, format!("✖ Could not write report: {:#}", e)),
            )?;
            Ok(None)
        }
    }
}

/// Starts the build with stdout and stderr sharing one pipe, so lines reach
/// the analyzer in the order the build wrote them. The receiver ends when the
/// build closes its output.
fn spawn_build(
    wrapper: &Path,
    gradle_args: &[String],
    cwd: &Path,
) -> Result<(mpsc::Receiver<String>, JoinHandle<()>)> {
    let (output, writer) = io::pipe().context("failed to create output pipe")?;
    let writer_err = writer
        .try_clone()
        .context("failed to duplicate output pipe")?;
    // The Command holds the write ends; dropping it after spawn lets the
    // reader see end of file once the build exits.
    let child = Command::new(wrapper)
        .args(gradle_args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(writer)
        .stderr(writer_err)
        .spawn()
        .with_context(|| format!("failed to start {}", wrapper.display()))?;
    log::debug!("started {} (pid {})", wrapper.display(), child.id());

    let (tx, rx) = mpsc::channel();
    let reader = forward_lines(output, tx);

    *GLOBAL_CHILD
        .lock()
        .map_err(|_| anyhow!("child process lock poisoned"))? = Some(child);
    Ok((rx, reader))
}

/// Sends every line of `reader` (newline stripped, invalid UTF-8 replaced) to `tx`.
fn forward_lines<R: Read + Send + 'static>(reader: R, tx: mpsc::Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("error reading build output: {}", e);
                    break;
                }
            }
        }
    })
}

/// Waits for the build stored in [`GLOBAL_CHILD`]. A build without an exit code (killed by a signal) maps to 1.
fn wait_for_build() -> Result<i32> {
    let child = GLOBAL_CHILD
        .lock()
        .map_err(|_| anyhow!("child process lock poisoned"))?
        .take();
    let Some(mut child) = child else {
        bail!("no build process to wait for");
    };
    let status = child.wait().context("failed to wait for Gradle")?;
    log::debug!("build exited with {:?}", status);
    Ok(status.code().unwrap_or(1))
}
