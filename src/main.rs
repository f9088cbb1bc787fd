//! # gradle-pretty
//!
//! Runs `./gradlew` with the given arguments, shows task status and build
//! banners as they happen, and lists Kotlin compile errors per file once the
//! build ends. After a failed build it can write those errors, with source
//! context, to `build/reports/gradle_errors/gradle_errors_report.txt`.
//!
//! ```sh
//! gradle-pretty :app:assembleDebug
//! ```

use clap::Parser;
use gradle_pretty::e_cli::USAGE;
use gradle_pretty::e_prompts::TerminalConfirm;
use gradle_pretty::e_render::renderer_for;
use gradle_pretty::prelude::*;
use gradle_pretty::{Cli, Settings};

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = match Cli::try_parse_from(env::args()) {
        Ok(cli) => cli,
        Err(e) => {
            debug!("argument error: {}", e);
            eprintln!("{}", USAGE);
            exit(1);
        }
    };

    let settings = Settings::from_env();
    if let Err(e) = gradle_pretty::e_runner::register_ctrlc_handler() {
        debug!("{:#}", e);
    }

    let renderer = renderer_for(settings.color);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = gradle_pretty::e_runner::run_build(
        &settings,
        &cli.gradle_args,
        renderer.as_ref(),
        &TerminalConfirm,
        &mut out,
    );
    let _ = io::Write::flush(&mut out);
    drop(out);
    match result {
        Ok(code) => exit(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    }
}
