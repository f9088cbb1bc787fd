use clap::Parser;

pub const USAGE: &str = "Usage: gradle-pretty [task...]";

/// Every argument, flags included, is handed to the Gradle wrapper untouched.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "gradle-pretty",
    about = "Run a Gradle build and summarise its Kotlin compile errors.",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "TASK"
    )]
    pub gradle_args: Vec<String>,
}
