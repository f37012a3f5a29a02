//! Process invocation gateway.
//!
//! Every external command the charm runs goes through [`execute`], which
//! applies the success heuristic in [`ProcessResult::classify`].

use std::collections::HashMap;

use crate::application::ports::CommandRunner;
use crate::domain::process::{ProcessResult, combine_output};

/// Run `argv` and classify the outcome.
///
/// `env`, when given, replaces the child's environment. With
/// `suppress_error_logging` a failed command is logged at debug level only;
/// used for probes whose negative answer is expected. Spawn failures are
/// always logged as errors.
pub async fn execute(
    runner: &impl CommandRunner,
    argv: &[&str],
    env: Option<&HashMap<String, String>>,
    suppress_error_logging: bool,
) -> ProcessResult {
    let command = argv.join(" ");
    let Some((program, args)) = argv.split_first() else {
        tracing::error!("refusing to run an empty command");
        return ProcessResult::spawn_failed("empty command".to_string());
    };
    tracing::info!(%command, "running command");

    let output = match env {
        Some(env) => runner.run_with_env(program, args, env).await,
        None => runner.run(program, args).await,
    };
    let output = match output {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(%command, error = %format!("{e:#}"), "failed to start command");
            return ProcessResult::spawn_failed(format!("{e:#}"));
        }
    };

    let result = ProcessResult::classify(
        output.status.success(),
        output.status.code(),
        combine_output(&output.stdout, &output.stderr),
    );
    let text = result.output.trim_end();
    if result.success {
        tracing::info!(%command, output = %text, "command succeeded");
    } else if suppress_error_logging {
        tracing::debug!(%command, exit_code = ?result.exit_code, output = %text, "command reported failure");
    } else {
        tracing::error!(%command, exit_code = ?result.exit_code, output = %text, "command failed");
    }
    result
}

/// Run `argv` and return `true` only if it succeeded.
pub async fn run_external_command(
    runner: &impl CommandRunner,
    argv: &[&str],
    env: Option<&HashMap<String, String>>,
    suppress_error_logging: bool,
) -> bool {
    execute(runner, argv, env, suppress_error_logging)
        .await
        .success
}
