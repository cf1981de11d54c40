//! Tool availability probing.

use tracing::{debug, warn};

use crate::command::ToolRunner;

/// Check whether an external tool is installed and invocable.
///
/// Availability is defined as the version subprocess exiting with code 0.
/// The result is computed fresh for every pipeline invocation and never
/// cached across requests.
pub async fn probe_tool(runner: &ToolRunner, program: &str, version_arg: &str) -> bool {
    match runner.run(program, &[version_arg.to_string()]).await {
        Ok(output) if output.success() => {
            debug!("{} is available", program);
            true
        }
        Ok(output) => {
            warn!(
                "{} version probe exited with {:?}, treating as unavailable",
                program, output.exit_code
            );
            false
        }
        Err(e) => {
            warn!("{} is not available: {}", program, e);
            false
        }
    }
}
