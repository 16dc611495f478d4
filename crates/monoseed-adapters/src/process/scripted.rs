//! Scripted process runner for tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use monoseed_core::application::ports::{CommandSpec, ProcessOutput, ProcessRunner};

type Handler = Arc<dyn Fn(&CommandSpec) -> ProcessOutput + Send + Sync>;

/// A [`ProcessRunner`] that never spawns anything.
///
/// Every invocation is recorded. Responses come from a handler registered
/// for the program name (`git`, `bun`, ...); unregistered programs exit 0
/// with no output. Clones share handlers and the call log.
#[derive(Clone, Default)]
pub struct ScriptedProcessRunner {
    handlers: Arc<Mutex<HashMap<String, Handler>>>,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl ScriptedProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every invocation of `program` with `handler`.
    pub fn on<F>(self, program: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> ProcessOutput + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(program.into(), Arc::new(handler));
        self
    }

    /// Answer every invocation of `program` with a fixed output.
    pub fn respond(self, program: impl Into<String>, output: ProcessOutput) -> Self {
        self.on(program, move |_| output.clone())
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Command lines run so far, rendered as strings.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl fmt::Debug for ScriptedProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedProcessRunner")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl ProcessRunner for ScriptedProcessRunner {
    fn run(&self, spec: &CommandSpec) -> ProcessOutput {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(spec.clone());

        let handler = self
            .handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&spec.program)
            .cloned();

        match handler {
            Some(handler) => handler(spec),
            None => ProcessOutput::exited(0, "", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_and_uses_handlers() {
        let runner = ScriptedProcessRunner::new()
            .respond("git", ProcessOutput::exited(128, "", "fatal"));

        let git = runner.run(&CommandSpec::new("git").arg("init"));
        let bun = runner.run(&CommandSpec::new("bun").arg("install"));

        assert_eq!(git.exit_code, 128);
        assert!(bun.success());
        assert_eq!(runner.command_lines(), vec!["git init", "bun install"]);
    }
}
