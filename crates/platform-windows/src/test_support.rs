use std::cell::RefCell;

use crate::shell::{PowerShell, QueryError};

enum Reply {
    Output(String),
    Fail(String),
}

/// Scripted [`PowerShell`] fake: the first rule whose needle occurs in the
/// script decides the reply. Unmatched scripts produce no output.
#[derive(Default)]
pub(crate) struct ScriptedShell {
    rules: Vec<(String, Reply)>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedShell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, needle: &str, output: &str) -> Self {
        self.rules
            .push((needle.to_string(), Reply::Output(output.to_string())));
        self
    }

    pub(crate) fn fail(mut self, needle: &str, stderr: &str) -> Self {
        self.rules
            .push((needle.to_string(), Reply::Fail(stderr.to_string())));
        self
    }

    pub(crate) fn calls_matching(&self, needle: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|script| script.contains(needle))
            .count()
    }
}

impl PowerShell for ScriptedShell {
    fn run(&self, script: &str) -> Result<String, QueryError> {
        self.calls.borrow_mut().push(script.to_string());
        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| script.contains(needle.as_str()))
            .map(|(_, reply)| reply);
        match reply {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::Fail(stderr)) => Err(QueryError::Exit {
                status: "exit code: 1".to_string(),
                stderr: stderr.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}
