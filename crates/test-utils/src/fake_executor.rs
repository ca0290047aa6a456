use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use highway::errors::Result;
use highway::exec::{Executor, Task, TaskOutcome};

/// What a `FakeExecutor` saw for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedTask {
    pub executable: PathBuf,
    pub arguments: Vec<String>,
    pub current_dir: PathBuf,
}

/// A fake executor that:
/// - records which tasks were "run"
/// - finishes each task with the next scripted response, or
///   `Success` with empty stdout once the script is exhausted.
///
/// Tasks still go through `begin` / `finish`, so running one twice fails
/// exactly like it does with the real executor.
pub struct FakeExecutor {
    responses: Mutex<VecDeque<(TaskOutcome, Vec<u8>)>>,
    executed: Arc<Mutex<Vec<ExecutedTask>>>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<ExecutedTask>>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            executed,
        }
    }

    pub fn respond(self, outcome: TaskOutcome, stdout: impl Into<Vec<u8>>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((outcome, stdout.into()));
        self
    }
}

impl Executor for FakeExecutor {
    fn execute(&self, task: &mut Task) -> Result<()> {
        task.begin()?;

        {
            let mut guard = self.executed.lock().unwrap();
            guard.push(ExecutedTask {
                executable: task.executable().to_path_buf(),
                arguments: task.arguments().to_vec(),
                current_dir: task.current_dir().to_path_buf(),
            });
        }

        let (outcome, stdout) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((TaskOutcome::Success, Vec::new()));

        task.finish(outcome, stdout)
    }
}
