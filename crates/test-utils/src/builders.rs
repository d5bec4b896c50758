#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pipevim::exec::ProcessBackend;
use pipevim::fs::mock::MockFileSystem;
use pipevim::pipe::Orchestrator;
use pipevim::resolve::SearchPath;

/// Builder for an `Orchestrator` over a mock `PATH`.
pub struct OrchestratorBuilder {
    fs: MockFileSystem,
    dirs: Vec<PathBuf>,
    timeout: Option<Duration>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
            dirs: vec![PathBuf::from("/usr/bin")],
            timeout: None,
        }
    }

    /// Put an executable named `name` in `/usr/bin`.
    pub fn with_command(self, name: &str) -> Self {
        self.fs.add_executable(PathBuf::from("/usr/bin").join(name));
        self
    }

    pub fn with_executable_at(self, path: &str) -> Self {
        self.fs.add_executable(path);
        self
    }

    pub fn with_search_dir(mut self, dir: &str) -> Self {
        self.dirs.push(PathBuf::from(dir));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build<B: ProcessBackend>(self, backend: B) -> Orchestrator<B> {
        Orchestrator::new(backend)
            .with_filesystem(Arc::new(self.fs))
            .with_search_path(SearchPath::new(self.dirs, "/home/test"))
            .with_timeout(self.timeout)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
