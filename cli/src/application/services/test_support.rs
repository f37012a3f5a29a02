//! Shared test doubles for application service tests.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing_subscriber::fmt::MakeWriter;

use crate::application::ports::{CommandRunner, EventLog, LocalFs, PackageManager, StatusStore};
use crate::domain::UnitStatus;

/// Build an `ExitStatus` from a logical exit code.
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn fail_output() -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

// ── Command runner ────────────────────────────────────────────────────────────

/// Records every command line and answers with `respond(command_line)`.
pub struct RecordingRunner<F> {
    respond: F,
    calls: Mutex<Vec<String>>,
    envs: Mutex<Vec<Option<HashMap<String, String>>>>,
}

impl<F> RecordingRunner<F>
where
    F: Fn(&str) -> Result<Output>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Mutex::new(Vec::new()),
            envs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn envs(&self) -> Vec<Option<HashMap<String, String>>> {
        self.envs.lock().expect("lock").clone()
    }

    fn record(&self, program: &str, args: &[&str], env: Option<&HashMap<String, String>>) -> Result<Output> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("lock").push(line.clone());
        self.envs.lock().expect("lock").push(env.cloned());
        (self.respond)(&line)
    }
}

impl<F> CommandRunner for RecordingRunner<F>
where
    F: Fn(&str) -> Result<Output>,
{
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.record(program, args, None)
    }

    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &HashMap<String, String>,
    ) -> Result<Output> {
        self.record(program, args, Some(env))
    }
}

// ── Filesystem ────────────────────────────────────────────────────────────────

/// In-memory filesystem. Writes fail when `read_only` is set.
#[derive(Default)]
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    pub read_only: bool,
}

impl MemoryFs {
    pub fn read_only() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            read_only: true,
        }
    }

    pub fn with_file(self, path: &Path, content: &[u8]) -> Self {
        self.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), content.to_vec());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().expect("lock").get(path).cloned()
    }

    pub fn text(&self, path: &Path) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl LocalFs for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().expect("lock").contains_key(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self
            .contents(path)
            .ok_or_else(|| anyhow::anyhow!("reading file {}: not found", path.display()))?;
        String::from_utf8(bytes)
            .map_err(|e| anyhow::anyhow!("reading file {}: {e}", path.display()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        anyhow::ensure!(!self.read_only, "writing file {}: read-only", path.display());
        self.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        anyhow::ensure!(!self.read_only, "removing file {}: read-only", path.display());
        self.files.lock().expect("lock").remove(path);
        Ok(())
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

/// In-memory status store that keeps every status set.
#[derive(Default)]
pub struct MemoryStatus {
    history: Mutex<Vec<UnitStatus>>,
}

impl MemoryStatus {
    pub fn starting_with(status: UnitStatus) -> Self {
        Self {
            history: Mutex::new(vec![status]),
        }
    }

    pub fn history(&self) -> Vec<UnitStatus> {
        self.history.lock().expect("lock").clone()
    }

    pub fn last(&self) -> Option<UnitStatus> {
        self.history.lock().expect("lock").last().cloned()
    }
}

impl StatusStore for MemoryStatus {
    async fn current(&self) -> Result<Option<UnitStatus>> {
        Ok(self.last())
    }

    async fn set(&self, status: &UnitStatus) -> Result<()> {
        self.history.lock().expect("lock").push(status.clone());
        Ok(())
    }
}

// ── Packages ──────────────────────────────────────────────────────────────────

/// Fake package manager tracking one package's installed version.
#[derive(Default)]
pub struct FakePackages {
    pub installed: Mutex<Option<String>>,
    pub fail_install: bool,
    pub fail_upgrade: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakePackages {
    pub fn installed(version: &str) -> Self {
        Self {
            installed: Mutex::new(Some(version.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("lock").push(call);
    }
}

impl PackageManager for FakePackages {
    async fn add_package(&self, name: &str) -> Result<()> {
        self.record(format!("add {name}"));
        anyhow::ensure!(!self.fail_install, "apt-get install {name} failed");
        *self.installed.lock().expect("lock") = Some("1.0".to_string());
        Ok(())
    }

    async fn installed_version(&self, name: &str) -> Result<Option<String>> {
        self.record(format!("query {name}"));
        Ok(self.installed.lock().expect("lock").clone())
    }

    async fn update(&self) -> Result<()> {
        self.record("update".to_string());
        Ok(())
    }

    async fn ensure_latest(&self, name: &str) -> Result<()> {
        self.record(format!("latest {name}"));
        anyhow::ensure!(!self.fail_upgrade, "no candidate for {name}");
        *self.installed.lock().expect("lock") = Some("2.0".to_string());
        Ok(())
    }
}

// ── Event log ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvent {
    pub messages: Mutex<Vec<String>>,
    pub failures: Mutex<Vec<String>>,
}

impl RecordingEvent {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock").clone()
    }

    pub fn failed(&self) -> bool {
        !self.failures.lock().expect("lock").is_empty()
    }
}

impl EventLog for RecordingEvent {
    fn log(&self, message: &str) {
        self.messages.lock().expect("lock").push(message.to_string());
    }

    fn fail(&self, message: &str) {
        self.failures.lock().expect("lock").push(message.to_string());
    }
}

// ── Logs ──────────────────────────────────────────────────────────────────────

/// Shared buffer collecting formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with every warning or error logged meanwhile.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().expect("lock")).into_owned();
    (result, logs)
}
