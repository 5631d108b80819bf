#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::AsyncRead;

use ydl_core::api::{
    EventSink, LaunchSpec, ProcessEvent, ProcessLauncher, ProcessSession, SinkControl,
};

/// Replays canned stdout/stderr bytes instead of spawning anything.
#[derive(Default)]
pub struct MockLauncher {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
    pub fail_spawn: bool,
    pub supervised: Mutex<Vec<LaunchSpec>>,
    pub detached: Mutex<Vec<LaunchSpec>>,
}

impl MockLauncher {
    pub fn with_stdout(stdout: &str) -> Arc<Self> {
        Arc::new(Self {
            stdout: stdout.as_bytes().to_vec(),
            ..Self::default()
        })
    }

    pub fn with_output(stdout: &str, stderr: &str, exit_code: i32) -> Arc<Self> {
        Arc::new(Self {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            exit_code,
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_spawn: true,
            ..Self::default()
        })
    }

    pub fn spawn_count(&self) -> usize {
        self.supervised.lock().unwrap().len() + self.detached.lock().unwrap().len()
    }
}

#[async_trait]
impl ProcessLauncher for MockLauncher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn spawn_supervised(&self, spec: &LaunchSpec) -> anyhow::Result<Box<dyn ProcessSession>> {
        if self.fail_spawn {
            anyhow::bail!("No such file or directory (os error 2)");
        }
        self.supervised.lock().unwrap().push(spec.clone());
        Ok(Box::new(MockSession {
            stdout: Some(self.stdout.clone()),
            stderr: Some(self.stderr.clone()),
            exit_code: self.exit_code,
        }))
    }

    async fn spawn_detached(&self, spec: &LaunchSpec) -> anyhow::Result<()> {
        if self.fail_spawn {
            anyhow::bail!("No such file or directory (os error 2)");
        }
        self.detached.lock().unwrap().push(spec.clone());
        Ok(())
    }
}

struct MockSession {
    stdout: Option<Vec<u8>>,
    stderr: Option<Vec<u8>>,
    exit_code: i32,
}

#[async_trait]
impl ProcessSession for MockSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.stdout
            .take()
            .map(|b| Box::new(std::io::Cursor::new(b)) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.stderr
            .take()
            .map(|b| Box::new(std::io::Cursor::new(b)) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn wait(&mut self) -> anyhow::Result<i32> {
        Ok(self.exit_code)
    }
}

/// Records every event; optionally asks to stop after the n-th data line.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<ProcessEvent>>,
    pub stop_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stopping_after(n: usize) -> Arc<Self> {
        Arc::new(Self {
            stop_after: Some(n),
            ..Self::default()
        })
    }

    pub fn events(&self) -> Vec<ProcessEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn data_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProcessEvent::DataReceived(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProcessEvent::Error(l) => Some(l),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&self, event: ProcessEvent) -> SinkControl {
        let mut events = self.events.lock().unwrap();
        let is_data = matches!(event, ProcessEvent::DataReceived(_));
        events.push(event);

        let seen = events
            .iter()
            .filter(|e| matches!(e, ProcessEvent::DataReceived(_)))
            .count();
        match self.stop_after {
            Some(n) if is_data && seen >= n => SinkControl::Stop,
            _ => SinkControl::Continue,
        }
    }
}
