//! In-memory collaborators for orchestration tests

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use ps_core::{
    InteractiveExit, LocalMultiplexer, RemoteOutput, RemoteTarget, RemoteTransport, TransportError,
};
use ps_protocol::marker::{DIR_READY, HELPER_ABSENT, HELPER_PRESENT, LIST_DONE, SESSION_ENTRY};
use ps_protocol::os::OS_DETECT_COMMAND;

/// Canned answer for a captured command
#[derive(Debug, Clone)]
pub enum Reply {
    Output { status: i32, stdout: String },
    Unreachable,
}

impl Reply {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Reply::Output {
            status: 0,
            stdout: stdout.into(),
        }
    }
}

/// Canned answer for an interactive command
#[derive(Debug, Clone, Copy)]
pub enum InteractiveReply {
    Exit(i32),
    Interrupted,
    Unreachable,
}

/// A remote command the transport was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Probe,
    DetectOs,
    List,
    OtherCaptured(String),
    Install(String),
    Connect(String),
}

/// Transport answering from canned replies and recording every call
pub struct MockTransport {
    pub probe: Reply,
    pub os: Reply,
    pub list: Reply,
    pub install: InteractiveReply,
    pub connect: InteractiveReply,
    pub calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    /// Healthy Ubuntu host with the helper installed
    pub fn new() -> Self {
        Self {
            probe: Reply::ok(format!("{}\n{}\n", HELPER_PRESENT, DIR_READY)),
            os: Reply::ok("NAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n"),
            list: Reply::ok(format!("{}\n", LIST_DONE)),
            install: InteractiveReply::Exit(0),
            connect: InteractiveReply::Exit(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Host where the probe reports the helper missing
    pub fn without_helper() -> Self {
        Self {
            probe: Reply::ok(format!("{}\n{}\n", HELPER_ABSENT, DIR_READY)),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn connect_scripts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Connect(script) => Some(script),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unreachable(target: &RemoteTarget) -> TransportError {
    TransportError::Unreachable {
        target: target.to_string(),
        message: "Connection refused".to_string(),
    }
}

#[async_trait]
impl RemoteTransport for MockTransport {
    async fn run_captured(
        &self,
        target: &RemoteTarget,
        script: &str,
    ) -> Result<RemoteOutput, TransportError> {
        let (call, reply) = if script == OS_DETECT_COMMAND {
            (Call::DetectOs, &self.os)
        } else if script.contains(HELPER_PRESENT) {
            (Call::Probe, &self.probe)
        } else if script.contains(SESSION_ENTRY) {
            (Call::List, &self.list)
        } else {
            self.record(Call::OtherCaptured(script.to_string()));
            return Ok(RemoteOutput::default());
        };
        self.record(call);

        match reply {
            Reply::Output { status, stdout } => Ok(RemoteOutput {
                status: Some(*status),
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Reply::Unreachable => Err(unreachable(target)),
        }
    }

    async fn run_interactive(
        &self,
        target: &RemoteTarget,
        script: &str,
    ) -> Result<InteractiveExit, TransportError> {
        let reply = if script.contains("dtach -A") {
            self.record(Call::Connect(script.to_string()));
            self.connect
        } else {
            self.record(Call::Install(script.to_string()));
            self.install
        };

        match reply {
            InteractiveReply::Exit(code) => Ok(InteractiveExit::Exited(Some(code))),
            InteractiveReply::Interrupted => Ok(InteractiveExit::Interrupted),
            InteractiveReply::Unreachable => Err(unreachable(target)),
        }
    }
}

/// tmux stand-in returning a fixed window name
pub struct FakeTmux(pub Option<&'static str>);

#[async_trait]
impl LocalMultiplexer for FakeTmux {
    async fn active_window_name(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

/// Listing output for the given session names
pub fn listing_output(names: &[&str]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(&format!("{} {}\n", SESSION_ENTRY, name));
    }
    out.push_str(LIST_DONE);
    out.push('\n');
    out
}
