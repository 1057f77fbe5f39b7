// rdeps: Dependency-cache-aware build orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Draining child output.
//!
//! ```text
//! run_child()
//!   stdout task   line --> println!  + trace!(stream = "stdout") + kept
//!   stderr task   line --> eprintln! + trace!(stream = "stderr") + kept
//!   wait()
//!   join tasks --> ProcessOutput { exit_code, stdout, stderr }
//! ```

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::trace;

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::Result;

type LineReader = JoinHandle<Vec<String>>;

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    const fn label(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }

    fn echo(self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Stderr => eprintln!("{line}"),
        }
    }
}

fn drain<R>(stream: Option<R>, kind: Stream, process: &str) -> Option<LineReader>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let stream = stream?;
    let process = process.to_string();
    Some(tokio::spawn(async move {
        let mut kept = Vec::new();
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            kind.echo(&line);
            trace!(process = %process, stream = kind.label(), "{line}");
            kept.push(line);
        }
        kept
    }))
}

async fn join(reader: Option<LineReader>) -> String {
    match reader {
        Some(handle) => handle.await.unwrap_or_default().join("\n"),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Waits for `child` while its piped streams are read to the end.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let stdout = drain(child.stdout.take(), Stream::Stdout, name);
        let stderr = drain(child.stderr.take(), Stream::Stderr, name);

        let status = child.wait().await?;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            join(stdout).await,
            join(stderr).await,
        ))
    }
}
