// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The channel owning one child interpreter process and its three standard streams.
//!
//! ```text
//! execute(text) ──▶ input queue ──▶ writer task ──▶ child stdin
//!
//! child stdout ──▶ reader task ──▶ LineBuffer ──▶ on_stdout sink
//! child stderr ──▶ reader task ──▶ LineBuffer ──▶ on_stderr sink
//! ```
//!
//! There is intentionally **no correlation** between an [`ReplChannel::execute`] call
//! and subsequent sink invocations: the interpreter may emit zero, one, or many
//! flushed chunks per submitted statement, and chunks for concurrently issued
//! statements interleave in whatever order the process writes them. The channel
//! guarantees only FIFO byte ordering per stream relative to the process's own write
//! order. Pipelining discipline (wait for a result before issuing the next
//! statement) is the caller's responsibility.
//!
//! Lifecycle is one-way: `Running → Terminated` (process exit, crash, or explicit
//! [`ReplChannel::terminate`]), with no transition back. The `NotStarted` state is
//! simply the absence of a handle; [`ReplChannel::start`] is the constructor.

use std::sync::{Arc,
                atomic::{AtomicBool, Ordering}};

use miette::IntoDiagnostic;
use tokio::{io::{AsyncReadExt, AsyncWriteExt},
            process::{Child, ChildStdin},
            sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
            task::JoinHandle};

use crate::{LineBuffer, ReplCommandBuilder};

/// Buffer size for reading interpreter output (4KB stack allocation).
pub const READ_BUFFER_SIZE: usize = 4096;

/// Caller-supplied callback invoked once per [`LineBuffer`] flush with the decoded
/// text. One sink per stream (stdout, stderr); the channel holds only the sinks it
/// was given, never a back-reference to its owner.
pub type OutputSink = Box<dyn Fn(String) + Send + Sync + 'static>;

/// Input event types that can be sent to the interpreter through the channel.
#[derive(Debug)]
pub enum ReplInputEvent {
    /// Send raw bytes to the interpreter's stdin.
    Write(Vec<u8>),
    /// Close stdin (EOF) and stop the writer task.
    Close,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    /// The interpreter process has exited (or the channel was terminated); the input
    /// stream is no longer accepting statements. Deterministic: once observed, every
    /// later `execute` fails the same way.
    #[error("REPL channel is terminated; the interpreter is no longer accepting input")]
    ChannelClosed,
}

/// Handle bound to the lifetime of one interpreter subprocess.
///
/// Dropping the handle terminates the channel (and the process). Multiple
/// independent channels may coexist, eg: under test.
#[derive(Debug)]
pub struct ReplChannel {
    input_event_sender_half: UnboundedSender<ReplInputEvent>,
    terminated: Arc<AtomicBool>,
    reader_task_handles: Vec<JoinHandle<()>>,
    writer_task_handle: JoinHandle<()>,
    child: Option<Child>,
}

impl ReplChannel {
    /// Spawn the interpreter with all three standard streams piped, and start the
    /// per-stream reader tasks plus the input writer task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Fails construction outright when the interpreter is missing or cannot be
    /// launched. No partially usable handle is ever returned.
    pub fn start(
        command_builder: ReplCommandBuilder,
        on_stdout: OutputSink,
        on_stderr: OutputSink,
    ) -> miette::Result<ReplChannel> {
        let mut command = command_builder.build()?;
        let mut child = command.spawn().into_diagnostic()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| miette::miette!("Failed to open stdin on interpreter"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| miette::miette!("Failed to open stdout on interpreter"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| miette::miette!("Failed to open stderr on interpreter"))?;

        tracing::debug!("Spawned interpreter process, pid: {:?}", child.id());

        let terminated = Arc::new(AtomicBool::new(false));
        let (input_event_sender_half, input_event_receiver_half) = unbounded_channel();

        let reader_task_handles = vec![
            spawn_stream_reader_task(stdout, on_stdout, terminated.clone(), "stdout"),
            spawn_stream_reader_task(stderr, on_stderr, terminated.clone(), "stderr"),
        ];
        let writer_task_handle =
            spawn_input_writer_task(stdin, input_event_receiver_half, terminated.clone());

        Ok(ReplChannel {
            input_event_sender_half,
            terminated,
            reader_task_handles,
            writer_task_handle,
            child: Some(child),
        })
    }

    /// Enqueue `text` for the interpreter's input stream and return immediately.
    ///
    /// Never waits for (and is never paired with) a response. The pipe write
    /// itself happens on the writer task; it may transiently block at the OS level
    /// if the pipe buffer is full, which is an accepted risk for typical statement
    /// sizes.
    ///
    /// # Errors
    /// Returns [`ReplError::ChannelClosed`] once the channel is terminated. There
    /// are no retries anywhere in this channel: a failed `execute` is re-issued by
    /// the user, not by the system.
    pub fn execute(&self, text: &str) -> Result<(), ReplError> {
        if self.is_terminated() {
            return Err(ReplError::ChannelClosed);
        }
        self.input_event_sender_half
            .send(ReplInputEvent::Write(text.as_bytes().to_vec()))
            .map_err(|_| ReplError::ChannelClosed)
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool { self.terminated.load(Ordering::SeqCst) }

    /// Tear the channel down: stop delivery, close the input stream, kill the
    /// process. Safe to invoke in any state, any number of times. Any
    /// buffered-but-unflushed output is discarded without delivering a partial
    /// line, and no sink fires after this call.
    pub fn terminate(&mut self) {
        let was_terminated = self.terminated.swap(true, Ordering::SeqCst);

        // Readers stop first so the sinks go quiet before the process dies.
        for handle in &self.reader_task_handles {
            handle.abort();
        }
        let _unused = self.input_event_sender_half.send(ReplInputEvent::Close);
        self.writer_task_handle.abort();

        if let Some(mut child) = self.child.take() {
            if let Err(error) = child.start_kill() {
                tracing::warn!("Failed to kill interpreter process: {}", error);
            }
        }

        if !was_terminated {
            tracing::debug!("REPL channel terminated");
        }
    }
}

impl Drop for ReplChannel {
    fn drop(&mut self) { self.terminate(); }
}

/// Spawn a reader task that services one output stream.
///
/// `read().await` is the event-driven "data became available" wait: the task parks
/// on the runtime's reactor until the pipe is readable, processes the readiness
/// notification to completion (append + possible flush to the sink), then re-arms
/// immediately by looping back into `read()`. One task per stream means a stream's
/// line buffer is never touched concurrently by two notifications, while the two
/// streams are serviced independently of one another.
fn spawn_stream_reader_task(
    mut stream: impl tokio::io::AsyncRead + Unpin + Send + 'static,
    sink: OutputSink,
    terminated: Arc<AtomicBool>,
    stream_name: &'static str,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut line_buffer = LineBuffer::new();
        let mut read_buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            match stream.read(&mut read_buffer).await {
                // EOF or read error - the process exited or crashed.
                Ok(0) | Err(_) => {
                    tracing::debug!("Interpreter {} closed", stream_name);
                    terminated.store(true, Ordering::SeqCst);
                    break;
                }
                Ok(n) => {
                    if let Some(text) = line_buffer.append(&read_buffer[..n]) {
                        sink(text);
                    }
                }
            }
        }
    })
}

/// Spawn the writer task that owns the interpreter's stdin and drains the input
/// queue. A write failure means the process is gone: the channel flips to
/// terminated and the task stops. Dropping stdin on exit delivers EOF to the child.
fn spawn_input_writer_task(
    mut stdin: ChildStdin,
    mut input_event_receiver_half: UnboundedReceiver<ReplInputEvent>,
    terminated: Arc<AtomicBool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(input_event) = input_event_receiver_half.recv().await {
            match input_event {
                ReplInputEvent::Write(bytes) => {
                    if let Err(error) = stdin.write_all(&bytes).await {
                        tracing::warn!("Failed to write to interpreter: {}", error);
                        terminated.store(true, Ordering::SeqCst);
                        break;
                    }
                    if let Err(error) = stdin.flush().await {
                        tracing::warn!("Failed to flush interpreter stdin: {}", error);
                        terminated.store(true, Ordering::SeqCst);
                        break;
                    }
                }
                ReplInputEvent::Close => break,
            }
        }
    })
}
