//! PTY (console) comms channel — reads lines from stdin, routes them through
//! the assistant, prints the reply to stdout.
//!
//! Implements [`Component`] so the comms subsystem can spawn it as an
//! independent task. All assistant access goes through
//! [`CommsState::send_message`]; console exchanges go to the chat log but
//! not to any session transcript.
//!
//! Runs until `quit` is typed, stdin is closed, or the `shutdown` token is
//! cancelled (Ctrl-C).

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::subsystems::runtime::{Component, ComponentFuture};

use super::state::{CommsEvent, CommsState};

const QUIT_COMMAND: &str = "quit";

// ── PtyChannel ───────────────────────────────────────────────────────────────

pub struct PtyChannel {
    channel_id: String,
    state: Arc<CommsState>,
}

impl PtyChannel {
    pub fn new(channel_id: impl Into<String>, state: Arc<CommsState>) -> Self {
        Self { channel_id: channel_id.into(), state }
    }
}

impl Component for PtyChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(async move {
            println!("─────────────────────────────────────────────");
            println!(" Courtside console  (type 'quit' to exit)");
            println!("─────────────────────────────────────────────");
            let stdin = BufReader::new(tokio::io::stdin());
            let stdout = tokio::io::stdout();
            run_pty(self.channel_id, self.state, stdin, stdout, shutdown).await
        })
    }
}

// ── run_pty ──────────────────────────────────────────────────────────────────

async fn run_pty<R, W>(
    channel_id: String,
    state: Arc<CommsState>,
    input: R,
    mut output: W,
    shutdown: CancellationToken,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(%channel_id, "pty channel started");
    let mut lines = input.lines();

    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                info!("pty channel shutting down");
                break;
            }

            line = lines.next_line() => {
                match line {
                    Err(e) => {
                        warn!("pty read error: {e}");
                        break;
                    }
                    Ok(None) => {
                        info!("pty stdin closed");
                        break;
                    }
                    Ok(Some(input)) => {
                        let input = input.trim().to_string();
                        if input.is_empty() { continue; }
                        if input.eq_ignore_ascii_case(QUIT_COMMAND) {
                            info!("pty quit requested");
                            break;
                        }

                        debug!(input = %input, "pty received line");

                        match state.send_message(&channel_id, None, input).await {
                            Err(e) => {
                                warn!("send_message error: {e}, pty exiting");
                                break;
                            }
                            Ok(reply) => {
                                output.write_all(format!("Bot: {reply}\n").as_bytes()).await?;
                            }
                        }
                    }
                }
            }
        }
    }

    output.flush().await?;
    state.report_event(CommsEvent::ChannelShutdown { channel_id });
    Ok(())
}
