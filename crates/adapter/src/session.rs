//! Line session - reads requests, talks to the round actor, writes replies.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::config::AdapterConfig;
use crate::core::{Progress, Round};
use crate::protocol::*;
use crate::runtime::{RoundHandle, SubmitError};

/// Per-driver session state
#[derive(Debug)]
pub struct Session {
    handle: RoundHandle,
    last_seq: Option<u64>,
}

impl Session {
    pub fn new(handle: RoundHandle) -> Self {
        Self {
            handle,
            last_seq: None,
        }
    }

    fn check_and_update_seq(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }

    /// Handle one inbound line, returning the reply line (without newline)
    ///
    /// Blank lines get no reply. Fails only when the actor is gone.
    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<Option<String>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let parsed = match parse_message(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                let seq = extract_seq_best_effort(line).unwrap_or(0);
                warn!(seq, error = %e, "malformed message");
                let err = create_error(seq, ErrorCode::InvalidCommand, &e.to_string());
                return Ok(Some(serde_json::to_string(&err)?));
            }
        };

        let seq = match &parsed {
            ParsedMessage::Command(m) => m.seq,
            ParsedMessage::Observe(m) => m.seq,
            ParsedMessage::Unknown(m) => m.seq,
        };

        if let ParsedMessage::Unknown(_) = parsed {
            warn!(seq, "unknown message type");
            let err = create_error(seq, ErrorCode::InvalidCommand, "unknown message type");
            return Ok(Some(serde_json::to_string(&err)?));
        }

        if !self.check_and_update_seq(seq) {
            warn!(seq, last = ?self.last_seq, "out-of-order seq");
            let err = create_error(seq, ErrorCode::InvalidCommand, "seq must increase");
            return Ok(Some(serde_json::to_string(&err)?));
        }

        let reply = match parsed {
            ParsedMessage::Command(msg) => {
                match self.handle.apply(seq, msg.command.into()).await {
                    Ok(Ok(outcome)) => {
                        serde_json::to_string(&create_ack(seq, outcome.ignored, &outcome.events))?
                    }
                    Ok(Err(e)) => {
                        warn!(seq, code = e.code(), "command rejected");
                        serde_json::to_string(&create_error(seq, e.into(), e.message()))?
                    }
                    Err(e) => self.submit_failed(seq, e)?,
                }
            }
            ParsedMessage::Observe(_) => match self.handle.observe().await {
                Ok(snapshot) => serde_json::to_string(&build_observation(&snapshot, seq))?,
                Err(e) => self.submit_failed(seq, e)?,
            },
            ParsedMessage::Unknown(_) => return Ok(None),
        };
        Ok(Some(reply))
    }

    fn submit_failed(&self, seq: u64, err: SubmitError) -> anyhow::Result<String> {
        match err {
            SubmitError::Backpressure => {
                warn!(seq, "inbox full");
                let err = create_error(seq, ErrorCode::Backpressure, "too many pending commands");
                Ok(serde_json::to_string(&err)?)
            }
            SubmitError::Closed => anyhow::bail!("round actor stopped"),
        }
    }
}

/// Drive `session` until `reader` reaches EOF
pub async fn run_session<Rd, Wr>(
    mut reader: Rd,
    mut writer: Wr,
    session: &mut Session,
) -> anyhow::Result<()>
where
    Rd: AsyncBufRead + Unpin,
    Wr: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        let reply = match std::str::from_utf8(raw) {
            Ok(line) => session.handle_line(line).await?,
            Err(_) => {
                warn!("line is not valid UTF-8");
                let err = create_error(0, ErrorCode::InvalidCommand, "line is not valid UTF-8");
                Some(serde_json::to_string(&err)?)
            }
        };
        if let Some(reply) = reply {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
}

/// Serve one round over stdin/stdout
///
/// Returns the progress as it stood when input ended, for the caller to store.
pub async fn run_stdio(config: AdapterConfig) -> anyhow::Result<Progress> {
    info!(seed = config.seed, "driver ready");
    let round = Round::new(config.seed).with_progress(config.progress);
    let (handle, actor) = RoundHandle::spawn(round, config.max_pending_commands);

    let mut session = Session::new(handle);
    run_session(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &mut session,
    )
    .await?;
    drop(session);

    let round = actor.await?;
    Ok(*round.progress())
}
