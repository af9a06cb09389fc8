//! Protocol module - JSON message types for the line driver
//!
//! One JSON object per line, tagged by `type`. Inbound messages carry a `seq`
//! that must strictly increase; every reply echoes the `seq` it answers.

use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{ClearResult, Progress, RoundEvent, RoundMode, RoundSnapshot, Shape};
use crate::engine::CommandError;
use crate::types::{RoundCommand, SHAPES_PER_BATCH};

// ============== Driver -> Engine Messages ==============

/// Command message
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub command: CommandBody,
}

/// The command payload, tagged by `op`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CommandBody {
    StartLevel { level: u32 },
    StartDaily { year: i32, day_of_year: u16 },
    Place { shape_id: u32, x: i8, y: i8 },
    Undo,
    Skip,
    Revive,
}

impl From<CommandBody> for RoundCommand {
    fn from(body: CommandBody) -> Self {
        match body {
            CommandBody::StartLevel { level } => RoundCommand::StartLevel { level },
            CommandBody::StartDaily { year, day_of_year } => {
                RoundCommand::StartDaily { year, day_of_year }
            }
            CommandBody::Place { shape_id, x, y } => RoundCommand::Place { shape_id, x, y },
            CommandBody::Undo => RoundCommand::Undo,
            CommandBody::Skip => RoundCommand::Skip,
            CommandBody::Revive => RoundCommand::Revive,
        }
    }
}

/// Request for a full observation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObserveMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
}

// ============== Engine -> Driver Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCommand,
    InvalidPlace,
    UnknownShape,
    RoundOver,
    OutOfBounds,
    InvalidDailySeed,
    Backpressure,
}

impl From<CommandError> for ErrorCode {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::InvalidPlacement => ErrorCode::InvalidPlace,
            CommandError::UnknownShape => ErrorCode::UnknownShape,
            CommandError::RoundOver => ErrorCode::RoundOver,
            CommandError::OutOfBounds => ErrorCode::OutOfBounds,
            CommandError::InvalidDailySeed => ErrorCode::InvalidDailySeed,
        }
    }
}

/// Acknowledgment for an accepted command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    /// The command was valid but had no effect.
    pub ignored: bool,
    pub events: Vec<EventRecord>,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: u32,
    pub kind: String,
    pub color: String,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        Self {
            id: shape.id.0,
            kind: shape.kind.as_str().to_string(),
            color: shape.color.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: u8,
    pub y: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub year: i32,
    pub day_of_year: u16,
}

/// Wire form of a round event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRecord {
    RoundStarted {
        mode: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<u32>,
        garbage: u32,
    },
    ShapesDealt {
        shapes: Vec<ShapeRecord>,
    },
    Placed {
        shape: ShapeRecord,
        x: i8,
        y: i8,
    },
    LinesCleared {
        rows: Vec<u8>,
        cols: Vec<u8>,
        points: u32,
        combo: u32,
        cleared: Vec<CellRecord>,
    },
    ComboBroken {
        previous: u32,
    },
    LevelComplete {
        level: u32,
        coin_reward: u32,
    },
    DailyComplete {
        daily: DailyRecord,
        coin_reward: u32,
    },
    UnlockAdvanced {
        max_unlocked_level: u32,
    },
    NewHighScore {
        score: u32,
    },
    GameOver {
        score: u32,
    },
    Undone {
        score: u32,
    },
    Skipped,
    Revived {
        cleared: Vec<CellRecord>,
    },
}

fn lines_cleared(clear: &ClearResult) -> EventRecord {
    EventRecord::LinesCleared {
        rows: clear.rows.to_vec(),
        cols: clear.cols.to_vec(),
        points: clear.points,
        combo: clear.combo,
        cleared: clear
            .cleared
            .iter()
            .map(|c| CellRecord { x: c.x, y: c.y })
            .collect(),
    }
}

impl From<&RoundEvent> for EventRecord {
    fn from(event: &RoundEvent) -> Self {
        match event {
            RoundEvent::RoundStarted {
                mode,
                target,
                garbage,
            } => EventRecord::RoundStarted {
                mode: mode.as_str().to_string(),
                target: *target,
                garbage: *garbage,
            },
            RoundEvent::ShapesDealt { shapes } => EventRecord::ShapesDealt {
                shapes: shapes.iter().map(ShapeRecord::from).collect(),
            },
            RoundEvent::Placed { shape, x, y } => EventRecord::Placed {
                shape: ShapeRecord::from(shape),
                x: *x,
                y: *y,
            },
            RoundEvent::LinesCleared(clear) => lines_cleared(clear),
            RoundEvent::ComboBroken { previous } => EventRecord::ComboBroken {
                previous: *previous,
            },
            RoundEvent::LevelComplete { level, coin_reward } => EventRecord::LevelComplete {
                level: *level,
                coin_reward: *coin_reward,
            },
            RoundEvent::DailyComplete { seed, coin_reward } => EventRecord::DailyComplete {
                daily: DailyRecord {
                    year: seed.year,
                    day_of_year: seed.day_of_year,
                },
                coin_reward: *coin_reward,
            },
            RoundEvent::UnlockAdvanced { max_unlocked_level } => EventRecord::UnlockAdvanced {
                max_unlocked_level: *max_unlocked_level,
            },
            RoundEvent::NewHighScore { score } => EventRecord::NewHighScore { score: *score },
            RoundEvent::GameOver { score } => EventRecord::GameOver { score: *score },
            RoundEvent::Undone { score } => EventRecord::Undone { score: *score },
            RoundEvent::Skipped => EventRecord::Skipped,
            RoundEvent::Revived { cleared } => EventRecord::Revived {
                cleared: cleared
                    .iter()
                    .map(|c| CellRecord { x: c.x, y: c.y })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(&s, 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid state hash"))
    }
}

/// Full round state (reply to observe)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub playable: bool,
    pub phase: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailyRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    pub theme: String,
    /// 0 = empty, 1 = garbage, 2.. = palette color; indexed `[y][x]`.
    pub cells: [[u8; 8]; 8],
    pub shapes: ArrayVec<ShapeRecord, SHAPES_PER_BATCH>,
    pub score: u32,
    pub combo: u32,
    pub can_undo: bool,
    pub revive_used: bool,
    pub progress: Progress,
    pub state_hash: StateHash,
}

/// Stable 64-bit FNV-1a hasher for deterministic `state_hash`.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Build an observation from a round snapshot
pub fn build_observation(snapshot: &RoundSnapshot, seq: u64) -> ObservationMessage {
    let mut hasher = Fnv1aHasher::new();
    snapshot.cells.hash(&mut hasher);
    snapshot.shapes.iter().for_each(|s| s.hash(&mut hasher));
    snapshot.score.hash(&mut hasher);
    snapshot.combo.hash(&mut hasher);
    snapshot.mode.hash(&mut hasher);
    snapshot.phase.hash(&mut hasher);
    snapshot.can_undo.hash(&mut hasher);
    snapshot.revive_used.hash(&mut hasher);

    let (level, daily) = match snapshot.mode {
        RoundMode::Classic => (None, None),
        RoundMode::Level(level) => (Some(level), None),
        RoundMode::Daily(seed) => (
            None,
            Some(DailyRecord {
                year: seed.year,
                day_of_year: seed.day_of_year,
            }),
        ),
    };

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        playable: snapshot.playable(),
        phase: snapshot.phase.as_str().to_string(),
        mode: snapshot.mode.as_str().to_string(),
        level,
        daily,
        target: snapshot.target,
        theme: snapshot.theme.as_str().to_string(),
        cells: snapshot.cells,
        shapes: snapshot.shapes.iter().map(ShapeRecord::from).collect(),
        score: snapshot.score,
        combo: snapshot.combo,
        can_undo: snapshot.can_undo,
        revive_used: snapshot.revive_used,
        progress: snapshot.progress,
        state_hash: StateHash(hasher.finish()),
    }
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Command(CommandMessage),
    Observe(ObserveMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                msg_type: Option<&'a str>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or("unknown");
            if msg_type != "command" && msg_type != "observe" {
                #[derive(Debug, Deserialize)]
                struct SeqOnly {
                    seq: Option<u64>,
                }
                let seq = serde_json::from_str::<SeqOnly>(json)?.seq.unwrap_or(0);
                return Ok(ParsedMessage::Unknown(UnknownMessage { seq }));
            }
            Err(e)
        }
    }
}

/// Pull `seq` out of a line that failed to parse, so the error can echo it
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Utility Functions ==============

/// Create an acknowledgment
pub fn create_ack(seq: u64, ignored: bool, events: &[RoundEvent]) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        ignored,
        events: events.iter().map(EventRecord::from).collect(),
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
