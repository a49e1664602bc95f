//! JSONL transcripts of debug console activity.
//!
//! A transcript records, one JSON object per line, the output a debug
//! session produced and the expressions evaluated against it, together
//! with their recorded outcomes. Replaying a transcript rebuilds the
//! console log exactly as a live session would have.
//!
//! ```text
//! {"type":"output","session":"s1","category":"stdout","output":"hello\n"}
//! {"type":"output","session":"s1","category":"console","output":"setup","group":"start"}
//! {"type":"evaluate","session":"s1","frame":3,"expression":"1+1","result":{"value":"2","type":"int"}}
//! {"type":"evaluate","session":"s1","expression":"x","error":"x is not defined"}
//! {"type":"clear"}
//! ```
//!
//! Events that omit `session` belong to the `"default"` session, so output
//! and evaluations recorded without one replay against the same live
//! session. An evaluation recorded while no session was running carries
//! `"session": null`.

use crate::model::{EvaluationError, FrameId, SessionId, SourceLocation, TranscriptError};
use crate::repl::{Evaluation, EvaluationRequest, Evaluator, GroupMarker, OutputEvent, ReplModel};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

// Defaults for optional fields
const DEFAULT_SESSION: &str = "default";
const DEFAULT_CATEGORY: &str = "console";
const MISSING_OUTCOME: &str = "not available";

/// Raw JSON structure for deserializing transcript lines.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawEvent {
    Output {
        #[serde(default = "default_session")]
        session: String,
        #[serde(default = "default_category")]
        category: String,
        #[serde(default)]
        output: String,
        #[serde(default)]
        group: Option<GroupMarker>,
        #[serde(default)]
        source: Option<SourceLocation>,
        #[serde(default)]
        data: Option<Value>,
    },
    Evaluate {
        #[serde(default = "default_evaluate_session")]
        session: Option<String>,
        #[serde(default)]
        frame: Option<u64>,
        expression: String,
        #[serde(default)]
        result: Option<RawResult>,
        #[serde(default)]
        error: Option<String>,
    },
    Clear,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    value: String,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    #[serde(default)]
    reference: Option<u64>,
}

fn default_session() -> String {
    DEFAULT_SESSION.to_string()
}

fn default_evaluate_session() -> Option<String> {
    Some(default_session())
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One validated transcript event.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    /// Output produced by a session.
    Output {
        /// Producing session.
        session: SessionId,
        /// The output itself.
        event: OutputEvent,
    },
    /// An expression typed into the console and its recorded outcome.
    Evaluate {
        /// Session evaluated against; `None` if none was active.
        session: Option<SessionId>,
        /// Selected frame, if any.
        frame: Option<FrameId>,
        /// Expression text.
        expression: String,
        /// What the evaluator answered.
        outcome: Result<Evaluation, EvaluationError>,
    },
    /// The user cleared the console.
    Clear,
}

/// Parse a single transcript line.
///
/// Returns `Ok(None)` for blank lines.
///
/// # Errors
///
/// Returns `TranscriptError` if the line is not a valid event.
pub fn parse_line(raw: &str, line_number: usize) -> Result<Option<TranscriptEvent>, TranscriptError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let raw_event: RawEvent = serde_json::from_str(raw).map_err(|e| TranscriptError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let session_id = |raw: String| {
        SessionId::new(raw).map_err(|_| TranscriptError::EmptySession { line: line_number })
    };

    let event = match raw_event {
        RawEvent::Output {
            session,
            category,
            output,
            group,
            source,
            data,
        } => TranscriptEvent::Output {
            session: session_id(session)?,
            event: OutputEvent {
                category,
                output,
                group,
                source: source.map(SourceLocation::normalized),
                data,
            },
        },
        RawEvent::Evaluate {
            session,
            frame,
            expression,
            result,
            error,
        } => TranscriptEvent::Evaluate {
            session: session.map(session_id).transpose()?,
            frame: frame.map(FrameId),
            expression,
            outcome: recorded_outcome(result, error),
        },
        RawEvent::Clear => TranscriptEvent::Clear,
    };

    Ok(Some(event))
}

fn recorded_outcome(
    result: Option<RawResult>,
    error: Option<String>,
) -> Result<Evaluation, EvaluationError> {
    match (result, error) {
        (_, Some(message)) => Err(EvaluationError::Failed(message)),
        (Some(result), None) => Ok(Evaluation {
            value: result.value,
            type_name: result.type_name,
            children_reference: result.reference,
        }),
        (None, None) => Err(EvaluationError::Failed(MISSING_OUTCOME.to_string())),
    }
}

/// A parsed transcript: the valid events plus the lines that were skipped.
#[derive(Debug, Default)]
pub struct Transcript {
    /// Valid events in file order.
    pub events: Vec<TranscriptEvent>,
    /// Errors for lines that could not be parsed.
    pub errors: Vec<TranscriptError>,
}

/// Parse a whole transcript, skipping malformed lines.
///
/// Parsing errors are non-fatal: each one is logged and collected, and the
/// remaining lines still parse.
pub fn parse_transcript(input: &str) -> Transcript {
    let mut transcript = Transcript::default();

    for (index, line) in input.lines().enumerate() {
        match parse_line(line, index + 1) {
            Ok(Some(event)) => transcript.events.push(event),
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "Skipping malformed transcript line");
                transcript.errors.push(error);
            }
        }
    }

    debug!(
        events = transcript.events.len(),
        skipped = transcript.errors.len(),
        "Parsed transcript"
    );
    transcript
}

/// Evaluator that answers with an outcome recorded in a transcript.
#[derive(Debug, Clone)]
pub struct RecordedEvaluator {
    outcome: Result<Evaluation, EvaluationError>,
}

impl RecordedEvaluator {
    /// Wrap a recorded outcome.
    pub fn new(outcome: Result<Evaluation, EvaluationError>) -> Self {
        Self { outcome }
    }
}

#[async_trait]
impl Evaluator for RecordedEvaluator {
    async fn evaluate(&self, _request: &EvaluationRequest) -> Result<Evaluation, EvaluationError> {
        self.outcome.clone()
    }
}

/// Apply transcript events to a log in order.
pub async fn replay<I>(model: &mut ReplModel, events: I)
where
    I: IntoIterator<Item = TranscriptEvent>,
{
    for event in events {
        match event {
            TranscriptEvent::Output { session, event } => model.log_output(&session, event),
            TranscriptEvent::Evaluate {
                session,
                frame,
                expression,
                outcome,
            } => {
                let evaluator = RecordedEvaluator::new(outcome);
                model
                    .add_evaluation(&evaluator, session.as_ref(), frame, &expression)
                    .await;
            }
            TranscriptEvent::Clear => model.clear(),
        }
    }
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
