//! Transport requests and their mapping onto an evaluation context.
//!
//! Two request layouts are supported. A deployment picks one through
//! [`ContextSchema`]; they are never mixed.
//!
//! The event layout:
//!
//! ```json
//! {
//!   "rules": ["has allowed changes(context, [\"state\"])"],
//!   "context": { "id": 1, "state": "open" },
//!   "environment": {},
//!   "event": { "payload": {}, "sender": "org-a", "signers": ["org-a"] },
//!   "currentTime": "2024-05-01T10:00:00Z"
//! }
//! ```
//!
//! The process-state layout:
//!
//! ```json
//! {
//!   "rules": ["delta.sender = \"org-a\""],
//!   "newProcessState": { "id": 1 },
//!   "environmentState": {},
//!   "delta": { "content": {}, "sender": "org-a", "signers": ["org-a"] },
//!   "currentTime": "2024-05-01T10:00:00Z"
//! }
//! ```

mod event;
mod process_state;

pub use event::{EventMessage, EventRequest};
pub use process_state::{ProcessStateRequest, StateDelta};

use crate::eval::EvaluationFailure;
use crate::value::EvaluationContext;
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::Display;

/// The request layout accepted by a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContextSchema {
    /// `context`, `environment` and `event` sections
    #[default]
    Event,

    /// `newProcessState`, `environmentState` and `delta` sections
    ProcessState,
}

/// Everything the evaluator needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInput {
    pub rules: Vec<String>,
    pub context: EvaluationContext,
    pub time: DateTime<FixedOffset>,
}

/// The parts shared by both request layouts.
trait TransportRequest: DeserializeOwned {
    fn rules(&mut self) -> Option<Vec<String>>;
    fn current_time(&mut self) -> Option<String>;
    fn into_context(self) -> EvaluationContext;
}

impl ContextSchema {
    /// Parses a JSON request body laid out according to this schema.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationFailure::InvalidInput`] if the body is not JSON, does not
    /// match the layout, or lacks `rules` or a valid `currentTime`.
    pub fn parse(self, body: &[u8]) -> Result<EvaluationInput, EvaluationFailure> {
        match self {
            Self::Event => parse_as::<EventRequest>(body, self),
            Self::ProcessState => parse_as::<ProcessStateRequest>(body, self),
        }
    }
}

fn parse_as<T: TransportRequest>(body: &[u8], schema: ContextSchema) -> Result<EvaluationInput, EvaluationFailure> {
    let mut request: T = serde_json::from_slice(body)
        .map_err(|e| EvaluationFailure::invalid_input(format!("request does not match the {schema} layout: {e}")))?;

    let rules = request
        .rules()
        .ok_or_else(|| EvaluationFailure::invalid_input("missing field `rules`"))?;

    let time = request
        .current_time()
        .ok_or_else(|| EvaluationFailure::invalid_input("missing field `currentTime`"))?;

    let time = DateTime::parse_from_rfc3339(&time)
        .map_err(|e| EvaluationFailure::invalid_input(format!("`currentTime` is not an RFC 3339 timestamp ('{time}'): {e}")))?;

    Ok(EvaluationInput {
        rules,
        context: request.into_context(),
        time,
    })
}
