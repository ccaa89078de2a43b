use super::TransportRequest;
use crate::value::{EvaluationContext, RuleValue};
use serde::Deserialize;

/// A request in the event layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventRequest {
    pub rules: Option<Vec<String>>,
    #[serde(default)]
    pub context: RuleValue,
    #[serde(default)]
    pub environment: RuleValue,
    #[serde(default)]
    pub event: Option<EventMessage>,
    pub current_time: Option<String>,
}

/// The event that triggered the evaluation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventMessage {
    #[serde(default, alias = "content")]
    pub payload: RuleValue,
    #[serde(default)]
    pub sender: RuleValue,
    #[serde(default)]
    pub signers: RuleValue,
}

impl TransportRequest for EventRequest {
    fn rules(&mut self) -> Option<Vec<String>> {
        self.rules.take()
    }

    fn current_time(&mut self) -> Option<String> {
        self.current_time.take()
    }

    fn into_context(self) -> EvaluationContext {
        let event = self.event.unwrap_or_default();

        EvaluationContext::new()
            .with("context", self.context)
            .with("environment", self.environment)
            .with(
                "event",
                EvaluationContext::new()
                    .with("payload", event.payload)
                    .with("sender", event.sender)
                    .with("signers", event.signers),
            )
    }
}
