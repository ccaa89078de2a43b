use super::TransportRequest;
use crate::value::{EvaluationContext, RuleValue};
use serde::Deserialize;

/// A request in the process-state layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProcessStateRequest {
    pub rules: Option<Vec<String>>,
    #[serde(default)]
    pub new_process_state: RuleValue,
    #[serde(default)]
    pub environment_state: RuleValue,
    #[serde(default)]
    pub delta: Option<StateDelta>,
    pub current_time: Option<String>,
}

/// The proposed state transition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateDelta {
    #[serde(default)]
    pub content: RuleValue,
    #[serde(default)]
    pub sender: RuleValue,
    #[serde(default)]
    pub signers: RuleValue,
}

impl TransportRequest for ProcessStateRequest {
    fn rules(&mut self) -> Option<Vec<String>> {
        self.rules.take()
    }

    fn current_time(&mut self) -> Option<String> {
        self.current_time.take()
    }

    fn into_context(self) -> EvaluationContext {
        let delta = self.delta.unwrap_or_default();

        EvaluationContext::new()
            .with("processState", self.new_process_state)
            .with("environmentState", self.environment_state)
            .with(
                "delta",
                EvaluationContext::new()
                    .with("content", delta.content)
                    .with("sender", delta.sender)
                    .with("signers", delta.signers),
            )
    }
}
