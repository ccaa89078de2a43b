//! Integration tests driving the command line through [`rule_evaluator::run`].

use camino::Utf8PathBuf;
use rule_evaluator::Host;
use serde_json::json;
use std::io::Cursor;

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    input_buf: Vec<u8>,
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn input(&mut self) -> impl std::io::Read {
        Cursor::new(&self.input_buf)
    }

    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

struct Workspace {
    _dir: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        Self { _dir: dir, root }
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.root.join(name);
        std::fs::write(&path, contents).unwrap();
        path.into_string()
    }
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_evaluate_passing_request() {
    let ws = Workspace::new();
    let request = ws.write(
        "request.json",
        &json!({
            "rules": ["true", r#"has allowed changes(context, ["a"])"#],
            "context": {"id": 1, "a": 2},
            "currentTime": "2024-05-01T10:00:00Z",
        })
        .to_string(),
    );

    let mut host = TestHost::default();
    let result = rule_evaluator::run(&mut host, ["rule-evaluator", "evaluate", "--request", request.as_str()]).await;

    assert!(result.is_ok(), "{result:?}");
    assert_eq!(host.output_str(), "OK\n");
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_evaluate_failing_request_prints_report() {
    let ws = Workspace::new();
    let request = ws.write(
        "request.json",
        &json!({
            "rules": ["true", "false"],
            "currentTime": "2024-05-01T10:00:00Z",
        })
        .to_string(),
    );

    let mut host = TestHost::default();
    let result = rule_evaluator::run(&mut host, ["rule-evaluator", "evaluate", "-r", request.as_str()]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));

    let report: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
    assert_eq!(report, json!([{"index": 1, "message": "Rule evaluated to 'false'"}]));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_evaluate_with_process_state_config() {
    let ws = Workspace::new();
    let config = ws.write("rules.toml", "context_schema = \"process-state\"\n");
    let request = ws.write(
        "request.json",
        &json!({
            "rules": [r#"delta.sender = "org-a""#],
            "newProcessState": {"id": 1},
            "delta": {"content": {}, "sender": "org-a", "signers": ["org-a"]},
            "currentTime": "2024-05-01T10:00:00Z",
        })
        .to_string(),
    );

    let mut host = TestHost::default();
    let result = rule_evaluator::run(
        &mut host,
        ["rule-evaluator", "evaluate", "--config", config.as_str(), "--request", request.as_str()],
    )
    .await;

    assert!(result.is_ok(), "{result:?} {}", host.error_str());
    assert_eq!(host.output_str(), "OK\n");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_evaluate_invalid_request() {
    let ws = Workspace::new();
    let request = ws.write("request.json", r#"{"rules": ["true"]}"#);

    let mut host = TestHost::default();
    let result = rule_evaluator::run(&mut host, ["rule-evaluator", "evaluate", "--request", request.as_str()]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(2));
    assert!(host.error_str().contains("currentTime"), "{}", host.error_str());
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_functions_listing() {
    let mut host = TestHost::default();
    let result = rule_evaluator::run(&mut host, ["rule-evaluator", "functions", "--json"]).await;
    assert!(result.is_ok(), "{result:?}");

    let listing: Vec<serde_json::Value> = serde_json::from_str(&host.output_str()).unwrap();
    let names: Vec<_> = listing.iter().map(|f| f["name"].as_str().unwrap().to_string()).collect();
    assert_eq!(names, ["has allowed changes", "is proof valid", "is report valid", "is vp valid"]);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_init_then_validate() {
    let ws = Workspace::new();
    let config = ws.root.join("rules.toml").into_string();

    let mut host = TestHost::default();
    rule_evaluator::run(&mut host, ["rule-evaluator", "init", config.as_str()])
        .await
        .unwrap();

    let mut host = TestHost::default();
    let result = rule_evaluator::run(&mut host, ["rule-evaluator", "validate", "--config", config.as_str()]).await;

    assert!(result.is_ok(), "{result:?}");
    let output = host.output_str();
    assert!(output.contains("Configuration validation successful"), "{output}");
    assert!(output.contains("Dialect: feel, request layout: event"), "{output}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
async fn test_validate_rejects_bad_config() {
    let ws = Workspace::new();
    let config = ws.write("rules.toml", "[server]\nmax_body_bytes = 0\n");

    let mut host = TestHost::default();
    let result = rule_evaluator::run(&mut host, ["rule-evaluator", "validate", "--config", config.as_str()]).await;

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("Configuration validation failed"), "{}", host.error_str());
}
