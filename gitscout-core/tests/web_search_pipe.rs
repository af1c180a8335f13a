//! Web-search pipe behavior against a scripted process runner

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gitscout_core::config::SearchConfig;
use gitscout_core::mcp::tools::WebSearchTool;
use gitscout_core::mcp::{McpTool, ToolContent};
use gitscout_core::process::{Invocation, ProcessOutput, ProcessRunner};
use gitscout_core::search::{WebSearcher, NO_RESULTS};
use gitscout_core::{Error, Result};

/// What the fixture should do when `pipe` is called.
enum Script {
    Output(ProcessOutput),
    SpawnError,
}

/// Records every pipe invocation and replays a scripted outcome.
struct PipeFixture {
    script: Script,
    calls: Mutex<Vec<(Invocation, Invocation)>>,
}

impl PipeFixture {
    fn with_output(stdout: &str, stderr: &str, code: i32) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Output(ProcessOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                code,
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn with_spawn_error() -> Arc<Self> {
        Arc::new(Self {
            script: Script::SpawnError,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProcessRunner for PipeFixture {
    async fn run(&self, _invocation: Invocation) -> Result<ProcessOutput> {
        unreachable!("the web-search tool always pipes")
    }

    async fn pipe(&self, producer: Invocation, consumer: Invocation) -> Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((producer.clone(), consumer));
        match &self.script {
            Script::Output(output) => Ok(output.clone()),
            Script::SpawnError => Err(Error::Spawn {
                program: producer.program,
                message: "No such file or directory (os error 2)".to_string(),
            }),
        }
    }
}

fn searcher(fixture: &Arc<PipeFixture>) -> WebSearcher {
    WebSearcher::new(fixture.clone(), SearchConfig::default())
}

#[tokio::test]
async fn successful_search_returns_trimmed_output() {
    let fixture = PipeFixture::with_output("hello world\n", "", 0);
    let body = searcher(&fixture).search("rust pipes").await.unwrap();
    assert_eq!(body, "hello world");
}

#[tokio::test]
async fn empty_filter_output_becomes_placeholder() {
    let fixture = PipeFixture::with_output("", "", 0);
    let body = searcher(&fixture).search("rust pipes").await.unwrap();
    assert_eq!(body, NO_RESULTS);
}

#[tokio::test]
async fn filter_failure_carries_code_and_stderr() {
    let fixture = PipeFixture::with_output("", "boom\n", 2);
    let err = searcher(&fixture).search("rust pipes").await.unwrap_err();
    match err {
        Error::SearchFailed { code, detail } => {
            assert_eq!(code, 2);
            assert_eq!(detail, "boom");
        }
        other => panic!("expected SearchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn filter_failure_falls_back_to_stdout_when_stderr_is_empty() {
    let fixture = PipeFixture::with_output("only stdout diagnostics\n", "", 2);
    let err = searcher(&fixture).search("rust pipes").await.unwrap_err();
    match err {
        Error::SearchFailed { detail, .. } => assert_eq!(detail, "only stdout diagnostics"),
        other => panic!("expected SearchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_query_is_rejected_before_any_spawn() {
    let fixture = PipeFixture::with_output("unused", "", 0);
    let err = searcher(&fixture).search("   ").await.unwrap_err();
    assert!(matches!(err, Error::EmptyQuery));
    assert_eq!(fixture.call_count(), 0);
}

#[tokio::test]
async fn search_invocations_follow_the_collaborator_contract() {
    let fixture = PipeFixture::with_output("ok", "", 0);
    searcher(&fixture).search("rust pipes").await.unwrap();

    let calls = fixture.calls.lock().unwrap();
    let (producer, consumer) = &calls[0];

    assert_eq!(producer.program, "codex");
    assert_eq!(
        producer.args[..5],
        ["--search", "--model", "gpt-5", "exec", "--json"]
    );
    // The prompt is the configured instruction, a newline, then the query.
    let prompt = producer.args.last().unwrap();
    assert_eq!(
        prompt,
        &format!("{}\nrust pipes", SearchConfig::default().instruction)
    );

    assert_eq!(consumer.program, "jq");
    assert_eq!(consumer.args[0], "-Rr");
    assert!(consumer.args[1].contains("agent_message"));
    assert!(consumer.args[1].contains("fromjson?"));
}

#[tokio::test]
async fn query_is_trimmed_before_embedding() {
    let fixture = PipeFixture::with_output("ok", "", 0);
    searcher(&fixture).search("  rust pipes  ").await.unwrap();

    let calls = fixture.calls.lock().unwrap();
    let prompt = calls[0].0.args.last().unwrap().clone();
    assert!(prompt.ends_with("\nrust pipes"));
}

#[tokio::test]
async fn tool_reports_success_body() {
    let fixture = PipeFixture::with_output("hello world\n", "", 0);
    let tool = WebSearchTool::new(searcher(&fixture));

    let result = tool
        .execute(serde_json::json!({ "query": "rust pipes" }))
        .await
        .unwrap();
    assert!(!result.is_error());
    let ToolContent::Text { text } = &result.content[0];
    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn tool_reports_failure_with_code_and_diagnostics() {
    let fixture = PipeFixture::with_output("", "boom\n", 2);
    let tool = WebSearchTool::new(searcher(&fixture));

    let result = tool
        .execute(serde_json::json!({ "query": "rust pipes" }))
        .await
        .unwrap();
    assert!(result.is_error());
    let ToolContent::Text { text } = &result.content[0];
    assert!(text.contains('2'));
    assert!(text.contains("boom"));
}

#[tokio::test]
async fn tool_converts_spawn_failures_into_error_results() {
    let fixture = PipeFixture::with_spawn_error();
    let tool = WebSearchTool::new(searcher(&fixture));

    let result = tool
        .execute(serde_json::json!({ "query": "rust pipes" }))
        .await
        .unwrap();
    assert!(result.is_error());
    let ToolContent::Text { text } = &result.content[0];
    assert!(text.contains("codex"));
    assert!(text.contains("No such file or directory"));
}

#[tokio::test]
async fn tool_rejects_empty_query_without_spawning() {
    let fixture = PipeFixture::with_output("unused", "", 0);
    let tool = WebSearchTool::new(searcher(&fixture));

    let result = tool
        .execute(serde_json::json!({ "query": "" }))
        .await
        .unwrap();
    assert!(result.is_error());
    assert_eq!(fixture.call_count(), 0);
}
