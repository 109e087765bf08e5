//! Scenario drivers against a local mock HTTP server and the real worker.

use std::sync::Mutex;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fanbench_core::config::ScenarioConfig;
use fanbench_core::strategy::Strategy;
use fanbench_lib::scenarios::{compare, cpu, http, ScenarioContext};
use fanbench_orchestration::interfaces::{ResultPresenter, RunSummary};
use fanbench_orchestration::{FanOutRunner, WorkerCommand};

/// Presenter that records what it was asked to show.
#[derive(Default)]
struct Recorder {
    results: Mutex<Vec<(String, Vec<String>)>>,
    comparisons: Mutex<usize>,
    warnings: Mutex<Vec<String>>,
}

impl ResultPresenter for Recorder {
    fn present_results(&self, label: &str, values: &[String]) {
        self.results
            .lock()
            .unwrap()
            .push((label.to_string(), values.to_vec()));
    }

    fn present_timing(&self, _run: &RunSummary) {}

    fn present_comparison(&self, _runs: &[RunSummary]) {
        *self.comparisons.lock().unwrap() += 1;
    }

    fn present_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

fn runner() -> FanOutRunner {
    FanOutRunner::new().with_worker(WorkerCommand::new(env!("CARGO_BIN_EXE_fanbench")).arg("worker"))
}

fn mock_page(runtime: &tokio::runtime::Runtime, status: u16, body: &str) -> MockServer {
    runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    })
}

fn http_config(server: &MockServer, count: usize) -> ScenarioConfig {
    ScenarioConfig {
        url: format!("{}/", server.uri()),
        fetch_count: count,
        ..ScenarioConfig::default()
    }
}

#[test]
fn http_scenario_reports_lengths_for_both_strategies() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = mock_page(&runtime, 200, "<html>example</html>");
    let runner = runner();
    let recorder = Recorder::default();
    let ctx = ScenarioContext {
        runner: &runner,
        presenter: &recorder,
        summary: true,
    };

    let runs = http::run(&ctx, &http_config(&server, 3), None).unwrap();
    let strategies: Vec<Strategy> = runs.iter().map(|r| r.strategy).collect();
    assert_eq!(strategies, http::DEFAULT_STRATEGIES.to_vec());

    let results = recorder.results.lock().unwrap();
    assert_eq!(results.len(), 2);
    for (_, lengths) in results.iter() {
        assert_eq!(lengths, &vec!["20".to_string(); 3]);
    }
    assert_eq!(*recorder.comparisons.lock().unwrap(), 1);
}

#[test]
fn compare_scenario_reports_status_per_url() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = mock_page(&runtime, 503, "busy");
    let runner = runner();
    let recorder = Recorder::default();
    let ctx = ScenarioContext {
        runner: &runner,
        presenter: &recorder,
        summary: false,
    };
    let config = http_config(&server, 2);

    let runs = compare::run(&ctx, &config, None).unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].strategy, Strategy::Sequential);

    let results = recorder.results.lock().unwrap();
    let expected = format!("{}: 503", config.url);
    for (_, lines) in results.iter() {
        assert_eq!(lines, &vec![expected.clone(); 2]);
    }
    assert_eq!(*recorder.comparisons.lock().unwrap(), 0);
}

#[test]
fn http_scenario_with_zero_requests() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = mock_page(&runtime, 200, "unused");
    let runner = runner();
    let recorder = Recorder::default();
    let ctx = ScenarioContext {
        runner: &runner,
        presenter: &recorder,
        summary: false,
    };

    let runs = http::run(&ctx, &http_config(&server, 0), Some(Strategy::ProcessPerItem)).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].units, 0);
    let results = recorder.results.lock().unwrap();
    assert!(results[0].1.is_empty());
}

#[test]
fn cpu_scenario_threads_and_processes_agree() {
    let runner = runner();
    let recorder = Recorder::default();
    let ctx = ScenarioContext {
        runner: &runner,
        presenter: &recorder,
        summary: false,
    };
    let config = ScenarioConfig {
        samples: 10_001,
        ..ScenarioConfig::default()
    };

    let outcome = cpu::run(&ctx, &config, None).unwrap();
    assert_eq!(outcome.runs.len(), 2);
    assert_eq!(outcome.results[0], outcome.results[1]);
    assert!(recorder.warnings.lock().unwrap().is_empty());
}

#[test]
fn cpu_scenario_rejects_single_sample() {
    let runner = runner();
    let recorder = Recorder::default();
    let ctx = ScenarioContext {
        runner: &runner,
        presenter: &recorder,
        summary: false,
    };
    let config = ScenarioConfig {
        samples: 1,
        ..ScenarioConfig::default()
    };
    assert!(cpu::run(&ctx, &config, None).is_err());
    assert!(recorder.results.lock().unwrap().is_empty());
}
