//! PhishGuard agent entrypoint: watches a capture spool fed by the browsing
//! collaborator, extracts feature vectors, obtains verdicts from the
//! classifier service when configured, and records every analysis locally.
//! With a capture file argument it analyzes that one file and prints the
//! result as a single JSON line.

use phishguard_agent::{
    capture::{CaptureSpool, PageCapture},
    classify::{ClassifierClient, Verdict},
    config::AnalyzerConfig,
    features::{FeatureExtractor, BASIC_30},
    logging::StructuredLogger,
    risk::{AnalysisResult, RiskEngine, RiskLevel},
    storage::{AnalysisStore, ArtifactStore},
};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

type AgentError = Box<dyn std::error::Error + Send + Sync>;

/// Single-shot output shape (one JSON line on stdout).
#[derive(Serialize)]
struct AnalysisReport<'a> {
    analysis_id: &'a str,
    url: &'a str,
    schema: &'a str,
    score: f64,
    level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<&'a Verdict>,
    features: &'a [f64],
}

fn analyze_capture(
    capture: &PageCapture,
    extractor: &FeatureExtractor,
    classifier: Option<&ClassifierClient>,
    risk_engine: &RiskEngine,
    store: &AnalysisStore,
    artifacts: Option<&ArtifactStore>,
) -> Result<(Vec<f64>, Option<Verdict>, AnalysisResult), AgentError> {
    let features = extractor.extract(capture);

    let verdict = match classifier {
        Some(client) => match client.predict(&features) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(analysis_id = %capture.analysis_id, error = %e, "classifier unreachable");
                None
            }
        },
        None => None,
    };

    let score = verdict
        .as_ref()
        .map(|v| v.probabilities.phishing)
        .unwrap_or(0.0);
    let result = risk_engine.score(capture.analysis_id.clone(), score, features.ts);

    let payload = serde_json::json!({
        "url": capture.url,
        "values": features.values,
        "verdict": verdict,
    });
    store.insert_analysis(
        &features.analysis_id,
        features.ts,
        &features.schema,
        &payload.to_string(),
        verdict.as_ref().map(|v| v.prediction.as_str()),
        Some(result.score),
    )?;

    if let Some(store) = artifacts {
        if let Err(e) = store.save_html(&capture.analysis_id, &capture.html) {
            warn!(analysis_id = %capture.analysis_id, error = %e, "html artifact not saved");
        }
        if let Err(e) = store.save_logs(&capture.analysis_id, &capture.network_logs) {
            warn!(analysis_id = %capture.analysis_id, error = %e, "log artifact not saved");
        }
    }

    if result.level != RiskLevel::Low {
        info!(
            analysis_id = %result.analysis_id,
            url = %capture.url,
            score = result.score,
            level = ?result.level,
            "risk result"
        );
    }

    Ok((features.values, verdict, result))
}

fn run_one_cycle(
    spool: &CaptureSpool,
    extractor: &FeatureExtractor,
    classifier: Option<&ClassifierClient>,
    risk_engine: &RiskEngine,
    store: &AnalysisStore,
    artifacts: Option<&ArtifactStore>,
) -> Result<(), AgentError> {
    let pending = spool.scan()?;
    if !pending.is_empty() {
        info!(count = pending.len(), "pending captures");
    }

    for path in pending {
        match spool.load(&path) {
            Ok(capture) => {
                if let Err(e) = analyze_capture(
                    &capture,
                    extractor,
                    classifier,
                    risk_engine,
                    store,
                    artifacts,
                ) {
                    warn!(path = %path.display(), error = %e, "analysis failed");
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed capture");
            }
        }
        // Archive regardless so a bad file cannot wedge the spool.
        if let Err(e) = spool.archive(&path) {
            warn!(path = %path.display(), error = %e, "archive failed");
        }
    }
    Ok(())
}

fn main() -> Result<(), AgentError> {
    let config_path = std::env::var("PHISHGUARD_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = AnalyzerConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(data_dir = ?config.data_dir, "PhishGuard agent starting");

    std::fs::create_dir_all(&config.data_dir)?;
    let store_path = config.data_dir.join("store.db");
    let secret = b"device-secret-placeholder"; // In production: from Secure Enclave / Keystore
    let store = AnalysisStore::open(&store_path, secret)?;

    let artifacts = if config.artifacts.keep {
        Some(ArtifactStore::open(&config.data_dir.join("artifacts"))?)
    } else {
        None
    };

    let extractor = FeatureExtractor::from_name(&config.features.schema).unwrap_or_else(|| {
        warn!(schema = %config.features.schema, "unknown schema; using basic-30");
        FeatureExtractor::new(&BASIC_30)
    });
    let classifier = ClassifierClient::new(&config.classifier);
    if classifier.is_none() && config.classifier.enabled {
        warn!("classifier enabled but no endpoint configured; running extraction-only");
    }
    let risk_engine = RiskEngine::new(config.risk.clone());

    if config.artifacts.retention_days > 0 {
        let cutoff_secs = config.artifacts.retention_days * 24 * 3600;
        if let Some(ref a) = artifacts {
            let cutoff = SystemTime::now() - Duration::from_secs(cutoff_secs);
            match a.prune_older_than(cutoff) {
                Ok(n) if n > 0 => info!(removed = n, "pruned stale artifacts"),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "artifact prune failed"),
            }
        }
        let cutoff_ms = chrono::Utc::now().timestamp_millis() - (cutoff_secs as i64) * 1000;
        if let Err(e) = store.prune_before(cutoff_ms) {
            warn!(error = %e, "analysis prune failed");
        }
    }

    // Single-shot: analyze one capture file and print the result.
    if let Some(arg) = std::env::args().nth(1) {
        let data = std::fs::read_to_string(Path::new(&arg))?;
        let capture: PageCapture = serde_json::from_str(&data)?;
        let (values, verdict, result) = analyze_capture(
            &capture,
            &extractor,
            classifier.as_ref(),
            &risk_engine,
            &store,
            artifacts.as_ref(),
        )?;
        let report = AnalysisReport {
            analysis_id: &result.analysis_id,
            url: &capture.url,
            schema: extractor.schema().name,
            score: result.score,
            level: result.level,
            verdict: verdict.as_ref(),
            features: &values,
        };
        StructuredLogger::emit_json(&report, &mut std::io::stdout());
        return Ok(());
    }

    let spool = CaptureSpool::open(&config.spool.dir)?;
    let interval_secs = config.spool.poll_interval_secs;
    let run_daemon = interval_secs > 0;

    if run_daemon {
        info!(interval_secs, "daemon mode (Ctrl+C to stop)");
        static STOP: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
        let _ = ctrlc::set_handler(|| {
            STOP.store(true, std::sync::atomic::Ordering::Relaxed);
        });
        let mut cycle: u64 = 0;
        while !STOP.load(std::sync::atomic::Ordering::Relaxed) {
            cycle += 1;
            if let Err(e) = run_one_cycle(
                &spool,
                &extractor,
                classifier.as_ref(),
                &risk_engine,
                &store,
                artifacts.as_ref(),
            ) {
                warn!(cycle, error = %e, "cycle failed");
            }
            for _ in 0..(interval_secs as u32) {
                if STOP.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                std::thread::sleep(Duration::from_secs(1));
            }
        }
        info!("PhishGuard agent stopping");
    } else {
        run_one_cycle(
            &spool,
            &extractor,
            classifier.as_ref(),
            &risk_engine,
            &store,
            artifacts.as_ref(),
        )?;
        info!("PhishGuard agent cycle complete");
    }

    Ok(())
}
