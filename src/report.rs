use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::config::{IP_LOOKUP_URL, REPORT_TIMEOUT_MS, REPORT_URL};

/// End-of-run payload. Field names are a stable wire contract.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// ISO-8601 timestamp of when the run terminated
    pub timestamp: String,
    /// Best-effort public IP of the client, empty if the lookup failed
    pub ip: String,
    /// Reserved for future use, always empty
    pub reverse_dns: String,
    /// Population of the final generation
    pub alive_final: u32,
    /// Index of the final generation
    pub step_final: u32,
}

impl RunReport {
    pub fn new(alive_final: u32, step_final: u32) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            ip: String::new(),
            reverse_dns: String::new(),
            alive_final,
            step_final,
        }
    }
}

/// Whether the report reached the endpoint. Only drives the transient
/// badge in the window title; the simulation never looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    Sent,
    Failed,
}

/// Fire-and-forget delivery of the final result.
///
/// Spawns a background thread that enriches the payload with the public IP
/// (best effort) and posts it to the configured endpoint. Exactly one
/// outcome arrives on the returned channel; if the app exits first the
/// thread is abandoned. Nothing here retries or blocks the render loop.
pub fn send_final_report(alive_final: u32, step_final: u32) -> mpsc::Receiver<ReportOutcome> {
    let (outcome_tx, outcome_rx) = mpsc::channel();

    thread::spawn(move || {
        let mut report = RunReport::new(alive_final, step_final);
        report.ip = lookup_public_ip().unwrap_or_default();

        let outcome = match post_report(&report) {
            Ok(()) => {
                log::info!(
                    "Reported final result: alive={} step={}",
                    report.alive_final,
                    report.step_final
                );
                ReportOutcome::Sent
            }
            Err(e) => {
                log::warn!("Final-result report failed: {}", e);
                ReportOutcome::Failed
            }
        };

        // Receiver may already be gone if the app restarted or quit
        let _ = outcome_tx.send(outcome);
    });

    outcome_rx
}

fn lookup_public_ip() -> Option<String> {
    let response = ureq::get(IP_LOOKUP_URL)
        .timeout(Duration::from_millis(REPORT_TIMEOUT_MS))
        .call()
        .map_err(|e| log::debug!("IP lookup failed: {}", e))
        .ok()?;
    let body = response.into_string().ok()?;
    Some(body.trim().to_string())
}

fn post_report(report: &RunReport) -> Result<(), ureq::Error> {
    ureq::post(REPORT_URL)
        .timeout(Duration::from_millis(REPORT_TIMEOUT_MS))
        .send_json(report)?;
    Ok(())
}
