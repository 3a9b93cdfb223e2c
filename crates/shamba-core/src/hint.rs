//! Next-action hints and the status summary.
//!
//! Pure functions over a [`StatusSnapshot`]: no state, no calls. The hint
//! tells the user the single next thing to do given stage progress; the
//! summary renders the whole snapshot as one outgoing message.

use std::sync::OnceLock;

use crate::status::{StageStatus, StatusSnapshot};

/// Fixed per-stage document hints, keyed by stage number (1..=7).
static STAGE_FILE_HINTS: OnceLock<Vec<(u32, &'static str)>> = OnceLock::new();

fn stage_file_hints() -> &'static [(u32, &'static str)] {
    STAGE_FILE_HINTS.get_or_init(|| {
        vec![
            (1, "Soil test (CSV)"),
            (2, "Input supplier invoice (PDF / JPG)"),
            (3, "Insurance: premium receipt (PDF / JPG)"),
            (4, "Weeding photo (JPG / PNG)"),
            (5, "Pest photo (JPG)"),
            (6, "Packaging photo (JPG / PNG)"),
            (7, "Transport/Delivery note (PDF / JPG)"),
        ]
    })
}

/// The document hint for a stage, or a generic fallback for unknown numbers.
pub fn stage_file_hint(stage_number: u32) -> &'static str {
    stage_file_hints()
        .iter()
        .find(|(number, _)| *number == stage_number)
        .map(|(_, hint)| *hint)
        .unwrap_or("the required file")
}

/// Composes the next-action hint for a snapshot.
///
/// Season complete directs to `RENEW`; otherwise the first non-completed
/// stage decides: unlocked prompts an upload, pending reports the approval
/// wait, approved reports the disbursement wait. Anything else falls back to
/// a refresh hint.
pub fn next_action_hint(snapshot: &StatusSnapshot) -> String {
    if snapshot.is_season_complete() {
        return format!(
            "Season {} complete! Type **RENEW** to start the next loan cycle.",
            snapshot.season_number
        );
    }
    match snapshot.first_incomplete_stage() {
        Some(stage) => match stage.status {
            StageStatus::Unlocked => format!(
                "Type **UPLOAD** to submit {}.",
                stage_file_hint(stage.stage_number)
            ),
            StageStatus::Pending => {
                format!("Stage {} is PENDING approval.", stage.stage_number)
            }
            StageStatus::Approved => {
                format!(
                    "Stage {} approved - awaiting disbursement.",
                    stage.stage_number
                )
            }
            _ => "Type **STATUS** to refresh.".to_string(),
        },
        None => "Type **STATUS** to refresh.".to_string(),
    }
}

/// Renders the full status summary for one outgoing message.
///
/// Includes the header, season totals, insurance and score lines, a line per
/// stage, and the next-action hint.
pub fn render_status_summary(snapshot: &StatusSnapshot, farmer_id: u64) -> String {
    let mut text = format!(
        "**Status for {} (ID: {}) - Season {}**\n\n",
        snapshot.name, farmer_id, snapshot.season_number
    );
    text.push_str(&format!(
        "**Total Disbursed (This Season):** ${:.2}\n",
        snapshot.current_status.total_disbursed
    ));
    if snapshot.has_insurance {
        text.push_str(&format!(
            "**Insurance Policy:** Active | Claim status: {}\n",
            snapshot
                .insurance_claim_status
                .as_deref()
                .unwrap_or("UNKNOWN")
        ));
    } else {
        text.push_str("**Insurance Policy:** Not yet activated.\n");
    }
    text.push_str(&format!(
        "**Score:** {:.0} | Risk: {}\n\n",
        snapshot.current_status.score,
        if snapshot.current_status.risk_band.is_empty() {
            "N/A"
        } else {
            snapshot.current_status.risk_band.as_str()
        }
    ));
    text.push_str("Stages:\n");
    for stage in &snapshot.stages {
        text.push_str(&format!("{} - {}\n", stage.stage_name, stage.status));
    }
    text.push_str(&format!("\n{}\n", next_action_hint(snapshot)));
    text.push_str("\nType **UPLOAD**, **IOT** or **HELP**.");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{CurrentStatus, Stage};

    fn stage(number: u32, status: StageStatus) -> Stage {
        Stage {
            stage_number: number,
            stage_name: format!("Stage {}", number),
            status,
            disbursement_amount: 100.0,
        }
    }

    fn snapshot(stages: Vec<Stage>) -> StatusSnapshot {
        StatusSnapshot {
            farmer_id: Some(1),
            name: "Jane Doe".to_string(),
            season_number: 3,
            stages,
            has_insurance: true,
            insurance_claim_status: Some("NONE".to_string()),
            current_status: CurrentStatus {
                total_disbursed: 250.0,
                score: 72.0,
                risk_band: "LOW".to_string(),
                xai_factors: Vec::new(),
            },
        }
    }

    #[test]
    fn test_completed_season_always_hints_renewal() {
        let snap = snapshot(vec![
            stage(1, StageStatus::Completed),
            stage(2, StageStatus::Completed),
        ]);
        let hint = next_action_hint(&snap);
        assert!(hint.contains("RENEW"));
        assert!(!hint.contains("UPLOAD"));
        assert!(!hint.contains("approval"));
    }

    #[test]
    fn test_unlocked_stage_hints_its_file() {
        let snap = snapshot(vec![
            stage(1, StageStatus::Completed),
            stage(2, StageStatus::Unlocked),
            stage(3, StageStatus::Locked),
        ]);
        assert_eq!(
            next_action_hint(&snap),
            "Type **UPLOAD** to submit Input supplier invoice (PDF / JPG)."
        );
    }

    #[test]
    fn test_pending_and_approved_stages_report_waits() {
        let pending = snapshot(vec![stage(1, StageStatus::Pending)]);
        assert_eq!(next_action_hint(&pending), "Stage 1 is PENDING approval.");

        let approved = snapshot(vec![stage(1, StageStatus::Approved)]);
        assert_eq!(
            next_action_hint(&approved),
            "Stage 1 approved - awaiting disbursement."
        );
    }

    #[test]
    fn test_locked_front_stage_falls_back_to_refresh() {
        let snap = snapshot(vec![stage(1, StageStatus::Locked)]);
        assert_eq!(next_action_hint(&snap), "Type **STATUS** to refresh.");
    }

    #[test]
    fn test_unknown_stage_number_gets_generic_file_hint() {
        assert_eq!(stage_file_hint(9), "the required file");
        assert_eq!(stage_file_hint(1), "Soil test (CSV)");
    }

    #[test]
    fn test_summary_contains_header_totals_and_stages() {
        let snap = snapshot(vec![
            stage(1, StageStatus::Completed),
            stage(2, StageStatus::Unlocked),
        ]);
        let summary = render_status_summary(&snap, 7);
        assert!(summary.contains("Jane Doe (ID: 7) - Season 3"));
        assert!(summary.contains("$250.00"));
        assert!(summary.contains("Claim status: NONE"));
        assert!(summary.contains("Stage 1 - COMPLETED"));
        assert!(summary.contains("Type **UPLOAD** to submit"));
    }
}
