//! Status snapshot wire types.
//!
//! These mirror the backend's `/api/farmer/{id}/status` response. A snapshot
//! is received whole on every fetch and replaced wholesale; the engine never
//! merges partial updates into it.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a single loan stage.
///
/// A stage only ever advances forward along
/// `LOCKED -> UNLOCKED -> PENDING -> APPROVED -> COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StageStatus {
    /// Not yet reachable; an earlier stage gates it.
    Locked,
    /// Ready for the farmer to submit the stage document.
    Unlocked,
    /// Document submitted, awaiting field-officer approval.
    Pending,
    /// Approved, awaiting lender disbursement.
    Approved,
    /// Disbursed and closed.
    Completed,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Locked => "LOCKED",
            Self::Unlocked => "UNLOCKED",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Completed => "COMPLETED",
        })
    }
}

/// One of the seven fixed sequential milestones in a financing season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub stage_number: u32,
    pub stage_name: String,
    pub status: StageStatus,
    pub disbursement_amount: f64,
}

/// One factor contributing to the proficiency score explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XaiFactor {
    pub factor: String,
    pub weight: f64,
}

/// Score and disbursement aggregates for the current season.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentStatus {
    #[serde(default)]
    pub total_disbursed: f64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub risk_band: String,
    #[serde(default)]
    pub xai_factors: Vec<XaiFactor>,
}

/// The full structured status of a farmer's season as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub farmer_id: Option<u64>,
    pub name: String,
    pub season_number: u32,
    #[serde(default)]
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub has_insurance: bool,
    #[serde(default)]
    pub insurance_claim_status: Option<String>,
    #[serde(default)]
    pub current_status: CurrentStatus,
}

impl StatusSnapshot {
    /// True when every stage of the season has been disbursed and closed.
    pub fn is_season_complete(&self) -> bool {
        !self.stages.is_empty()
            && self
                .stages
                .iter()
                .all(|s| s.status == StageStatus::Completed)
    }

    /// The first stage, in stage order, that has not completed yet.
    pub fn first_incomplete_stage(&self) -> Option<&Stage> {
        self.stages
            .iter()
            .find(|s| s.status != StageStatus::Completed)
    }

    /// The first stage currently open for a document upload.
    pub fn first_unlocked_stage(&self) -> Option<&Stage> {
        self.stages
            .iter()
            .find(|s| s.status == StageStatus::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            season_number: 1,
            stages,
            has_insurance: false,
            insurance_claim_status: None,
            current_status: CurrentStatus::default(),
        }
    }

    #[test]
    fn test_stage_status_wire_format() {
        let parsed: StageStatus = serde_json::from_str("\"UNLOCKED\"").unwrap();
        assert_eq!(parsed, StageStatus::Unlocked);
        assert_eq!(
            serde_json::to_string(&StageStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
    }

    #[test]
    fn test_season_complete_requires_all_stages() {
        let done = snapshot(vec![
            stage(1, StageStatus::Completed),
            stage(2, StageStatus::Completed),
        ]);
        assert!(done.is_season_complete());

        let open = snapshot(vec![
            stage(1, StageStatus::Completed),
            stage(2, StageStatus::Pending),
        ]);
        assert!(!open.is_season_complete());
        assert!(!snapshot(Vec::new()).is_season_complete());
    }

    #[test]
    fn test_first_incomplete_and_unlocked_stage() {
        let snap = snapshot(vec![
            stage(1, StageStatus::Completed),
            stage(2, StageStatus::Unlocked),
            stage(3, StageStatus::Locked),
        ]);
        assert_eq!(snap.first_incomplete_stage().unwrap().stage_number, 2);
        assert_eq!(snap.first_unlocked_stage().unwrap().stage_number, 2);
    }

    #[test]
    fn test_snapshot_tolerates_missing_optional_fields() {
        let raw = r#"{
            "name": "Jane Doe",
            "season_number": 2,
            "stages": [
                {"stage_number": 1, "stage_name": "Soil Test", "status": "UNLOCKED", "disbursement_amount": 50.0}
            ]
        }"#;
        let snap: StatusSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.season_number, 2);
        assert!(!snap.has_insurance);
        assert_eq!(snap.current_status.total_disbursed, 0.0);
    }
}
