use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Named checkpoint of a publish attempt, for progress display only.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Init,
    Initializing,
    Creating,
    Signing,
    Submitting,
    Confirmed,
    Failed,
}

impl Stage {
    /// `init`, `confirmed` and `failed` re-enable the publish control.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Init | Stage::Confirmed | Stage::Failed)
    }

    /// Progress shown when the flow enters this stage.
    pub fn nominal_progress(&self) -> u8 {
        match self {
            Stage::Init => 0,
            Stage::Initializing => 10,
            Stage::Creating => 30,
            Stage::Signing => 50,
            Stage::Submitting => 75,
            Stage::Confirmed => 100,
            Stage::Failed => 0,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Stage::Init => write!(f, "init"),
            Stage::Initializing => write!(f, "initializing"),
            Stage::Creating => write!(f, "creating"),
            Stage::Signing => write!(f, "signing"),
            Stage::Submitting => write!(f, "submitting"),
            Stage::Confirmed => write!(f, "confirmed"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

/// Stage plus the 0-100 progress value reported with it.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageUpdate {
    pub stage: Stage,
    pub progress: u8,
}
