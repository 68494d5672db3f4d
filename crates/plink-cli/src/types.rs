use plink_access::{CrudAction, ModuleId, PermissionSet};
use plink_match::Explanation;
use plink_model::{IdentityRecord, MatchResult};
use serde::Serialize;

#[derive(Debug)]
pub struct ScoreOutcome {
    pub source: Option<IdentityRecord>,
    pub candidate: IdentityRecord,
    pub explanation: Explanation,
}

#[derive(Debug, Serialize)]
pub struct RankRow {
    /// Position in the candidate file.
    pub index: usize,
    pub candidate: IdentityRecord,
    pub result: MatchResult,
}

#[derive(Debug)]
pub struct RankOutcome {
    pub total: usize,
    pub rows: Vec<RankRow>,
}

#[derive(Debug)]
pub enum PermissionsOutcome {
    Matrix(PermissionSet),
    Check {
        module: ModuleId,
        action: CrudAction,
        allowed: bool,
    },
}

impl PermissionsOutcome {
    /// Process exit code: a denied check fails so scripts can branch on it.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Check { allowed: false, .. } => 1,
            _ => 0,
        }
    }
}
