use std::path::Path;

use anyhow::{Context, Result};
use plink_access::{CrudAction, ModuleId, PermissionSet, RoleId};
use plink_match::{MatchScorer, ScoringConfig};
use tracing::{info, info_span, warn};

use crate::cli::{PermissionsArgs, RankArgs, ScoreArgs};
use crate::input::{load_candidates, load_config, load_grants, load_record};
use crate::logging::redact_value;
use crate::types::{PermissionsOutcome, RankOutcome, RankRow, ScoreOutcome};

pub fn run_score(args: &ScoreArgs, config_path: Option<&Path>) -> Result<ScoreOutcome> {
    let scorer = build_scorer(config_path)?;
    let source = args.source.as_deref().map(load_record).transpose()?;
    let candidate = load_record(&args.candidate)?;
    if source.is_none() {
        warn!("no source record given; scoring against nothing");
    }

    let explanation = scorer.explain(source.as_ref(), &candidate);
    info!(
        candidate = redact_value(&candidate.display_name()),
        score = explanation.result.score,
        level = %explanation.result.level,
        "scored candidate"
    );
    Ok(ScoreOutcome {
        source,
        candidate,
        explanation,
    })
}

pub fn run_rank(args: &RankArgs, config_path: Option<&Path>) -> Result<RankOutcome> {
    let span = info_span!("rank", candidates = %args.candidates.display());
    let _guard = span.enter();

    let scorer = build_scorer(config_path)?;
    let source = args.source.as_deref().map(load_record).transpose()?;
    if let Some(source) = &source {
        info!(source = redact_value(&source.display_name()), "ranking candidates");
    } else {
        warn!("no source record given; every candidate scores 0");
    }
    let candidates = load_candidates(&args.candidates)?;

    let limit = args.limit.unwrap_or(usize::MAX);
    let rows: Vec<RankRow> = scorer
        .rank(source.as_ref(), &candidates)
        .into_iter()
        .filter(|ranked| ranked.result.score >= args.min_score)
        .take(limit)
        .map(|ranked| RankRow {
            index: ranked.index,
            candidate: ranked.candidate.clone(),
            result: ranked.result,
        })
        .collect();
    info!(
        total = candidates.len(),
        shown = rows.len(),
        min_score = args.min_score,
        "ranked candidates"
    );
    Ok(RankOutcome {
        total: candidates.len(),
        rows,
    })
}

pub fn run_config(config_path: Option<&Path>) -> Result<ScoringConfig> {
    load_config(config_path)
}

pub fn run_permissions(args: &PermissionsArgs) -> Result<PermissionsOutcome> {
    let grants = load_grants(&args.grants)?;
    let roles = args
        .roles
        .iter()
        .map(|role| RoleId::new(role.as_str()).with_context(|| format!("role {role:?}")))
        .collect::<Result<Vec<_>>>()?;
    let permissions = PermissionSet::from_grants(&roles, &grants);

    match (&args.module, args.action) {
        (Some(module), Some(action)) => {
            let module = ModuleId::new(module.as_str()).context("invalid --module")?;
            let action = CrudAction::from(action);
            let allowed = permissions.can(&module, action);
            info!(module = %module, action = %action, allowed, "permission check");
            Ok(PermissionsOutcome::Check {
                module,
                action,
                allowed,
            })
        }
        _ => Ok(PermissionsOutcome::Matrix(permissions)),
    }
}

fn build_scorer(config_path: Option<&Path>) -> Result<MatchScorer> {
    let config = load_config(config_path)?;
    Ok(MatchScorer::new(config))
}
