//! Reasoning engine: runs a rule catalog against a snapshot pair.
//!
//! Evaluation is pure. Every rule is checked against `(current, previous)`,
//! triggered rules are ordered by `(priority, id)` and their templates are
//! rendered. Nothing is returned unless both snapshots carry a timestamp and
//! a finite close.

use crate::models::indicators::{IndicatorSnapshot, SnapshotField};
use crate::models::signal::Reason;
use crate::signals::catalog::RuleCatalog;
use crate::signals::error::{ReasoningError, SnapshotRole};
use crate::signals::rules::Rule;

pub struct ReasoningEngine;

impl ReasoningEngine {
    /// Rendered messages of every triggered rule, in display order
    pub fn evaluate(
        current: &IndicatorSnapshot,
        previous: Option<&IndicatorSnapshot>,
        catalog: &RuleCatalog,
    ) -> Result<Vec<String>, ReasoningError> {
        Ok(Self::evaluate_detailed(current, previous, catalog)?
            .into_iter()
            .map(|reason| reason.message)
            .collect())
    }

    /// Same as [`ReasoningEngine::evaluate`], keeping rule metadata
    pub fn evaluate_detailed(
        current: &IndicatorSnapshot,
        previous: Option<&IndicatorSnapshot>,
        catalog: &RuleCatalog,
    ) -> Result<Vec<Reason>, ReasoningError> {
        validate(current, SnapshotRole::Current)?;
        if let Some(previous) = previous {
            validate(previous, SnapshotRole::Previous)?;
        }

        let mut triggered: Vec<&Rule> = catalog
            .iter()
            .filter(|rule| rule.matches(current, previous))
            .collect();
        triggered.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));

        Ok(triggered
            .into_iter()
            .map(|rule| Reason {
                rule_id: rule.id.clone(),
                category: rule.category,
                bias: rule.bias,
                strength: rule.strength,
                priority: rule.priority,
                message: rule.render(current, previous),
            })
            .collect())
    }
}

/// Free-function form of [`ReasoningEngine::evaluate`]
pub fn evaluate(
    current: &IndicatorSnapshot,
    previous: Option<&IndicatorSnapshot>,
    catalog: &RuleCatalog,
) -> Result<Vec<String>, ReasoningError> {
    ReasoningEngine::evaluate(current, previous, catalog)
}

fn validate(snapshot: &IndicatorSnapshot, role: SnapshotRole) -> Result<(), ReasoningError> {
    if snapshot.timestamp.is_none() {
        return Err(ReasoningError::InvalidSnapshot {
            role,
            field: "timestamp",
        });
    }
    if snapshot.get(SnapshotField::Close).is_none() {
        return Err(ReasoningError::InvalidSnapshot { role, field: "close" });
    }
    Ok(())
}
