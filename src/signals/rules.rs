//! Rule definition and predicate building blocks.
//!
//! A predicate is a pure function of `(current, previous)`. The helpers here
//! read fields through [`IndicatorSnapshot::get`], so an absent or non-finite
//! field always makes the predicate false.

use std::fmt;
use std::sync::Arc;

use crate::indicators::registry::IndicatorCategory;
use crate::models::indicators::{IndicatorSnapshot, SnapshotField};
use crate::models::signal::{Bias, Strength};
use crate::signals::error::CatalogError;
use crate::signals::template::MessageTemplate;

pub type Predicate = Arc<dyn Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct Rule {
    pub id: String,
    pub category: IndicatorCategory,
    pub bias: Bias,
    pub strength: Strength,
    /// Lower values are displayed first
    pub priority: i32,
    template: MessageTemplate,
    predicate: Predicate,
}

impl Rule {
    pub fn new<P>(
        id: impl Into<String>,
        category: IndicatorCategory,
        bias: Bias,
        strength: Strength,
        priority: i32,
        template: &str,
        predicate: P,
    ) -> Result<Self, CatalogError>
    where
        P: Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static,
    {
        let id = id.into();
        let template = MessageTemplate::parse(template).map_err(|source| CatalogError::Template {
            rule: id.clone(),
            source,
        })?;
        Ok(Self {
            id,
            category,
            bias,
            strength,
            priority,
            template,
            predicate: Arc::new(predicate),
        })
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn matches(&self, current: &IndicatorSnapshot, previous: Option<&IndicatorSnapshot>) -> bool {
        (self.predicate)(current, previous)
    }

    pub fn render(&self, current: &IndicatorSnapshot, previous: Option<&IndicatorSnapshot>) -> String {
        self.template.render(current, previous)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("bias", &self.bias)
            .field("strength", &self.strength)
            .field("priority", &self.priority)
            .field("template", &self.template.source())
            .finish()
    }
}

/// `field < threshold` on the current snapshot
pub fn below(
    field: SnapshotField,
    threshold: f64,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| current.get(field).is_some_and(|value| value < threshold)
}

/// `field > threshold` on the current snapshot
pub fn above(
    field: SnapshotField,
    threshold: f64,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| current.get(field).is_some_and(|value| value > threshold)
}

/// `left > right` on the current snapshot
pub fn greater_than(
    left: SnapshotField,
    right: SnapshotField,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| match (current.get(left), current.get(right)) {
        (Some(l), Some(r)) => l > r,
        _ => false,
    }
}

/// `left` moved from at-or-below `right` on the previous snapshot to above it
/// on the current one. False without a previous snapshot.
pub fn crossed_above(
    left: SnapshotField,
    right: SnapshotField,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, previous| {
        let Some(previous) = previous else {
            return false;
        };
        match (
            previous.get(left),
            previous.get(right),
            current.get(left),
            current.get(right),
        ) {
            (Some(pl), Some(pr), Some(cl), Some(cr)) => pl <= pr && cl > cr,
            _ => false,
        }
    }
}

/// Mirror of [`crossed_above`]
pub fn crossed_below(
    left: SnapshotField,
    right: SnapshotField,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, previous| {
        let Some(previous) = previous else {
            return false;
        };
        match (
            previous.get(left),
            previous.get(right),
            current.get(left),
            current.get(right),
        ) {
            (Some(pl), Some(pr), Some(cl), Some(cr)) => pl >= pr && cl < cr,
            _ => false,
        }
    }
}

/// `low <= field <= high` on the current snapshot
pub fn within(
    field: SnapshotField,
    low: f64,
    high: f64,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| current.get(field).is_some_and(|value| (low..=high).contains(&value))
}

/// `left > factor * right` on the current snapshot.
///
/// Compares without dividing, so a zero `right` still decides.
pub fn above_multiple(
    left: SnapshotField,
    right: SnapshotField,
    factor: f64,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| match (current.get(left), current.get(right)) {
        (Some(l), Some(r)) => l > factor * r,
        _ => false,
    }
}

/// `left < factor * right` on the current snapshot
pub fn below_multiple(
    left: SnapshotField,
    right: SnapshotField,
    factor: f64,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| match (current.get(left), current.get(right)) {
        (Some(l), Some(r)) => l < factor * r,
        _ => false,
    }
}

/// Every field strictly greater than the next one
pub fn descending(
    fields: Vec<SnapshotField>,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static {
    move |current, _| {
        let values: Option<Vec<f64>> = fields.iter().map(|field| current.get(*field)).collect();
        values.is_some_and(|values| values.windows(2).all(|pair| pair[0] > pair[1]))
    }
}

/// Both predicates hold
pub fn all_of<A, B>(
    first: A,
    second: B,
) -> impl Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static
where
    A: Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static,
    B: Fn(&IndicatorSnapshot, Option<&IndicatorSnapshot>) -> bool + Send + Sync + 'static,
{
    move |current, previous| first(current, previous) && second(current, previous)
}
