//! The input record for one prediction.

use crate::vocab::{
    Category, Completeness, FacilitationType, GeogScope, PpMethod, Purpose, TargetAudience,
};

/// Everything the caller supplies for one classification.
///
/// Numeric fields are passed through to the model unvalidated; the closed
/// vocabularies are validated by construction. The topic-probability
/// placeholder the model also expects is *not* part of the request — the
/// classifier injects it, so callers cannot override it.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    /// Combined free text describing the activity.
    pub text: String,
    pub longitude: f64,
    pub latitude: f64,
    pub budget_usd: f64,
    pub pp_method: PpMethod,
    pub target_audience: TargetAudience,
    pub completeness: Completeness,
    pub geog_scope: GeogScope,
    pub purpose: Purpose,
    pub category: Category,
    pub facilitation: FacilitationType,
}
