//! The feature contract between request assembly and the model artifact.
//!
//! The classifier was trained on a fixed set of named columns. The artifact's
//! ONNX export keeps one named input per column: the free text arrives as the
//! token tensors produced by the artifact's own tokenizer, every other column
//! as a single-element tensor. Input names and order are part of the trained
//! contract — a mismatch is a configuration error, caught once at load time
//! rather than at first prediction.

use crate::request::ClassificationRequest;

/// Bumped whenever the input name list or ordering changes.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Value injected for the `TopicProbability_HDBSCAN` column.
///
/// The training pipeline hard-codes this constant in place of the clustering
/// probability it no longer computes at serving time. Kept configurable on
/// the classifier; do not change the default without retraining.
pub const TOPIC_PROBABILITY_PLACEHOLDER: f32 = 0.0;

/// Token tensors carrying `CombinedText`, in artifact order.
pub const TEXT_INPUTS: &[&str] = &["input_ids", "attention_mask"];

/// f32 scalar inputs, shape `[1, 1]`, in artifact order.
pub const FLOAT_INPUTS: &[&str] = &[
    "TopicProbability_HDBSCAN",
    "Longitude",
    "Latitude",
    "Budget(USD)",
];

/// i64 vocabulary-code inputs, shape `[1, 1]`, in artifact order.
pub const CODE_INPUTS: &[&str] = &[
    "PPMethods",
    "TargetedAudience",
    "Completeness",
    "GeogScope",
    "Purpose",
    "Category",
    "FacilitationType",
];

/// The full ordered input-name list the loaded artifact must expose.
pub fn model_inputs() -> Vec<&'static str> {
    TEXT_INPUTS
        .iter()
        .chain(FLOAT_INPUTS.iter())
        .chain(CODE_INPUTS.iter())
        .copied()
        .collect()
}

/// Float column values for one request, aligned with [`FLOAT_INPUTS`].
///
/// `topic_probability` is the injected placeholder — it comes from the
/// classifier's configuration, never from the request.
pub fn float_features(req: &ClassificationRequest, topic_probability: f32) -> [f32; 4] {
    [
        topic_probability,
        req.longitude as f32,
        req.latitude as f32,
        req.budget_usd as f32,
    ]
}

/// Vocabulary-code column values for one request, aligned with [`CODE_INPUTS`].
pub fn code_features(req: &ClassificationRequest) -> [i64; 7] {
    [
        req.pp_method.code(),
        req.target_audience.code(),
        req.completeness.code(),
        req.geog_scope.code(),
        req.purpose.code(),
        req.category.code(),
        req.facilitation.code(),
    ]
}
