//! ONNX Runtime inference for the pre-trained topic classifier.
//!
//! The model directory must contain `model.onnx` and `tokenizer.json`. The
//! ONNX export keeps one named input per trained feature column: the free
//! text arrives tokenised as `input_ids`/`attention_mask`, every other column
//! as a single-element tensor. The first output is the predicted class index.

use std::path::Path;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use topica_core::ClassificationRequest;
use topica_core::schema;

use crate::labels::TopicLabel;

/// The loaded classification artifact.
///
/// Load once at startup; the session is read-only shared state for the
/// process lifetime. If loading fails the caller must refuse to serve
/// predictions — there is no degraded mode.
#[derive(Debug)]
pub struct TopicClassifier {
    session: Session,
    tokenizer: Tokenizer,
    topic_probability: f32,
}

impl TopicClassifier {
    /// Load the artifact from a directory containing `model.onnx` and `tokenizer.json`.
    ///
    /// Verifies the artifact's input names against the feature schema before
    /// returning, so a stale or mismatched export fails here rather than at
    /// first prediction.
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );

        let session = Session::builder()?.commit_from_file(&model_path)?;

        let input_names: Vec<&str> = session.inputs().iter().map(|i| i.name()).collect();
        verify_input_names(&input_names)?;
        anyhow::ensure!(
            !session.outputs().is_empty(),
            "model has no outputs, expected a class-index tensor"
        );

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;

        // Truncate to the text encoder's max length.
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: 256,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;

        info!(
            model = %model_path.display(),
            schema = schema::FEATURE_SCHEMA_VERSION,
            "loaded topic classifier"
        );
        Ok(Self {
            session,
            tokenizer,
            topic_probability: schema::TOPIC_PROBABILITY_PLACEHOLDER,
        })
    }

    /// Override the injected `TopicProbability_HDBSCAN` value.
    ///
    /// Construction-time configuration only — requests never carry this field.
    pub fn with_topic_probability(mut self, value: f32) -> Self {
        self.topic_probability = value;
        self
    }

    /// Classify one request, returning exactly one label.
    ///
    /// Pure function of the request and the loaded artifact. Out-of-range
    /// class indices decode to [`TopicLabel::Unknown`].
    pub fn predict(&mut self, req: &ClassificationRequest) -> anyhow::Result<TopicLabel> {
        let encoding = self
            .tokenizer
            .encode(req.text.as_str(), true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        let seq_len = encoding.get_ids().len();
        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();

        let text_shape = [1i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((text_shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((text_shape, attention_mask.into_boxed_slice()))?;

        let floats = schema::float_features(req, self.topic_probability);
        let codes = schema::code_features(req);

        let outputs = self.session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
            "TopicProbability_HDBSCAN" => scalar_f32(floats[0])?,
            "Longitude" => scalar_f32(floats[1])?,
            "Latitude" => scalar_f32(floats[2])?,
            "Budget(USD)" => scalar_f32(floats[3])?,
            "PPMethods" => scalar_i64(codes[0])?,
            "TargetedAudience" => scalar_i64(codes[1])?,
            "Completeness" => scalar_i64(codes[2])?,
            "GeogScope" => scalar_i64(codes[3])?,
            "Purpose" => scalar_i64(codes[4])?,
            "Category" => scalar_i64(codes[5])?,
            "FacilitationType" => scalar_i64(codes[6])?,
        ])?;

        // First output is the label tensor: one i64 class index per row.
        let (output_shape, output_data) = outputs[0].try_extract_tensor::<i64>()?;
        let dims: &[i64] = output_shape;
        anyhow::ensure!(
            !output_data.is_empty(),
            "model returned an empty label tensor, shape {dims:?}"
        );

        let index = output_data[0];
        let label = TopicLabel::from_index(index);
        debug!(index, label = %label, "prediction");
        Ok(label)
    }
}

/// Check the artifact's input names against the trained feature contract.
///
/// Names and order must match exactly. A mismatch means the artifact and this
/// build disagree about the feature schema — a configuration error, so the
/// classifier refuses to load.
fn verify_input_names(actual: &[&str]) -> anyhow::Result<()> {
    let expected = schema::model_inputs();
    anyhow::ensure!(
        actual == expected.as_slice(),
        "artifact inputs do not match feature schema v{}: expected {expected:?}, artifact has {actual:?}",
        schema::FEATURE_SCHEMA_VERSION
    );
    Ok(())
}

/// Single-element `[1, 1]` float tensor for one scalar column.
fn scalar_f32(value: f32) -> anyhow::Result<Tensor<f32>> {
    Ok(Tensor::from_array(([1i64, 1], vec![value].into_boxed_slice()))?)
}

/// Single-element `[1, 1]` code tensor for one categorical column.
fn scalar_i64(value: i64) -> anyhow::Result<Tensor<i64>> {
    Ok(Tensor::from_array(([1i64, 1], vec![value].into_boxed_slice()))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use topica_core::vocab::{
        Category, Completeness, FacilitationType, GeogScope, PpMethod, Purpose, TargetAudience,
    };

    fn model_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("topic-classifier")
    }

    /// Artifact-backed tests skip (rather than fail) when the export is not
    /// on disk, since the model is produced by the training pipeline.
    fn artifact_present() -> bool {
        let dir = model_dir();
        if dir.join("model.onnx").exists() && dir.join("tokenizer.json").exists() {
            true
        } else {
            eprintln!("skipping: no topic-classifier artifact in {dir:?}");
            false
        }
    }

    fn request() -> ClassificationRequest {
        ClassificationRequest {
            text: "Participatory budgeting assembly for the city's cycling infrastructure"
                .to_string(),
            longitude: 2.35,
            latitude: 48.85,
            budget_usd: 250_000.0,
            pp_method: PpMethod::ParticipatoryBudgeting,
            target_audience: TargetAudience::GeneralPublic,
            completeness: Completeness::new(2).unwrap(),
            geog_scope: GeogScope::Local,
            purpose: Purpose::PublicDecision,
            category: Category::CommunityEnvironment,
            facilitation: FacilitationType::Professional,
        }
    }

    #[test]
    fn accepts_matching_input_names() {
        let expected = schema::model_inputs();
        assert!(verify_input_names(&expected).is_ok());
    }

    #[test]
    fn rejects_renamed_input() {
        let mut names = schema::model_inputs();
        names[2] = "TopicProbability";
        let err = verify_input_names(&names).unwrap_err();
        assert!(err.to_string().contains("feature schema"));
    }

    #[test]
    fn rejects_reordered_inputs() {
        let mut names = schema::model_inputs();
        names.swap(4, 5);
        assert!(verify_input_names(&names).is_err());
    }

    #[test]
    fn rejects_missing_input() {
        let mut names = schema::model_inputs();
        names.pop();
        assert!(verify_input_names(&names).is_err());
    }

    #[test]
    fn load_missing_artifact_errors() {
        let err = TopicClassifier::load(Path::new("/nonexistent/model-dir")).unwrap_err();
        assert!(err.to_string().contains("model.onnx"));
    }

    #[test]
    fn load_artifact() {
        if !artifact_present() {
            return;
        }
        let classifier = TopicClassifier::load(&model_dir()).unwrap();
        assert_eq!(
            classifier.topic_probability,
            schema::TOPIC_PROBABILITY_PLACEHOLDER
        );
    }

    #[test]
    fn predict_returns_vocabulary_label() {
        if !artifact_present() {
            return;
        }
        let mut classifier = TopicClassifier::load(&model_dir()).unwrap();
        let label = classifier.predict(&request()).unwrap();
        assert!(
            label == TopicLabel::Unknown || TopicLabel::ALL.contains(&label),
            "unexpected label {label}"
        );
    }

    #[test]
    fn predict_is_deterministic() {
        if !artifact_present() {
            return;
        }
        let mut classifier = TopicClassifier::load(&model_dir()).unwrap();
        let req = request();
        let first = classifier.predict(&req).unwrap();
        let second = classifier.predict(&req).unwrap();
        assert_eq!(first, second);
    }
}
