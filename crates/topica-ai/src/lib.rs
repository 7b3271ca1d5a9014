//! AI inference layer: the ONNX topic classifier and its fixed label vocabulary.

pub mod labels;

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::TopicClassifier;

pub use labels::TopicLabel;
