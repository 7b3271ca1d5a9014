use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use topica_ai::{TopicClassifier, TopicLabel};
use topica_core::{
    Category, ClassificationRequest, Completeness, FacilitationType, GeogScope, PpMethod, Purpose,
    TargetAudience,
};
use topica_store::FeedbackLog;

mod display;
mod predict;

/// Topic classification with human feedback for civic-participation records.
#[derive(Parser)]
#[command(name = "topica", version, about)]
struct Cli {
    /// Directory containing `model.onnx` and `tokenizer.json`.
    #[arg(
        long,
        global = true,
        env = "TOPICA_MODEL_DIR",
        default_value = "models/topic-classifier"
    )]
    model_dir: PathBuf,

    /// Path of the feedback CSV log.
    #[arg(
        long,
        global = true,
        env = "TOPICA_FEEDBACK_LOG",
        default_value = "user_feedback.csv"
    )]
    feedback_log: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one participation record, then confirm or correct the result.
    Predict(PredictArgs),
    /// List the topic-label vocabulary.
    Labels,
    /// Show the recorded feedback log.
    Log,
    /// Append a feedback record without running a prediction.
    Feedback(FeedbackArgs),
}

#[derive(Args)]
struct PredictArgs {
    /// Combined free text describing the activity.
    #[arg(long)]
    text: String,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    longitude: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    latitude: f64,

    /// Budget in USD.
    #[arg(long, default_value_t = 10_000.0)]
    budget: f64,

    /// Public-participation method, e.g. "Participatory Budgeting".
    #[arg(long, default_value = "Participatory Budgeting")]
    pp_method: PpMethod,

    /// Audience the activity was aimed at.
    #[arg(long, default_value = "General Public")]
    target_audience: TargetAudience,

    /// Record completeness grade, 1..=3.
    #[arg(long, default_value = "1")]
    completeness: Completeness,

    /// Geographic scope of the activity.
    #[arg(long, default_value = "Local")]
    geog_scope: GeogScope,

    /// Declared purpose of the activity.
    #[arg(long, default_value = "Consulting")]
    purpose: Purpose,

    /// Broad subject category assigned by the source.
    #[arg(long, default_value = "Social Issues")]
    category: Category,

    /// How the activity was facilitated.
    #[arg(long, default_value = "Professional")]
    facilitation: FacilitationType,

    /// Print the prediction and exit without asking for feedback.
    #[arg(long)]
    no_feedback: bool,

    /// Override the injected `TopicProbability_HDBSCAN` constant.
    #[arg(long)]
    topic_probability: Option<f32>,
}

impl PredictArgs {
    fn to_request(&self) -> ClassificationRequest {
        ClassificationRequest {
            text: self.text.clone(),
            longitude: self.longitude,
            latitude: self.latitude,
            budget_usd: self.budget,
            pp_method: self.pp_method,
            target_audience: self.target_audience,
            completeness: self.completeness,
            geog_scope: self.geog_scope,
            purpose: self.purpose,
            category: self.category,
            facilitation: self.facilitation,
        }
    }
}

#[derive(Args)]
struct FeedbackArgs {
    /// The text the prediction was made for.
    #[arg(long)]
    text: String,

    /// The label the classifier predicted.
    #[arg(long, value_parser = parse_predicted_label)]
    predicted: String,

    /// The label the user says is correct.
    #[arg(long, value_parser = parse_known_label)]
    actual: String,
}

/// Resolve a topic name against the fixed vocabulary.
fn parse_known_label(s: &str) -> Result<String, String> {
    TopicLabel::from_name(s)
        .map(|l| l.as_str().to_string())
        .ok_or_else(|| format!("unknown topic label {s:?}, run `topica labels` to list them"))
}

/// Predicted labels may additionally be the "Unknown" sentinel.
fn parse_predicted_label(s: &str) -> Result<String, String> {
    if s == TopicLabel::Unknown.as_str() {
        return Ok(s.to_string());
    }
    parse_known_label(s)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Predict(args) => {
            // Fatal startup condition: no artifact, no predictions.
            let mut classifier = TopicClassifier::load(&cli.model_dir)
                .context("topic classifier unavailable, refusing to predict")?;
            if let Some(p) = args.topic_probability {
                classifier = classifier.with_topic_probability(p);
            }

            let log = FeedbackLog::new(&cli.feedback_log);
            let request = args.to_request();
            predict::run(&mut classifier, &log, request, args.no_feedback)?;
        }
        Command::Labels => {
            let mut out = std::io::stdout().lock();
            display::write_label_menu(&mut out)?;
        }
        Command::Log => {
            let log = FeedbackLog::new(&cli.feedback_log);
            let records = log.read_all().context("reading feedback log")?;
            let mut out = std::io::stdout().lock();
            display::write_log(&mut out, &records)?;
        }
        Command::Feedback(args) => {
            let log = FeedbackLog::new(&cli.feedback_log);
            let record = log
                .append(&args.text, &args.predicted, &args.actual)
                .context("appending feedback record")?;
            info!(
                predicted = %record.predicted_label,
                actual = %record.actual_label,
                "feedback recorded"
            );
            println!("Feedback saved to {}", log.path().display());
        }
    }

    Ok(())
}
