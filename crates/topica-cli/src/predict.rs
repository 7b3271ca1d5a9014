//! The predict-and-feedback interaction flow.
//!
//! One interaction runs strictly in sequence: predict, display, then ask the
//! user whether the prediction was correct. Confirmation logs the predicted
//! label as the actual label; a correction shows the vocabulary menu and logs
//! the chosen label instead.

use std::io::{self, BufRead, Write};

use topica_ai::{TopicClassifier, TopicLabel};
use topica_core::ClassificationRequest;
use topica_store::FeedbackLog;

use crate::display;

/// Scratch state for one interaction: the inputs that produced the last
/// prediction. Passed explicitly to the feedback step rather than held in
/// ambient globals.
pub struct Interaction {
    pub text: String,
    pub predicted: TopicLabel,
}

/// Run one full interaction against stdin/stdout.
pub fn run(
    classifier: &mut TopicClassifier,
    log: &FeedbackLog,
    request: ClassificationRequest,
    skip_feedback: bool,
) -> anyhow::Result<()> {
    let predicted = classifier.predict(&request)?;
    println!("Predicted topic: {predicted}");

    if skip_feedback {
        return Ok(());
    }

    let interaction = Interaction {
        text: request.text,
        predicted,
    };
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    collect_feedback(&interaction, log, &mut stdin.lock(), &mut out)
}

/// Ask whether the prediction was correct and append the outcome to the log.
fn collect_feedback(
    interaction: &Interaction,
    log: &FeedbackLog,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    write!(output, "Is this prediction correct? [y/n] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        log.append(
            &interaction.text,
            interaction.predicted.as_str(),
            interaction.predicted.as_str(),
        )?;
        writeln!(output, "Feedback saved, thanks.")?;
        return Ok(());
    }

    writeln!(output, "What is the correct topic?")?;
    display::write_label_menu(output)?;
    write!(output, "Topic id: ")?;
    output.flush()?;

    let mut choice = String::new();
    input.read_line(&mut choice)?;
    let choice = choice.trim();
    let id: usize = choice
        .parse()
        .map_err(|_| anyhow::anyhow!("expected a topic id, got {choice:?}"))?;
    let actual = TopicLabel::ALL
        .get(id)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("no topic with id {id}"))?;

    log.append(
        &interaction.text,
        interaction.predicted.as_str(),
        actual.as_str(),
    )?;
    writeln!(output, "Correction submitted, thank you.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn temp_log() -> (tempfile::TempDir, FeedbackLog) {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = FeedbackLog::new(tmp.path().join("user_feedback.csv"));
        (tmp, log)
    }

    fn interaction() -> Interaction {
        Interaction {
            text: "hospital staffing consultation".to_string(),
            predicted: TopicLabel::HealthcarePublicServices,
        }
    }

    #[test]
    fn confirmation_logs_predicted_as_actual() {
        let (_tmp, log) = temp_log();
        let mut input = Cursor::new("y\n");
        let mut output = Vec::new();

        collect_feedback(&interaction(), &log, &mut input, &mut output).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].predicted_label, "Healthcare & Public Services");
        assert_eq!(records[0].actual_label, "Healthcare & Public Services");
        assert!(String::from_utf8(output).unwrap().contains("Feedback saved"));
    }

    #[test]
    fn correction_logs_chosen_label() {
        let (_tmp, log) = temp_log();
        // "n", then topic id 16 = Public Health & Pandemic Policy.
        let mut input = Cursor::new("n\n16\n");
        let mut output = Vec::new();

        collect_feedback(&interaction(), &log, &mut input, &mut output).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records[0].predicted_label, "Healthcare & Public Services");
        assert_eq!(records[0].actual_label, "Public Health & Pandemic Policy");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("What is the correct topic?"));
        assert!(shown.contains("Public Health & Pandemic Policy"));
    }

    #[test]
    fn correction_rejects_bad_id_without_logging() {
        let (_tmp, log) = temp_log();
        let mut input = Cursor::new("n\n42\n");
        let mut output = Vec::new();

        let err = collect_feedback(&interaction(), &log, &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("no topic with id 42"));
        assert_eq!(log.count().unwrap(), 0);
    }

    #[test]
    fn correction_rejects_non_numeric_choice() {
        let (_tmp, log) = temp_log();
        let mut input = Cursor::new("no\nhealthcare\n");
        let mut output = Vec::new();

        assert!(collect_feedback(&interaction(), &log, &mut input, &mut output).is_err());
        assert_eq!(log.count().unwrap(), 0);
    }
}
