//! Plain-text rendering for the vocabulary menu and the feedback log.

use std::io::{self, Write};

use topica_ai::TopicLabel;
use topica_store::FeedbackRecord;

const MAX_TEXT_CHARS: usize = 100;

/// Write the id → topic vocabulary table.
pub fn write_label_menu(out: &mut impl Write) -> io::Result<()> {
    for (id, label) in TopicLabel::ALL.iter().enumerate() {
        writeln!(out, "  {id:>2}  {label}")?;
    }
    Ok(())
}

/// Write the feedback log, one block per record in insertion order.
pub fn write_log(out: &mut impl Write, records: &[FeedbackRecord]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out, "Feedback log is empty.")?;
        return Ok(());
    }

    for record in records {
        let outcome = if record.predicted_label == record.actual_label {
            "confirmed"
        } else {
            "corrected"
        };
        writeln!(
            out,
            "{}  [{outcome}] {} -> {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            record.predicted_label,
            record.actual_label,
        )?;
        writeln!(out, "    {}", truncate(&record.text, MAX_TEXT_CHARS))?;
    }
    writeln!(out, "{} record(s)", records.len())?;
    Ok(())
}

/// Truncate on a character boundary, marking elision.
fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}…", &text[..byte_idx]),
        None => text.to_string(),
    }
}
