use std::io::Read;

use chrono::Utc;
use serde::Deserialize;

use super::domain::{Ticket, TicketId};
use super::error::TriageError;

/// Failure while reading tickets from an external source.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read ticket source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ticket CSV data: {0}")]
    Csv(csv::Error),
    #[error(transparent)]
    Triage(#[from] TriageError),
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Utf8 { pos, .. } => {
                let line = pos.as_ref().map(|pos| pos.line()).unwrap_or_default();
                Self::Triage(TriageError::InvalidInput(format!(
                    "CSV row on line {line} is not UTF-8"
                )))
            }
            _ => Self::Csv(err),
        }
    }
}

/// Accept raw bytes as ticket text. Empty input is valid; non-UTF-8 input is not.
pub fn ticket_text_from_bytes(bytes: Vec<u8>) -> Result<String, TriageError> {
    String::from_utf8(bytes).map_err(|err| {
        TriageError::InvalidInput(format!(
            "ticket body is not UTF-8 (invalid byte at offset {})",
            err.utf8_error().valid_up_to()
        ))
    })
}

/// Read the whole source and accept it as ticket text.
pub fn read_ticket_text<R: Read>(mut reader: R) -> Result<String, IntakeError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(ticket_text_from_bytes(bytes)?)
}

#[derive(Debug, Deserialize)]
struct TicketRow {
    #[serde(default)]
    id: Option<String>,
    content: String,
}

/// Parse a CSV export with a `content` column and an optional `id` column.
pub fn read_csv_tickets<R: Read>(reader: R) -> Result<Vec<Ticket>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut tickets = Vec::new();
    for row in csv_reader.deserialize::<TicketRow>() {
        let row = row?;
        let created_at = Utc::now();
        let id = row
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(TicketId)
            .unwrap_or_else(|| TicketId::generate(created_at));
        tickets.push(Ticket::with_id(id, row.content, created_at));
    }
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_and_rejects_invalid_utf8() {
        assert_eq!(ticket_text_from_bytes(Vec::new()).expect("empty ok"), "");

        let err = ticket_text_from_bytes(vec![b'o', b'k', 0xff, 0xfe]).expect_err("invalid utf8");
        match err {
            TriageError::InvalidInput(message) => assert!(message.contains("offset 2")),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn csv_rows_keep_supplied_ids_and_generate_missing_ones() {
        let data = "id,content\nCUST-1,My invoice is wrong\n,Login is broken\n";

        let tickets = read_csv_tickets(data.as_bytes()).expect("csv parses");

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id(), &TicketId("CUST-1".to_string()));
        assert_eq!(tickets[0].content(), "My invoice is wrong");
        assert!(tickets[1].id().0.starts_with("TKT-"));
    }

    #[test]
    fn csv_without_id_column_is_accepted() {
        let data = "content\n\"Thanks, great service\"\n";

        let tickets = read_csv_tickets(data.as_bytes()).expect("csv parses");

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].content(), "Thanks, great service");
    }

    #[test]
    fn csv_rows_with_invalid_utf8_are_invalid_input() {
        let mut data = b"content\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b'\n']);

        let err = read_csv_tickets(data.as_slice()).expect_err("invalid utf8 row");
        assert!(matches!(
            err,
            IntakeError::Triage(TriageError::InvalidInput(_))
        ));
    }
}
