// Ticket Sequencer - collision-free ticket numbers per prefix per day

use crate::domain::TicketNumber;
use crate::error::{AppError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

/// Minimum width of the sequence component (`001`)
const SEQUENCE_WIDTH: usize = 3;

/// Issues `<prefix><YYMMDD><NNN>` numbers.
///
/// The sequence is monotonic per prefix within a calendar day and starts at 1.
/// Past 999 the sequence widens (`1000`) instead of wrapping. Numbers never
/// depend on how many tickets happen to be waiting, so they cannot repeat
/// after queues drain.
///
/// The issuing day only moves forward. If the clock reports a date earlier
/// than the newest one seen, numbering continues under the newest date so an
/// earlier day's sequence is never restarted.
#[derive(Debug, Default)]
pub struct TicketSequencer {
    day: Option<NaiveDate>,
    issued: HashMap<String, u32>,
}

impl TicketSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ticket number for `prefix` on `date`
    pub fn next(&mut self, prefix: &str, date: NaiveDate) -> Result<TicketNumber> {
        let date = match self.day {
            Some(current) if date < current => {
                warn!(
                    reported = %date,
                    issuing = %current,
                    "Clock moved backward, keeping the newest issuing date"
                );
                current
            }
            Some(current) if date == current => current,
            _ => {
                // New day: earlier counters can never be needed again
                self.issued.clear();
                self.day = Some(date);
                date
            }
        };

        let last = self.issued.get(prefix).copied().unwrap_or(0);
        let sequence = last
            .checked_add(1)
            .ok_or_else(|| AppError::SequenceExhausted {
                prefix: prefix.to_string(),
                date: date.to_string(),
            })?;
        self.issued.insert(prefix.to_string(), sequence);

        Ok(format_ticket_number(prefix, date, sequence))
    }

    /// Number of tickets issued today for `prefix`
    pub fn issued_today(&self, prefix: &str) -> u32 {
        self.issued.get(prefix).copied().unwrap_or(0)
    }
}

fn format_ticket_number(prefix: &str, date: NaiveDate, sequence: u32) -> TicketNumber {
    format!(
        "{}{}{:0width$}",
        prefix,
        date.format("%y%m%d"),
        sequence,
        width = SEQUENCE_WIDTH
    )
}
