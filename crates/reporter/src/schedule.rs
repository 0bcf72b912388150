use time::{macros::format_description, Date, PrimitiveDateTime, Time};

use crate::Error;

/// Parse a wall-clock time of day such as `08:00`
pub fn parse_send_at(value: &str) -> Result<Time, Error> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| Error::InvalidSendAt(value.to_string()))
}

/// Once-a-day trigger.
///
/// A day counts as done as soon as a send was attempted, whether or not it
/// succeeded.
#[derive(Debug, Clone)]
pub struct DailySchedule {
    send_at: Time,
    last_attempt: Option<Date>,
}

impl DailySchedule {
    pub fn new(send_at: Time) -> Self {
        Self {
            send_at,
            last_attempt: None,
        }
    }

    pub fn send_at(&self) -> Time {
        self.send_at
    }

    pub fn last_attempt(&self) -> Option<Date> {
        self.last_attempt
    }

    pub fn is_due(&self, now: PrimitiveDateTime) -> bool {
        now.time() >= self.send_at && self.last_attempt != Some(now.date())
    }

    pub fn mark_attempted(&mut self, day: Date) {
        self.last_attempt = Some(day);
    }
}
