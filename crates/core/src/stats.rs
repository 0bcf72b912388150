//! Summary statistics and group-by counts over loaded log records

use std::collections::{BTreeMap, BTreeSet, HashMap};

use time::Date;

use crate::logs::LogRecord;

/// Complaints above this share of all mails raise an alert
pub const COMPLAINT_ALERT_RATIO: f64 = 0.1;

/// Fallback percentage above which an alert is raised
pub const FALLBACK_ALERT_PCT: f64 = 50.0;

/// Headline numbers for a set of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub unique_senders: usize,
    pub answered: usize,
    pub answered_pct: f64,
    pub fallbacks: usize,
    pub fallback_pct: f64,
    pub complaints: usize,
}

impl Summary {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let total = records.len();
        let unique_senders = records
            .iter()
            .filter(|r| !r.sender.is_empty())
            .map(|r| r.sender.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let answered = records
            .iter()
            .filter(|r| r.reply_status.is_answered())
            .count();
        let fallbacks = records.iter().filter(|r| r.is_fallback()).count();
        let complaints = records.iter().filter(|r| r.is_complaint()).count();

        Self {
            total,
            unique_senders,
            answered,
            answered_pct: percentage(answered, total),
            fallbacks,
            fallback_pct: percentage(fallbacks, total),
            complaints,
        }
    }

    /// Mails answered by the automated responder
    pub fn ai_count(&self) -> usize {
        self.answered
    }

    /// `(answered by AI, sent to fallback)`
    pub fn ai_vs_fallback(&self) -> (usize, usize) {
        (self.ai_count(), self.fallbacks)
    }

    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if self.complaints as f64 > self.total as f64 * COMPLAINT_ALERT_RATIO {
            alerts.push(Alert::HighComplaints);
        }
        if self.fallback_pct > FALLBACK_ALERT_PCT {
            alerts.push(Alert::HighFallback);
        }
        alerts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    HighComplaints,
    HighFallback,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::HighComplaints => "High share of complaints!",
            Alert::HighFallback => "More than 50% of mails went through fallback.",
        }
    }

    /// Wording used on the emailed report
    pub fn report_message(&self) -> &'static str {
        match self {
            Alert::HighComplaints => "Hoog aandeel klachten!",
            Alert::HighFallback => "Meer dan 50% van de mails ging via fallback.",
        }
    }

    /// Bulma notification modifier
    pub fn severity_class(&self) -> &'static str {
        match self {
            Alert::HighComplaints => "is-danger",
            Alert::HighFallback => "is-warning",
        }
    }
}

/// Reference percentages over every log on disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub answered_pct: f64,
    pub complaint_pct: f64,
}

impl Averages {
    /// None when there are no records to average over
    pub fn from_records(records: &[LogRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let total = records.len();
        let answered = records
            .iter()
            .filter(|r| r.reply_status.is_answered())
            .count();
        let complaints = records.iter().filter(|r| r.is_complaint()).count();
        Some(Self {
            answered_pct: percentage(answered, total),
            complaint_pct: percentage(complaints, total),
        })
    }
}

/// `part / total * 100`, or 0 for an empty total
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Count records per key, most frequent first, ties by key.
pub fn count_by<F>(records: &[LogRecord], key: F) -> Vec<(String, usize)>
where
    F: Fn(&LogRecord) -> Option<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        if let Some(k) = key(record) {
            *counts.entry(k).or_default() += 1;
        }
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

pub fn category_counts(records: &[LogRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| Some(r.category.clone()))
}

pub fn reply_status_counts(records: &[LogRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| Some(r.reply_status.as_str().to_string()))
}

pub fn fallback_reason_counts(records: &[LogRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| r.fallback_reason.clone())
}

pub fn sender_counts(records: &[LogRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| {
        if r.sender.is_empty() {
            None
        } else {
            Some(r.sender.clone())
        }
    })
}

/// Mails per hour of day, ascending by hour. Records without a timestamp are
/// left out.
pub fn hourly_counts(records: &[LogRecord]) -> Vec<(u8, usize)> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for hour in records.iter().filter_map(|r| r.hour()) {
        *counts.entry(hour).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Mails per calendar day, ascending
pub fn daily_counts(records: &[LogRecord]) -> Vec<(Date, usize)> {
    daily(records.iter())
}

/// Complaints per calendar day, ascending. Days without complaints are absent.
pub fn daily_complaints(records: &[LogRecord]) -> Vec<(Date, usize)> {
    daily(records.iter().filter(|r| r.is_complaint()))
}

fn daily<'a>(records: impl Iterator<Item = &'a LogRecord>) -> Vec<(Date, usize)> {
    let mut counts: BTreeMap<Date, usize> = BTreeMap::new();
    for date in records.filter_map(|r| r.date()) {
        *counts.entry(date).or_default() += 1;
    }
    counts.into_iter().collect()
}

pub fn distinct_categories(records: &[LogRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.category.as_str()))
}

pub fn distinct_senders(records: &[LogRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.sender.as_str()))
}

pub fn distinct_reasons(records: &[LogRecord]) -> Vec<String> {
    distinct(records.iter().filter_map(|r| r.fallback_reason.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logs::{LogRecord, ReplyStatus};
    use time::macros::{date, datetime};

    pub(crate) fn sample_records() -> Vec<LogRecord> {
        let rows = [
            ("a@x.nl", "Klacht", ReplyStatus::Answered, None, Some(datetime!(2024-05-06 09:10))),
            ("b@x.nl", "Vraag", ReplyStatus::Answered, None, Some(datetime!(2024-05-06 09:45))),
            ("a@x.nl", "Vraag", ReplyStatus::Unanswered, Some("no_template"), Some(datetime!(2024-05-06 14:00))),
            ("c@x.nl", "Offerte", ReplyStatus::Unanswered, Some("low_confidence"), Some(datetime!(2024-05-07 08:30))),
            ("d@x.nl", "Klacht", ReplyStatus::Unanswered, Some("no_template"), Some(datetime!(2024-05-07 14:20))),
            ("b@x.nl", "Onbekend", ReplyStatus::Answered, None, None),
            ("e@x.nl", "Vraag", ReplyStatus::Answered, None, Some(datetime!(2024-05-08 09:05))),
            ("f@x.nl", "Vraag", ReplyStatus::Unanswered, None, Some(datetime!(2024-05-08 16:40))),
        ];
        rows.into_iter()
            .map(|(sender, category, status, reason, ts)| LogRecord {
                sender: sender.to_string(),
                category: category.to_string(),
                reply_status: status,
                fallback_reason: reason.map(str::to_string),
                timestamp: ts,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn summary_matches_hand_counts() {
        let summary = Summary::from_records(&sample_records());
        assert_eq!(summary.total, 8);
        assert_eq!(summary.unique_senders, 6);
        assert_eq!(summary.answered, 4);
        assert_eq!(summary.answered_pct, 50.0);
        assert_eq!(summary.fallbacks, 3);
        assert_eq!(summary.fallback_pct, 37.5);
        assert_eq!(summary.complaints, 2);
        assert_eq!(summary.ai_count(), 4);
        assert_eq!(summary.ai_vs_fallback(), (4, 3));
        // 2 complaints > 0.8 threshold, 37.5% fallback is under the limit
        assert_eq!(summary.alerts(), vec![Alert::HighComplaints]);
    }

    #[test]
    fn empty_summary_has_zero_percentages() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.answered_pct, 0.0);
        assert_eq!(summary.fallback_pct, 0.0);
        assert!(summary.alerts().is_empty());
    }

    #[test]
    fn fallback_alert_above_half() {
        let mut records = sample_records();
        records.truncate(5);
        // 3 of 5 are fallbacks
        let summary = Summary::from_records(&records);
        assert_eq!(summary.fallback_pct, 60.0);
        assert!(summary.alerts().contains(&Alert::HighFallback));
    }

    #[test]
    fn category_counts_sorted_by_frequency() {
        assert_eq!(
            category_counts(&sample_records()),
            vec![
                ("Vraag".to_string(), 4),
                ("Klacht".to_string(), 2),
                ("Offerte".to_string(), 1),
                ("Onbekend".to_string(), 1),
            ]
        );
    }

    #[test]
    fn reply_and_reason_counts() {
        let records = sample_records();
        assert_eq!(
            reply_status_counts(&records),
            vec![("Ja".to_string(), 4), ("Nee".to_string(), 4)]
        );
        assert_eq!(
            fallback_reason_counts(&records),
            vec![("no_template".to_string(), 2), ("low_confidence".to_string(), 1)]
        );
        assert_eq!(sender_counts(&records)[0], ("a@x.nl".to_string(), 2));
    }

    #[test]
    fn hourly_counts_skip_missing_timestamps() {
        assert_eq!(
            hourly_counts(&sample_records()),
            vec![(8, 1), (9, 3), (14, 2), (16, 1)]
        );
    }

    #[test]
    fn daily_trends() {
        let records = sample_records();
        assert_eq!(
            daily_counts(&records),
            vec![
                (date!(2024 - 05 - 06), 3),
                (date!(2024 - 05 - 07), 2),
                (date!(2024 - 05 - 08), 2),
            ]
        );
        assert_eq!(
            daily_complaints(&records),
            vec![(date!(2024 - 05 - 06), 1), (date!(2024 - 05 - 07), 1)]
        );
    }

    #[test]
    fn averages_over_all_records() {
        let averages = Averages::from_records(&sample_records()).unwrap();
        assert_eq!(averages.answered_pct, 50.0);
        assert_eq!(averages.complaint_pct, 25.0);
        assert!(Averages::from_records(&[]).is_none());
    }

    #[test]
    fn distinct_values_for_filters() {
        let records = sample_records();
        assert_eq!(
            distinct_categories(&records),
            vec!["Klacht", "Offerte", "Onbekend", "Vraag"]
        );
        assert_eq!(distinct_reasons(&records), vec!["low_confidence", "no_template"]);
        assert_eq!(distinct_senders(&records).len(), 6);
    }
}
