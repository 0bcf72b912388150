use crate::logs::{LogRecord, LogTable};

/// Multi-select filters of the logs view. An empty list places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub categories: Vec<String>,
    pub senders: Vec<String>,
    pub reasons: Vec<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.senders.is_empty() && self.reasons.is_empty()
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        let category_ok = self.categories.is_empty() || self.categories.contains(&record.category);
        let sender_ok = self.senders.is_empty() || self.senders.contains(&record.sender);
        let reason_ok = self.reasons.is_empty()
            || record
                .fallback_reason
                .as_ref()
                .is_some_and(|r| self.reasons.contains(r));
        category_ok && sender_ok && reason_ok
    }

    pub fn apply(&self, table: &LogTable) -> LogTable {
        if self.is_empty() {
            return table.clone();
        }
        table.retain_cloned(|r| self.matches(r))
    }
}
