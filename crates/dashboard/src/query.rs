use mailmind_core::{
    logs::{parse_date, Error, PeriodMode, PeriodSelector},
    RecordFilter,
};
use time::Date;

/// Period, filter and refresh settings shared by every page and download.
///
/// Read from a raw pair list so the multi-select filters can repeat their key
/// (`?category=Vraag&category=Klacht`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    pub date: Option<String>,
    pub mode: Option<String>,
    pub all_logs: bool,
    pub refresh: bool,
    pub categories: Vec<String>,
    pub senders: Vec<String>,
    pub reasons: Vec<String>,
}

impl DashboardQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.trim().to_string();
            match key.as_str() {
                "date" if !value.is_empty() => query.date = Some(value),
                "mode" if !value.is_empty() => query.mode = Some(value),
                "all" => query.all_logs = is_checked(&value),
                "refresh" => query.refresh = is_checked(&value),
                "category" if !value.is_empty() => query.categories.push(value),
                "sender" if !value.is_empty() => query.senders.push(value),
                "reason" if !value.is_empty() => query.reasons.push(value),
                _ => {}
            }
        }
        query
    }

    /// The log files this query covers; date defaults to `today`, mode to day
    pub fn to_selector(&self, today: Date) -> Result<PeriodSelector, Error> {
        let date = match &self.date {
            Some(value) => parse_date(value)?,
            None => today,
        };
        if self.all_logs {
            return Ok(PeriodSelector::all(date));
        }
        let mode = match &self.mode {
            Some(value) => value.parse::<PeriodMode>()?,
            None => PeriodMode::default(),
        };
        Ok(PeriodSelector::new(mode, date))
    }

    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            categories: self.categories.clone(),
            senders: self.senders.clone(),
            reasons: self.reasons.clone(),
        }
    }

    /// Encoded form of this query, without the leading `?`
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(date) = &self.date {
            pairs.push(("date", date));
        }
        if let Some(mode) = &self.mode {
            pairs.push(("mode", mode));
        }
        if self.all_logs {
            pairs.push(("all", "true"));
        }
        if self.refresh {
            pairs.push(("refresh", "true"));
        }
        pairs.extend(self.categories.iter().map(|v| ("category", v.as_str())));
        pairs.extend(self.senders.iter().map(|v| ("sender", v.as_str())));
        pairs.extend(self.reasons.iter().map(|v| ("reason", v.as_str())));
        serde_urlencoded::to_string(pairs).unwrap_or_default()
    }

    /// `path` with this query appended
    pub fn link(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }
}

fn is_checked(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "on" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn pairs(raw: &str) -> Vec<(String, String)> {
        serde_urlencoded::from_str(raw).unwrap()
    }

    #[test]
    fn repeated_filters_are_collected() {
        let query = DashboardQuery::from_pairs(pairs(
            "date=2024-05-08&mode=week&category=Vraag&category=Klacht&sender=a%40x.nl",
        ));
        assert_eq!(query.categories, vec!["Vraag", "Klacht"]);
        assert_eq!(query.senders, vec!["a@x.nl"]);
        assert!(query.reasons.is_empty());

        let selector = query.to_selector(date!(2024 - 01 - 01)).unwrap();
        assert_eq!(selector.mode, PeriodMode::Week);
        assert_eq!(selector.date, date!(2024 - 05 - 08));
        assert!(!selector.all_logs);
    }

    #[test]
    fn defaults_to_today_and_day_mode() {
        let query = DashboardQuery::from_pairs(pairs("date=&mode="));
        let selector = query.to_selector(date!(2024 - 05 - 08)).unwrap();
        assert_eq!(selector, PeriodSelector::new(PeriodMode::Day, date!(2024 - 05 - 08)));
    }

    #[test]
    fn all_logs_checkbox_wins_over_mode() {
        let query = DashboardQuery::from_pairs(pairs("mode=month&all=on"));
        assert!(query.to_selector(date!(2024 - 05 - 08)).unwrap().all_logs);
    }

    #[test]
    fn bad_values_are_errors() {
        let query = DashboardQuery::from_pairs(pairs("date=08-05-2024"));
        assert!(query.to_selector(date!(2024 - 05 - 08)).is_err());

        let query = DashboardQuery::from_pairs(pairs("mode=year"));
        assert!(query.to_selector(date!(2024 - 05 - 08)).is_err());
    }

    #[test]
    fn query_string_survives_a_round_trip() {
        let raw = "date=2024-05-08&mode=month&refresh=true&category=Klacht&reason=no_template";
        let query = DashboardQuery::from_pairs(pairs(raw));
        assert_eq!(query.to_query_string(), raw);
        assert_eq!(DashboardQuery::from_pairs(pairs(&query.to_query_string())), query);
        assert_eq!(DashboardQuery::default().link("/logs"), "/logs");
    }
}
