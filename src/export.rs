use crate::view::ReportLink;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Url;

/// Calendar date of `now` in UTC, `YYYY-MM-DD`.
pub fn today_utc(now: DateTime<Utc>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}

pub fn daily_report_url(base: &Url, date: &str) -> Url {
    report_url(base, "report", "date", date)
}

pub fn monthly_report_url(base: &Url, month: &str) -> Url {
    report_url(base, "report/monthly", "month", month)
}

fn report_url(base: &Url, path: &str, key: &str, value: &str) -> Url {
    let mut url = base.join(path).unwrap_or_else(|_| base.clone());
    url.query_pairs_mut().clear().append_pair(key, value);
    url
}

/// A generated PDF the remote keeps in its reports directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFile {
    Daily(String),
    Monthly(String),
}

impl ReportFile {
    /// Recognises `attendance_YYYY-MM-DD.pdf` and `monthly_report_YYYY-MM.pdf`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".pdf")?;
        if let Some(month) = stem.strip_prefix("monthly_report_") {
            NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
            return Some(ReportFile::Monthly(month.to_string()));
        }
        let date = stem.strip_prefix("attendance_")?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        Some(ReportFile::Daily(date.to_string()))
    }

    pub fn url(&self, base: &Url) -> Url {
        match self {
            ReportFile::Daily(date) => daily_report_url(base, date),
            ReportFile::Monthly(month) => monthly_report_url(base, month),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ReportFile::Daily(date) => format!("Daily report {date}"),
            ReportFile::Monthly(month) => format!("Monthly report {month}"),
        }
    }
}

/// Keeps the remote's ordering and skips names that are not reports.
pub fn report_links(base: &Url, file_names: &[String]) -> Vec<ReportLink> {
    file_names
        .iter()
        .filter_map(|name| ReportFile::parse(name))
        .map(|report| ReportLink {
            label: report.label(),
            url: report.url(base).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> Url {
        Url::parse("http://api.test/att/").unwrap()
    }

    #[test]
    fn today_ignores_time_of_day() {
        let early = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 1).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(today_utc(early), "2024-03-09");
        assert_eq!(today_utc(late), "2024-03-09");
    }

    #[test]
    fn daily_url_carries_date() {
        let url = daily_report_url(&base(), "2024-03-09");
        assert_eq!(url.as_str(), "http://api.test/att/report?date=2024-03-09");
    }

    #[test]
    fn monthly_url_carries_month() {
        let url = monthly_report_url(&base(), "2024-03");
        assert_eq!(url.as_str(), "http://api.test/att/report/monthly?month=2024-03");
    }

    #[test]
    fn report_files_map_back_to_urls() {
        let names = vec![
            "monthly_report_2024-03.pdf".to_string(),
            "attendance_2024-03-09.pdf".to_string(),
            "notes.pdf".to_string(),
            "attendance_yesterday.pdf".to_string(),
        ];
        let links = report_links(&base(), &names);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "Monthly report 2024-03");
        assert_eq!(links[0].url, "http://api.test/att/report/monthly?month=2024-03");
        assert_eq!(links[1].url, "http://api.test/att/report?date=2024-03-09");
    }
}
