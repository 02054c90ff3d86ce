use crate::errors::ViewError;
use crate::models::AttendanceStatus;
use serde::{Serialize, Serializer};
use std::fmt::{self, Write};

/// Identity of one status control.
///
/// Derived from the display name and how many earlier roster entries carry the
/// same name, so two employees called "Sam" get two controls instead of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn derive(name: &str, ordinal: usize) -> Self {
        let mut id = String::with_capacity(8 + name.len() * 2);
        id.push_str("status-");
        for byte in name.as_bytes() {
            let _ = write!(id, "{byte:02x}");
        }
        let _ = write!(id, "-{ordinal}");
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EmployeeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: EmployeeId,
    pub name: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPhase {
    Pending,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub phase: ViewPhase,
    pub rows: Vec<Row>,
    /// Replaces the list when set (empty roster, load failure).
    pub notice: Option<String>,
    /// One-shot message for the user, consumed by the next page render.
    pub alert: Option<String>,
    pub reports: Vec<ReportLink>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            phase: ViewPhase::Pending,
            rows: Vec::new(),
            notice: None,
            alert: None,
            reports: Vec::new(),
        }
    }
}

impl ViewModel {
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.notice = None;
        self.phase = ViewPhase::Loaded;
    }

    /// Empty roster: still loaded, just zero rows.
    pub fn show_empty(&mut self, notice: impl Into<String>) {
        self.rows.clear();
        self.notice = Some(notice.into());
        self.phase = ViewPhase::Loaded;
    }

    pub fn show_failure(&mut self, notice: impl Into<String>) {
        self.rows.clear();
        self.notice = Some(notice.into());
        self.phase = ViewPhase::LoadFailed;
    }

    pub fn set_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id.as_str() == id)
    }

    pub fn status_of(&self, id: &EmployeeId) -> Option<AttendanceStatus> {
        self.row(id.as_str()).map(|row| row.status)
    }

    pub fn select(&mut self, id: &str, status: AttendanceStatus) -> Result<(), ViewError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id.as_str() == id)
            .ok_or_else(|| ViewError::UnknownControl(id.to_string()))?;
        row.status = status;
        Ok(())
    }
}

/// What a page render sees: the view plus whether controls are disabled.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub busy: bool,
    #[serde(flatten)]
    pub view: ViewModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, ordinal: usize, status: AttendanceStatus) -> Row {
        Row {
            id: EmployeeId::derive(name, ordinal),
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn ids_are_deterministic_and_distinct_for_duplicates() {
        assert_eq!(EmployeeId::derive("Ann", 0), EmployeeId::derive("Ann", 0));
        assert_ne!(EmployeeId::derive("Ann", 0), EmployeeId::derive("Ann", 1));
        assert_eq!(EmployeeId::derive("Ann", 0).as_str(), "status-416e6e-0");
    }

    #[test]
    fn ids_do_not_collide_on_punctuation() {
        assert_ne!(EmployeeId::derive("A B", 0), EmployeeId::derive("A-B", 0));
    }

    #[test]
    fn replace_rows_discards_previous_rows() {
        let mut view = ViewModel::default();
        view.replace_rows(vec![row("Ann", 0, AttendanceStatus::Present)]);
        view.replace_rows(vec![row("Ann", 0, AttendanceStatus::Present)]);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.phase, ViewPhase::Loaded);
    }

    #[test]
    fn failure_clears_rows() {
        let mut view = ViewModel::default();
        view.replace_rows(vec![row("Ann", 0, AttendanceStatus::Present)]);
        view.show_failure("Failed to load employees.");
        assert!(view.rows.is_empty());
        assert_eq!(view.phase, ViewPhase::LoadFailed);
    }

    #[test]
    fn select_rejects_unknown_control() {
        let mut view = ViewModel::default();
        view.replace_rows(vec![row("Ann", 0, AttendanceStatus::Absent)]);
        let id = EmployeeId::derive("Ann", 0);
        view.select(id.as_str(), AttendanceStatus::Present).unwrap();
        assert_eq!(view.status_of(&id), Some(AttendanceStatus::Present));
        assert!(matches!(
            view.select("status-00-0", AttendanceStatus::Present),
            Err(ViewError::UnknownControl(_))
        ));
    }
}
