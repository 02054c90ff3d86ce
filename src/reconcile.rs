use crate::errors::ViewError;
use crate::models::{AttendanceStatus, SubmitEntry, TodayEntry};
use crate::view::{EmployeeId, Row, ViewModel};
use std::collections::HashMap;

/// Status shown for an employee with no record today. Missing data never
/// blocks the list; it just reads as absent.
pub const DEFAULT_STATUS: AttendanceStatus = AttendanceStatus::Absent;

pub fn default_status() -> AttendanceStatus {
    DEFAULT_STATUS
}

/// Name to status for one load. Built fresh each time, never edited.
#[derive(Debug, Default)]
pub struct AttendanceMap {
    statuses: HashMap<String, AttendanceStatus>,
}

impl AttendanceMap {
    /// Later records for the same name overwrite earlier ones. A missing or
    /// unrecognised status resolves to the default.
    pub fn from_records(records: &[TodayEntry]) -> Self {
        let mut statuses = HashMap::with_capacity(records.len());
        for record in records {
            let status = record
                .status
                .as_deref()
                .and_then(AttendanceStatus::parse)
                .unwrap_or_else(default_status);
            statuses.insert(record.name.clone(), status);
        }
        Self { statuses }
    }

    pub fn resolve(&self, name: &str) -> AttendanceStatus {
        self.statuses.get(name).copied().unwrap_or_else(default_status)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Pairs each roster name with the id its control gets. Ids depend only on
/// the roster, so a re-fetched roster addresses the same controls.
pub fn assign_ids(roster: &[String]) -> Vec<(EmployeeId, &str)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    roster
        .iter()
        .map(|name| {
            let ordinal = seen.entry(name.as_str()).or_insert(0);
            let id = EmployeeId::derive(name, *ordinal);
            *ordinal += 1;
            (id, name.as_str())
        })
        .collect()
}

pub fn build_rows(roster: &[String], map: &AttendanceMap) -> Vec<Row> {
    assign_ids(roster)
        .into_iter()
        .map(|(id, name)| Row {
            id,
            name: name.to_string(),
            status: map.resolve(name),
        })
        .collect()
}

/// Reads the live selection for every roster entry, in roster order.
pub fn collect_batch(roster: &[String], view: &ViewModel) -> Result<Vec<SubmitEntry>, ViewError> {
    assign_ids(roster)
        .into_iter()
        .map(|(id, name)| {
            let status = view.status_of(&id).ok_or_else(|| ViewError::StaleRoster {
                name: name.to_string(),
            })?;
            Ok(SubmitEntry {
                name: name.to_string(),
                status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, status: Option<&str>) -> TodayEntry {
        TodayEntry {
            name: name.to_string(),
            status: status.map(str::to_string),
        }
    }

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn default_policy_is_absent() {
        assert_eq!(default_status(), AttendanceStatus::Absent);
        assert_eq!(AttendanceMap::default().resolve("nobody"), AttendanceStatus::Absent);
    }

    #[test]
    fn last_record_wins() {
        let map = AttendanceMap::from_records(&[
            entry("Ann", Some("Present")),
            entry("Ann", Some("Absent")),
            entry("Bo", Some("Absent")),
            entry("Bo", Some("Present")),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve("Ann"), AttendanceStatus::Absent);
        assert_eq!(map.resolve("Bo"), AttendanceStatus::Present);
    }

    #[test]
    fn missing_or_unknown_status_reads_absent() {
        let map = AttendanceMap::from_records(&[entry("Ann", None), entry("Bo", Some("Late"))]);
        assert_eq!(map.resolve("Ann"), AttendanceStatus::Absent);
        assert_eq!(map.resolve("Bo"), AttendanceStatus::Absent);
    }

    #[test]
    fn rows_follow_roster_order_with_resolved_status() {
        let map = AttendanceMap::from_records(&[
            entry("Cy", Some("Present")),
            entry("Zed", Some("Present")),
        ]);
        let rows = build_rows(&roster(&["Cy", "Ann"]), &map);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Cy", "Ann"]);
        assert_eq!(rows[0].status, AttendanceStatus::Present);
        assert_eq!(rows[1].status, AttendanceStatus::Absent);
    }

    #[test]
    fn duplicate_names_get_separate_rows() {
        let rows = build_rows(&roster(&["Sam", "Sam"]), &AttendanceMap::default());
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].id, rows[1].id);
    }

    #[test]
    fn batch_reads_live_selection_in_roster_order() {
        let names = roster(&["Ann", "Bo"]);
        let mut view = ViewModel::default();
        view.replace_rows(build_rows(&names, &AttendanceMap::default()));
        let bo = EmployeeId::derive("Bo", 0);
        view.select(bo.as_str(), AttendanceStatus::Present).unwrap();

        let batch = collect_batch(&names, &view).unwrap();
        assert_eq!(
            batch,
            vec![
                SubmitEntry { name: "Ann".into(), status: AttendanceStatus::Absent },
                SubmitEntry { name: "Bo".into(), status: AttendanceStatus::Present },
            ]
        );
    }

    #[test]
    fn batch_fails_for_employee_without_control() {
        let mut view = ViewModel::default();
        view.replace_rows(build_rows(&roster(&["Ann"]), &AttendanceMap::default()));
        let err = collect_batch(&roster(&["Ann", "New Hire"]), &view).unwrap_err();
        assert!(matches!(err, ViewError::StaleRoster { name } if name == "New Hire"));
    }
}
