use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 2] = [AttendanceStatus::Present, AttendanceStatus::Absent];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }

    /// Exact match on the wire name; anything else is unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Present" => Some(AttendanceStatus::Present),
            "Absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /employees`. The remote answers 404 with `{ "error": .. }` when the
/// roster file is empty, so the list is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub employees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayEntry {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /today`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodayResponse {
    #[serde(default)]
    pub attendance: Option<Vec<TodayEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitEntry {
    pub name: String,
    pub status: AttendanceStatus,
}

/// `POST /submit_attendance` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub attendance: Vec<SubmitEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitReply {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub id: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub url: String,
}
