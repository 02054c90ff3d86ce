use crate::api::AttendanceApi;
use crate::errors::ViewError;
use crate::export::{daily_report_url, monthly_report_url, report_links, today_utc};
use crate::models::AttendanceStatus;
use crate::reconcile::{build_rows, collect_batch, AttendanceMap};
use crate::view::{PageSnapshot, ViewModel, ViewPhase};
use chrono::{DateTime, Utc};
use reqwest::Url;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

pub const NO_EMPLOYEES_NOTICE: &str = "No employees found.";
pub const LOAD_FAILED_NOTICE: &str = "Failed to load employees.";
pub const NO_EMPLOYEES_TO_SAVE_ALERT: &str = "No employees to save attendance for.";
pub const SAVE_FAILED_ALERT: &str = "Failed to save attendance.";
pub const SAVED_ALERT: &str = "Attendance saved.";
pub const MONTH_REQUIRED_ALERT: &str = "Please select a month";
pub const NOT_LOADED_ALERT: &str = "Attendance list is not loaded.";

/// Owns the view-model and keeps it in step with the remote service.
///
/// Load, save and report refresh are single-flight: while one runs, the others
/// and any edit are refused with [`ViewError::Busy`], and the page renders its
/// controls disabled.
pub struct ViewSyncController<A> {
    api: A,
    report_base: Url,
    view: Mutex<ViewModel>,
    in_flight: Mutex<()>,
}

impl<A: AttendanceApi> ViewSyncController<A> {
    pub fn new(api: A, report_base: Url) -> Self {
        Self {
            api,
            report_base,
            view: Mutex::new(ViewModel::default()),
            in_flight: Mutex::new(()),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    fn begin(&self) -> Result<MutexGuard<'_, ()>, ViewError> {
        self.in_flight.try_lock().map_err(|_| ViewError::Busy)
    }

    pub async fn phase(&self) -> ViewPhase {
        self.view.lock().await.phase
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        let busy = self.is_busy();
        let view = self.view.lock().await.clone();
        PageSnapshot { busy, view }
    }

    /// Like [`snapshot`](Self::snapshot) but consumes the pending alert.
    pub async fn take_page(&self) -> PageSnapshot {
        let busy = self.is_busy();
        let mut view = self.view.lock().await;
        let page = PageSnapshot {
            busy,
            view: view.clone(),
        };
        view.alert = None;
        page
    }

    /// Fetches roster and today's attendance together and rebuilds the list.
    /// Remote failures end up in the view, never in the result.
    pub async fn load(&self) -> Result<ViewPhase, ViewError> {
        let _flight = self.begin()?;
        let fetched = tokio::try_join!(self.api.fetch_roster(), self.api.fetch_today());

        let mut view = self.view.lock().await;
        match fetched {
            Ok((roster, today)) => match roster.employees.filter(|list| !list.is_empty()) {
                None => {
                    info!(reason = ?roster.error, "roster has no employees");
                    view.show_empty(NO_EMPLOYEES_NOTICE);
                }
                Some(employees) => {
                    let records = today.attendance.as_deref().unwrap_or(&[]);
                    let map = AttendanceMap::from_records(records);
                    let rows = build_rows(&employees, &map);
                    info!(employees = rows.len(), records = map.len(), "attendance list loaded");
                    view.replace_rows(rows);
                }
            },
            Err(err) => {
                error!(error = %err, "failed to load attendance list");
                view.show_failure(LOAD_FAILED_NOTICE);
            }
        }
        Ok(view.phase)
    }

    pub async fn select(&self, id: &str, status: AttendanceStatus) -> Result<(), ViewError> {
        let mut view = self.view.lock().await;
        if self.is_busy() {
            return Err(ViewError::Busy);
        }
        if view.phase != ViewPhase::Loaded {
            return Err(ViewError::NotLoaded);
        }
        view.select(id, status)
    }

    /// Submits the live selections for the current roster as one batch and
    /// returns the message shown to the user.
    pub async fn save(&self) -> Result<String, ViewError> {
        let _flight = self.begin()?;
        let result = self.submit_current().await;

        let alert = match &result {
            Ok(message) => message.clone(),
            Err(ViewError::Api(err)) => {
                error!(error = %err, "failed to save attendance");
                SAVE_FAILED_ALERT.to_string()
            }
            Err(ViewError::NoEmployees) => NO_EMPLOYEES_TO_SAVE_ALERT.to_string(),
            Err(ViewError::NotLoaded) => NOT_LOADED_ALERT.to_string(),
            Err(err) => {
                warn!(error = %err, "attendance not saved");
                err.to_string()
            }
        };
        self.view.lock().await.set_alert(alert);
        result
    }

    async fn submit_current(&self) -> Result<String, ViewError> {
        if self.phase().await != ViewPhase::Loaded {
            return Err(ViewError::NotLoaded);
        }

        // The roster decides which controls are read, not the rows on screen.
        let roster = self.api.fetch_roster().await?;
        let employees = roster
            .employees
            .filter(|list| !list.is_empty())
            .ok_or(ViewError::NoEmployees)?;

        let batch = {
            let view = self.view.lock().await;
            collect_batch(&employees, &view)?
        };

        info!(entries = batch.len(), "submitting attendance");
        let reply = self.api.submit(batch).await?;
        match (reply.msg, reply.error) {
            (Some(message), _) => Ok(message),
            (None, Some(error)) => Err(ViewError::Rejected(error)),
            (None, None) => Ok(SAVED_ALERT.to_string()),
        }
    }

    pub async fn export_daily(&self) -> Result<Url, ViewError> {
        self.export_daily_at(Utc::now()).await
    }

    pub async fn export_daily_at(&self, now: DateTime<Utc>) -> Result<Url, ViewError> {
        self.ensure_loaded().await?;
        let url = daily_report_url(&self.report_base, &today_utc(now));
        info!(%url, "opening daily report");
        Ok(url)
    }

    pub async fn export_monthly(&self, month: Option<&str>) -> Result<Url, ViewError> {
        self.ensure_loaded().await?;
        let Some(month) = month.map(str::trim).filter(|month| !month.is_empty()) else {
            self.view.lock().await.set_alert(MONTH_REQUIRED_ALERT);
            return Err(ViewError::MissingMonth);
        };
        let url = monthly_report_url(&self.report_base, month);
        info!(%url, "opening monthly report");
        Ok(url)
    }

    /// Replaces the report list with what the remote has generated so far.
    pub async fn refresh_reports(&self) -> Result<usize, ViewError> {
        let _flight = self.begin()?;
        let listed = self.api.list_reports().await;

        let mut view = self.view.lock().await;
        match listed {
            Ok(names) => {
                view.reports = report_links(&self.report_base, &names);
                Ok(view.reports.len())
            }
            Err(err) => {
                warn!(error = %err, "failed to list reports");
                view.reports.clear();
                Err(err.into())
            }
        }
    }

    async fn ensure_loaded(&self) -> Result<(), ViewError> {
        let mut view = self.view.lock().await;
        if view.phase == ViewPhase::Loaded {
            return Ok(());
        }
        view.set_alert(NOT_LOADED_ALERT);
        Err(ViewError::NotLoaded)
    }
}
