use crate::api::HttpAttendanceApi;
use crate::controller::ViewSyncController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ViewSyncController<HttpAttendanceApi>>,
}

impl AppState {
    pub fn new(api: HttpAttendanceApi) -> Self {
        let report_base = api.base().clone();
        Self {
            controller: Arc::new(ViewSyncController::new(api, report_base)),
        }
    }
}
