use tracing::debug;

use practice_core::chart::{self, ChartSeries};
use practice_core::model::{AnalyticsSnapshot, ChartData};

use super::state::{ViewScope, ViewState};
use crate::api::{ApiClient, fetch_pair};
use crate::bootstrap::Session;
use crate::error::FetchError;

/// Everything the progress dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub snapshot: AnalyticsSnapshot,
    pub chart: ChartData,
    pub activity: ChartSeries,
    pub errors_per_day: ChartSeries,
    /// Empty when there are no recorded errors; the chart is omitted then.
    pub breakdown: ChartSeries,
}

impl DashboardData {
    #[must_use]
    pub fn from_parts(snapshot: AnalyticsSnapshot, chart: ChartData) -> Self {
        let activity = chart::to_activity_series(&chart.daily);
        let errors_per_day = chart::to_error_series(&chart.daily);
        let breakdown = chart::to_error_breakdown(&chart.error_types);
        Self {
            snapshot,
            chart,
            activity,
            errors_per_day,
            breakdown,
        }
    }
}

/// Fetch the analytics snapshot and chart series concurrently.
///
/// # Errors
///
/// Returns the first `FetchError` from either request; no partial data.
pub async fn fetch_dashboard(
    api: &ApiClient,
    session: &Session,
    days: u32,
) -> Result<DashboardData, FetchError> {
    let (snapshot, chart) = fetch_pair(api.analytics(session), api.charts(session, days)).await?;
    Ok(DashboardData::from_parts(snapshot, chart))
}

/// Progress dashboard: analytics snapshot plus activity charts.
#[derive(Debug)]
pub struct DashboardView {
    api: ApiClient,
    session: Session,
    scope: ViewScope,
    days: u32,
    state: ViewState<DashboardData>,
}

impl DashboardView {
    #[must_use]
    pub fn new(api: ApiClient, session: Session) -> Self {
        let days = api.config().chart_days;
        Self {
            api,
            session,
            scope: ViewScope::new(),
            days,
            state: ViewState::Idle,
        }
    }

    #[must_use]
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<DashboardData> {
        &self.state
    }

    /// Handle the presentation layer keeps to unmount the view.
    #[must_use]
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Full (re)fetch. Also serves as the manual retry after an error.
    ///
    /// Returns `false` when the result arrived after the view was torn down or
    /// superseded, in which case the state is left as it was.
    pub async fn load(&mut self) -> bool {
        let ticket = self.scope.begin();
        self.state = ViewState::Loading;

        let result = fetch_dashboard(&self.api, &self.session, self.days).await;
        if !self.scope.is_current(ticket) {
            debug!("dashboard result discarded; view no longer mounted");
            return false;
        }

        self.state = result.into();
        true
    }
}
