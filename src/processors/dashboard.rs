use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::{FlashError, Result};
use crate::models::{FieldCatalog, Report, StationSeries};
use crate::processors::WindowAggregator;
use crate::readers::SeriesLoader;

/// Status indicator shown next to the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Nothing loaded yet.
    Idle,
    /// A station or date update is being computed.
    Working,
    /// The last update succeeded.
    Ready,
    /// The last update failed; the previous report is still current.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Station,
    Date,
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub kind: UpdateKind,
    pub report: Report,
}

/// Holds the loaded station and selected date; every update recomputes all windows.
///
/// Updates are transactional: state is replaced only once the new report has
/// been computed, so a failed update leaves the previous station, date and
/// report in place.
pub struct Dashboard {
    catalog: FieldCatalog,
    config: AnalysisConfig,
    station: Option<StationSeries>,
    selected_date: Option<NaiveDate>,
    report: Option<Report>,
    status: Status,
}

impl Dashboard {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            catalog: FieldCatalog::standard(),
            config,
            station: None,
            selected_date: None,
            report: None,
            status: Status::Idle,
        }
    }

    /// Date the first station update should analyze instead of the newest day.
    pub fn with_selected_date(mut self, date: Option<NaiveDate>) -> Self {
        self.selected_date = date;
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn station(&self) -> Option<&StationSeries> {
        self.station.as_ref()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Load `station` and recompute. Keeps the selected date, or picks the
    /// newest day when nothing is selected yet.
    pub fn select_station(
        &mut self,
        loader: &dyn SeriesLoader,
        station: &str,
    ) -> Result<UpdateOutcome> {
        self.status = Status::Working;
        let result = loader.load(station).and_then(|loaded| {
            let date = self
                .selected_date
                .or(loaded.series.last_date())
                .ok_or_else(|| FlashError::data_unavailable(station, "series has no days"))?;
            let report = self.aggregator().analyze(&loaded, date)?;
            Ok((loaded, date, report))
        });

        match result {
            Ok((loaded, date, report)) => {
                info!(station = %loaded.metadata.stid, %date, "station updated");
                self.station = Some(loaded);
                Ok(self.commit(UpdateKind::Station, date, report))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Recompute the loaded station for a new date.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<UpdateOutcome> {
        self.status = Status::Working;
        let result = match &self.station {
            Some(station) => self.aggregator().analyze(station, date),
            None => Err(FlashError::Config("no station loaded".to_string())),
        };

        match result {
            Ok(report) => Ok(self.commit(UpdateKind::Date, date, report)),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn aggregator(&self) -> WindowAggregator<'_> {
        WindowAggregator::new(&self.catalog, &self.config)
    }

    fn commit(&mut self, kind: UpdateKind, date: NaiveDate, report: Report) -> UpdateOutcome {
        self.selected_date = Some(date);
        self.report = Some(report.clone());
        self.status = Status::Ready;
        UpdateOutcome { kind, report }
    }

    fn fail(&mut self, error: FlashError) -> FlashError {
        warn!("update failed: {}", error);
        self.status = Status::Failed;
        error
    }
}
