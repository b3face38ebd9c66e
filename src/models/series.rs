use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{FlashError, Result};
use crate::models::{DailyRecord, Field};

/// Date-ordered daily records of one station. Dates are unique; gaps are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    records: Vec<DailyRecord>,
}

impl Series {
    pub fn new(mut records: Vec<DailyRecord>) -> Result<Self> {
        records.sort_by_key(|r| r.date);
        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(FlashError::InvalidFormat(format!(
                "Duplicate date in series: {}",
                pair[0].date
            )));
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.records.binary_search_by_key(&date, |r| r.date).ok()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.position(date).map(|i| &self.records[i])
    }

    /// Every row sharing `date`'s month and day, up to and including `date`.
    pub fn same_calendar_day(&self, date: NaiveDate) -> Subset<'_> {
        let end = self.records.partition_point(|r| r.date <= date);
        let indices = (0..end)
            .filter(|&i| {
                let d = self.records[i].date;
                d.month() == date.month() && d.day() == date.day()
            })
            .collect();
        Subset::new(self, indices)
    }

    /// Rows dated within `days` days before `date`, inclusive of both ends.
    pub fn trailing(&self, date: NaiveDate, days: i64) -> Subset<'_> {
        let start_date = date - Duration::days(days);
        let start = self.records.partition_point(|r| r.date < start_date);
        let end = self.records.partition_point(|r| r.date <= date);
        Subset::new(self, (start..end.max(start)).collect())
    }
}

/// Read-only projection of a [`Series`] holding row indices only.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    series: &'a Series,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub fn new(series: &'a Series, indices: Vec<usize>) -> Self {
        Self { series, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a DailyRecord> + '_ {
        let records = self.series.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn first(&self) -> Option<&'a DailyRecord> {
        self.indices.first().map(|&i| &self.series.records()[i])
    }

    pub fn get(&self, date: NaiveDate) -> Option<&'a DailyRecord> {
        self.records().find(|r| r.date == date)
    }

    /// Non-missing readings of `field`, in date order.
    pub fn values(&self, field: Field) -> impl Iterator<Item = f64> + '_ {
        let records: &[DailyRecord] = self.series.records();
        self.indices
            .iter()
            .filter_map(move |&i| records[i].get(field))
    }

    pub fn valid_count(&self, field: Field) -> usize {
        self.values(field).count()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.first().map(|r| r.date)
    }
}
