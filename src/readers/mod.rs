pub mod loader;
pub mod series_reader;
pub mod station_reader;

pub use loader::{DirectorySeriesLoader, SeriesLoader};
pub use series_reader::SeriesReader;
pub use station_reader::StationReader;
