mod bin;
mod collection;
mod report;
mod sensor_record;
mod stats;
mod truck;

pub use bin::BinRepository;
pub use collection::CollectionRepository;
pub use report::ReportRepository;
pub use sensor_record::SensorRecordRepository;
pub use stats::{StatsRepository, StatsSnapshot};
pub use truck::TruckRepository;
