mod bin;
mod collection;
mod report;
mod sensor_data;
mod truck;

pub use bin::{Bin, BinTable};
pub use collection::{Collection, CollectionTable, DailyCount};
pub use report::{Report, ReportTable, ReportWithBin};
pub use sensor_data::{SensorData, SensorDataTable};
pub use truck::{Truck, TruckTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
