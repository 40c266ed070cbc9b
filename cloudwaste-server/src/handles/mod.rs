mod analytics_handle;
mod bin_handle;
mod collection_handle;
mod report_handle;
mod truck_handle;

pub use analytics_handle::*;
pub use bin_handle::*;
pub use collection_handle::*;
pub use report_handle::*;
pub use truck_handle::*;
