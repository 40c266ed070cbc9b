pub mod api;
pub mod command;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod settings;
pub mod state;
pub mod view;

pub use api::ApiClient;
pub use dashboard::{Dashboard, Notice};
pub use error::{Error, Result};
pub use state::{ConnectionStatus, DashboardState, ReportDraft, Role};
