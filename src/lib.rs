//! Interactive dashboard for global cybersecurity incident data.
//!
//! The pipeline is pure and renderer-neutral: an [`IncidentTable`] is loaded
//! once, [`aggregate`](data::aggregate::aggregate) derives the views for the
//! selected attack type and [`charts::builders`] turns them into
//! [`ChartDescription`]s.  [`DashboardState`] owns the current selection and
//! swaps in complete [`DashboardFrame`]s.

pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

pub use charts::ChartDescription;
pub use config::DashboardConfig;
pub use data::model::{IncidentRecord, IncidentTable};
pub use error::{DashboardError, Result};
pub use state::{DashboardFrame, DashboardState};
