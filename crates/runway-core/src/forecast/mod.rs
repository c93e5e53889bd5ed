//! Cash-flow forecasting
//!
//! Leaves first:
//! - [`burn`] - trailing variable-spend daily rate and windowed outflow
//! - [`recurring`] - recurring income/bill projection to month end
//! - [`energy_bar`] - end-of-month projection with risk tags
//!
//! Nothing here reads the clock. Every function takes the reference instant
//! it should compute against.

pub mod burn;
pub mod energy_bar;
pub mod recurring;

pub use burn::{outflow_between, rolling_daily_burn};
pub use energy_bar::{energy_bar, ForecastResult, RiskTag};
pub use recurring::{
    days_in_month, end_of_month, occurrences, project_recurring, recurring_schedule,
    RecurringProjection,
};
