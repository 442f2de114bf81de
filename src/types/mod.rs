pub mod dataset;
pub mod forecast_month;
pub mod region;
