pub mod alerts;
pub mod chart;
pub mod conditions;
pub mod forecast;
pub mod sun;
pub mod weather;
