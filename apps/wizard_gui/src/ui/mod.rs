pub mod app;
pub mod results;
