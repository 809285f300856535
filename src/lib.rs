// Library exports for plantalytics

pub mod bundle;
pub mod config;
pub mod data;
pub mod filter;
pub mod globe;
pub mod region;
pub mod stats;
pub mod templates;
pub mod zones;

pub use bundle::{process_plant_data, process_plant_json, ChartBundle};
pub use data::PlantRecord;
pub use filter::{filter_plant_data, FilterSelection};
pub use templates::{populate_options, ChartOptions};
