pub mod blur;
pub mod params;
pub mod processor;
