pub mod assemble;
pub mod combine;
pub mod range;
