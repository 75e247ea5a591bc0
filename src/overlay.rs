pub mod decode;
pub mod map;
