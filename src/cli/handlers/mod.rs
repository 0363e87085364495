pub mod config;
pub mod corrupt;
pub mod decode;
pub mod encode;
