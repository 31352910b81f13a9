pub mod check_config;
pub mod presets;
pub mod score;
pub mod validate;
