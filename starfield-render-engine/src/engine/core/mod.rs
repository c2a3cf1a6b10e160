pub mod app_setup;
pub mod diagnostics;
