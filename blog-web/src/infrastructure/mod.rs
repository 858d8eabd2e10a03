pub mod database;
pub mod logging;
pub mod settings;
pub(crate) mod templates;
pub(crate) mod uploads;
