//! Weekly schedule configuration.
//!
//! The configuration is one atomic unit: seven weekday rules plus a single
//! break window. It is validated as a whole before every save and replaced as
//! a whole in the store.
//!
//! - [`schedule`]: the [`WeeklyScheduleConfig`] type and its built-in defaults
//! - [`validator`]: rule and break-window validation with field-level errors

pub mod schedule;
pub mod validator;


pub use schedule::WeeklyScheduleConfig;
pub use validator::{validate_config, ConfigError, ConfigResult};
