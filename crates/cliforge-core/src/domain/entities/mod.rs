pub mod option;
pub mod validation_result;

pub use option::{ConfigOption, OptionsProvider, env_var_name};
pub use validation_result::ValidationResult;
