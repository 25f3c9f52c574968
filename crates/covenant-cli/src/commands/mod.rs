//! Command implementations.

pub mod categories;
pub mod extract;
pub mod run;

pub use self::categories::execute_categories;
pub use self::extract::execute_extract;
pub use self::run::execute_run;
