//! Command implementations.

pub mod registry;
pub mod run;
pub mod tasks;

pub use self::registry::execute_registry;
pub use self::run::execute_run;
pub use self::tasks::execute_tasks;
