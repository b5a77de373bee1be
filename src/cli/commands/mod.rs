mod check;
mod plans;

pub use check::cmd_check;
pub use plans::cmd_plans;
