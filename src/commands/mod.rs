pub mod check;
pub mod list;
pub mod serve;

pub use check::execute_check;
pub use list::execute_list;
pub use serve::execute_serve;
