//! CRUD execution and response presentation.

pub mod crud;
pub mod present;

pub use crud::CrudService;
pub use present::present_row;
