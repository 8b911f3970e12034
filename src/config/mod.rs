pub mod types;
pub mod field;
pub mod loader;
pub mod validator;
pub mod resolved;

pub use types::*;
pub use field::*;
pub use loader::*;
pub use validator::*;
pub use resolved::*;
