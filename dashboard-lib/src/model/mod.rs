//! Record models

mod mapping;
mod record;
mod status;
mod value;

pub use mapping::*;
pub use record::*;
pub use status::*;
pub use value::*;
