mod catalog;
pub mod models;
mod pools;

pub use catalog::UserCatalog;
pub use models::*;
pub use pools::StylePools;
