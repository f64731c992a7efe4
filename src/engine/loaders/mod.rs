pub mod obj_loader;

pub use obj_loader::{LoadError, MaterialTable, ObjLoader, ParseMode};
