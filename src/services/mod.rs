pub mod catalog;
pub mod costs;
pub mod filters;
pub mod recommendations;

pub use catalog::{Catalog, CatalogRecord};
