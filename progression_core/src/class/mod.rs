//! Classes - immutable templates with base stats, growth and specializations

mod catalog;
mod definition;

pub use catalog::ClassCatalog;
pub use definition::{ClassDefinition, CoreStats, Specialization, SpecializationBonuses};
