//! Domain model: the manifest document, the application entity and its
//! request projections, and the scope used to address it remotely.

pub mod entities;
pub mod value_objects;
