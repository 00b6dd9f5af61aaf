//! Data module: field variables, FE descriptors, and solution vectors.
#![warn(missing_docs)]

pub mod fe_type;
pub mod problem;
pub mod variable;
pub mod vector;

pub use fe_type::{FeFamily, FeOrder, FeType};
pub use problem::Problem;
pub use variable::{FieldKind, FieldVariable};
pub use vector::{GhostedVector, SharedVector};
