//! In-memory reference backend: single-address-space implementations of every
//! collaborator contract, used by the test suite and by serial embeddings.

pub mod layout;
pub mod mesh;
pub mod problem;

pub use layout::DofLayout;
pub use mesh::{InMemoryMesh, MemoryObject};
pub use problem::{InMemoryCoupling, InMemoryProblem, InMemoryProblemBuilder};
