//! Domain logic - value objects independent of the forge and the terminal

pub mod commit;
pub mod comparison;
pub mod release;
pub mod repository;
pub mod version;

pub use commit::Commit;
pub use comparison::Comparison;
pub use release::{Release, Releases};
pub use repository::Repository;
pub use version::{ChangeKind, Version};
