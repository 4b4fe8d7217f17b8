pub mod layout;
mod reader;

#[cfg(test)]
pub mod mock;

pub use reader::{BlobReader, align4, round2, round4};

#[cfg(test)]
pub use mock::{MockBlobBuilder, MockBlock, MockDoor, MockFrame};
