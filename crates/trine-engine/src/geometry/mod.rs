//! Static geometry: the hard-coded triangle and the GL objects that hold it.

mod buffer;
mod triangle;

pub use buffer::{VertexArray, VertexBuffer, POSITION_ATTRIBUTE, POSITION_COMPONENTS};
pub use triangle::TRIANGLE;
