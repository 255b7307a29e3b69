//! # Network Graph Model
//!
//! Plain DTOs shared by the row source, the builder and the graph:
//! cell values, vertex and edge identities, orientation policy.
//!
//! This module is pure data: no I/O, no state.

pub mod vertex;
pub mod edge;
pub mod value;
pub mod orientation;

pub use vertex::{Vertex, VertexHandle};
pub use edge::{Edge, EdgeHandle, EdgeId, Direction};
pub use value::Value;
pub use orientation::{Orientation, OrientationCodes, RowOrientation};
