//! Splits a draw operation into concurrent horizontal bands.
//!
//! [`Drawer::draw`] (and the default [`draw`]) partition the destination
//! rectangle into row-disjoint bands, run the compositing op over every band
//! on its own thread and join before returning. Intended for extremely large
//! destinations or for sources that are expensive to sample, like an
//! on-the-fly generated source image.

mod buffer;
mod data;
mod dispatch;
mod op;

pub use buffer::{Buffer, BufferMut, BufferRef, Source, SourceFn, pack_rgba, unpack_rgba};
pub use data::{Point, Rect};
pub use dispatch::{Drawer, draw};
pub use op::{Op, Over, Src};
