use crate::{
    buffer::{BufferMut, Source},
    data::{Point, Rect},
    op::{Op, Src},
};
use std::thread::{available_parallelism, scope};

/// Executes a compositing [`Op`] over a destination rectangle by splitting it
/// into horizontal bands and running one band per thread.
///
/// The splitting is done on rows of the destination rectangle, so bands never
/// share a destination pixel and the op runs without any locking. If the
/// number of rows is small this might not help or the split may be quite
/// uneven; the intended use is extremely large destinations or sources that
/// are expensive to sample (like an on-the-fly generated source image).
pub struct Drawer<O = Src> {
    op: O,
    workers: usize,
}

impl Drawer<Src> {
    /// Drawer with sensible defaults: opaque overwrite, one band per
    /// available hardware thread.
    pub fn new() -> Self {
        Self { op: Src, workers: 0 }
    }
}

impl Default for Drawer<Src> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Op> Drawer<O> {
    /// Returns a drawer that performs `op` using `workers` concurrent bands.
    /// A worker count of 0 means "resolve from the available hardware
    /// parallelism", re-read on every draw call rather than cached.
    pub fn with_op(op: O, workers: usize) -> Self {
        Self { op, workers }
    }

    /// Composite `src` into `rect` of `dst`, mapping `rect.min` to `sp`.
    ///
    /// The rectangle is clipped to the destination, split into at most
    /// `workers` row-disjoint bands, and the op is invoked once per band on
    /// that band's mutable sub-view concurrently with its siblings. The call
    /// returns once every band has completed; an empty rectangle dispatches
    /// nothing and returns immediately.
    ///
    /// If the op panics in some band, the panic resurfaces here after all
    /// sibling bands have run to completion. Pixels of the panicking band
    /// are left in an unspecified state; every other band's pixels are
    /// fully written.
    pub fn draw(&self, dst: BufferMut<'_>, rect: Rect, src: &dyn Source, sp: Point) {
        let workers = match self.workers {
            0 => available_parallelism().map(|x| x.get()).unwrap_or(1),
            n => n,
        };

        let (ptr, width, height, stride) = dst.into_raw_parts();

        // clip to the destination, keeping the rect-to-source mapping intact
        let clip = rect.intersect(Rect::new(0, 0, width as i32, height as i32));
        let sp = sp.offset(clip.min.x - rect.min.x, clip.min.y - rect.min.y);

        if clip.is_empty() {
            return;
        }

        let rows = clip.height() as usize;
        let n = workers.min(rows);

        let ptr = ptr as usize;
        let op = &self.op;

        scope(|s| {
            for (y0, y1) in band_ranges(rows, n) {
                let sp = sp + Point::new(0, y0 as i32);

                s.spawn(move || {
                    // SAFETY: the destination outlives the scope, and bands
                    // cover disjoint row ranges of `clip`, so no two tasks
                    // ever touch the same pixel
                    let mut dst = unsafe { BufferMut::from_raw_parts(ptr as *mut u32, width, height, stride) };
                    let band = dst.subregion_mut(
                        clip.min.x as usize,
                        clip.min.y as usize + y0,
                        clip.width() as usize,
                        y1 - y0,
                    );

                    op.composite(band, src, sp);
                });
            }
        });
    }
}

/// Draw with sensible defaults: opaque overwrite, one band per available
/// hardware thread. Equivalent to `Drawer::new().draw(..)`.
pub fn draw(dst: BufferMut<'_>, rect: Rect, src: &dyn Source, sp: Point) {
    Drawer::new().draw(dst, rect, src, sp)
}

/// Row ranges `[i*rows/n, (i+1)*rows/n)` for `i in 0..n`. The floor division
/// makes the ranges contiguous and exactly covering `0..rows`, with the
/// remainder of an uneven split accruing to the trailing bands. Every band is
/// non-empty as long as `n <= rows`.
fn band_ranges(rows: usize, n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).map(move |i| (i * rows / n, (i + 1) * rows / n))
}
