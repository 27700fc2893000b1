use crate::{
    buffer::{BufferMut, Source, pack_rgba, unpack_rgba},
    data::Point,
};

/// A pixel-compositing rule.
///
/// The dispatcher hands each invocation a mutable view covering exactly the
/// pixels it owns, so an op never needs to (and never can) write outside its
/// assigned region. The op is expected to write every pixel of `dst`, where
/// destination pixel `(x, y)` corresponds to source point `sp + (x, y)`.
///
/// Ops carry no error channel. If an op panics, the draw call it belongs to
/// panics after all of its sibling bands have finished.
pub trait Op: Sync {
    fn composite(&self, dst: BufferMut, src: &dyn Source, sp: Point);
}

impl<T: Op + ?Sized> Op for &T {
    fn composite(&self, dst: BufferMut, src: &dyn Source, sp: Point) {
        (**self).composite(dst, src, sp)
    }
}

/// The default compositing rule: opaque overwrite. Source pixels are copied
/// into the destination, ignoring whatever the destination held before.
#[derive(Clone, Copy, Debug, Default)]
pub struct Src;

impl Op for Src {
    fn composite(&self, mut dst: BufferMut, src: &dyn Source, sp: Point) {
        for y in 0..dst.height() {
            for x in 0..dst.width() {
                dst[(x, y)] = src.color_at(sp.x + x as i32, sp.y + y as i32);
            }
        }
    }
}

/// Source-over alpha blending. Source pixels are mixed on top of the existing
/// destination contents weighted by the source alpha.
#[derive(Clone, Copy, Debug, Default)]
pub struct Over;

impl Op for Over {
    fn composite(&self, mut dst: BufferMut, src: &dyn Source, sp: Point) {
        for y in 0..dst.height() {
            for x in 0..dst.width() {
                let s = src.color_at(sp.x + x as i32, sp.y + y as i32);
                dst[(x, y)] = blend_over(s, dst[(x, y)]);
            }
        }
    }
}

#[inline(always)]
fn blend_over(src: u32, dst: u32) -> u32 {
    let lerp = |a: u8, b: u8, t: u16| {
        let a = a as u16;
        let b = b as u16;
        ((a * (256 - t) + b * t) / 256) as u8
    };

    let (sr, sg, sb, sa) = unpack_rgba(src);
    let (dr, dg, db, da) = unpack_rgba(dst);

    // widen 0..=255 alpha to 0..=256 so full alpha replaces exactly
    let t = sa as u16 + ((sa as u16) >> 7);

    pack_rgba(
        lerp(dr, sr, t),
        lerp(dg, sg, t),
        lerp(db, sb, t),
        lerp(da, 0xFF, t),
    )
}
