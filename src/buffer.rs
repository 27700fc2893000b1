use std::{
    marker::PhantomData,
    ops::{Deref, Index, IndexMut},
};

/// An owned destination image: packed RGBA pixels in row-major order.
#[derive(Clone)]
pub struct Buffer {
    data: Box<[u32]>,
    width: usize,
    height: usize,
}

/// A borrowed read-only view into a [`Buffer`] (or any packed pixel memory).
#[derive(Clone, Copy)]
pub struct BufferRef<'a> {
    data: *const u32,
    width: usize,
    height: usize,
    stride: usize,
    phantom: PhantomData<&'a [u32]>,
}

/// A borrowed mutable view. Derefs to [`BufferRef`] for read access.
pub struct BufferMut<'a>(BufferRef<'a>);

unsafe impl Send for BufferRef<'_> {}
unsafe impl Sync for BufferRef<'_> {}

impl Buffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; width * height].into_boxed_slice(),
            width,
            height,
        }
    }

    /// Grow or shrink the pixel storage. Existing pixels keep their flat
    /// position in the storage; rows are not reflowed to the new width.
    pub fn resize(&mut self, width: usize, height: usize) {
        let mut data = std::mem::replace(&mut self.data, Box::new([])).into_vec();
        data.resize(width * height, 0);
        self.data = data.into_boxed_slice();
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_ref(&self) -> BufferRef<'_> {
        BufferRef::from_slice(&self.data, self.width, self.height)
    }

    pub fn as_mut(&mut self) -> BufferMut<'_> {
        BufferMut::from_slice(&mut self.data, self.width, self.height)
    }
}

impl<'a> BufferRef<'a> {
    pub fn from_slice(data: &'a [u32], width: usize, height: usize) -> Self {
        Self {
            data: data.as_ptr(),
            width,
            height,
            stride: width,
            phantom: PhantomData,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// A view of the sub-rectangle at `(x, y)`, clipped to this view's extent.
    pub fn subregion(&self, x: usize, y: usize, width: usize, height: usize) -> Self {
        let width = width.min(self.width.saturating_sub(x));
        let height = height.min(self.height.saturating_sub(y));

        Self {
            data: if width == 0 || height == 0 {
                std::ptr::null()
            } else {
                unsafe { self.data.add(y * self.stride + x) }
            },

            width,
            height,
            stride: self.stride,
            phantom: PhantomData,
        }
    }
}

impl<'a> BufferMut<'a> {
    pub fn from_slice(data: &'a mut [u32], width: usize, height: usize) -> Self {
        Self(BufferRef {
            data: data.as_mut_ptr(),
            width,
            height,
            stride: width,
            phantom: PhantomData,
        })
    }

    /// # Safety
    /// `data` must point to at least `stride * height` writable pixels that
    /// no other live view mutates or reads concurrently with this one,
    /// except through row ranges disjoint from it.
    pub unsafe fn from_raw_parts(data: *mut u32, width: usize, height: usize, stride: usize) -> Self {
        Self(BufferRef {
            data,
            width,
            height,
            stride,
            phantom: PhantomData,
        })
    }

    pub fn into_raw_parts(self) -> (*mut u32, usize, usize, usize) {
        (self.0.data as *mut u32, self.0.width, self.0.height, self.0.stride)
    }

    pub fn reborrow(&mut self) -> BufferMut<'_> {
        Self(BufferRef {
            data: self.0.data,
            width: self.0.width,
            height: self.0.height,
            stride: self.0.stride,
            phantom: PhantomData,
        })
    }

    pub fn subregion_mut(&mut self, x: usize, y: usize, width: usize, height: usize) -> Self {
        Self(self.subregion(x, y, width, height))
    }
}

impl<'a> Index<(usize, usize)> for BufferRef<'a> {
    type Output = u32;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(x < self.width);
        assert!(y < self.height);

        unsafe { &*self.data.add(y * self.stride + x) }
    }
}

impl<'a> Index<(usize, usize)> for BufferMut<'a> {
    type Output = u32;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.0[(x, y)]
    }
}

impl<'a> IndexMut<(usize, usize)> for BufferMut<'a> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(x < self.0.width);
        assert!(y < self.0.height);

        unsafe { &mut *(self.0.data as *mut u32).add(y * self.0.stride + x) }
    }
}

impl<'a> Deref for BufferMut<'a> {
    type Target = BufferRef<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A read-only source image, addressed in source coordinates.
///
/// Sources are sampled concurrently from every band task, hence the `Sync`
/// bound. A source does not have to be backed by memory at all: [`SourceFn`]
/// adapts any `Fn(i32, i32) -> u32` closure, which is the intended way to
/// feed computationally heavy on-the-fly generated images to the dispatcher.
pub trait Source: Sync {
    /// Packed RGBA color at `(x, y)`. Out-of-range behavior is up to the
    /// implementation; buffer-backed sources return transparent black.
    fn color_at(&self, x: i32, y: i32) -> u32;
}

/// Adapts a pixel-generating closure into a [`Source`].
pub struct SourceFn<F>(pub F);

impl<F: Fn(i32, i32) -> u32 + Sync> Source for SourceFn<F> {
    fn color_at(&self, x: i32, y: i32) -> u32 {
        (self.0)(x, y)
    }
}

impl Source for BufferRef<'_> {
    fn color_at(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 {
            return 0;
        }

        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return 0;
        }

        self[(x, y)]
    }
}

impl Source for Buffer {
    fn color_at(&self, x: i32, y: i32) -> u32 {
        self.as_ref().color_at(x, y)
    }
}

#[inline(always)]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | (b as u32) | ((a as u32) << 24)
}

#[inline(always)]
pub fn unpack_rgba(color: u32) -> (u8, u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
        ((color >> 24) & 0xFF) as u8,
    )
}
