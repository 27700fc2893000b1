//! Renders a procedurally generated plasma in parallel bands and saves it as
//! a PNG next to the current working directory.

use banddraw::{Buffer, Point, Rect, SourceFn, draw, pack_rgba, unpack_rgba};

fn plasma(x: i32, y: i32) -> u32 {
    let fx = x as f32 / 96.0;
    let fy = y as f32 / 96.0;

    let v = (fx.sin() + fy.sin() + (fx + fy).sin() + (fx * fx + fy * fy).sqrt().sin()) / 4.0;
    let r = ((v * 6.283).sin() * 0.5 + 0.5) * 255.0;
    let g = ((v * 6.283 + 2.094).sin() * 0.5 + 0.5) * 255.0;
    let b = ((v * 6.283 + 4.188).sin() * 0.5 + 0.5) * 255.0;

    pack_rgba(r as u8, g as u8, b as u8, 0xFF)
}

fn main() {
    const SIZE: usize = 1024;

    let mut buffer = Buffer::new(SIZE, SIZE);
    draw(
        buffer.as_mut(),
        Rect::new(0, 0, SIZE as i32, SIZE as i32),
        &SourceFn(plasma),
        Point::default(),
    );

    let view = buffer.as_ref();
    let mut image = image::RgbaImage::new(SIZE as u32, SIZE as u32);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let (r, g, b, a) = unpack_rgba(view[(x as usize, y as usize)]);
        *pixel = image::Rgba([r, g, b, a]);
    }

    image.save("plasma.png").expect("failed to save plasma.png");
    println!("saved plasma.png ({SIZE}x{SIZE})");
}
