//! PNG snapshots of a grid.
//! Values are divided by `scale` (the initial value base) and clamped to
//! `[0, 1]` before going through the turbo color map.

use crate::domain::*;
use crate::util::*;

fn color(value: f64, scale: f64) -> image::Rgb<u8> {
    let r = (value / scale).clamp(0.0, 1.0);
    image::Rgb(colorous::TURBO.eval_continuous(r).as_array())
}

/// Timeline of a 1D run, one row of pixels per frame.
pub struct Image1D {
    img_buffer: image::RgbImage,
    scale: f64,
}

impl Image1D {
    pub fn new(bound: AABB<1>, lines: u32, scale: f64) -> Self {
        let exclusive_bound = bound.exclusive_bounds();
        Image1D {
            img_buffer: image::RgbImage::new(exclusive_bound[0] as u32, lines),
            scale,
        }
    }

    pub fn add_line(&mut self, l: u32, v: &[f64]) {
        debug_assert!(l < self.img_buffer.height());
        debug_assert_eq!(v.len(), self.img_buffer.width() as usize);
        for x in 0..self.img_buffer.width() {
            let c = color(v[x as usize], self.scale);
            self.img_buffer.put_pixel(x, l, c);
        }
    }

    pub fn write<F: AsRef<std::path::Path>>(
        &self,
        s: &F,
    ) -> image::ImageResult<()> {
        self.img_buffer.save(s)
    }
}

/// Heat map of a 2D grid, rows top to bottom and columns left to right.
pub fn image_2d<F: AsRef<std::path::Path>, DomainType: DomainView<2>>(
    domain: &DomainType,
    scale: f64,
    s: &F,
) -> image::ImageResult<()> {
    let aabb = domain.aabb();
    let exclusive_bounds = aabb.exclusive_bounds();
    let min = aabb.min();
    let mut img = image::RgbImage::new(
        exclusive_bounds[1] as u32,
        exclusive_bounds[0] as u32,
    );
    for (l, value) in domain.buffer().iter().enumerate() {
        let coord = aabb.linear_to_coord(l) - min;
        img.put_pixel(coord[1] as u32, coord[0] as u32, color(*value, scale));
    }
    img.save(s)
}
