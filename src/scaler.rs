use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::frame::Frame;

/// Precomputed mapping from window pixels to frame neighbors + weights.
/// Rows are stored already flipped: window row 0 reads the top frame row.
pub struct ScaleLut {
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            x0: Vec::new(),
            x1: Vec::new(),
            wx: Vec::new(),
            y0: Vec::new(),
            y1: Vec::new(),
            wy: Vec::new(),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.x0.len(), self.y0.len())
    }
}

fn axis(dst: usize, src: usize, flip: bool) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let mut i0 = vec![0; dst];
    let mut i1 = vec![0; dst];
    let mut w = vec![0; dst];
    let scale = src as f32 / dst as f32;
    let last = src as isize - 1;

    for d in 0..dst {
        let f = d as f32 * scale;
        let a = (f.floor() as isize).clamp(0, last);
        let b = (a + 1).clamp(0, last);
        // fixed-point 8.8
        let weight = ((f - a as f32) * 256.0).round().clamp(0.0, 256.0) as u16;
        if flip {
            i0[d] = (last - a) as usize;
            i1[d] = (last - b) as usize;
        } else {
            i0[d] = a as usize;
            i1[d] = b as usize;
        }
        w[d] = weight;
    }
    (i0, i1, w)
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let (x0, x1, wx) = axis(dst_w, src_w, false);
    let (y0, y1, wy) = axis(dst_h, src_h, true);
    ScaleLut {
        x0,
        x1,
        wx,
        y0,
        y1,
        wy,
    }
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // Interpolate R and B together (00RR00BB), with mask 0x00FF00FF,
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8 & 0x00FF00FF;
    // Interpolate G separately (0000GG00), with mask 0x0000FF00
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8 & 0x0000FF00;
    rb | g
}

/// Turns the column-major frame upright and stretches it over the row-major window buffer.
/// Window rows are filled in parallel; the frame is only read.
pub fn present(dst: &mut [u32], dw: usize, frame: &Frame, lut: &ScaleLut) {
    let src = frame.pixels();
    let stride = frame.stride();
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let y0 = lut.y0[y];
        let y1 = lut.y1[y];
        let wy = lut.wy[y] as u32;

        for (x, px) in dst_row.iter_mut().enumerate() {
            let col0 = lut.x0[x] * stride;
            let col1 = lut.x1[x] * stride;
            let wx = lut.wx[x] as u32;

            // read 4 neighbors
            let c00 = src[col0 + y0];
            let c10 = src[col1 + y0];
            let c01 = src[col0 + y1];
            let c11 = src[col1 + y1];

            let top = lerp_color_u32(c00, c10, wx);
            let bot = lerp_color_u32(c01, c11, wx);
            *px = lerp_color_u32(top, bot, wy);
        }
    });
}
