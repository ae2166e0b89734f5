use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source row/column for every destination pixel.
#[derive(Debug, Default)]
pub struct StretchLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl StretchLut {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

pub fn build_stretch_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> StretchLut {
    let axis = |dst: usize, src: usize| -> Vec<usize> {
        if src == 0 {
            return vec![0; dst];
        }
        // Sample at pixel centres so both edges map symmetrically.
        let scale = src as f32 / dst as f32;
        (0..dst)
            .map(|d| (((d as f32 + 0.5) * scale) as usize).min(src - 1))
            .collect()
    };
    StretchLut {
        src_x: axis(dst_w, src_w),
        src_y: axis(dst_h, src_h),
    }
}

/// Nearest-neighbour stretch of `src` (row stride `sw`) into `dst` (row stride `dw`).
/// Rows are filled in parallel.
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &StretchLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw)
        .zip(lut.src_y.par_iter())
        .for_each(|(dst_row, &sy)| {
            let src_row = &src[sy * sw..(sy + 1) * sw];
            for (px, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
                *px = src_row[sx];
            }
        });
}
