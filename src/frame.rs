/// Column-major 0RGB pixel buffer: pixel (x, y) lives at `y + x * stride`.
/// Row 0 is the bottom of the screen; presentation turns it upright.
pub struct Frame {
    pixels: Vec<u32>,
    columns: usize,
    rows: usize,
    stride: usize,
    /// Frames completed since creation
    generation: u64,
}

impl Frame {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            pixels: vec![0; columns * rows],
            columns,
            rows,
            stride: rows,
            generation: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read access for presentation
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y + x * self.stride]
    }

    /// Grants exclusive write access for one frame.
    /// The frame is released when the returned canvas is dropped, on every path.
    pub fn lock(&mut self) -> Canvas<'_> {
        Canvas { frame: self }
    }
}

/// Scoped write access to a [`Frame`]
pub struct Canvas<'a> {
    frame: &'a mut Frame,
}

impl Canvas<'_> {
    pub fn columns(&self) -> usize {
        self.frame.columns
    }

    pub fn rows(&self) -> usize {
        self.frame.rows
    }

    #[cfg(test)]
    pub(crate) fn put(&mut self, x: usize, y: usize, pixel: u32) {
        let stride = self.frame.stride;
        self.frame.pixels[y + x * stride] = pixel;
    }

    /// All rows of column `x`, bottom first
    #[inline]
    pub fn column_mut(&mut self, x: usize) -> &mut [u32] {
        let start = x * self.frame.stride;
        &mut self.frame.pixels[start..start + self.frame.rows]
    }
}

impl Drop for Canvas<'_> {
    fn drop(&mut self) {
        self.frame.generation += 1;
    }
}
