use crate::{Grid, LayoutError};

/// An algorithm that turns a width and height into a finished height map.
pub trait LayoutGenerator {
    /// Smallest width and height the algorithm can work with.
    fn min_size(&self) -> usize;

    /// Generates a `width` × `height` grid.
    ///
    /// The random stream is reseeded on every call, so the same settings and dimensions always
    /// produce the same grid.
    fn generate(&mut self, width: usize, height: usize) -> Result<Grid, LayoutError>;
}
