//! Crate-wide error types.

use nifti::error::NiftiError;
use quick_error::quick_error;
use std::io::Error as IoError;
use std::path::PathBuf;

quick_error! {
    /// Error type for all operations in this crate.
    #[derive(Debug)]
    pub enum VolumeError {
        /// The file to read does not exist. Raised before any decode attempt.
        MissingFile(path: PathBuf) {
            display("could not find file {}", path.display())
        }
        /// The file extension matches none of the supported volume formats.
        UnsupportedFormat(path: PathBuf) {
            display("unsupported volume file format: {}", path.display())
        }
        /// The MetaImage header is malformed or misses a mandatory key.
        InvalidMetaHeader(reason: String) {
            display("invalid MetaImage header: {}", reason)
        }
        /// The MetaImage element type is not supported by this reader.
        UnsupportedElementType(name: String) {
            display("unsupported MetaImage element type {}", name)
        }
        /// Two volumes have a different number of dimensions.
        DimensionalityMismatch(lhs: usize, rhs: usize) {
            display("number of dimensions {} and {} mismatch", lhs, rhs)
        }
        /// Two volumes have different shapes.
        ShapeMismatch(lhs: Vec<usize>, rhs: Vec<usize>) {
            display("shapes {:?} and {:?} mismatch", lhs, rhs)
        }
        /// Two volumes have different voxel spacings.
        SpacingMismatch(lhs: Option<Vec<f64>>, rhs: Option<Vec<f64>>) {
            display("voxel spacings {:?} and {:?} mismatch", lhs, rhs)
        }
        /// Attempted to take a slice outside the volume boundaries.
        OutOfBounds(index: usize, axis: usize) {
            display("slice index {} out of bounds on axis {}", index, axis)
        }
        /// Opacity values must lie within [0, 1].
        InvalidOpacity(value: f32) {
            display("opacity {} out of range [0, 1]", value)
        }
        /// The volume was built from in-memory data and has no file to reload.
        NoSourcePath {
            display("volume was not loaded from a file")
        }
        /// The decoded data does not fit the dimensions declared in the header.
        Shape(err: ndarray::ShapeError) {
            from()
            source(err)
            display("inconsistent volume shape: {}", err)
        }
        /// Error propagated from the NIfTI decoder or encoder.
        Nifti(err: NiftiError) {
            from()
            source(err)
            display("NIfTI error: {}", err)
        }
        /// I/O error
        Io(err: IoError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Alias for a `Result` with the crate's error type.
pub type Result<T> = ::std::result::Result<T, VolumeError>;
