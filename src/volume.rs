//! Volume containers and the metadata compatibility API.
//!
//! `VolumeContainer` wraps a decoded voxel array with its spacing
//! metadata. The `Volume` trait exposes the metadata accessors shared by
//! every volume-like type and provides the pairwise compatibility checks
//! on top of them.

use std::path::{Path, PathBuf};

use log::error;
use ndarray::{ArrayD, Axis};

use crate::error::{Result, VolumeError};
use crate::format::open_volume_file;
use crate::writer;

/// Common metadata interface of volume-like types.
///
/// `check_compatibility_with` and `is_compatible` are derived from the
/// accessors and need not be reimplemented.
pub trait Volume {
    /// The extent of the volume along each axis.
    fn shape(&self) -> &[usize];

    /// The physical size of one voxel along each axis, if known.
    fn pixel_spacing(&self) -> Option<&[f64]>;

    /// The volume's number of dimensions.
    fn ndims(&self) -> usize {
        self.shape().len()
    }

    /// Check that `self` and `other` share the same dimensionality, shape
    /// and voxel spacing, in that order.
    ///
    /// # Errors
    ///
    /// The first mismatch found is reported, carrying both values:
    /// `DimensionalityMismatch`, then `ShapeMismatch`, then
    /// `SpacingMismatch`.
    fn check_compatibility_with<V>(&self, other: &V) -> Result<()>
    where
        V: Volume + ?Sized,
    {
        if self.ndims() != other.ndims() {
            return Err(VolumeError::DimensionalityMismatch(
                self.ndims(),
                other.ndims(),
            ));
        }
        if self.shape() != other.shape() {
            return Err(VolumeError::ShapeMismatch(
                self.shape().to_vec(),
                other.shape().to_vec(),
            ));
        }
        if self.pixel_spacing() != other.pixel_spacing() {
            return Err(VolumeError::SpacingMismatch(
                self.pixel_spacing().map(<[f64]>::to_vec),
                other.pixel_spacing().map(<[f64]>::to_vec),
            ));
        }
        Ok(())
    }

    /// Non-throwing wrapper over `check_compatibility_with`.
    fn is_compatible<V>(&self, other: &V) -> bool
    where
        V: Volume + ?Sized,
    {
        self.check_compatibility_with(other).is_ok()
    }
}

/// A container of volumetric data with its voxel spacing metadata.
///
/// The data is immutable once constructed; `reload` is the only way to
/// replace it, and only for containers that came from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeContainer {
    data: ArrayD<f32>,
    pixel_spacing: Option<Vec<f64>>,
    source_path: Option<PathBuf>,
}

impl VolumeContainer {
    /// Create a container from in-memory data.
    pub fn new(data: ArrayD<f32>, pixel_spacing: Option<Vec<f64>>) -> VolumeContainer {
        VolumeContainer {
            data,
            pixel_spacing,
            source_path: None,
        }
    }

    /// Load a container from a volume file, dispatching on the file
    /// extension (see [`open_volume_file`]).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VolumeContainer> {
        let path = path.as_ref();
        let (data, pixel_spacing) = open_volume_file(path)?;
        Ok(VolumeContainer {
            data,
            pixel_spacing,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// Re-read the volume from the file it was originally loaded from.
    ///
    /// # Errors
    ///
    /// - `VolumeError::NoSourcePath` if the container was built from
    ///   in-memory data.
    pub fn reload(&mut self) -> Result<()> {
        let path = self.source_path.clone().ok_or(VolumeError::NoSourcePath)?;
        let (data, pixel_spacing) = open_volume_file(&path)?;
        self.data = data;
        self.pixel_spacing = pixel_spacing;
        Ok(())
    }

    /// The voxel data.
    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// The path the volume was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Take one cross-sectional slice of the volume at the given index
    /// along the given axis, yielding an array of N-1 dimensions.
    ///
    /// # Errors
    ///
    /// - `VolumeError::OutOfBounds` if the axis or index falls outside
    ///   the volume, logged with the slice coordinates and source path.
    pub fn take_slice(&self, index: usize, axis: usize) -> Result<ArrayD<f32>> {
        let shape = self.data.shape();
        if axis >= shape.len() || index >= shape[axis] {
            error!(
                "could not take slice {} on axis {} from {:?}",
                index, axis, self.source_path
            );
            return Err(VolumeError::OutOfBounds(index, axis));
        }
        Ok(self.data.index_axis(Axis(axis), index).to_owned())
    }

    /// Save the volume to a NIfTI file, carrying the voxel spacing into
    /// the header. A path ending in `.gz` produces a compressed file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        writer::save_array(path, &self.data, self.pixel_spacing())
    }
}

impl Volume for VolumeContainer {
    fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    fn pixel_spacing(&self) -> Option<&[f64]> {
        self.pixel_spacing.as_deref()
    }
}
