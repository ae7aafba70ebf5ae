//! Saving volumes to NIfTI files.
//!
//! Encoding is delegated to the `nifti` crate. Raw arrays go through
//! [`save_array`]; wrapped volumes use `VolumeContainer::save` and
//! `PlotVolume::save`, which carry their own spacing metadata.

use std::path::Path;

use log::debug;
use ndarray::{ArrayBase, Data, Dimension, RemoveAxis};
use nifti::writer::WriterOptions;
use nifti::NiftiHeader;

use crate::error::Result;

/// Write an `f32` array to a NIfTI file. A path ending in `.gz` produces
/// a gzip-compressed file.
///
/// When a voxel spacing is given, it is carried into the header's
/// `pixdim` field (one entry per dimension, at most 7).
pub fn save_array<P, S, D>(path: P, data: &ArrayBase<S, D>, spacing: Option<&[f64]>) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = f32>,
    D: Dimension + RemoveAxis,
{
    let path = path.as_ref();
    let mut header = NiftiHeader::default();
    if let Some(spacing) = spacing {
        for (i, s) in spacing.iter().take(7).enumerate() {
            header.pixdim[i + 1] = *s as f32;
        }
    }
    debug!("saving volume {:?} to {}", data.shape(), path.display());
    WriterOptions::new(path)
        .reference_header(&header)
        .write_nifti(data)?;
    Ok(())
}
