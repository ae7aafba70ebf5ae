//! Helpers for loading, validating and stacking volumetric medical
//! images.
//!
//! Volumes are read from NIfTI (`.nii`, `.nii.gz`) or MetaImage (`.mhd`)
//! files into a [`VolumeContainer`], which exposes the voxel data, its
//! shape and the physical voxel spacing. A [`PlotVolume`] adds display
//! metadata on top, and a [`PlotVolumeStack`] keeps an ordered set of
//! plot volumes that are guaranteed to share the same shape,
//! dimensionality and spacing.
//!
//! ```no_run
//! use volstack::PlotVolumeStack;
//! # use volstack::error::Result;
//!
//! # fn run() -> Result<()> {
//! let mut stack = PlotVolumeStack::new();
//! stack.add_from_file("anatomical.nii.gz")?;
//! stack.add_from_file("stats.nii.gz")?;
//! let slice = stack.get(0).unwrap().take_slice(10, 2)?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts)]

pub mod error;
pub mod format;
pub mod mhd;
pub mod plot;
pub mod stack;
pub mod volume;
pub mod writer;

pub use error::{Result, VolumeError};
pub use format::{open_volume_file, VolumeFormat};
pub use plot::PlotVolume;
pub use stack::PlotVolumeStack;
pub use volume::{Volume, VolumeContainer};
pub use writer::save_array;
