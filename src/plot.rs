//! A volume container with added information for visualization.

use std::path::Path;

use ndarray::ArrayD;

use crate::error::{Result, VolumeError};
use crate::volume::{Volume, VolumeContainer};

/// A [`VolumeContainer`] extended with display metadata: a colormap
/// identifier, an opacity in `[0, 1]` and a visibility flag.
///
/// Visibility is held in a single boolean field, read through
/// [`is_visible`](PlotVolume::is_visible) and written through
/// [`set_visible`](PlotVolume::set_visible) and
/// [`switch_visible`](PlotVolume::switch_visible).
#[derive(Debug, Clone, PartialEq)]
pub struct PlotVolume {
    volume: VolumeContainer,
    colormap: Option<String>,
    opacity: f32,
    visible: bool,
}

impl PlotVolume {
    /// Wrap a volume container with default display metadata:
    /// no colormap, full opacity, visible.
    pub fn new(volume: VolumeContainer) -> PlotVolume {
        PlotVolume {
            volume,
            colormap: None,
            opacity: 1.,
            visible: true,
        }
    }

    /// Load a plot volume from a volume file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PlotVolume> {
        Ok(PlotVolume::new(VolumeContainer::from_file(path)?))
    }

    /// The wrapped volume container.
    pub fn volume(&self) -> &VolumeContainer {
        &self.volume
    }

    /// The colormap identifier, if one was assigned.
    pub fn colormap(&self) -> Option<&str> {
        self.colormap.as_deref()
    }

    /// Assign or clear the colormap identifier.
    pub fn set_colormap(&mut self, colormap: Option<String>) {
        self.colormap = colormap;
    }

    /// The volume's opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the volume's opacity.
    ///
    /// # Errors
    ///
    /// - `VolumeError::InvalidOpacity` if the value falls outside `[0, 1]`.
    pub fn set_opacity(&mut self, value: f32) -> Result<()> {
        if !(0. ..=1.).contains(&value) {
            return Err(VolumeError::InvalidOpacity(value));
        }
        self.opacity = value;
        Ok(())
    }

    /// Whether the volume should be drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Toggle the visibility flag.
    pub fn switch_visible(&mut self) {
        self.visible = !self.visible;
    }

    /// Take one cross-sectional slice of the wrapped volume.
    /// See [`VolumeContainer::take_slice`].
    pub fn take_slice(&self, index: usize, axis: usize) -> Result<ArrayD<f32>> {
        self.volume.take_slice(index, axis)
    }

    /// Save the wrapped volume to a NIfTI file.
    /// See [`VolumeContainer::save`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.volume.save(path)
    }
}

impl Volume for PlotVolume {
    fn shape(&self) -> &[usize] {
        self.volume.shape()
    }

    fn pixel_spacing(&self) -> Option<&[f64]> {
        self.volume.pixel_spacing()
    }
}
