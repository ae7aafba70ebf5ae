//! An ordered stack of plot volumes for overlapped slice plotting.

use std::path::Path;
use std::slice;

use log::debug;

use crate::error::Result;
use crate::plot::PlotVolume;
use crate::volume::Volume;

/// An ordered collection of [`PlotVolume`]s meant to be drawn on top of
/// each other.
///
/// Every volume added after the first must pass the compatibility check
/// against the first element, so all members share the same
/// dimensionality, shape and voxel spacing. The invariant is enforced at
/// insertion time only.
#[derive(Debug, Default)]
pub struct PlotVolumeStack {
    volumes: Vec<PlotVolume>,
}

impl PlotVolumeStack {
    /// Create an empty stack.
    pub fn new() -> PlotVolumeStack {
        PlotVolumeStack::default()
    }

    /// Add one volume to the stack.
    ///
    /// A first volume is appended unconditionally. Any further volume is
    /// checked for compatibility against the first element and appended
    /// only when the check passes.
    ///
    /// # Errors
    ///
    /// The compatibility error is propagated and the stack is left
    /// unchanged.
    pub fn add_volume(&mut self, volume: PlotVolume) -> Result<()> {
        if let Some(first) = self.volumes.first() {
            volume.check_compatibility_with(first)?;
        }
        debug!("adding volume {:?} to stack of {}", volume.shape(), self.volumes.len());
        self.volumes.push(volume);
        Ok(())
    }

    /// Load a volume from the given file path and add it to the stack.
    pub fn add_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.add_volume(PlotVolume::from_file(path)?)
    }

    /// The number of volumes in the stack.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether the stack holds no volumes.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// A volume by its position in the stack.
    pub fn get(&self, index: usize) -> Option<&PlotVolume> {
        self.volumes.get(index)
    }

    /// A mutable reference to a volume by its position in the stack.
    /// Display metadata may be changed freely; the shape and spacing of a
    /// stacked volume cannot be altered through this interface.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut PlotVolume> {
        self.volumes.get_mut(index)
    }

    /// Iterate over the volumes in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, PlotVolume> {
        self.volumes.iter()
    }

    /// The volumes in insertion order.
    pub fn volumes(&self) -> &[PlotVolume] {
        &self.volumes
    }
}

impl<'a> IntoIterator for &'a PlotVolumeStack {
    type Item = &'a PlotVolume;
    type IntoIter = slice::Iter<'a, PlotVolume>;

    fn into_iter(self) -> Self::IntoIter {
        self.volumes.iter()
    }
}
