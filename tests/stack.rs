//! Stacking volumes loaded from files.

use ndarray::{Array, IxDyn};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use volstack::{save_array, PlotVolumeStack, Volume, VolumeError};

fn write_nii(dir: &std::path::Path, name: &str, shape: &[usize], spacing: &[f64]) -> std::path::PathBuf {
    let n: usize = shape.iter().product();
    let data =
        Array::from_shape_vec(IxDyn(shape), (0..n).map(|v| v as f32).collect()).unwrap();
    let path = dir.join(name);
    save_array(&path, &data, Some(spacing)).unwrap();
    path
}

#[test]
fn stack_from_compatible_files() {
    let dir = tempdir().unwrap();
    let anat = write_nii(dir.path(), "anat.nii.gz", &[4, 5, 6], &[1., 1., 2.]);
    let stats = write_nii(dir.path(), "stats.nii.gz", &[4, 5, 6], &[1., 1., 2.]);

    let mut stack = PlotVolumeStack::new();
    stack.add_from_file(&anat).unwrap();
    stack.add_from_file(&stats).unwrap();
    assert_eq!(stack.len(), 2);
    assert!(stack.iter().all(|v| v.shape() == [4, 5, 6].as_ref()));
}

#[test]
fn incompatible_file_leaves_stack_unchanged() {
    let dir = tempdir().unwrap();
    let anat = write_nii(dir.path(), "anat.nii.gz", &[4, 5, 6], &[1., 1., 2.]);
    let other = write_nii(dir.path(), "other.nii.gz", &[4, 5, 7], &[1., 1., 2.]);
    let coarse = write_nii(dir.path(), "coarse.nii.gz", &[4, 5, 6], &[2., 2., 4.]);

    let mut stack = PlotVolumeStack::new();
    stack.add_from_file(&anat).unwrap();

    let err = stack.add_from_file(&other).unwrap_err();
    assert!(matches!(err, VolumeError::ShapeMismatch(_, _)));
    assert_eq!(stack.len(), 1);

    let err = stack.add_from_file(&coarse).unwrap_err();
    assert!(matches!(err, VolumeError::SpacingMismatch(_, _)));
    assert_eq!(stack.len(), 1);
}

#[test]
fn nifti_and_metaimage_volumes_can_share_a_stack() {
    let dir = tempdir().unwrap();
    let nii = write_nii(dir.path(), "vol.nii.gz", &[2, 3, 2], &[1., 1., 2.]);

    let header = "NDims = 3\n\
                  DimSize = 2 3 2\n\
                  ElementType = MET_UCHAR\n\
                  ElementSpacing = 1 1 2\n\
                  ElementDataFile = LOCAL\n";
    let mut bytes = header.as_bytes().to_vec();
    bytes.extend_from_slice(&[0u8; 12]);
    let mhd = dir.path().join("vol.mhd");
    std::fs::write(&mhd, &bytes).unwrap();

    let mut stack = PlotVolumeStack::new();
    stack.add_from_file(&nii).unwrap();
    stack.add_from_file(&mhd).unwrap();
    assert_eq!(stack.len(), 2);
}

#[test]
fn load_failure_during_add_keeps_stack_intact() {
    let dir = tempdir().unwrap();
    let anat = write_nii(dir.path(), "anat.nii.gz", &[2, 2, 2], &[1., 1., 1.]);

    let mut stack = PlotVolumeStack::new();
    stack.add_from_file(&anat).unwrap();

    let err = stack.add_from_file(dir.path().join("absent.nii.gz")).unwrap_err();
    assert!(matches!(err, VolumeError::MissingFile(_)));
    assert_eq!(stack.len(), 1);
}
