//! A minimal reader for the MetaImage (`.mhd`) format.
//!
//! MetaImage files start with an ASCII `Key = Value` header which ends at
//! the `ElementDataFile` key. The element data either follows the header
//! in the same file (`LOCAL`) or lives in a sibling raw file, optionally
//! zlib-compressed. Only scalar element types are supported; every voxel
//! is converted to `f32` on read.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use std::str;

use byteordered::{ByteOrdered, Endianness};
use either::Either;
use flate2::read::ZlibDecoder;
use ndarray::{Array, ArrayD, IxDyn, ShapeBuilder};

use crate::error::{Result, VolumeError};

/// Scalar element types of the MetaImage standard supported by this reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// MET_UCHAR
    UChar,
    /// MET_CHAR
    Char,
    /// MET_USHORT
    UShort,
    /// MET_SHORT
    Short,
    /// MET_UINT
    UInt,
    /// MET_INT
    Int,
    /// MET_FLOAT
    Float,
    /// MET_DOUBLE
    Double,
}

impl ElementType {
    fn from_name(name: &str) -> Result<ElementType> {
        match name {
            "MET_UCHAR" => Ok(ElementType::UChar),
            "MET_CHAR" => Ok(ElementType::Char),
            "MET_USHORT" => Ok(ElementType::UShort),
            "MET_SHORT" => Ok(ElementType::Short),
            "MET_UINT" => Ok(ElementType::UInt),
            "MET_INT" => Ok(ElementType::Int),
            "MET_FLOAT" => Ok(ElementType::Float),
            "MET_DOUBLE" => Ok(ElementType::Double),
            _ => Err(VolumeError::UnsupportedElementType(name.to_string())),
        }
    }
}

/// Where the element data of a MetaImage file is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataFile {
    /// The data follows the header in the same file.
    Local,
    /// The data lives in a separate file, named relative to the header.
    External(String),
}

/// The decoded MetaImage header fields relevant to volume loading.
/// Unrecognized keys are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct MhdHeader {
    /// Number of dimensions (`NDims`)
    pub ndims: usize,
    /// Extent of each dimension (`DimSize`), x first
    pub dim_size: Vec<usize>,
    /// Element type of the raw data (`ElementType`)
    pub element_type: ElementType,
    /// Physical voxel size per dimension (`ElementSpacing` or `ElementSize`)
    pub element_spacing: Option<Vec<f64>>,
    /// Byte order of the raw data (`ElementByteOrderMSB` or
    /// `BinaryDataByteOrderMSB`)
    pub big_endian: bool,
    /// Whether the raw data is zlib-compressed (`CompressedData`)
    pub compressed: bool,
    /// Location of the element data (`ElementDataFile`)
    pub data_file: DataFile,
}

impl MhdHeader {
    /// Parse a MetaImage header from the leading bytes of a file.
    /// Returns the header and the offset at which element data starts
    /// when `ElementDataFile` is `LOCAL`.
    pub fn parse(bytes: &[u8]) -> Result<(MhdHeader, usize)> {
        let mut ndims: Option<usize> = None;
        let mut dim_size: Option<Vec<usize>> = None;
        let mut element_type: Option<ElementType> = None;
        let mut element_spacing: Option<Vec<f64>> = None;
        let mut big_endian = false;
        let mut compressed = false;
        let mut data_file: Option<DataFile> = None;

        let mut offset = 0;
        while offset < bytes.len() {
            let (line, next) = match bytes[offset..].iter().position(|b| *b == b'\n') {
                Some(p) => (&bytes[offset..offset + p], offset + p + 1),
                None => (&bytes[offset..], bytes.len()),
            };
            offset = next;

            let line = str::from_utf8(line)
                .map_err(|_| invalid("header is not valid text"))?
                .trim();
            if line.is_empty() {
                continue;
            }
            let eq = line.find('=').ok_or_else(|| invalid("header line without '='"))?;
            let key = line[..eq].trim();
            let value = line[eq + 1..].trim();

            match key {
                "NDims" => {
                    ndims = Some(
                        value
                            .parse()
                            .map_err(|_| invalid("NDims is not an integer"))?,
                    );
                }
                "DimSize" => dim_size = Some(parse_list(value, "DimSize")?),
                "ElementType" => element_type = Some(ElementType::from_name(value)?),
                "ElementSpacing" => element_spacing = Some(parse_list(value, "ElementSpacing")?),
                "ElementSize" => {
                    // ElementSpacing takes precedence when both are present
                    if element_spacing.is_none() {
                        element_spacing = Some(parse_list(value, "ElementSize")?);
                    }
                }
                "ElementByteOrderMSB" | "BinaryDataByteOrderMSB" => {
                    big_endian = parse_bool(value, key)?;
                }
                "CompressedData" => compressed = parse_bool(value, key)?,
                "ElementDataFile" => {
                    data_file = Some(if value.eq_ignore_ascii_case("LOCAL") {
                        DataFile::Local
                    } else {
                        DataFile::External(value.to_string())
                    });
                    // ElementDataFile is by definition the last header key
                    break;
                }
                _ => {}
            }
        }

        let ndims = ndims.ok_or_else(|| invalid("missing NDims"))?;
        let dim_size = dim_size.ok_or_else(|| invalid("missing DimSize"))?;
        if dim_size.len() != ndims {
            return Err(invalid("DimSize does not match NDims"));
        }
        if dim_size.iter().any(|d| *d == 0) {
            return Err(invalid("DimSize contains a zero extent"));
        }
        if let Some(spacing) = &element_spacing {
            if spacing.len() != ndims {
                return Err(invalid("ElementSpacing does not match NDims"));
            }
        }
        let element_type = element_type.ok_or_else(|| invalid("missing ElementType"))?;
        let data_file = data_file.ok_or_else(|| invalid("missing ElementDataFile"))?;

        Ok((
            MhdHeader {
                ndims,
                dim_size,
                element_type,
                element_spacing,
                big_endian,
                compressed,
                data_file,
            },
            offset,
        ))
    }

    fn endianness(&self) -> Endianness {
        if self.big_endian {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

fn invalid(reason: &str) -> VolumeError {
    VolumeError::InvalidMetaHeader(reason.to_string())
}

fn parse_list<T: str::FromStr>(value: &str, key: &str) -> Result<Vec<T>> {
    value
        .split_whitespace()
        .map(|v| {
            v.parse()
                .map_err(|_| invalid(&format!("bad value in {}", key)))
        })
        .collect()
}

fn parse_bool(value: &str, key: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid(&format!("{} is not a boolean", key)))
    }
}

/// Open a MetaImage file and decode its element data to an `f32` array
/// in Fortran order (x varies fastest), plus the voxel spacing if the
/// header declares one.
pub fn open_mhd(path: &Path) -> Result<(ArrayD<f32>, Option<Vec<f64>>)> {
    let bytes = fs::read(path)?;
    let (header, data_offset) = MhdHeader::parse(&bytes)?;
    let count: usize = header.dim_size.iter().product();

    let values = match &header.data_file {
        DataFile::Local => decode_elements(&bytes[data_offset..], &header, count)?,
        DataFile::External(name) => {
            let data_path = path.parent().unwrap_or_else(|| Path::new(".")).join(name);
            if !data_path.exists() {
                return Err(VolumeError::MissingFile(data_path));
            }
            decode_elements(BufReader::new(File::open(&data_path)?), &header, count)?
        }
    };

    let data = Array::from_shape_vec(IxDyn(&header.dim_size).f(), values)?;
    Ok((data, header.element_spacing))
}

/// Decode `count` raw elements into `f32` values, honoring the header's
/// byte order and compression flag.
fn decode_elements<R: Read>(src: R, header: &MhdHeader, count: usize) -> Result<Vec<f32>> {
    let src = if header.compressed {
        Either::Left(ZlibDecoder::new(src))
    } else {
        Either::Right(src)
    };
    let mut src = ByteOrdered::runtime(src, header.endianness());

    let mut values = Vec::with_capacity(count);
    match header.element_type {
        ElementType::UChar => {
            for _ in 0..count {
                values.push(f32::from(src.read_u8()?));
            }
        }
        ElementType::Char => {
            for _ in 0..count {
                values.push(f32::from(src.read_i8()?));
            }
        }
        ElementType::UShort => {
            for _ in 0..count {
                values.push(f32::from(src.read_u16()?));
            }
        }
        ElementType::Short => {
            for _ in 0..count {
                values.push(f32::from(src.read_i16()?));
            }
        }
        ElementType::UInt => {
            for _ in 0..count {
                values.push(src.read_u32()? as f32);
            }
        }
        ElementType::Int => {
            for _ in 0..count {
                values.push(src.read_i32()? as f32);
            }
        }
        ElementType::Float => {
            for _ in 0..count {
                values.push(src.read_f32()?);
            }
        }
        ElementType::Double => {
            for _ in 0..count {
                values.push(src.read_f64()? as f32);
            }
        }
    }
    Ok(values)
}
