//! NetCDF dataset writing with per-variable storage filters
//!
//! This module re-creates the root group of an input NetCDF file at a new
//! path: dimensions, global attributes and every variable with its
//! attributes and values. Each variable gets the storage filter resolved from
//! its encoding before any of its data is written.

use crate::encoding::{StorageFilter, VariableEncoding};
use crate::errors::{NcCompressError, Result};
use crate::metadata::type_name;
use crate::progress::ProgressReporter;
use log::{debug, info};
use netcdf::types::{FloatType, IntType, NcTypeDescriptor, NcVariableType};
use netcdf::{create, Extent, File, FileMut, Variable, VariableMut};
use std::collections::HashMap;
use std::mem::size_of;
use std::{fs, path::Path};

/// Upper bound on the bytes of one variable held in memory while copying
pub const SLAB_BYTES: usize = 64 * 1024 * 1024;

/// What a write did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteSummary {
    /// Variables written, in file order
    pub variables_written: Vec<String>,
    /// Variables stored with deflate, with the level applied
    pub compressed: Vec<(String, i32)>,
    /// Raw (uncompressed) bytes of variable data copied
    pub bytes_copied: u64,
}

impl WriteSummary {
    pub fn level_of(&self, var_name: &str) -> Option<i32> {
        self.compressed
            .iter()
            .find(|(name, _)| name == var_name)
            .map(|(_, level)| *level)
    }
}

/// Element types the writer can copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Char,
    Str,
}

impl ElementType {
    fn of(vartype: &NcVariableType) -> Option<Self> {
        match vartype {
            NcVariableType::Int(IntType::I8) => Some(Self::I8),
            NcVariableType::Int(IntType::U8) => Some(Self::U8),
            NcVariableType::Int(IntType::I16) => Some(Self::I16),
            NcVariableType::Int(IntType::U16) => Some(Self::U16),
            NcVariableType::Int(IntType::I32) => Some(Self::I32),
            NcVariableType::Int(IntType::U32) => Some(Self::U32),
            NcVariableType::Int(IntType::I64) => Some(Self::I64),
            NcVariableType::Int(IntType::U64) => Some(Self::U64),
            NcVariableType::Float(FloatType::F32) => Some(Self::F32),
            NcVariableType::Float(FloatType::F64) => Some(Self::F64),
            NcVariableType::Char => Some(Self::Char),
            NcVariableType::String => Some(Self::Str),
            _ => None,
        }
    }

    /// In-memory size of one element. Strings count as one pointer each.
    fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Char => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::Str => size_of::<*const u8>(),
        }
    }
}

/// A NetCDF `char` element
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NcChar(pub i8);

unsafe impl NcTypeDescriptor for NcChar {
    fn type_descriptor() -> NcVariableType {
        NcVariableType::Char
    }
}

/// A variable with its filter, layout and element type resolved
#[derive(Debug)]
struct PlannedVariable {
    name: String,
    element: ElementType,
    filter: StorageFilter,
    chunking: Option<Vec<usize>>,
    shape: Vec<usize>,
}

impl PlannedVariable {
    fn byte_size(&self) -> u64 {
        (self.shape.iter().product::<usize>() * self.element.size()) as u64
    }
}

/// Writer that copies a NetCDF file applying per-variable encodings
pub struct NetCDFWriter<'a> {
    input_file: &'a File,
    output_path: &'a Path,
    slab_bytes: usize,
}

impl<'a> NetCDFWriter<'a> {
    /// Create a new NetCDF writer
    pub fn new(input_file: &'a File, output_path: &'a Path) -> Self {
        Self {
            input_file,
            output_path,
            slab_bytes: SLAB_BYTES,
        }
    }

    /// Bound the bytes of one variable read at a time (at least one row of
    /// its first dimension is always read).
    pub fn with_slab_bytes(mut self, slab_bytes: usize) -> Self {
        self.slab_bytes = slab_bytes.max(1);
        self
    }

    /// Resolve every variable's filter, chunking and element type.
    ///
    /// Runs before the output is touched, so a rejected encoding or an
    /// unsupported type leaves no output behind.
    fn plan(&self, encodings: &HashMap<String, VariableEncoding>) -> Result<Vec<PlannedVariable>> {
        let mut planned = Vec::new();

        for var in self.input_file.variables() {
            let name = var.name().to_string();
            let element = ElementType::of(&var.vartype()).ok_or_else(|| {
                NcCompressError::UnsupportedVariableType {
                    var: name.clone(),
                    vartype: type_name(&var),
                }
            })?;
            let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

            let mut filter = match encodings.get(&name) {
                Some(encoding) => encoding.resolve(&name)?,
                None => StorageFilter::Uncompressed,
            };
            if filter != StorageFilter::Uncompressed {
                if shape.is_empty() {
                    debug!("{} is a scalar, storing it without a filter", name);
                    filter = StorageFilter::Uncompressed;
                } else if element == ElementType::Str {
                    debug!("{} holds variable-length strings, storing it without a filter", name);
                    filter = StorageFilter::Uncompressed;
                }
            }

            // Classic-format inputs carry no chunking to preserve
            let chunking = match var.chunking() {
                Ok(chunks) => chunks,
                Err(e) => {
                    debug!("{}: no chunking information ({})", name, e);
                    None
                }
            };

            planned.push(PlannedVariable {
                name,
                element,
                filter,
                chunking,
                shape,
            });
        }

        Ok(planned)
    }

    /// Write the dataset to the output path, replacing any existing file.
    pub fn write(
        &self,
        encodings: &HashMap<String, VariableEncoding>,
        progress: &mut dyn ProgressReporter,
    ) -> Result<WriteSummary> {
        let planned = self.plan(encodings)?;

        if self.output_path.exists() {
            fs::remove_file(self.output_path)?;
        }

        let mut file = create(self.output_path)?;

        for dim in self.input_file.dimensions() {
            if dim.is_unlimited() {
                file.add_unlimited_dimension(&dim.name())?;
            } else {
                file.add_dimension(&dim.name(), dim.len())?;
            }
        }

        for attr in self.input_file.attributes() {
            file.add_attribute(attr.name(), attr.value()?)?;
        }

        let mut summary = WriteSummary::default();
        progress.start(planned.iter().map(PlannedVariable::byte_size).sum());

        for plan in &planned {
            let var = self.input_file.variable(&plan.name).ok_or_else(|| {
                NcCompressError::VariableNotFound {
                    var: plan.name.clone(),
                }
            })?;

            let mut dst = define_variable(&var, &mut file, plan)?;
            let slab = self.slab_bytes;
            let copied = match plan.element {
                ElementType::I8 => copy_values::<i8>(&var, &mut dst, plan, slab, progress)?,
                ElementType::U8 => copy_values::<u8>(&var, &mut dst, plan, slab, progress)?,
                ElementType::I16 => copy_values::<i16>(&var, &mut dst, plan, slab, progress)?,
                ElementType::U16 => copy_values::<u16>(&var, &mut dst, plan, slab, progress)?,
                ElementType::I32 => copy_values::<i32>(&var, &mut dst, plan, slab, progress)?,
                ElementType::U32 => copy_values::<u32>(&var, &mut dst, plan, slab, progress)?,
                ElementType::I64 => copy_values::<i64>(&var, &mut dst, plan, slab, progress)?,
                ElementType::U64 => copy_values::<u64>(&var, &mut dst, plan, slab, progress)?,
                ElementType::F32 => copy_values::<f32>(&var, &mut dst, plan, slab, progress)?,
                ElementType::F64 => copy_values::<f64>(&var, &mut dst, plan, slab, progress)?,
                ElementType::Char => copy_values::<NcChar>(&var, &mut dst, plan, slab, progress)?,
                ElementType::Str => copy_strings(&var, &mut dst, plan, progress)?,
            };

            summary.bytes_copied += copied;
            summary.variables_written.push(plan.name.clone());
            if let StorageFilter::Deflate { level, .. } = plan.filter {
                summary.compressed.push((plan.name.clone(), level));
            }
        }

        progress.finish();
        info!(
            "Wrote {} variables ({} compressed) to {}",
            summary.variables_written.len(),
            summary.compressed.len(),
            self.output_path.display()
        );

        Ok(summary)
    }
}

/// Extents selecting rows `start..end` of the first dimension and all of
/// the remaining ones
fn slab_extents(shape: &[usize], start: usize, end: usize) -> Vec<Extent> {
    std::iter::once(start..end)
        .chain(shape[1..].iter().map(|&len| 0..len))
        .map(Extent::from)
        .collect()
}

/// Extents selecting the single element at row-major position `flat`
fn element_extents(shape: &[usize], mut flat: usize) -> Vec<Extent> {
    let mut index = vec![0; shape.len()];
    for (i, &len) in shape.iter().enumerate().rev() {
        index[i] = flat % len;
        flat /= len;
    }
    index.into_iter().map(|i| Extent::from(i..i + 1)).collect()
}

/// Define `plan` in `out` with its chunking, filter and the attributes of
/// `src`.
fn define_variable<'f>(
    src: &Variable,
    out: &'f mut FileMut,
    plan: &PlannedVariable,
) -> Result<VariableMut<'f>> {
    let dim_names: Vec<String> = src
        .dimensions()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    let dim_refs: Vec<&str> = dim_names.iter().map(|s| s.as_str()).collect();

    let mut dst = out.add_variable_with_type(&plan.name, &dim_refs, &src.vartype())?;

    if let Some(chunks) = &plan.chunking {
        debug!("{}: chunks {:?}", plan.name, chunks);
        dst.set_chunking(chunks)?;
    }

    if let StorageFilter::Deflate { level, shuffle } = plan.filter {
        debug!("{}: deflate level {}, shuffle {}", plan.name, level, shuffle);
        dst.set_compression(level, shuffle)?;
    }

    // Attributes go in before data so `_FillValue` is defined in time
    for attr in src.attributes() {
        dst.put_attribute(attr.name(), attr.value()?)?;
    }

    Ok(dst)
}

/// Copy the values of `src` into `dst`, at most `slab_bytes` at a time.
fn copy_values<T>(
    src: &Variable,
    dst: &mut VariableMut,
    plan: &PlannedVariable,
    slab_bytes: usize,
    progress: &mut dyn ProgressReporter,
) -> Result<u64>
where
    T: NcTypeDescriptor + Copy,
{
    let shape = &plan.shape;
    if shape.is_empty() {
        let values = src.get_values::<T, _>(..)?;
        dst.put_values(&values, ..)?;
        let bytes = size_of::<T>() as u64;
        progress.advance(&plan.name, bytes);
        return Ok(bytes);
    }

    if shape.iter().any(|&len| len == 0) {
        debug!("{} has no values to copy", plan.name);
        return Ok(0);
    }

    let row_bytes = shape[1..].iter().product::<usize>() * size_of::<T>();
    let rows_per_slab = (slab_bytes / row_bytes).max(1);

    let mut copied = 0u64;
    let mut start = 0;
    while start < shape[0] {
        let end = (start + rows_per_slab).min(shape[0]);

        let values = src.get_values::<T, _>(slab_extents(shape, start, end))?;
        dst.put_values(&values, slab_extents(shape, start, end))?;

        let bytes = (values.len() * size_of::<T>()) as u64;
        copied += bytes;
        progress.advance(&plan.name, bytes);
        start = end;
    }

    Ok(copied)
}

/// Copy a variable-length string variable one element at a time.
fn copy_strings(
    src: &Variable,
    dst: &mut VariableMut,
    plan: &PlannedVariable,
    progress: &mut dyn ProgressReporter,
) -> Result<u64> {
    let element_bytes = ElementType::Str.size() as u64;
    let shape = &plan.shape;
    if shape.is_empty() {
        let value = src.get_string(..)?;
        dst.put_string(&value, ..)?;
        progress.advance(&plan.name, element_bytes);
        return Ok(element_bytes);
    }

    let count: usize = shape.iter().product();
    for flat in 0..count {
        let value = src.get_string(element_extents(shape, flat))?;
        dst.put_string(&value, element_extents(shape, flat))?;
    }

    let bytes = count as u64 * element_bytes;
    if count > 0 {
        progress.advance(&plan.name, bytes);
    }
    Ok(bytes)
}
