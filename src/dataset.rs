//! Read-only dataset handle with mutable per-variable encodings
//!
//! A [`Dataset`] wraps an opened NetCDF file and keeps one
//! [`VariableEncoding`] per variable. Encodings are edited in memory and only
//! take effect when the dataset is written with [`Dataset::to_netcdf`].

use crate::encoding::VariableEncoding;
use crate::errors::{NcCompressError, Result};
use crate::metadata::{describe_dataset, DatasetMetadata};
use crate::netcdf_io::{NetCDFWriter, WriteSummary};
use crate::progress::ProgressReporter;
use log::debug;
use netcdf::{AttributeValue, File};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Name of the CF attribute that lists auxiliary coordinate variables
pub const COORDINATES_ATTR: &str = "coordinates";

/// An opened NetCDF dataset. The file is closed when this is dropped.
pub struct Dataset {
    path: PathBuf,
    file: File,
    encodings: HashMap<String, VariableEncoding>,
}

impl Dataset {
    /// Open a dataset read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let file = netcdf::open(path)?;
        let encodings = file
            .variables()
            .map(|v| (v.name().to_string(), VariableEncoding::default()))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            encodings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> DatasetMetadata {
        describe_dataset(&self.file)
    }

    /// All variable names in file order
    pub fn variables(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name().to_string()).collect()
    }

    /// Names of coordinate variables.
    ///
    /// A variable is a coordinate if it is named after one of its own
    /// dimensions, or if a variable (or the file) lists it in a
    /// `coordinates` attribute.
    pub fn coords(&self) -> BTreeSet<String> {
        let mut coords = BTreeSet::new();

        for var in self.file.variables() {
            let name = var.name().to_string();
            if var.dimensions().iter().any(|d| d.name() == name) {
                coords.insert(name);
            }

            if let Some(listed) = var
                .attributes()
                .find(|a| a.name() == COORDINATES_ATTR)
                .and_then(|a| a.value().ok())
            {
                coords.extend(split_coordinates(&listed));
            }
        }

        if let Some(listed) = self
            .file
            .attributes()
            .find(|a| a.name() == COORDINATES_ATTR)
            .and_then(|a| a.value().ok())
        {
            coords.extend(split_coordinates(&listed));
        }

        // Only keep names that exist as variables
        coords.retain(|c| self.encodings.contains_key(c));
        coords
    }

    /// Names of data variables (every variable that is not a coordinate)
    pub fn data_vars(&self) -> Vec<String> {
        let coords = self.coords();
        self.variables()
            .into_iter()
            .filter(|name| !coords.contains(name))
            .collect()
    }

    pub fn encoding(&self, var_name: &str) -> Option<&VariableEncoding> {
        self.encodings.get(var_name)
    }

    pub fn encoding_mut(&mut self, var_name: &str) -> Result<&mut VariableEncoding> {
        self.encodings
            .get_mut(var_name)
            .ok_or_else(|| NcCompressError::VariableNotFound {
                var: var_name.to_string(),
            })
    }

    /// Write the dataset with its current encodings to `output_path`.
    pub fn to_netcdf(
        &self,
        output_path: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> Result<WriteSummary> {
        let writer = NetCDFWriter::new(&self.file, output_path);
        writer.write(&self.encodings, progress)
    }

    /// Release the underlying file handle.
    pub fn close(self) {
        debug!("Closing dataset {}", self.path.display());
    }
}

fn split_coordinates(value: &AttributeValue) -> Vec<String> {
    match value {
        AttributeValue::Str(s) => s.split_whitespace().map(str::to_string).collect(),
        AttributeValue::Strs(ss) => ss
            .iter()
            .flat_map(|s| s.split_whitespace())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
