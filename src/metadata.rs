//! NetCDF dataset structure inspection
//!
//! This module captures the shape of a dataset (dimensions, variables and
//! global attribute names) so it can be logged and compared between the
//! input and output of a compression run.

use log::debug;
use netcdf::File;

/// Information about a dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    pub name: String,
    pub length: usize,
    pub is_unlimited: bool,
}

/// Structured metadata for a NetCDF variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMetadata {
    pub name: String,
    pub data_type: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
    pub attribute_names: Vec<String>,
}

/// Structure of the root group of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetMetadata {
    pub dimensions: Vec<DimensionInfo>,
    pub variables: Vec<VariableMetadata>,
    pub global_attributes: Vec<String>,
}

impl DatasetMetadata {
    pub fn variable(&self, name: &str) -> Option<&VariableMetadata> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }
}

/// Lower-cased type name, e.g. `float(f32)`
pub fn type_name(var: &netcdf::Variable) -> String {
    format!("{:?}", var.vartype()).to_lowercase()
}

/// Collect the structure of a NetCDF file's root group.
pub fn describe_dataset(file: &File) -> DatasetMetadata {
    let dimensions = file
        .dimensions()
        .map(|d| DimensionInfo {
            name: d.name().to_string(),
            length: d.len(),
            is_unlimited: d.is_unlimited(),
        })
        .collect();

    let variables = file
        .variables()
        .map(|var| VariableMetadata {
            name: var.name().to_string(),
            data_type: type_name(&var),
            dimensions: var
                .dimensions()
                .iter()
                .map(|d| d.name().to_string())
                .collect(),
            shape: var.dimensions().iter().map(|d| d.len()).collect(),
            attribute_names: var.attributes().map(|a| a.name().to_string()).collect(),
        })
        .collect();

    let global_attributes = file.attributes().map(|a| a.name().to_string()).collect();

    DatasetMetadata {
        dimensions,
        variables,
        global_attributes,
    }
}

/// Logs the dataset structure at debug level.
pub fn log_structure(metadata: &DatasetMetadata) {
    for dim in &metadata.dimensions {
        if dim.is_unlimited {
            debug!("dimension {} = {} (unlimited)", dim.name, dim.length);
        } else {
            debug!("dimension {} = {}", dim.name, dim.length);
        }
    }
    for var in &metadata.variables {
        if var.dimensions.is_empty() {
            debug!("variable {} ({}): scalar", var.name, var.data_type);
        } else {
            debug!(
                "variable {} ({}): [{}] = ({})",
                var.name,
                var.data_type,
                var.dimensions.join(", "),
                var.shape
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(" x ")
            );
        }
    }
}
