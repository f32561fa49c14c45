//! Shared NetCDF fixtures for the integration tests

#![allow(dead_code)]

use nc_compress::netcdf_io::NcChar;
use netcdf::create;
use netcdf::types::{NcVariableType, OpaqueType};
use std::path::Path;

pub const TIME: usize = 6;
pub const LAT: usize = 50;
pub const LON: usize = 80;
pub const STATIONS: [&str; 3] = ["Casey", "Davis", "Mawson"];
pub const STATION_CODES: [&str; 3] = ["CASY", "DAVS", "MAWS"];
pub const CODE_LEN: usize = 4;

pub fn temperature_values() -> Vec<f32> {
    let mut values = Vec::with_capacity(TIME * LAT * LON);
    for t in 0..TIME {
        for lat in 0..LAT {
            for _lon in 0..LON {
                values.push(270.0 + t as f32 + (lat / 10) as f32);
            }
        }
    }
    values
}

pub fn mask_values() -> Vec<i16> {
    (0..LAT * LON).map(|i| if i % LON < 40 { 1 } else { 0 }).collect()
}

pub fn station_code_chars() -> Vec<NcChar> {
    STATION_CODES
        .iter()
        .flat_map(|code| code.bytes())
        .map(|b| NcChar(b as i8))
        .collect()
}

/// Writes a small climate-style dataset:
///
/// - dimensions `time` (unlimited, 6), `lat` (50), `lon` (80), `station` (3)
///   and `code_len` (4)
/// - coordinates `time`, `lat`, `lon`, the scalar `height` (listed in
///   `temperature`'s `coordinates` attribute) and the string variable
///   `station_name` (listed in the global `coordinates` attribute)
/// - data variables `temperature` (f32, time/lat/lon, chunked 1/lat/lon),
///   `mask` (i16, lat/lon), the scalar `global_mean` (f64), `station_code`
///   (char, station/code_len) and `remarks` (string, station)
pub fn create_sample_dataset(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = create(path)?;

    file.add_attribute("title", "Test Climate Data")?;
    file.add_attribute("institution", "nc_compress test suite")?;
    file.add_attribute("coordinates", vec!["station_name"])?;

    file.add_unlimited_dimension("time")?;
    file.add_dimension("lat", LAT)?;
    file.add_dimension("lon", LON)?;
    file.add_dimension("station", STATIONS.len())?;
    file.add_dimension("code_len", CODE_LEN)?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "days since 2023-01-01")?;
        let times: Vec<f64> = (0..TIME).map(|i| i as f64 * 30.0).collect();
        time_var.put_values(&times, 0..TIME)?;
    }

    {
        let mut lat_var = file.add_variable::<f32>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        let lats: Vec<f32> = (0..LAT).map(|i| -49.0 + i as f32 * 2.0).collect();
        lat_var.put_values(&lats, ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f32>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        let lons: Vec<f32> = (0..LON).map(|i| i as f32 * 4.5).collect();
        lon_var.put_values(&lons, ..)?;
    }

    {
        let mut height_var = file.add_variable::<f64>("height", &[])?;
        height_var.put_attribute("units", "m")?;
        height_var.put_values(&[2.0f64], ..)?;
    }

    {
        let mut temp_var = file.add_variable::<f32>("temperature", &["time", "lat", "lon"])?;
        temp_var.put_attribute("_FillValue", -999.0f32)?;
        temp_var.put_attribute("units", "K")?;
        temp_var.put_attribute("long_name", "air temperature")?;
        temp_var.put_attribute("coordinates", "height")?;
        temp_var.set_chunking(&[1, LAT, LON])?;
        temp_var.put_values(&temperature_values(), (0..TIME, 0..LAT, 0..LON))?;
    }

    {
        let mut mask_var = file.add_variable::<i16>("mask", &["lat", "lon"])?;
        mask_var.put_attribute("flag_values", vec![0i16, 1])?;
        mask_var.put_values(&mask_values(), ..)?;
    }

    {
        let mut mean_var = file.add_variable::<f64>("global_mean", &[])?;
        mean_var.put_values(&[288.15f64], ..)?;
    }

    {
        let mut name_var = file.add_string_variable("station_name", &["station"])?;
        for (i, name) in STATIONS.iter().enumerate() {
            name_var.put_string(name, i..i + 1)?;
        }
    }

    {
        let mut code_var = file.add_variable::<NcChar>("station_code", &["station", "code_len"])?;
        code_var.put_attribute("long_name", "station code")?;
        code_var.put_values(&station_code_chars(), ..)?;
    }

    {
        let mut remarks_var = file.add_string_variable("remarks", &["station"])?;
        remarks_var.put_string("coastal", 0..1)?;
        remarks_var.put_string("", 1..2)?;
        remarks_var.put_string("plateau edge", 2..3)?;
    }

    Ok(())
}

/// Writes a dataset whose unlimited `time` dimension has no records yet,
/// with an empty data variable `obs` (f32, time/lat)
pub fn create_empty_record_dataset(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = create(path)?;

    file.add_unlimited_dimension("time")?;
    file.add_dimension("lat", LAT)?;

    {
        let mut lat_var = file.add_variable::<f32>("lat", &["lat"])?;
        let lats: Vec<f32> = (0..LAT).map(|i| i as f32).collect();
        lat_var.put_values(&lats, ..)?;
    }

    let mut obs_var = file.add_variable::<f32>("obs", &["time", "lat"])?;
    obs_var.put_attribute("units", "K")?;

    Ok(())
}

/// Writes a dataset holding a variable of a user-defined opaque type
pub fn create_opaque_dataset(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = create(path)?;
    file.add_dimension("x", 4)?;

    let blob = NcVariableType::Opaque(OpaqueType {
        name: "blob".to_string(),
        size: 4,
    });
    file.add_type_from_descriptor(blob.clone())?;
    file.add_variable_with_type("payload", &["x"], &blob)?;
    file.add_variable::<i32>("count", &["x"])?;

    Ok(())
}
