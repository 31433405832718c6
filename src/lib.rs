//! Converts `.npy` point clouds into a data file for a browser viewer,
//! optionally moving each object into the pose stored in a label array.

pub mod batch;
pub mod cli;
pub mod converter;
pub mod csv_reader;
pub mod error;
pub mod model;
pub mod npy_reader;
pub mod pcd_reader;
pub mod reader;
pub mod transform;
pub mod writer;

#[cfg(test)]
mod testing;

pub use converter::convert;
pub use error::ConvertError;
