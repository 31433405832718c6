pub mod label;
pub mod options;
pub mod output;
pub mod vector3;
