//! Input readers producing aligned `Dataset`s.
pub mod csv_reader;

pub use csv_reader::{read_dataset, read_dataset_from_reader, LoaderConfig};
