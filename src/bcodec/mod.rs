pub mod bdecoder;
pub mod bvalue;
pub mod raw_finder;
