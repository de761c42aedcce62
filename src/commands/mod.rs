pub mod batch;
pub mod crop;
pub mod info;
