pub mod store;

pub use store::S3Store;
