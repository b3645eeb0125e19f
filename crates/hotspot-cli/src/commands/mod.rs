pub mod decompose;
pub mod interface;
pub mod scan;
