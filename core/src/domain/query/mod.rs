pub mod aggregation;
pub mod directives;
pub mod envelope;
pub mod filter;
pub mod pagination;
pub mod ports;
pub mod services;
pub mod translator;
pub mod value_objects;
