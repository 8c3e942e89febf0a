pub mod datatype;
pub mod entity;
pub mod repository;
pub mod service;
mod transform;
