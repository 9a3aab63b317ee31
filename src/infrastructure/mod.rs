//! Infrastructure layer - Cache backends, upstream client and services

pub mod cache;
pub mod catalog;
pub mod logging;
pub mod services;
