//! Browser client for an image concatenation service: pick images from
//! disk or from a server folder, order them by drag and drop, and submit
//! them in that order.

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod preview;
pub mod request;
pub mod response;
pub mod selection;
