//! Route modules for PDF Genie Server

pub mod frontend;
pub mod health;
pub mod upload;
