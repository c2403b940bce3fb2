//! Infrastructure layer - store backends, HTTP client and services

pub mod llm;
pub mod logging;
pub mod services;
pub mod storage;
