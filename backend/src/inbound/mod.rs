//! Driving adapters that translate external input into domain calls.

pub mod http;
