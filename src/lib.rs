//! Thriftscope - recoding and classical hypothesis testing for the
//! secondhand-clothing survey
//!
//! The pipeline runs in one pass: [`survey`] reads the 23-column export,
//! [`recode`] turns free-text answers into numeric and categorical fields,
//! [`battery`] runs the fixed set of tests over the cleaned table, and the
//! output modules write CSV, JSON and SVG files.

pub mod battery;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod descriptive;
pub mod hypothesis;
pub mod json_output;
pub mod recode;
pub mod survey;
pub mod svg_output;
