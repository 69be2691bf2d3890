//! Per-domain text corpus builder: crawls each seed site breadth-first and
//! writes every page's title and text into one file per domain.

pub mod config;
pub mod crawler;
pub mod output;
