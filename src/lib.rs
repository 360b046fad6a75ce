//! cardflow: a masonry card gallery for the terminal.
//!
//! Posts are markdown files with front matter. The gallery lays them out in
//! columns with a greedy shortest-column packer, filters them by fuzzy search,
//! tag, and type, and keeps a batch install list for winget apps.
//!
//! The crate follows a Pure Core / Impure Shell split: `state` and
//! `view_state` are pure, `view` owns the terminal, `meta` owns the network.

pub mod commands;
pub mod config;
pub mod logging;
pub mod meta;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
