//! Console apps.
//!
//! - [`torrent_info`]: prints the summary and the info hash of a `.torrent` file.
pub mod torrent_info;
