//! Program to print the metadata and the info hash of a `.torrent` file.
use torrust_swarm_tracker::console::torrent_info;

fn main() -> anyhow::Result<()> {
    torrent_info::run()
}
