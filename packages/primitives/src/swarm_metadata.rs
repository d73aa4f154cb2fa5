use derive_more::Constructor;

/// Swarm counters reported in the announce response.
///
/// They describe the requesting peer only: a peer with nothing `left` to
/// download counts as one seeder, anyone else as one leecher.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Constructor)]
pub struct SwarmMetadata {
    /// (i.e `seeders`): The number of peers that have completed downloading
    pub complete: u32,
    /// (i.e `leechers`): The number of peers that have not completed downloading
    pub incomplete: u32,
}

impl SwarmMetadata {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Counters for a single peer with `left` bytes still to download.
    #[must_use]
    pub fn for_left(left: i64) -> Self {
        if left == 0 {
            Self::new(1, 0)
        } else {
            Self::new(0, 1)
        }
    }
}
