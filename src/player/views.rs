//! Views derived from the track collection.

use std::collections::HashSet;

use crate::models::{AlbumFilter, Track};

/// `All` followed by every distinct album in first-seen order.
pub fn albums(tracks: &[Track]) -> Vec<AlbumFilter> {
    let mut seen = HashSet::new();
    std::iter::once(AlbumFilter::All)
        .chain(
            tracks
                .iter()
                .filter(|t| seen.insert(t.album.as_str()))
                .map(|t| AlbumFilter::Album(t.album.clone())),
        )
        .collect()
}

/// The subsequence of `tracks` accepted by `filter`, in collection order.
pub fn filtered<'a>(tracks: &'a [Track], filter: &AlbumFilter) -> Vec<&'a Track> {
    tracks.iter().filter(|t| filter.matches(&t.album)).collect()
}
