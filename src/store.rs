//! Durable playlist store.
//!
//! [`PlaylistStore`] owns the JSON snapshot on disk and the single mutation
//! lock; [`StoreState`] and [`GroupQueue`] are the values it hands out. The
//! file itself is only ever touched by the store's I/O thread (`worker`).

mod playlists;
mod state;
mod worker;

pub use playlists::PlaylistStore;
pub use state::{GroupQueue, StoreState};
