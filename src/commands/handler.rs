use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::Error;
use crate::ingest::IngestGateway;
use crate::library::{self, TrackRecord};
use crate::rotation::Rotation;
use crate::store::PlaylistStore;

use super::model::{Action, AudioReply, ChatKind, Command, Request, Reply};
use super::render;

/// Translates inbound commands into store operations and replies.
///
/// Holds no playlist state; every call goes to the [`PlaylistStore`]. Safe to
/// share between handler threads.
pub struct CommandHandler {
    settings: Settings,
    store: Arc<PlaylistStore>,
    rotation: Rotation,
    ingest: IngestGateway,
}

impl CommandHandler {
    pub fn new(settings: Settings, store: Arc<PlaylistStore>) -> Self {
        Self {
            rotation: Rotation::new(store.clone()),
            ingest: IngestGateway::new(store.clone()),
            settings,
            store,
        }
    }

    pub fn handle(&self, req: &Request) -> Reply {
        let group = req.chat.id.as_str();
        match &req.command {
            Command::Start => Reply::Text(self.settings.runtime.welcome_text.clone()),
            Command::Setup => {
                if self.is_privileged(req) {
                    Reply::Text(render::SETUP_INSTRUCTIONS.to_string())
                } else {
                    tracing::debug!(sender = req.sender, "setup refused");
                    Reply::Text(render::SETUP_REJECTED.to_string())
                }
            }
            Command::RegisterGroup(key) => self.privileged(req, || self.register(key)),
            Command::Ingest { path, file_name } => {
                self.privileged(req, || self.ingest_file(path, file_name))
            }
            Command::Import(dir) => self.privileged(req, || self.import_dir(dir)),
            Command::Playlist => self.playlist(group),
            Command::Play => self.play(group),
            Command::Action(Action::Next) => self.next(group),
            Command::Action(Action::Playlist) => match self.rotation.list_nonempty(group) {
                Ok(tracks) => Reply::Text(render::playlist(&tracks)),
                Err(Error::EmptyPlaylist(_)) => Reply::Notice(render::NO_SONGS_NOTICE.to_string()),
                Err(e) => Reply::Notice(self.failure(&e)),
            },
        }
    }

    fn is_privileged(&self, req: &Request) -> bool {
        req.chat.kind == ChatKind::Private && self.settings.admin.is_operator(req.sender)
    }

    /// Run `f` for the operator in a private chat; everyone else is ignored.
    fn privileged(&self, req: &Request, f: impl FnOnce() -> Reply) -> Reply {
        if self.is_privileged(req) {
            f()
        } else {
            tracing::debug!(sender = req.sender, chat = %req.chat.id, "ignoring privileged command");
            Reply::Ignored
        }
    }

    fn failure(&self, err: &Error) -> String {
        match err {
            Error::StorageUnavailable(_) | Error::PersistenceError(_) | Error::StoreBusy(_) => {
                tracing::warn!(error = %err, "command failed on storage");
            }
            _ => tracing::debug!(error = %err, "command rejected"),
        }
        render::failure(err)
    }

    fn register(&self, key: &str) -> Reply {
        let key = key.trim();
        match self.store.register(key) {
            Ok(true) => Reply::Text(render::registered(key, &self.settings.ingest.extensions)),
            Ok(false) => Reply::Text(render::already_registered(key)),
            Err(e) => Reply::Text(self.failure(&e)),
        }
    }

    fn ingest_file(&self, path: &Path, file_name: &str) -> Reply {
        if let Err(e) = library::ensure_accepted(file_name, &self.settings.ingest) {
            return Reply::Text(self.failure(&e));
        }

        match self.store.registered_groups() {
            Ok(groups) if groups.is_empty() => return Reply::Text(render::NO_GROUPS.to_string()),
            Ok(_) => {}
            Err(e) => return Reply::Text(self.failure(&e)),
        }

        let track = library::read_track(path, file_name);
        match self.ingest.broadcast_to_registered(track.clone()) {
            Ok(groups) => {
                tracing::info!(title = track.title(), artist = track.artist(), groups, "track ingested");
                Reply::Text(render::saved(&track))
            }
            Err(e) => Reply::Text(self.failure(&e)),
        }
    }

    fn import_dir(&self, dir: &Path) -> Reply {
        let tracks = match library::scan(dir, &self.settings.ingest) {
            Ok(tracks) => tracks,
            Err(e) => return Reply::Text(self.failure(&e)),
        };
        if tracks.is_empty() {
            return Reply::Text(render::imported(0, 0));
        }

        match self.ingest.broadcast_many_to_registered(&tracks) {
            Ok(groups) => {
                tracing::info!(dir = %dir.display(), tracks = tracks.len(), groups, "directory imported");
                Reply::Text(render::imported(tracks.len(), groups))
            }
            Err(e) => Reply::Text(self.failure(&e)),
        }
    }

    fn playlist(&self, group: &str) -> Reply {
        match self.rotation.list_nonempty(group) {
            Ok(tracks) => Reply::Text(render::playlist(&tracks)),
            Err(e) => Reply::Text(self.failure(&e)),
        }
    }

    fn audio(&self, track: TrackRecord) -> Reply {
        Reply::Audio(AudioReply {
            track,
            caption: self.settings.runtime.play_caption.clone(),
            actions: vec![Action::Next, Action::Playlist],
        })
    }

    fn play(&self, group: &str) -> Reply {
        match self.rotation.peek_current(group) {
            Ok(Some(track)) => self.audio(track),
            Ok(None) => Reply::Text(render::NO_SONGS.to_string()),
            Err(e) => Reply::Text(self.failure(&e)),
        }
    }

    fn next(&self, group: &str) -> Reply {
        match self.rotation.advance(group) {
            Ok(Some(track)) => self.audio(track),
            Ok(None) => Reply::Notice(render::NO_SONGS_NOTICE.to_string()),
            Err(e) => Reply::Notice(self.failure(&e)),
        }
    }
}
