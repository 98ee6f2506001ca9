use std::path::PathBuf;

use crate::library::TrackRecord;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChatKind {
    /// One-to-one conversation with the sender.
    Private,
    /// A group chat; its id is the group key.
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: String,
    pub kind: ChatKind,
}

impl Chat {
    pub fn private(user_id: u64) -> Self {
        Self {
            id: user_id.to_string(),
            kind: ChatKind::Private,
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ChatKind::Group,
        }
    }
}

/// Buttons attached to an audio reply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Rotate to the next track and play it.
    Next,
    /// Show the group's playlist.
    Playlist,
}

impl Action {
    /// Payload the transport sends back when the button is pressed.
    pub fn callback_data(self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Playlist => "playlist",
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "next" => Some(Action::Next),
            "playlist" => Some(Action::Playlist),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "▶️ Next",
            Action::Playlist => "📃 Playlist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Setup,
    RegisterGroup(String),
    /// A file the transport already downloaded to `path`, uploaded as `file_name`.
    Ingest { path: PathBuf, file_name: String },
    /// Bulk import of every accepted file under a directory.
    Import(PathBuf),
    Playlist,
    Play,
    /// A button from a previous audio reply was pressed.
    Action(Action),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub chat: Chat,
    pub sender: u64,
    pub command: Command,
}

/// Audio to deliver, with its caption and buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioReply {
    pub track: TrackRecord,
    pub caption: String,
    pub actions: Vec<Action>,
}

impl AudioReply {
    pub fn location(&self) -> &str {
        self.track.location()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A message in the chat.
    Text(String),
    /// A short acknowledgement of a pressed button.
    Notice(String),
    Audio(AudioReply),
    /// Nothing is sent back.
    Ignored,
}
