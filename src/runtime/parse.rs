//! Console line format: `<chat> <sender> <text>`.
//!
//! `<chat>` is `dm` for a private chat with the sender, otherwise a group chat
//! id. `<text>` is a slash command, `GroupID: <key>`, or a pressed button
//! written as `!next` / `!playlist`.

use std::path::{Path, PathBuf};

use crate::commands::{Action, Chat, Command, Request};

pub const USAGE: &str = "usage: <dm|group-id> <sender-id> </start|/setup|GroupID: <key>|/register <key>|/ingest <path>|/import <dir>|/playlist|/play|!next|!playlist>";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected `<chat> <sender> <text>`")]
    Incomplete,
    #[error("sender must be a numeric id, got {0:?}")]
    BadSender(String),
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

fn required<'a>(arg: &'a str, what: &'static str) -> Result<&'a str, ParseError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(what));
    }
    Ok(arg)
}

fn parse_text(text: &str) -> Result<Command, ParseError> {
    let text = text.trim();

    if let Some(key) = text.strip_prefix("GroupID:") {
        return Ok(Command::RegisterGroup(key.trim().to_string()));
    }

    if let Some(action) = text.strip_prefix('!') {
        return Action::from_callback_data(action.trim())
            .map(Command::Action)
            .ok_or_else(|| ParseError::UnknownCommand(text.to_string()));
    }

    let (head, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    // `/play@squonk_bot` style addressing.
    let name = head.split('@').next().unwrap_or(head);

    match name {
        "/start" => Ok(Command::Start),
        "/setup" => Ok(Command::Setup),
        "/playlist" => Ok(Command::Playlist),
        "/play" => Ok(Command::Play),
        "/register" => Ok(Command::RegisterGroup(
            required(rest, "/register")?.to_string(),
        )),
        "/ingest" => {
            let path = PathBuf::from(required(rest, "/ingest")?);
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(Command::Ingest { path, file_name })
        }
        "/import" => Ok(Command::Import(
            Path::new(required(rest, "/import")?).to_path_buf(),
        )),
        _ => Err(ParseError::UnknownCommand(head.to_string())),
    }
}

pub fn parse_line(line: &str) -> Result<Request, ParseError> {
    let mut parts = line.trim().splitn(3, char::is_whitespace);
    let (Some(chat), Some(sender), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::Incomplete);
    };

    let sender: u64 = sender
        .parse()
        .map_err(|_| ParseError::BadSender(sender.to_string()))?;
    let chat = if chat == "dm" {
        Chat::private(sender)
    } else {
        Chat::group(chat)
    };

    Ok(Request {
        chat,
        sender,
        command: parse_text(text)?,
    })
}
