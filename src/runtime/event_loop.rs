use std::io::{BufRead, ErrorKind, Write};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::commands::{CommandHandler, Reply, Request};

use super::parse::{ParseError, USAGE, parse_line};

/// Render a reply as console text; `None` when nothing should be printed.
pub fn format_reply(chat: &str, reply: &Reply) -> Option<String> {
    let body = match reply {
        Reply::Ignored => return None,
        Reply::Text(text) => text.clone(),
        Reply::Notice(text) => format!("(notice) {text}"),
        Reply::Audio(audio) => {
            let buttons: Vec<String> = audio
                .actions
                .iter()
                .map(|a| format!("{} (!{})", a.label(), a.callback_data()))
                .collect();
            format!(
                "♪ {}\n{}\n[{}]",
                audio.location(),
                audio.caption,
                buttons.join(" | ")
            )
        }
    };

    let mut out = String::new();
    for line in body.lines() {
        out.push_str(&format!("[{chat}] {line}\n"));
    }
    Some(out)
}

fn write_out<W: Write>(output: &Mutex<W>, text: &str) {
    let mut w = output.lock();
    if let Err(e) = w.write_all(text.as_bytes()).and_then(|()| w.flush()) {
        tracing::warn!(error = %e, "failed to write reply");
    }
}

fn spawn_worker<W: Write + Send + 'static>(
    id: usize,
    handler: Arc<CommandHandler>,
    rx: Arc<Mutex<Receiver<Request>>>,
    output: Arc<Mutex<W>>,
) -> std::io::Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name(format!("squonk-handler-{id}"))
        .spawn(move || {
            let mut handled = 0;
            loop {
                // Hold the receiver lock only while waiting for the next request.
                let next = rx.lock().recv();
                let Ok(req) = next else {
                    break;
                };
                let reply = handler.handle(&req);
                if let Some(text) = format_reply(&req.chat.id, &reply) {
                    write_out(&output, &text);
                }
                handled += 1;
            }
            handled
        })
}

/// Feed every line of `input` to a pool of `workers` handler threads and
/// print replies to `output`. Returns once `input` is exhausted and every
/// queued request has been answered, with the number of requests handled.
///
/// Lines that do not parse, including ones that are not UTF-8, get a usage
/// hint and are skipped. Only a read error on `input` ends the loop early,
/// and even then the queued requests are answered before it is returned.
pub fn serve<R, W>(
    handler: Arc<CommandHandler>,
    workers: usize,
    mut input: R,
    output: W,
) -> std::io::Result<usize>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let output = Arc::new(Mutex::new(output));
    let (tx, rx) = mpsc::channel::<Request>();
    let rx = Arc::new(Mutex::new(rx));

    let mut pool = Vec::with_capacity(workers.max(1));
    for id in 0..workers.max(1) {
        pool.push(spawn_worker(id, handler.clone(), rx.clone(), output.clone())?);
    }

    // Raw bytes so one undecodable line is reported instead of ending the session.
    let mut buf = Vec::new();
    let mut read_error = None;
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                read_error = Some(e);
                break;
            }
        }

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim_end_matches(['\n', '\r']);
                if line.trim().is_empty() || line.trim_start().starts_with('#') {
                    continue;
                }
                parse_line(line).inspect_err(|e| {
                    tracing::debug!(line, error = %e, "unparseable input");
                })
            }
            Err(_) => {
                tracing::debug!(bytes = buf.len(), "input line is not valid UTF-8");
                Err(ParseError::NotUtf8)
            }
        };

        match parsed {
            Ok(req) => {
                if tx.send(req).is_err() {
                    tracing::warn!("all handler threads stopped");
                    break;
                }
            }
            Err(e) => write_out(&output, &format!("error: {e}\n{USAGE}\n")),
        }
    }
    drop(tx);

    let mut handled = 0;
    for h in pool {
        match h.join() {
            Ok(n) => handled += n,
            Err(_) => tracing::warn!("handler thread panicked"),
        }
    }

    match read_error {
        Some(e) => Err(e),
        None => Ok(handled),
    }
}
