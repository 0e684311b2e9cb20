//! Line-oriented request/reply loop.
//!
//! [`GlyphIndexServer`] reads [`HostRequest`] JSON lines, answers each with a
//! single [`HostReply`] line, and returns when the input reaches EOF. Bad
//! requests get an error reply; only I/O failures on the streams themselves
//! end the loop early.

use std::io::{self, BufRead, Write};

use crate::host::get_missing_glyphs;
use crate::protocol::{HostReply, HostRequest};

/// Stateless apart from a request counter used for logging.
#[derive(Debug, Default)]
pub struct GlyphIndexServer {
    handled: u64,
}

impl GlyphIndexServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests answered so far.
    pub fn handled(&self) -> u64 {
        self.handled
    }

    /// Answer one request line.
    pub fn handle_line(&mut self, line: &str) -> HostReply {
        self.handled += 1;
        match serde_json::from_str::<HostRequest>(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                log::warn!("Malformed request #{}: {}", self.handled, e);
                HostReply::Error {
                    message: format!("malformed request: {e}"),
                }
            }
        }
    }

    fn handle(&mut self, request: HostRequest) -> HostReply {
        match request {
            HostRequest::GetMissingGlyphs { path } => {
                log::debug!("Request #{}: get_missing_glyphs {}", self.handled, path);
                get_missing_glyphs(&path).into()
            }
            HostRequest::Ping {} => HostReply::Pong {},
        }
    }

    /// Serve requests from `reader` until EOF, writing replies to `writer`.
    ///
    /// Blank lines are ignored. A line that is not UTF-8 gets an error reply
    /// like any other malformed request.
    pub fn serve<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<()> {
        for line in reader.split(b'\n') {
            let reply = match String::from_utf8(line?) {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    self.handle_line(text)
                }
                Err(e) => {
                    self.handled += 1;
                    log::warn!("Request #{} is not UTF-8: {}", self.handled, e);
                    HostReply::Error {
                        message: format!("malformed request: {e}"),
                    }
                }
            };

            serde_json::to_writer(&mut writer, &reply)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        log::info!("Input closed after {} requests", self.handled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_pongs() {
        let mut server = GlyphIndexServer::new();
        assert_eq!(server.handle_line(r#"{"type":"ping"}"#), HostReply::Pong {});
        assert_eq!(server.handled(), 1);
    }

    #[test]
    fn garbage_gets_error_reply() {
        let mut server = GlyphIndexServer::new();
        match server.handle_line("not json") {
            HostReply::Error { message } => assert!(message.starts_with("malformed request")),
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn serve_answers_each_line_in_order() {
        let input = b"{\"type\":\"ping\"}\n\n{\"type\":\"bogus\"}\n{\"type\":\"ping\"}\n";
        let mut output = Vec::new();
        let mut server = GlyphIndexServer::new();
        server.serve(&input[..], &mut output).unwrap();

        let replies: Vec<HostReply> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0], HostReply::Pong {});
        assert!(matches!(replies[1], HostReply::Error { .. }));
        assert_eq!(replies[2], HostReply::Pong {});
    }

    #[test]
    fn serve_survives_invalid_utf8() {
        let input = b"{\"type\":\"ping\"}\n\xff\xfe bad\n{\"type\":\"ping\"}\n";
        let mut output = Vec::new();
        let mut server = GlyphIndexServer::new();
        server.serve(&input[..], &mut output).unwrap();

        let replies: Vec<HostReply> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0], HostReply::Pong {});
        match &replies[1] {
            HostReply::Error { message } => assert!(message.starts_with("malformed request")),
            other => panic!("expected error reply, got {other:?}"),
        }
        assert_eq!(replies[2], HostReply::Pong {});
        assert_eq!(server.handled(), 3);
    }
}
