//! Line-oriented device console transport.
//!
//! One command per line. In verbose mode one response line is read back after
//! every command; `OK` is the normal answer, `KO: ...` rejects the command and
//! anything else is passed through as the acknowledgement. A reply that misses
//! the acknowledgement timeout is discarded when it finally arrives. In quiet
//! mode replies are dropped unread before each write.

use crate::command;
use crate::config::ConsoleConfig;
use crate::error::{Error, Result};
use replay_core::{Emission, SensorSink, SinkError};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Open connection to a device console.
///
/// Owned by whoever runs the playback; the stream is shut down by
/// [`EmulatorConsole::close`] or on drop.
pub struct EmulatorConsole {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    address: String,
    verbose: bool,
    ack_timeout: Duration,
    /// Replies owed for commands whose acknowledgement timed out.
    late_replies: usize,
    /// Bytes of a reply line cut short by a timeout.
    partial: String,
    closed: bool,
}

impl EmulatorConsole {
    /// Connect, drain the greeting banner and authenticate when a token is set.
    pub fn connect(config: &ConsoleConfig, verbose: bool) -> Result<Self> {
        config.validate()?;
        let address = config.address();
        let stream = Self::open(config, &address)?;
        stream.set_nodelay(true)?;
        stream.set_write_timeout(Some(config.ack_timeout()))?;
        let writer = stream.try_clone()?;

        let mut console = Self {
            reader: BufReader::new(stream),
            writer,
            address,
            verbose,
            ack_timeout: config.ack_timeout(),
            late_replies: 0,
            partial: String::new(),
            closed: false,
        };
        console.drain_banner(config.banner_timeout())?;
        if let Some(token) = &config.auth_token {
            console.authenticate(token, config.ack_timeout())?;
        }
        console.reader.get_ref().set_read_timeout(Some(config.ack_timeout()))?;
        info!(address = %console.address, verbose, "console connected");
        Ok(console)
    }

    fn open(config: &ConsoleConfig, address: &str) -> Result<TcpStream> {
        let connect_error = |reason: String| Error::Connect {
            address: address.to_string(),
            reason,
        };
        let candidates = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| connect_error(e.to_string()))?;

        let mut last = String::from("no address resolved");
        for candidate in candidates {
            match TcpStream::connect_timeout(&candidate, config.connect_timeout()) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(%candidate, error = %e, "console address refused");
                    last = e.to_string();
                }
            }
        }
        Err(connect_error(last))
    }

    /// Read and discard whatever the console prints until it goes quiet.
    fn drain_banner(&mut self, quiet: Duration) -> Result<()> {
        self.reader.get_ref().set_read_timeout(Some(quiet))?;
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    return Err(Error::Connect {
                        address: self.address.clone(),
                        reason: "console closed the connection".into(),
                    })
                }
                Ok(_) => debug!(banner = line.trim_end(), "console"),
                Err(e) if is_timeout(&e) => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn authenticate(&mut self, token: &str, timeout: Duration) -> Result<()> {
        self.reader.get_ref().set_read_timeout(Some(timeout))?;
        writeln!(self.writer, "auth {token}")?;
        self.writer.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(Error::Auth("connection closed".into())),
                Ok(_) => {
                    let reply = line.trim();
                    if reply == "OK" {
                        debug!("console authenticated");
                        return Ok(());
                    }
                    if reply.starts_with("KO") {
                        return Err(Error::Auth(reply.to_string()));
                    }
                    debug!(reply, "console");
                }
                Err(e) if is_timeout(&e) => return Err(Error::Auth("no answer to auth".into())),
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Send one command line; in verbose mode return the response line.
    ///
    /// A write that cannot complete within the acknowledgement timeout means
    /// the console stopped reading, which ends the connection.
    pub fn send(&mut self, command: &str) -> std::result::Result<Option<String>, SinkError> {
        if self.closed {
            return Err(SinkError::Unavailable("console already closed".into()));
        }
        if !self.verbose {
            self.drop_unread()?;
        }
        let mut line = String::with_capacity(command.len() + 1);
        line.push_str(command);
        line.push('\n');
        self.writer.write_all(line.as_bytes()).map_err(|e| {
            if is_timeout(&e) {
                SinkError::Unavailable(format!("console stopped reading: {e}"))
            } else {
                classify(e)
            }
        })?;
        if !self.verbose {
            return Ok(None);
        }

        let deadline = Instant::now() + self.ack_timeout;
        loop {
            let reply = match self.read_reply(deadline) {
                Ok(Some(reply)) => reply,
                Ok(None) => {
                    return Err(SinkError::Unavailable("console closed the connection".into()))
                }
                Err(e) if is_timeout(&e) => {
                    self.late_replies += 1;
                    return Err(SinkError::Failed(format!(
                        "no reply within {} ms",
                        self.ack_timeout.as_millis()
                    )));
                }
                Err(e) => return Err(classify(e)),
            };
            if self.late_replies > 0 {
                self.late_replies -= 1;
                debug!(%reply, "discarding late console reply");
                continue;
            }
            debug!(%command, %reply, "console");
            if reply.starts_with("KO") {
                return Err(SinkError::Rejected(reply));
            }
            if reply != "OK" {
                warn!(%command, %reply, "unexpected console reply");
            }
            return Ok(Some(reply));
        }
    }

    /// Read one reply line, waiting no later than `deadline`.
    ///
    /// `Ok(None)` means the console hung up. Bytes of a line cut short by the
    /// deadline are kept for the next call.
    fn read_reply(&mut self, deadline: Instant) -> io::Result<Option<String>> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ErrorKind::TimedOut.into());
        }
        self.reader.get_ref().set_read_timeout(Some(remaining))?;
        if self.reader.read_line(&mut self.partial)? == 0 {
            return Ok(None);
        }
        let reply = self.partial.trim().to_string();
        self.partial.clear();
        Ok(Some(reply))
    }

    /// Discard every reply byte already received, without blocking.
    fn drop_unread(&mut self) -> std::result::Result<(), SinkError> {
        self.reader.get_ref().set_nonblocking(true).map_err(classify)?;
        let drained = self.discard_available();
        self.reader.get_ref().set_nonblocking(false).map_err(classify)?;
        let lines = drained?;
        if lines > 0 {
            trace!(lines, "dropped unread console replies");
        }
        Ok(())
    }

    fn discard_available(&mut self) -> std::result::Result<usize, SinkError> {
        let mut lines = 0;
        loop {
            let available = match self.reader.fill_buf() {
                Ok([]) => {
                    return Err(SinkError::Unavailable("console closed the connection".into()))
                }
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) => return Ok(lines),
                Err(e) => return Err(classify(e)),
            };
            lines += available.iter().filter(|&&b| b == b'\n').count();
            let consumed = available.len();
            self.reader.consume(consumed);
        }
    }

    /// Shut the connection down. Further sends fail as unavailable.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.writer.shutdown(Shutdown::Both) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotConnected => {}
            Err(e) => return Err(e.into()),
        }
        info!(address = %self.address, "console closed");
        Ok(())
    }
}

impl SensorSink for EmulatorConsole {
    fn emit(&mut self, emission: &Emission) -> std::result::Result<Option<String>, SinkError> {
        self.send(&command::sensor_set(emission.group, emission.value))
    }
}

impl Drop for EmulatorConsole {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "closing console");
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

/// A dead connection ends the run; anything else costs one emission.
fn classify(e: io::Error) -> SinkError {
    match e.kind() {
        ErrorKind::BrokenPipe
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::NotConnected
        | ErrorKind::UnexpectedEof => SinkError::Unavailable(e.to_string()),
        _ if is_timeout(&e) => SinkError::Failed(format!("no reply: {e}")),
        _ => SinkError::Failed(e.to_string()),
    }
}
