// The terminal adapter: the one external collaborator spec.md §4.4 asks for.
// Raw mode is scoped acquisition (enter/leave), nonblocking polling rides on
// termion's async stdin reader, and blocking single-byte reads are a tight
// poll loop over that same nonblocking reader — there is no portable
// blocking single-char read in termion, so GETC/IN "block" the way the
// keyboard MMIO poll itself is nonblocking: by asking again.
//
// Restoring the terminal on SIGINT has to work without the executor's
// cooperation (spec.md §5: the executor never observes this path), so the
// raw-mode guard lives behind an Arc<Mutex<_>> the interrupt handler can
// reach into and drop.

use std::io::{self, Read, Stdout, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use termion::raw::{IntoRawMode, RawTerminal};
use termion::AsyncReader;

use crate::devices::KeyboardSource;
use crate::trap::TrapIo;

pub struct Terminal {
    raw_guard: Arc<Mutex<Option<RawTerminal<Stdout>>>>,
    stdin: AsyncReader,
    pending: Option<u8>,
}

impl Terminal {
    pub fn new() -> Self {
        Terminal {
            raw_guard: Arc::new(Mutex::new(None)),
            stdin: termion::async_stdin(),
            pending: None,
        }
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        let guard = io::stdout().into_raw_mode()?;
        *self.raw_guard.lock().unwrap() = Some(guard);
        Ok(())
    }

    pub fn leave_raw_mode(&mut self) {
        self.raw_guard.lock().unwrap().take();
    }

    // Tears down raw mode, emits a newline, exits nonzero.
    pub fn install_interrupt_handler(&self) -> Result<(), ctrlc::Error> {
        let guard = Arc::clone(&self.raw_guard);
        ctrlc::set_handler(move || {
            guard.lock().unwrap().take();
            println!();
            std::process::exit(-2);
        })
    }

    pub fn write_byte(&mut self, byte: u8) {
        let _ = io::stdout().write_all(&[byte]);
    }

    pub fn write_all(&mut self, bytes: &[u8]) {
        let _ = io::stdout().write_all(bytes);
    }

    pub fn flush(&mut self) {
        let _ = io::stdout().flush();
    }
}

impl TrapIo for Terminal {
    fn write_byte(&mut self, byte: u8) {
        Terminal::write_byte(self, byte);
    }
    fn write_all(&mut self, bytes: &[u8]) {
        Terminal::write_all(self, bytes);
    }
    fn flush(&mut self) {
        Terminal::flush(self);
    }
}

impl KeyboardSource for Terminal {
    fn input_ready(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        let mut buf = [0u8; 1];
        match self.stdin.read(&mut buf) {
            Ok(1) => {
                self.pending = Some(buf[0]);
                true
            }
            _ => false,
        }
    }

    fn read_byte(&mut self) -> u8 {
        loop {
            if self.input_ready() {
                return self.pending.take().expect("input_ready just confirmed a byte");
            }
            // Nothing queued yet; avoid a hot spin while waiting.
            thread::sleep(Duration::from_millis(1));
        }
    }
}
