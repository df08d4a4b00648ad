//! Terminal input and output.
//!
//! [`InputDriver`] is the seam the event loop reads through; tests swap in a
//! scripted driver so no terminal is needed.

pub mod console;
pub mod pointer;

use std::io;
use std::time::Duration;

use crossterm::event::Event;

pub trait InputDriver {
    /// Whether an event is ready within `timeout`.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}
