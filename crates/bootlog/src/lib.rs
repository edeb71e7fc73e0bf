/*
   ____        __    __
  / __ \__  __/ /_  / /__
 / / / / / / / __ \/ / _ \
/ /_/ / /_/ / /_/ / /  __/
\___\_\__,_/_.___/_/\___/
    Part of the Quble Boot Project

Copyright 2025 Quble Boot contributors

Permission is hereby granted, free of charge, to any person obtaining a copy of this software and
associated documentation files (the "Software"), to deal in the Software without restriction,
including without limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all copies or substantial
portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT
OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
*/

#![no_std]

use core::fmt::Write;
use spin::Mutex;

/// Max number of sinks that can receive boot output at once.
const MAX_SINKS: usize = 4;

/// The name printed in front of each line, telling the user which stage of
/// the boot chain is talking.
static STAGE_TAG: Mutex<Option<&'static str>> = Mutex::new(None);

static SINKS: Mutex<[Option<Sink>; MAX_SINKS]> = Mutex::new([None, None, None, None]);

/// The type of a `core::fmt::Write`-able struct for sending boot
/// output to the user.
pub type OutletRef = &'static mut (dyn Write + Sync + Send);

/// # Set Stage Tag
/// Tell bootlog which stage is executing; every following line is prefixed
/// with this tag so the user can see where in the boot chain output came from.
pub fn set_stage_tag(tag: &'static str) {
    *STAGE_TAG.lock() = Some(tag);
}

/// # Sink
/// A sink describes an output to which boot messages can be posted. For
/// example, a BIOS teletype sink and a VGA text sink can both be attached
/// and all output is routed to both.
pub struct Sink {
    name: &'static str,
    outlet: OutletRef,
}

impl Sink {
    /// Create a new sink with a display name and outlet provider.
    pub fn new(name: &'static str, outlet: OutletRef) -> Self {
        Self { name, outlet }
    }

    /// # Post
    /// Upload this sink to the global sink list. It starts receiving
    /// boot output immediately.
    pub fn post(self) {
        let mut sinks = SINKS.lock();

        if let Some(slot) = sinks.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(self);
        } else {
            _ = self
                .outlet
                .write_fmt(format_args!("sink list full, dropping '{}'\n", self.name));
        }
    }
}

#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments) {
    let mut sinks = SINKS.lock();

    for sink in sinks.iter_mut().flatten() {
        _ = sink.outlet.write_fmt(args);
    }
}

#[doc(hidden)]
pub fn _tag() {
    let tag = *STAGE_TAG.lock();

    if let Some(tag) = tag {
        _print(format_args!("[{}] ", tag));
    }
}

/// # Print
/// Output to every posted sink.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {{
        $crate::_print(format_args!($($arg)*));
    }};
}

/// # Println
/// Output one stage-tagged line to every posted sink.
#[macro_export]
macro_rules! println {
    () => {$crate::print!("\n")};
    ($($arg:tt)*) => {{
        $crate::_tag();
        $crate::_print(format_args!($($arg)*));
        $crate::print!("\n");
    }}
}
