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

//! The Quble boot-chain protocol.
//!
//! A boot chain is an ordered table of stage images on the boot medium.
//! Stages share exactly one piece of state, the [`info::QubleInfo`] record,
//! and pull each other into memory through [`loader::load_next_stage`]. The
//! medium itself sits behind [`io::BlockRead`] so the same walk runs against
//! BIOS disk services on real hardware and against in-memory media in tests.

#![no_std]

pub mod chain;
pub mod error;
pub mod info;
pub mod io;
pub mod loader;

pub use error::{LoadError, Result};
pub use info::QubleInfo;
pub use loader::load_next_stage;
