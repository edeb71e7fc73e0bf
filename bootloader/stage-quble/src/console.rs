use bios::video;
use core::fmt::Write;

/// Boot output through the BIOS teletype service, good until the mode
/// switch takes the BIOS away.
pub struct BiosConsole {}

impl Write for BiosConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            match c {
                '\n' => {
                    video::print_char('\n');
                    video::print_char('\r');
                }
                _ => video::print_char(c),
            }
        }

        Ok(())
    }
}

static mut CONSOLE: BiosConsole = BiosConsole {};

/// Post the BIOS console as a bootlog sink.
pub fn install() {
    let outlet = unsafe { &mut *core::ptr::addr_of_mut!(CONSOLE) };
    bootlog::Sink::new("bios", outlet).post();
}
