use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    bootlog::println!("{}", info);
    arch::halt();
}
