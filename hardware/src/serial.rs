//! Log output over a USB CDC-ACM port. The device is polled from
//! `USBCTRL_IRQ`, writers drop whatever the host is not reading fast enough.

use core::cell::RefCell;
use core::fmt::{self, Write};

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Metadata, Record};
use rp_pico::hal::clocks::UsbClock;
use rp_pico::hal::pac::{self, interrupt};
use rp_pico::hal::usb::UsbBus;
use usb_device::class_prelude::UsbBusAllocator;
use usb_device::prelude::*;
use usbd_serial::SerialPort;

static USB_SERIAL: Mutex<RefCell<Option<SerialPort<'static, UsbBus>>>> = Mutex::new(RefCell::new(None));
static USB_DEVICE: Mutex<RefCell<Option<UsbDevice<'static, UsbBus>>>> = Mutex::new(RefCell::new(None));

static LOGGER: SerialLogger = SerialLogger;

#[macro_export]
macro_rules! println {
    ($($arg:tt)*) => {{
        $crate::serial::write_fmt(format_args!($($arg)*));
        $crate::serial::write_str("\r\n");
    }};
}

pub use crate::println;

/// Takes the USB peripheral for the serial port and installs the logger.
///
/// # Safety
///
/// Call once, from `main`, before anything logs from an interrupt.
pub unsafe fn start(
    regs: pac::USBCTRL_REGS,
    dpram: pac::USBCTRL_DPRAM,
    usb_clock: UsbClock,
    resets: &mut pac::RESETS,
    level: LevelFilter,
) {
    let Some(bus) = cortex_m::singleton!(
        : UsbBusAllocator<UsbBus> = UsbBusAllocator::new(UsbBus::new(regs, dpram, usb_clock, true, resets))
    ) else {
        return;
    };
    let bus: &'static UsbBusAllocator<UsbBus> = bus;

    let serial = SerialPort::new(bus);
    let device = UsbDeviceBuilder::new(bus, UsbVidPid(0x16c0, 0x27dd))
        .manufacturer("corne")
        .product("corne log")
        .serial_number("LOG")
        .device_class(usbd_serial::USB_CLASS_CDC)
        .build();

    interrupt::free(|cs| {
        USB_SERIAL.borrow(cs).replace(Some(serial));
        USB_DEVICE.borrow(cs).replace(Some(device));
    });

    // Single core, nothing else installs a logger.
    if log::set_logger_racy(&LOGGER).is_ok() {
        log::set_max_level_racy(level);
    }

    pac::NVIC::unmask(pac::Interrupt::USBCTRL_IRQ);
}

pub fn write_str(s: &str) {
    interrupt::free(|cs| {
        let mut serial = USB_SERIAL.borrow(cs).borrow_mut();
        let Some(serial) = serial.as_mut() else {
            return;
        };
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            match serial.write(bytes) {
                Ok(written) => bytes = &bytes[written..],
                Err(_) => break,
            }
        }
    });
}

pub fn write_fmt(args: fmt::Arguments) {
    let _ = SerialWriter.write_fmt(args);
}

struct SerialWriter;

impl Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_str(s);
        Ok(())
    }
}

struct SerialLogger;

impl log::Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

#[allow(non_snake_case)]
#[interrupt]
fn USBCTRL_IRQ() {
    interrupt::free(|cs| {
        let mut device = USB_DEVICE.borrow(cs).borrow_mut();
        let mut serial = USB_SERIAL.borrow(cs).borrow_mut();
        if let (Some(device), Some(serial)) = (device.as_mut(), serial.as_mut()) {
            if device.poll(&mut [serial]) {
                // Input is not used, keep the endpoint drained.
                let mut buf = [0u8; 64];
                let _ = serial.read(&mut buf);
            }
        }
    });
}
