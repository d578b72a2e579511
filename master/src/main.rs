//! Left half: scans its own matrix, merges the right half's transitions from
//! UART0 and sends one HID report per resolved action.
#![no_std]
#![no_main]

extern crate alloc;

use alloc::collections::VecDeque;
use core::mem::MaybeUninit;

use cortex_m::delay::Delay;
use embedded_alloc::Heap;
use embedded_hal::{digital::v2::OutputPin, timer::CountDown};
use fugit::{ExtU32, RateExtU32};
use log::{info, warn};
use panic_probe as _;

use rp_pico as bsp;

use bsp::{
    entry,
    hal::{
        clocks::{init_clocks_and_plls, Clock},
        gpio::{DynPin, FunctionUart},
        sio::Sio,
        uart::{DataBits, StopBits, UartConfig, UartPeripheral},
        watchdog::Watchdog,
        Timer,
    },
    pac::CorePeripherals,
    pac::Peripherals,
    Pins,
};

use corne::{
    buttonmatrix::{ButtonMatrix, MatrixState},
    comms::ComLink,
    config::KeyboardConfig,
    debounce::Debouncer,
    layout::{LAYOUT, ROWS},
    report::{HidReporter, ResolvedAction},
    SplitKeyboard,
};
use corne_hardware::clock::HalClock;

cfg_if::cfg_if! {
    if #[cfg(debug_assertions)] {
        use corne::report::LogReporter;
        use corne_hardware::serial;
        use log::LevelFilter;
    } else {
        use usb_device::class_prelude::{UsbBus, UsbBusAllocator};
        use usb_device::prelude::*;
        use usbd_human_interface_device::device::keyboard::{NKROBootKeyboard, NKROBootKeyboardConfig};
        use usbd_human_interface_device::usb_class::UsbHidClassBuilder;
        use usbd_human_interface_device::UsbHidError;
        use log::error;
    }
}

const HALF_COLS: usize = 6;
const HEAP_SIZE: usize = 16 * 1024;
// Reports held back while the HID endpoint is busy.
const MAX_QUEUED: usize = 64;

#[global_allocator]
static HEAP: Heap = Heap::empty();

#[cfg(not(debug_assertions))]
struct UsbReporter<'a, 'b, B: UsbBus>(&'b mut NKROBootKeyboard<'a, B>);

#[cfg(not(debug_assertions))]
impl<B: UsbBus> HidReporter for UsbReporter<'_, '_, B> {
    type Error = UsbHidError;

    fn send(&mut self, action: &ResolvedAction) -> Result<(), UsbHidError> {
        match self.0.write_report(action.keys()) {
            Err(UsbHidError::Duplicate) => Ok(()),
            result => result,
        }
    }
}

/// Sends queued reports in order, stops at the first one the reporter refuses.
fn flush<R: HidReporter>(reporter: &mut R, queue: &mut VecDeque<ResolvedAction>) {
    while let Some(action) = queue.front() {
        if reporter.send(action).is_err() {
            break;
        }
        queue.pop_front();
    }
}

fn enqueue(queue: &mut VecDeque<ResolvedAction>, action: ResolvedAction) {
    if queue.len() >= MAX_QUEUED {
        if let Some(dropped) = queue.pop_front() {
            warn!("Report queue full, dropped {:?}", dropped);
        }
    }
    queue.push_back(action);
}

#[entry]
fn main() -> ! {
    {
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        unsafe { HEAP.init(core::ptr::addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
    }
    run()
}

fn run() -> ! {
    let mut pac = Peripherals::take().unwrap();
    let core = CorePeripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let config = KeyboardConfig::CORNE;

    cfg_if::cfg_if! {
        if #[cfg(debug_assertions)] {
            unsafe {
                serial::start(pac.USBCTRL_REGS, pac.USBCTRL_DPRAM, clocks.usb_clock, &mut pac.RESETS, LevelFilter::Debug);
            }
            let mut reporter = LogReporter::default();
        } else {
            let usb_bus = UsbBusAllocator::new(bsp::hal::usb::UsbBus::new(
                pac.USBCTRL_REGS,
                pac.USBCTRL_DPRAM,
                clocks.usb_clock,
                true,
                &mut pac.RESETS,
            ));
            let mut hid = UsbHidClassBuilder::new()
                .add_device(NKROBootKeyboardConfig::default())
                .build(&usb_bus);

            let mut usb_dev = UsbDeviceBuilder::new(&usb_bus, UsbVidPid(0x1209, 0x0001))
                .manufacturer("corne")
                .product("Corne")
                .serial_number("CORNE")
                .build();
        }
    }

    let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS);
    let clock = HalClock(&timer);

    let sio = Sio::new(pac.SIO);

    let pins = Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut rows = [
        DynPin::from(pins.gpio4),
        DynPin::from(pins.gpio5),
        DynPin::from(pins.gpio6),
        DynPin::from(pins.gpio7),
    ];
    rows.iter_mut().for_each(|p| p.into_push_pull_output());

    let mut cols = [
        // gpio29
        DynPin::from(pins.voltage_monitor),
        DynPin::from(pins.gpio28),
        DynPin::from(pins.gpio27),
        DynPin::from(pins.gpio26),
        DynPin::from(pins.gpio22),
        DynPin::from(pins.gpio20),
    ];
    cols.iter_mut().for_each(|p| p.into_pull_down_input());

    let mut butmat: ButtonMatrix<_, _, HALF_COLS, ROWS> = ButtonMatrix::new(rows, cols);
    let mut debouncer = Debouncer::<ROWS, HALF_COLS>::new(config.matrix.debounce_scans);
    let mut matrix_state = MatrixState::<ROWS, HALF_COLS>::new();

    let uart_pins = (
        pins.gpio0.into_mode::<FunctionUart>(),
        pins.gpio1.into_mode::<FunctionUart>(),
    );
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(config.split.baud_rate.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();

    let mut keyboard = SplitKeyboard::new(&LAYOUT, ComLink::new(uart), config).unwrap();
    let mut queue: VecDeque<ResolvedAction> = VecDeque::new();

    let mut scan_count_down = timer.count_down();
    scan_count_down.start(config.matrix.scan_period);

    #[cfg(not(debug_assertions))]
    let mut tick_count_down = {
        let mut count_down = timer.count_down();
        count_down.start(1.millis());
        count_down
    };

    let mut led_on = false;
    let mut led_pin = pins.led.into_push_pull_output();
    let mut blink_count_down = timer.count_down();
    blink_count_down.start(500.millis());

    info!("Master up, {} layers", LAYOUT.len());

    loop {
        if blink_count_down.wait().is_ok() {
            if led_on {
                led_pin.set_low().unwrap();
            } else {
                led_pin.set_high().unwrap();
            }
            led_on = !led_on;
        }

        if scan_count_down.wait().is_ok() {
            let local = match butmat.scan(&mut delay) {
                Some(raw) => matrix_state.update(debouncer.update(&raw)),
                None => {
                    warn!("Matrix scan failed");
                    Default::default()
                }
            };
            for action in keyboard.tick_with(&clock, local) {
                enqueue(&mut queue, action);
            }
        }

        cfg_if::cfg_if! {
            if #[cfg(debug_assertions)] {
                flush(&mut reporter, &mut queue);
            } else {
                flush(&mut UsbReporter(hid.device()), &mut queue);

                if tick_count_down.wait().is_ok() {
                    match hid.tick() {
                        Err(UsbHidError::WouldBlock) => {}
                        Ok(_) => {}
                        Err(_) => {
                            error!("HID tick failed");
                        }
                    }
                }

                if usb_dev.poll(&mut [&mut hid]) {
                    match hid.device().read_report() {
                        Err(UsbError::WouldBlock) => {}
                        Err(_) => {
                            error!("Failed to read keyboard LEDs");
                        }
                        Ok(_leds) => {}
                    }
                }
            }
        }
    }
}
