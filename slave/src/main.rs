//! Right half: scans, debounces and sends each transition as one byte on UART0.
#![no_std]
#![no_main]

extern crate alloc;

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
    layout::ROWS,
};

const HALF_COLS: usize = 6;
const HEAP_SIZE: usize = 4 * 1024;

#[global_allocator]
static HEAP: Heap = Heap::empty();

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

    cfg_if::cfg_if! {
        if #[cfg(debug_assertions)] {
            unsafe {
                corne_hardware::serial::start(
                    pac.USBCTRL_REGS,
                    pac.USBCTRL_DPRAM,
                    clocks.usb_clock,
                    &mut pac.RESETS,
                    log::LevelFilter::Info,
                );
            }
        }
    }

    let config = KeyboardConfig::CORNE;

    let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS);

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

    // Same wiring as the left half, the master adds the column offset.
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
    let mut link = ComLink::new(uart);

    let mut scan_count_down = timer.count_down();
    scan_count_down.start(config.matrix.scan_period);

    let mut led_on = false;
    let mut led_pin = pins.led.into_push_pull_output();
    let mut blink_count_down = timer.count_down();
    blink_count_down.start(500.millis());

    info!("Slave up");

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
            let Some(raw) = butmat.scan(&mut delay) else {
                warn!("Matrix scan failed");
                continue;
            };
            for event in matrix_state.update(debouncer.update(&raw)) {
                link.send(event);
            }
        }
    }
}
