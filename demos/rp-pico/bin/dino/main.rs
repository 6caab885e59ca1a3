//! Chrome-dino player on a Raspberry Pi Pico.
//!
//! An LDR divider on GPIO26 watches the screen; a servo arm on GPIO2 presses
//! the space bar. The ADC free-runs at ~16 ksps (the original firmware's
//! conversion rate) and the PWM slice produces a 20 ms servo frame with 1 µs
//! ticks, so duty values are pulse widths in microseconds.

#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{clocks::init_clocks_and_plls, pac, watchdog::Watchdog, Clock, Sio};

use rp_pico_demo::delay::SysDelay;
use rp_pico_demo::light_adc::FifoLightSensor;
use rp_pico_demo::servo_pwm::PwmServo;
use servo_keyer::{KeyerConfig, LightKeyer};

/// Original firmware extremes (ticks of ~4.8 µs) converted to microseconds:
/// 0x0138 -> ~1498 µs neutral, 0x00DC -> ~1056 µs pressed.
const RELEASED_US: u16 = 1498;
const PRESSED_US: u16 = 1056;

#[entry]
fn main() -> ! {
    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // ADC free-running on GPIO26: 48 MHz / 3000 = 16 ksps, matching the
    // original converter's pace.
    let mut adc = rp_pico::hal::Adc::new(pac.ADC, &mut pac.RESETS);
    let mut light_pin = rp_pico::hal::adc::AdcPin::new(pins.gpio26.into_floating_input()).unwrap();
    let fifo = adc
        .build_fifo()
        .clock_divider(2999, 0)
        .set_channel(&mut light_pin)
        .start();

    // PWM slice 1 channel A on GPIO2: 20 ms frame, 1 µs ticks.
    let pwm_slices = rp_pico::hal::pwm::Slices::new(pac.PWM, &mut pac.RESETS);
    let mut pwm = pwm_slices.pwm1;
    pwm.set_div_int(125);
    pwm.set_div_frac(0);
    pwm.set_top(19_999);
    pwm.enable();

    let mut channel = pwm.channel_a;
    channel.output_to(pins.gpio2);

    let delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    let config = KeyerConfig::builder()
        .pressed_duty(PRESSED_US)
        .released_duty(RELEASED_US)
        // At 16 ksps, a second without a single conversion means the ADC
        // has stopped free-running.
        .stall_poll_limit(1_000_000)
        .build()
        .unwrap();

    let mut keyer = LightKeyer::new(
        FifoLightSensor::new(fifo),
        PwmServo::new(channel),
        SysDelay::new(delay),
        config,
    )
    .unwrap();

    match keyer.run() {
        Ok(never) => match never {},
        // Converter stall: park instead of twitching the servo.
        Err(_stall) => loop {
            cortex_m::asm::wfe();
        },
    }
}
