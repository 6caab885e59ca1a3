#![no_std]

//! Board support for running servo-keyer on the Raspberry Pi Pico.

pub mod delay;
pub mod light_adc;
pub mod servo_pwm;
