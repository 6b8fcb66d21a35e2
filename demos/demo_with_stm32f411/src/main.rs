//! Drive a 16x2 character LCD with a STM32F411RET6 in 4 pin mode

//! Wiring diagram
//!
//! LCD1602 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!      V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> PA1
//!      EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA3
//!      D5 <-> PA4
//!      D6 <-> PA5
//!      D7 <-> PA6
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use panic_rtt_target as _;
use rtt_target::rtt_init_print;
use stm32f4xx_hal::{pac, prelude::*};

use hd44780_gpio_driver::{
    command::{MoveDirection, ShiftType, State},
    lcd::{Config, Lcd},
    sender::ParallelSender,
};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    // init needed digital pins

    let gpioa = dp.GPIOA.split();

    // Push-pull mode for a fast interaction
    let rs_pin = gpioa.pa0.into_push_pull_output().erase();
    let rw_pin = gpioa.pa1.into_push_pull_output().erase();
    let en_pin = gpioa.pa2.into_push_pull_output().erase();

    let db4_pin = gpioa
        .pa3
        .into_open_drain_output()
        .internal_pull_up(true)
        .erase();
    let db5_pin = gpioa
        .pa4
        .into_open_drain_output()
        .internal_pull_up(true)
        .erase();
    let db6_pin = gpioa
        .pa5
        .into_open_drain_output()
        .internal_pull_up(true)
        .erase();
    let db7_pin = gpioa
        .pa6
        .into_open_drain_output()
        .internal_pull_up(true)
        .erase();

    // put pins together
    let mut sender =
        ParallelSender::new_4pin(rs_pin, rw_pin, en_pin, db4_pin, db5_pin, db6_pin, db7_pin);

    let config = Config::default().set_cursor_state(State::On);

    // run the power-on handshake
    let mut lcd = Lcd::new(&mut sender, &mut delayer, config).expect("LCD did not come up");

    lcd.print_text("hello, world!").unwrap();

    lcd.set_cursor(0, 1).unwrap();
    lcd.print_text("on line two").unwrap();

    // out-of-font characters show up as full rectangles
    lcd.set_cursor(15, 0).unwrap();
    lcd.print_text("~").unwrap();

    lcd.delay_ms(1_000);

    // walk the display window two cells right and back
    for _ in 0..2 {
        lcd.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::LeftToRight)
            .unwrap();
        lcd.delay_ms(250);
    }
    for _ in 0..2 {
        lcd.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)
            .unwrap();
        lcd.delay_ms(250);
    }

    // blink the whole display a few times
    for _ in 0..3 {
        lcd.display_switch(State::Off, State::On, State::Off).unwrap();
        lcd.delay_ms(500);
        lcd.display_switch(State::On, State::On, State::Off).unwrap();
        lcd.delay_ms(500);
    }

    #[allow(clippy::empty_loop)]
    loop {}
}
