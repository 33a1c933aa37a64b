// Keyboard teleop: WASD drive, Z/X mast, R/F speed, space stop, Q quit
//
// Usage: cargo run --example teleop --features linux -- [/dev/i2c-1]
//
// Releasing the keys stops the rover after a short timeout.

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use mars_rover_driver::config::DEFAULT_I2C_DEVICE;
use mars_rover_driver::{Direction, RoverDriver, Servo, transport};
use std::time::{Duration, Instant};
use tracing::info;

const SPEEDS: [i16; 3] = [20, 50, 100];
const MAST_STEP: f32 = 10.0;
const INPUT_TIMEOUT_MS: u64 = 300; // Stop the wheels after this much time with no input

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let device = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_I2C_DEVICE.to_string());

    info!("Opening I2C bus on {}", device);
    let bus = transport::open_i2c(&device)?;
    let mut rover = RoverDriver::new(bus);

    info!("Controls: WASD=drive, Z/X=mast, R/F=speed, space=stop, Q=quit");
    info!("Speed: LOW");

    enable_raw_mode()?;
    let result = run_teleop(&mut rover);
    disable_raw_mode()?;

    rover.stop();
    result
}

fn run_teleop<B: mars_rover_driver::BusTransport>(
    rover: &mut RoverDriver<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut speed_idx: usize = 0;
    let mut mast_angle: f32 = 90.0;
    let mut moving = false;
    let mut last_input = Instant::now();

    loop {
        if event::poll(Duration::from_millis(50))? {
            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            last_input = Instant::now();

            let speed = SPEEDS[speed_idx];
            match code {
                KeyCode::Char('w') => {
                    rover.forward(speed);
                    moving = true;
                }
                KeyCode::Char('s') => {
                    rover.backward(speed);
                    moving = true;
                }
                KeyCode::Char('a') => {
                    rover.turn(Direction::Left, speed);
                    moving = true;
                }
                KeyCode::Char('d') => {
                    rover.turn(Direction::Right, speed);
                    moving = true;
                }
                KeyCode::Char(' ') => {
                    rover.stop();
                    moving = false;
                }
                KeyCode::Char('z') => {
                    mast_angle = (mast_angle - MAST_STEP).max(0.0);
                    rover.set_servo_position(Servo::Mast, mast_angle);
                    info!("Mast: {}°", mast_angle);
                }
                KeyCode::Char('x') => {
                    mast_angle = (mast_angle + MAST_STEP).min(180.0);
                    rover.set_servo_position(Servo::Mast, mast_angle);
                    info!("Mast: {}°", mast_angle);
                }
                KeyCode::Char('r') => {
                    speed_idx = (speed_idx + 1).min(SPEEDS.len() - 1);
                    info!("Speed: {}", SPEEDS[speed_idx]);
                }
                KeyCode::Char('f') => {
                    speed_idx = speed_idx.saturating_sub(1);
                    info!("Speed: {}", SPEEDS[speed_idx]);
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            }
        } else if moving && last_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            // Dead-man stop: no key held, bring the rover to rest.
            rover.stop();
            moving = false;
        }
    }

    Ok(())
}
