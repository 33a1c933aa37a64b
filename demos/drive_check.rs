// Drive check: careful, step-by-step test of the wheel and mast servos
//
// IMPORTANT: this demo WILL move the rover. Put it on blocks so the wheels
// spin freely before proceeding.
//
// Usage: cargo run --example drive_check --features linux -- [--device /dev/i2c-1] [--speed 20]
//
// Safety features:
// - Explicit confirmation before any movement
// - Slow default test speed
// - Stop between every step, easy abort with Ctrl+C

use clap::Parser;
use mars_rover_driver::config::DEFAULT_I2C_DEVICE;
use mars_rover_driver::{Direction, RoverDriver, Servo, transport};
use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

#[derive(Parser)]
struct Args {
    /// I2C character device the rover board is attached to
    #[arg(long, default_value = DEFAULT_I2C_DEVICE)]
    device: String,

    /// Test speed (0-100)
    #[arg(long, default_value_t = 20)]
    speed: i16,
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().eq_ignore_ascii_case("y")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Rover Drive Check (WITH MOVEMENT)              ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  ⚠  This demo WILL spin the wheels!                          ║");
    println!("║  ⚠  Put the rover ON BLOCKS before proceeding!               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("I2C device: {}", args.device);
    println!("Test speed: {}", args.speed);
    println!();

    if !confirm("Is the rover on blocks, wheels off the ground?") {
        println!("Please elevate the rover so the wheels can spin freely.");
        return Ok(());
    }

    println!();
    println!("Opening I2C bus...");
    let bus = transport::open_i2c(&args.device)?;
    let mut rover = RoverDriver::new(bus);
    println!("✓ Connected");
    println!();

    // ========== STEP 1: motion test ==========
    println!("Step 1: Motion test");
    println!("  Each direction runs for one second with a stop in between.");
    println!();

    if !confirm("Proceed with the motion test?") {
        return Ok(());
    }

    let run_duration = Duration::from_millis(1000);
    let pause_duration = Duration::from_millis(500);

    let tests: [(&str, fn(&mut RoverDriver<_>, i16)); 4] = [
        ("Forward", |r, s| r.forward(s)),
        ("Backward", |r, s| r.backward(s)),
        ("Turn left", |r, s| r.turn(Direction::Left, s)),
        ("Turn right", |r, s| r.turn(Direction::Right, s)),
    ];

    for (name, action) in tests {
        println!("  Testing: {}...", name);
        action(&mut rover, args.speed);
        let (left, right) = rover.wheel_speeds();
        println!("    Wheel speeds: left={}, right={}", left, right);
        sleep(run_duration);

        rover.stop();
        sleep(pause_duration);
    }

    // ========== STEP 2: mast sweep ==========
    println!();
    println!("Step 2: Mast sweep");
    println!();

    if confirm("Sweep the mast servo?") {
        for angle in [0.0, 90.0, 180.0, 90.0] {
            println!("  Mast to {}°...", angle);
            rover.set_servo_position(Servo::Mast, angle);
            sleep(Duration::from_millis(700));
        }
    }

    // ========== FINAL: stop ==========
    println!();
    println!("Stopping...");
    rover.stop();
    println!("✓ Done");
    println!();
    println!("If the wheels moved as expected, the drive train is working.");
    println!("Try the keyboard teleop next: cargo run --example teleop --features linux");

    Ok(())
}
