// Speed and angle mapping for the rover's continuous-rotation wheel servos
// Converts block-level speed commands to servo angles and PWM tick counts.

/// Block-level speed command range.
pub const SPEED_MIN: i16 = -100;
pub const SPEED_MAX: i16 = 100;

/// Servo angle range in degrees.
pub const ANGLE_MIN: f32 = 0.0;
pub const ANGLE_MAX: f32 = 180.0;

/// 12-bit PWM "off" tick counts for the servo pulse-width extremes.
/// 102 and 512 correspond to the 0° and 180° pulse widths of the rover's
/// servos at the controller's default frequency.
pub const PULSE_MIN_TICKS: u16 = 102;
pub const PULSE_MAX_TICKS: u16 = 512;

/// Saturate a speed command to [-100, 100].
pub fn clamp_speed(speed: i16) -> i16 {
    speed.clamp(SPEED_MIN, SPEED_MAX)
}

/// Saturate an angle to [0, 180] degrees.
pub fn clamp_angle(angle: f32) -> f32 {
    angle.clamp(ANGLE_MIN, ANGLE_MAX)
}

/// Map a speed command to a servo angle.
///
/// Affine over the clamped input: -100 maps to 0°, 0 to 90°, +100 to 180°.
pub fn speed_to_angle(speed: i16) -> f32 {
    let speed = clamp_speed(speed) as f32;
    (speed - SPEED_MIN as f32) * (ANGLE_MAX - ANGLE_MIN) / (SPEED_MAX - SPEED_MIN) as f32
}

/// Map a servo angle to a 12-bit PWM "off" tick count.
///
/// Affine over the clamped input: 0° maps to 102 ticks, 180° to 512.
pub fn angle_to_ticks(angle: f32) -> u16 {
    let angle = clamp_angle(angle);
    let span = (PULSE_MAX_TICKS - PULSE_MIN_TICKS) as f32;
    (PULSE_MIN_TICKS as f32 + angle * span / (ANGLE_MAX - ANGLE_MIN)).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_speed_saturates() {
        assert_eq!(clamp_speed(250), 100);
        assert_eq!(clamp_speed(-250), -100);
        assert_eq!(clamp_speed(42), 42);
    }

    #[test]
    fn test_clamp_speed_idempotent() {
        for s in [-32768, -101, -100, -1, 0, 1, 99, 100, 101, 32767] {
            assert_eq!(clamp_speed(clamp_speed(s)), clamp_speed(s));
        }
    }

    #[test]
    fn test_speed_to_angle_endpoints() {
        assert_eq!(speed_to_angle(-100), 0.0);
        assert_eq!(speed_to_angle(0), 90.0);
        assert_eq!(speed_to_angle(100), 180.0);
    }

    #[test]
    fn test_speed_to_angle_monotonic() {
        let mut prev = speed_to_angle(-100);
        for s in -99..=100 {
            let angle = speed_to_angle(s);
            assert!(angle > prev, "not monotonic at speed {}", s);
            prev = angle;
        }
    }

    #[test]
    fn test_speed_to_angle_clamps_input() {
        assert_eq!(speed_to_angle(500), 180.0);
        assert_eq!(speed_to_angle(-500), 0.0);
    }

    #[test]
    fn test_angle_to_ticks_endpoints() {
        assert_eq!(angle_to_ticks(0.0), 102);
        assert_eq!(angle_to_ticks(90.0), 307);
        assert_eq!(angle_to_ticks(180.0), 512);
    }

    #[test]
    fn test_angle_to_ticks_monotonic() {
        let mut prev = angle_to_ticks(0.0);
        for a in 1..=180 {
            let ticks = angle_to_ticks(a as f32);
            assert!(ticks > prev, "not monotonic at angle {}", a);
            prev = ticks;
        }
    }

    #[test]
    fn test_angle_to_ticks_clamps_input() {
        assert_eq!(angle_to_ticks(-20.0), 102);
        assert_eq!(angle_to_ticks(200.0), 512);
    }
}
