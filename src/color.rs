// color.rs - Launchpad LED color codec (2-bit red, 2-bit green)

/// Highest intensity of a single LED channel.
pub const CHANNEL_MAX: i32 = 3;

/// An encoded pad color, ready to be used as a note velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u8);

impl Color {
    pub const OFF: Color = Color(0x00);
    pub const RED: Color = Color(0x03);
    pub const AMBER: Color = Color(0x33);
    pub const GREEN: Color = Color(0x30);

    /// Build a color from red/green intensities, clamping each to 0..=3.
    pub fn new(red: i32, green: i32) -> Self {
        Color(encode(red, green))
    }

    pub fn from_byte(byte: u8) -> Self {
        Color(byte)
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    pub fn red(self) -> u8 {
        self.0 & 0x03
    }

    pub fn green(self) -> u8 {
        (self.0 >> 4) & 0x03
    }
}

pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value <= min {
        return min;
    }
    if value >= max {
        return max;
    }
    value
}

/// Pack red and green into the board's LED byte: `(green << 4) | red`.
pub fn encode(red: i32, green: i32) -> u8 {
    let red = clamp(red, 0, CHANNEL_MAX) as u8;
    let green = clamp(green, 0, CHANNEL_MAX) as u8;
    (green << 4) | red
}

/// Extract red and green from an incoming 7-bit velocity.
///
/// Incoming velocities carry the channels at bits 5-6 (red) and 3-4 (green),
/// which is not the layout `encode` produces for outgoing LED bytes.
pub fn decode_velocity(byte: u8) -> (u8, u8) {
    let red = (byte >> 5) & 3;
    let green = (byte >> 3) & 3;
    (red, green)
}
