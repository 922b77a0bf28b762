use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) 8-bit RGBA color.
///
/// Serialized with upper-case channel names, which is what browser clients
/// send and expect. Lower-case names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    #[serde(rename = "R", alias = "r")]
    pub r: u8,
    #[serde(rename = "G", alias = "g")]
    pub g: u8,
    #[serde(rename = "B", alias = "b")]
    pub b: u8,
    #[serde(rename = "A", alias = "a")]
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba([color.r, color.g, color.b, color.a])
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
