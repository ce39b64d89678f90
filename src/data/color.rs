/// An RGBA fill color with independent integer channels.
///
/// The core does not clamp or normalize channels; their range and color
/// space are interpreted by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

impl Color {
    /// Transparent black.
    pub const CLEAR: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Creates a color from its channels.
    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Color {
        Color { r, g, b, a }
    }
}

impl From<(u32, u32, u32, u32)> for Color {
    fn from(i: (u32, u32, u32, u32)) -> Color {
        Color {
            r: i.0,
            g: i.1,
            b: i.2,
            a: i.3,
        }
    }
}

impl From<[u32; 4]> for Color {
    fn from(i: [u32; 4]) -> Color {
        Color {
            r: i[0],
            g: i[1],
            b: i[2],
            a: i[3],
        }
    }
}

impl From<Color> for [u32; 4] {
    fn from(i: Color) -> [u32; 4] {
        [i.r, i.g, i.b, i.a]
    }
}
