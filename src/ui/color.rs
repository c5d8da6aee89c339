/// Parses "#rrggbb" (or without '#') into a packed 0x00RRGGBB pixel.
/// Panics on invalid input; use only with trusted literals.
/// Evaluated at COMPILE TIME if assigned to a const/static.
pub const fn rgb_hex(s: &str) -> u32 {
    let bytes = s.as_bytes();

    // Handle optional '#' by offsetting start index
    let (bytes, len) = if !bytes.is_empty() && bytes[0] == b'#' {
        let (_, rem) = bytes.split_at(1);
        (rem, s.len() - 1)
    } else {
        (bytes, s.len())
    };

    // Const-safe hex char to u8
    const fn val(b: u8) -> u8 {
        match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => 10 + (b - b'a'),
            b'A'..=b'F' => 10 + (b - b'A'),
            _ => panic!("invalid hex digit in color string"),
        }
    }

    const fn byte2(h: u8, l: u8) -> u8 {
        (val(h) << 4) | val(l)
    }

    if len != 6 {
        panic!("color hex string must be 6 digits");
    }

    let r = byte2(bytes[0], bytes[1]) as u32;
    let g = byte2(bytes[2], bytes[3]) as u32;
    let b = byte2(bytes[4], bytes[5]) as u32;
    (r << 16) | (g << 8) | b
}

pub const BLACK: u32 = rgb_hex("#000000");
pub const WHITE: u32 = rgb_hex("#FFFFFF");
pub const ARCH_BLUE: u32 = rgb_hex("#1793D1");
pub const CHELSEA_BLUE: u32 = rgb_hex("#034694");

/// The rain picks from these uniformly at random, one draw per glyph.
pub const RAIN_PALETTE: [u32; 3] = [ARCH_BLUE, WHITE, CHELSEA_BLUE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_matches_palette() {
        assert_eq!(rgb_hex("1793D1"), 0x0017_93D1);
        assert_eq!(rgb_hex("#034694"), 0x0003_4694);
        assert_eq!(WHITE, 0x00FF_FFFF);
        assert_eq!(BLACK, 0);
    }
}
