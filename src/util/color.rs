//! Dashboard palette (linear RGB, 0-1) and hex parsing.

/// Liquid gold.
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0];
/// Darker gold for secondary tones.
pub const GOLD_DARK: [f32; 3] = [0.722, 0.525, 0.043];
/// Royal violet.
pub const VIOLET: [f32; 3] = [0.545, 0.0, 1.0];
/// Indigo.
pub const INDIGO: [f32; 3] = [0.294, 0.0, 0.51];
/// Electric pink.
pub const PINK: [f32; 3] = [1.0, 0.078, 0.576];
/// Blood red.
pub const BLOOD_RED: [f32; 3] = [0.545, 0.0, 0.0];
/// Cornsilk.
pub const CORNSILK: [f32; 3] = [1.0, 0.973, 0.863];
/// Forest green.
pub const FOREST_GREEN: [f32; 3] = [0.133, 0.545, 0.133];
/// Alarm crimson used by the agent error state.
pub const CRIMSON: [f32; 3] = [0.8, 0.0, 0.2];
/// Mint used by the agent success state.
pub const MINT: [f32; 3] = [0.2, 1.0, 0.5];
/// Near-black background.
pub const DEEP_VOID: [f32; 3] = [0.02, 0.01, 0.05];

/// Parse `#RRGGBB` / `RRGGBB` / `#RGB` into 0-1 RGB.
pub fn parse_hex(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => return None,
    };
    let channel = |i: usize| {
        u8::from_str_radix(expanded.get(i..i + 2)?, 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(parse_hex("#FFFFFF"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex("000"), Some([0.0, 0.0, 0.0]));
        let gold = parse_hex("#FFD700").unwrap();
        assert!((gold[1] - GOLD[1]).abs() < 0.01);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("zzzzzz"), None);
        assert_eq!(parse_hex(""), None);
    }
}
