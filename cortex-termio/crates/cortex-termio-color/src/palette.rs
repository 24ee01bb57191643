//! The xterm 256-color palette and nearest-color quantization.
//!
//! Layout of the palette:
//!
//! | Range   | Contents                                          |
//! |---------|---------------------------------------------------|
//! | 0-15    | standard and bright ANSI colors                   |
//! | 16-231  | 6x6x6 cube, levels `0, 95, 135, 175, 215, 255`    |
//! | 232-255 | 24-step grayscale ramp, `8, 18, ..., 238`         |

use crate::rgb::Rgb;

/// The 16 standard ANSI colors (VGA defaults).
pub const ANSI_16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Channel levels of the 6x6x6 color cube.
pub const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First palette index of the color cube.
pub const CUBE_START: u8 = 16;

/// First palette index of the grayscale ramp.
pub const GRAYSCALE_START: u8 = 232;

const GRAYSCALE_STEPS: u8 = 24;

/// Returns the RGB value of a palette entry.
#[must_use]
pub fn color256_to_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => ANSI_16[usize::from(index)],
        16..=231 => {
            let i = index - CUBE_START;
            Rgb::new(
                CUBE_LEVELS[usize::from(i / 36)],
                CUBE_LEVELS[usize::from((i / 6) % 6)],
                CUBE_LEVELS[usize::from(i % 6)],
            )
        }
        _ => {
            let v = gray_level(index - GRAYSCALE_START);
            Rgb::new(v, v, v)
        }
    }
}

fn gray_level(step: u8) -> u8 {
    8 + step * 10
}

/// Quantizes a color to the 256-color palette.
///
/// Exact matches against the 16 ANSI colors win first. Otherwise the nearest
/// entry of the cube and grayscale ramp is chosen by Euclidean distance, with
/// ties going to the lowest index.
#[must_use]
pub fn rgb_to_color256(rgb: Rgb) -> u8 {
    if let Some(index) = ANSI_16.iter().position(|c| c.same_channels(rgb)) {
        return index as u8;
    }

    let cube = rgb_to_color_cube(rgb);
    let gray = rgb_to_grayscale256(rgb);
    let cube_distance = color256_to_rgb(cube).distance_squared(rgb);
    let gray_distance = color256_to_rgb(gray).distance_squared(rgb);

    // cube indices are always lower than grayscale indices
    if cube_distance <= gray_distance {
        cube
    } else {
        gray
    }
}

/// Returns the nearest color cube index (16-231).
///
/// Euclidean distance is separable, so each channel snaps independently to
/// its nearest level.
#[must_use]
pub fn rgb_to_color_cube(rgb: Rgb) -> u8 {
    CUBE_START
        + 36 * nearest_cube_level(rgb.r)
        + 6 * nearest_cube_level(rgb.g)
        + nearest_cube_level(rgb.b)
}

fn nearest_cube_level(channel: u8) -> u8 {
    let mut best = 0;
    let mut best_distance = u8::MAX;
    for (i, level) in CUBE_LEVELS.iter().enumerate() {
        let distance = channel.abs_diff(*level);
        if distance < best_distance {
            best = i as u8;
            best_distance = distance;
        }
    }
    best
}

/// Returns the nearest grayscale ramp index (232-255).
#[must_use]
pub fn rgb_to_grayscale256(rgb: Rgb) -> u8 {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for step in 0..GRAYSCALE_STEPS {
        let v = gray_level(step);
        let distance = Rgb::new(v, v, v).distance_squared(rgb);
        if distance < best_distance {
            best = step;
            best_distance = distance;
        }
    }
    GRAYSCALE_START + best
}

/// Returns the nearest of the 16 ANSI colors (0-15).
#[must_use]
pub fn rgb_to_ansi16(rgb: Rgb) -> u8 {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (i, color) in ANSI_16.iter().enumerate() {
        let distance = color.distance_squared(rgb);
        if distance < best_distance {
            best = i as u8;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_nearest(rgb: Rgb) -> u8 {
        let mut best = CUBE_START;
        let mut best_distance = u32::MAX;
        for index in CUBE_START..=255 {
            let distance = color256_to_rgb(index).distance_squared(rgb);
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    mod color256_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_exact_ansi_matches() {
            assert_eq!(rgb_to_color256(Rgb::new(0, 0, 0)), 0);
            assert_eq!(rgb_to_color256(Rgb::new(255, 0, 0)), 9);
            assert_eq!(rgb_to_color256(Rgb::new(255, 255, 255)), 15);
            assert_eq!(rgb_to_color256(Rgb::new(192, 192, 192)), 7);
        }

        #[test]
        fn test_exact_cube_match() {
            assert_eq!(rgb_to_color256(Rgb::new(95, 135, 175)), 16 + 36 + 12 + 3);
        }

        #[test]
        fn test_grayscale_preferred_for_grays() {
            assert_eq!(rgb_to_color256(Rgb::new(128, 128, 128)), 8);
            assert_eq!(rgb_to_color256(Rgb::new(118, 118, 118)), 243);
        }

        #[test]
        fn test_matches_exhaustive_search() {
            for r in (0..=255u8).step_by(7) {
                for g in (0..=255u8).step_by(11) {
                    for b in (0..=255u8).step_by(13) {
                        let rgb = Rgb::new(r, g, b);
                        if ANSI_16.iter().any(|c| c.same_channels(rgb)) {
                            continue;
                        }
                        assert_eq!(rgb_to_color256(rgb), brute_force_nearest(rgb), "{rgb}");
                    }
                }
            }
        }

        #[test]
        fn test_palette_round_trip_above_ansi() {
            for index in 16..=255u8 {
                let rgb = color256_to_rgb(index);
                // cube corners duplicate ANSI colors and resolve to the ANSI index
                if let Some(ansi) = ANSI_16.iter().position(|c| c.same_channels(rgb)) {
                    assert_eq!(rgb_to_color256(rgb), ansi as u8);
                } else {
                    assert_eq!(rgb_to_color256(rgb), index);
                }
            }
        }
    }

    mod cube_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_corners() {
            assert_eq!(rgb_to_color_cube(Rgb::new(255, 0, 0)), 196);
            assert_eq!(rgb_to_color_cube(Rgb::new(0, 0, 0)), 16);
            assert_eq!(rgb_to_color_cube(Rgb::new(255, 255, 255)), 231);
        }

        #[test]
        fn test_ties_go_low() {
            // 115 sits exactly between 95 and 135
            assert_eq!(rgb_to_color_cube(Rgb::new(115, 0, 0)), 16 + 36);
        }

        #[test]
        fn test_decode() {
            assert_eq!(color256_to_rgb(196), Rgb::new(255, 0, 0));
            assert_eq!(color256_to_rgb(16), Rgb::new(0, 0, 0));
        }
    }

    mod grayscale_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_ramp_ends() {
            assert_eq!(rgb_to_grayscale256(Rgb::new(0, 0, 0)), 232);
            assert_eq!(rgb_to_grayscale256(Rgb::new(255, 255, 255)), 255);
            assert_eq!(color256_to_rgb(232), Rgb::new(8, 8, 8));
            assert_eq!(color256_to_rgb(255), Rgb::new(238, 238, 238));
        }

        #[test]
        fn test_ties_go_low() {
            assert_eq!(rgb_to_grayscale256(Rgb::new(13, 13, 13)), 232);
        }
    }

    mod ansi16_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_nearest() {
            assert_eq!(rgb_to_ansi16(Rgb::new(250, 10, 10)), 9);
            assert_eq!(rgb_to_ansi16(Rgb::new(10, 10, 10)), 0);
            assert_eq!(rgb_to_ansi16(Rgb::new(120, 0, 0)), 1);
        }
    }
}
