//! Deterministic key-to-color assignment.
//!
//! Every distinct shortcut key maps to a stable hue so matched and suggested
//! fragments keep a consistent visual identity across keystrokes. The
//! weighting is order-sensitive: earlier characters dominate through
//! exponential decay, so `"gh"` and `"hg"` land on different hues. Similar
//! looking keys can still collide visually; that is accepted behavior.

/// Seed shared by every capture node. Free text has no key of its own.
pub const CAPTURE_SEED: &str = "freetype";

const SATURATION: f32 = 0.58;
const MAIN_LIGHTNESS: f32 = 0.70;
const AUX_LIGHTNESS: f32 = 0.90;

/// Hue in `[0, 256)` for a literal key.
///
/// Character `i` contributes its code offset from `'a'` weighted by
/// `255/24 * 2^(1-i)`; the sum is reduced modulo 256. Euclidean reduction
/// keeps keys containing characters below `'a'` (digits, space, `!`) in
/// range.
pub fn hue(key: &str) -> f32 {
  let mut sum = 0.0_f32;
  for (i, c) in key.chars().enumerate() {
    let offset = c as i64 - 'a' as i64;
    sum += offset as f32 * (255.0 / 24.0) * 2.0_f32.powi(1 - i as i32);
  }
  sum.rem_euclid(256.0)
}

/// Saturated color for passed/matched segments.
pub fn main_color(key: &str) -> Hsl {
  Hsl {
    h: hue(key),
    s: SATURATION,
    l: MAIN_LIGHTNESS,
  }
}

/// Lighter color for possible/suggested segments.
pub fn aux_color(key: &str) -> Hsl {
  Hsl {
    h: hue(key),
    s: SATURATION,
    l: AUX_LIGHTNESS,
  }
}

/// Hue in degrees, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
  pub h: f32,
  pub s: f32,
  pub l: f32,
}

impl Hsl {
  pub fn to_rgb(self) -> (u8, u8, u8) {
    let h = self.h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
      0 => (c, x, 0.0),
      1 => (x, c, 0.0),
      2 => (0.0, c, x),
      3 => (0.0, x, c),
      4 => (x, 0.0, c),
      _ => (c, 0.0, x),
    };
    let m = self.l - c / 2.0;
    (
      ((r + m) * 255.0).round() as u8,
      ((g + m) * 255.0).round() as u8,
      ((b + m) * 255.0).round() as u8,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hue_is_deterministic() {
    assert_eq!(hue("a"), hue("a"));
    assert_eq!(hue("gh"), hue("gh"));
  }

  #[test]
  fn distinct_letters_get_distinct_hues() {
    assert_ne!(hue("a"), hue("b"));
    assert_ne!(hue("g"), hue("y"));
  }

  #[test]
  fn hue_is_order_sensitive() {
    assert_ne!(hue("gh"), hue("hg"));
  }

  #[test]
  fn hue_stays_in_range_for_low_codepoints() {
    for key in ["!", "9", " x", "a b", "0"] {
      let h = hue(key);
      assert!((0.0..256.0).contains(&h), "hue({key:?}) = {h}");
    }
  }

  #[test]
  fn main_is_darker_than_aux() {
    let main = main_color("gh");
    let aux = aux_color("gh");
    assert_eq!(main.h, aux.h);
    assert!(main.l < aux.l);
  }

  #[test]
  fn grayscale_when_unsaturated() {
    let (r, g, b) = Hsl {
      h: 123.0,
      s: 0.0,
      l: 0.5,
    }
    .to_rgb();
    assert_eq!(r, g);
    assert_eq!(g, b);
  }

  #[test]
  fn pure_hues_convert() {
    let (r, g, b) = Hsl {
      h: 0.0,
      s: 1.0,
      l: 0.5,
    }
    .to_rgb();
    assert_eq!((r, g, b), (255, 0, 0));

    let (r, g, b) = Hsl {
      h: 120.0,
      s: 1.0,
      l: 0.5,
    }
    .to_rgb();
    assert_eq!((r, g, b), (0, 255, 0));
  }
}
