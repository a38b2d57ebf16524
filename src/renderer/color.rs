//! Colour helpers

/// HSB (hue in degrees, saturation and brightness in [0, 1]) to RGBA
pub fn hsb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = brightness.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, alpha]
}

/// Blend 30% toward white
pub fn lighter(color: [f32; 4]) -> [f32; 4] {
    mix(color, [1.0, 1.0, 1.0, color[3]], 0.3)
}

/// Scale RGB by 0.7
pub fn darker(color: [f32; 4]) -> [f32; 4] {
    [color[0] * 0.7, color[1] * 0.7, color[2] * 0.7, color[3]]
}

/// Replace alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Linear interpolation of every channel
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_primary_hues() {
        assert!(close(hsb(0.0, 1.0, 1.0, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsb(120.0, 1.0, 1.0, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsb(240.0, 1.0, 1.0, 1.0), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(hsb(60.0, 1.0, 1.0, 0.5), [1.0, 1.0, 0.0, 0.5]));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(close(hsb(360.0, 1.0, 1.0, 1.0), hsb(0.0, 1.0, 1.0, 1.0)));
        assert!(close(hsb(-120.0, 1.0, 1.0, 1.0), hsb(240.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert!(close(hsb(200.0, 0.0, 0.4, 1.0), [0.4, 0.4, 0.4, 1.0]));
    }

    #[test]
    fn test_lighter_darker() {
        let red = [1.0, 0.0, 0.0, 1.0];
        assert!(close(lighter(red), [1.0, 0.3, 0.3, 1.0]));
        assert!(close(darker(red), [0.7, 0.0, 0.0, 1.0]));
    }
}
