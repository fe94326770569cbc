pub mod config;
pub mod frame;
pub mod run;
pub mod simulate;

use dial_timer_core::Size;

/// Parse a `WIDTHxHEIGHT` pair such as `320x320`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = w.trim().parse().map_err(|_| format!("bad width in '{s}'"))?;
    let height = h.trim().parse().map_err(|_| format!("bad height in '{s}'"))?;
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_accepts_both_separators() {
        assert_eq!(parse_size("320x200").unwrap(), Size::new(320, 200));
        assert_eq!(parse_size("64X64").unwrap(), Size::new(64, 64));
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size("320").is_err());
        assert!(parse_size("ax2").is_err());
        assert!(parse_size("-1x2").is_err());
    }
}
