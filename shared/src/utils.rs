// Formatting helpers shared by the renderer and the GUI.

/// Parses `#RRGGBB` (leading `#` optional) into an RGB triple.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Compact volume label: 950, 12.3K, 4.56M, 1.20B.
pub fn format_volume(volume: f64) -> String {
    let abs = volume.abs();
    if abs >= 1e9 {
        format!("{:.2}B", volume / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", volume / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", volume / 1e3)
    } else {
        format!("{:.0}", volume)
    }
}

/// Price label with precision adapted to magnitude (FX-like quotes need more decimals).
pub fn format_price(price: f64) -> String {
    if price.abs() < 1.0 {
        format!("{:.4}", price)
    } else {
        format!("{:.2}", price)
    }
}
