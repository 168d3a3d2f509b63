// Explosion palettes. One palette is drawn per click and every letter of that
// explosion picks its colors from it.

pub type Palette = [&'static str; 5];

pub static PALETTES: [Palette; 5] = [
    ["#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57"],
    ["#ff9ff3", "#54a0ff", "#5f27cd", "#00d2d3", "#ff9f43"],
    ["#ff6348", "#2ed573", "#3742fa", "#f368e0", "#ffa502"],
    ["#ff4757", "#2ed573", "#1e90ff", "#ff6348", "#ffa502"],
    ["#ff3838", "#2ecc71", "#3498db", "#9b59b6", "#f39c12"],
];

// Ambient flicker colors.
pub static BRIGHT: Palette = ["#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57"];

pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
