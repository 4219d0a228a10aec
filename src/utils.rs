//! Utility functions

use std::path::PathBuf;

// Two-tone ball mark used in the sidebar header and window branding
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><defs><style>.c1{fill:#ef4444}.c2{fill:#fff}.c3{fill:#18181b}</style></defs><path class="c1" d="M50 2a48 48 0 0 1 48 48H2A48 48 0 0 1 50 2z"/><path class="c2" d="M98 50a48 48 0 0 1-96 0h96z"/><rect class="c3" x="2" y="46" width="96" height="8"/><circle class="c3" cx="50" cy="50" r="15"/><circle class="c2" cx="50" cy="50" r="9"/></svg>"##;

/// Rasterize the logo SVG at the given width, preserving aspect ratio.
pub fn rasterize_logo(width: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).unwrap();
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), width, height)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Pokedex Tracker")
        .join("cache")
}

/// National Dex number for display, zero-padded ("#025")
pub fn format_dex_number(id: u32) -> String {
    format!("#{:03}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dex_numbers_pad_to_three() {
        assert_eq!(format_dex_number(1), "#001");
        assert_eq!(format_dex_number(25), "#025");
        assert_eq!(format_dex_number(1025), "#1025");
    }
}
