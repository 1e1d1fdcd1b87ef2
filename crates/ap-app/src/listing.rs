use std::io::{self, Write};

use ap_core::charset::PALETTES;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Écrit la liste des palettes (id, description, rampe) suivie d'exemples.
///
/// # Errors
/// Propagates write errors.
pub fn write_palettes<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "ASCIIPIC - Image to ASCII Art Converter")?;
    writeln!(w)?;
    writeln!(w, "Available Character Sets:")?;
    writeln!(w, "{RULE}")?;
    for p in &PALETTES {
        writeln!(w, "  {}: {:<16} → {}", p.id, p.description, p.ramp())?;
    }
    writeln!(w)?;
    writeln!(w, "Usage Examples:")?;
    writeln!(w, "{RULE}")?;
    for (comment, command) in EXAMPLES {
        writeln!(w, "  # {comment}")?;
        writeln!(w, "  asciipic {command}")?;
        writeln!(w)?;
    }
    writeln!(w, "See --help for every flag.")?;
    Ok(())
}

const EXAMPLES: [(&str, &str); 5] = [
    ("Basic terminal output", "--input photo.jpg"),
    ("With true color (for terminal)", "--input photo.jpg --color"),
    (
        "Braille characters (high detail)",
        "--input photo.jpg --charset e --color --width 150",
    ),
    (
        "Export as PNG image (vibrant glow)",
        "--input photo.jpg --png --color --charset b --fontsize 12 --width 200 --output art.png",
    ),
    (
        "Darker PNG export",
        "--input photo.jpg --png --color --brightness 80 --output dark.png",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_palette_with_its_ramp() {
        let mut out = Vec::new();
        write_palettes(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for p in &PALETTES {
            let line = format!("  {}: {:<16} → {}", p.id, p.description, p.ramp());
            assert!(text.contains(&line), "ligne absente : {line}");
        }
        assert!(text.contains("--charset e"));
    }
}
