//! Terminal output primitives for the developer commands.

use console::style;

/// Color palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const VIOLET: Color = Color::Color256(135);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const ARROW: &str = "\u{2500}\u{25B8}"; // ─▸
}

const BOX_WIDTH: usize = 72;

/// Print a success message
pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("  {} {}", style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN), msg);
}

/// Print a dim/secondary message
pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Print a box header
pub fn box_header(title: &str) {
    let title_padded = format!(" {} ", title);
    let dashes = BOX_WIDTH.saturating_sub(title_padded.chars().count() + 4);

    println!(
        "  {}{}{}{}",
        style("\u{256D}\u{2500}").fg(colors::CYAN), // ╭─
        style(title_padded).fg(colors::CYAN).bold(),
        style("\u{2500}".repeat(dashes)).fg(colors::CYAN),
        style("\u{256E}").fg(colors::CYAN) // ╮
    );
}

/// Print a box line
pub fn box_line(content: &str) {
    let padding = (BOX_WIDTH - 2).saturating_sub(content.chars().count());
    println!(
        "  {} {}{}{}",
        style("\u{2502}").fg(colors::CYAN), // │
        content,
        " ".repeat(padding),
        style("\u{2502}").fg(colors::CYAN)
    );
}

/// Print a box footer
pub fn box_footer() {
    println!(
        "  {}{}{}",
        style("\u{2570}").fg(colors::CYAN), // ╰
        style("\u{2500}".repeat(BOX_WIDTH - 2)).fg(colors::CYAN),
        style("\u{256F}").fg(colors::CYAN) // ╯
    );
}

/// Headline for one mapping: `input ─▸ output [marker]`.
pub fn mapping_title(input: &str, output: &str, marker: &str) -> String {
    format!("{} {} {} [{}]", input, symbols::ARROW, output, marker)
}

/// Marker for how much a mapping asks of the caller.
pub fn wiring_marker(caller_supplied: usize) -> String {
    match caller_supplied {
        0 => "IDENTITY".to_string(),
        1 => "1 TO WIRE".to_string(),
        n => format!("{} TO WIRE", n),
    }
}

/// Print "Nope" error header
pub fn nope_header() {
    println!();
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA).bold(),
        style("Nope.").fg(colors::MAGENTA).bold()
    );
    println!();
}

/// Print timing information
pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::VIOLET),
        label,
        duration_ms
    );
}
