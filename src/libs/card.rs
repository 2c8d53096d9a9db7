//! Summary card rendering.
//!
//! Lays a job out as a fixed-width SVG card: client name and date, address,
//! time range with duration, the work performed and, only when present, the
//! materials used. The card is what gets rasterized into the exported PDF, so
//! it always uses the light [`Palette::LIGHT`] colours whatever theme the
//! surrounding interface is in.
//!
//! Text is laid out with a simple monospace-ish width estimate. Explicit line
//! breaks in the description and materials are kept and long lines are
//! word-wrapped to the card width.

use super::export::export_file_name;
use super::job::Job;
use std::fmt::Write;

/// Card width in CSS pixels, before the export upscale.
pub const CARD_WIDTH: f32 = 640.0;

const PADDING: f32 = 20.0;
const CORNER_RADIUS: f32 = 8.0;
const ICON_SIZE: f32 = 20.0;
const TEXT_INDENT: f32 = PADDING + ICON_SIZE + 12.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 20.0;
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
// Average glyph advance relative to font size for the sans fonts above.
const GLYPH_WIDTH_RATIO: f32 = 0.55;

/// Colours used on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub title: &'static str,
    pub muted: &'static str,
    pub text: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
    pub icon: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: "#ffffff",
        border: "#e2e8f0",
        title: "#2563eb",
        muted: "#64748b",
        text: "#334155",
        heading: "#1e293b",
        body: "#475569",
        icon: "#94a3b8",
    };
}

#[derive(Debug, Clone, Copy)]
enum Icon {
    Location,
    Clock,
    Clipboard,
    Briefcase,
}

impl Icon {
    fn shapes(self) -> &'static str {
        match self {
            Icon::Location => r#"<path d="M10 18s-6-5.5-6-10a6 6 0 0 1 12 0c0 4.5-6 10-6 10z"/><circle cx="10" cy="8" r="2"/>"#,
            Icon::Clock => r#"<circle cx="10" cy="10" r="8"/><path d="M10 5v5l3 2"/>"#,
            Icon::Clipboard => r#"<rect x="4" y="3" width="12" height="15" rx="2"/><path d="M7 8h6M7 11h6M7 14h4"/>"#,
            Icon::Briefcase => r#"<rect x="2" y="6" width="16" height="11" rx="2"/><path d="M7 6V4h6v2"/>"#,
        }
    }
}

/// A job rendered as a self-contained SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub svg: String,
    pub width: f32,
    pub height: f32,
    /// Suggested name for the exported PDF.
    pub file_name: String,
}

impl SummaryCard {
    /// Renders `job` with the light palette.
    pub fn render(job: &Job) -> Self {
        let palette = Palette::LIGHT;
        let mut canvas = Canvas::new(palette);

        let title_lines = wrap_text(&job.client_name, chars_per_line(CARD_WIDTH - 2.0 * PADDING, TITLE_SIZE));
        for (index, line) in title_lines.iter().enumerate() {
            canvas.advance(if index == 0 { TITLE_SIZE } else { TITLE_SIZE + 6.0 });
            canvas.text(PADDING, line, TITLE_SIZE, palette.title, "bold");
        }
        canvas.advance(BODY_SIZE + 6.0);
        canvas.text(PADDING, &job.display_date(), BODY_SIZE, palette.muted, "normal");

        canvas.advance(16.0);
        canvas.icon_row(Icon::Location, &job.address, palette.text);

        canvas.advance(12.0);
        canvas.time_row(job);

        canvas.section(Icon::Clipboard, "Work Performed", &job.description);
        if job.has_materials() {
            canvas.section(Icon::Briefcase, "Materials Used", &job.materials);
        }

        canvas.finish(export_file_name(&job.client_name, &job.iso_date()))
    }
}

/// Accumulates SVG elements top to bottom.
struct Canvas {
    palette: Palette,
    body: String,
    // Baseline / top of the next element, in card pixels.
    y: f32,
}

impl Canvas {
    fn new(palette: Palette) -> Self {
        Self {
            palette,
            body: String::new(),
            y: PADDING,
        }
    }

    fn advance(&mut self, by: f32) {
        self.y += by;
    }

    fn text(&mut self, x: f32, content: &str, size: f32, fill: &str, weight: &str) {
        let _ = write!(
            self.body,
            r#"<text x="{x}" y="{y}" font-size="{size}" font-weight="{weight}" fill="{fill}" xml:space="preserve">{content}</text>"#,
            y = self.y,
            content = escape_xml(content),
        );
    }

    fn icon(&mut self, icon: Icon, top: f32) {
        let _ = write!(
            self.body,
            r#"<g transform="translate({x} {top})" fill="none" stroke="{stroke}" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round">{shapes}</g>"#,
            x = PADDING,
            stroke = self.palette.icon,
            shapes = icon.shapes(),
        );
    }

    fn divider(&mut self) {
        let _ = write!(
            self.body,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{stroke}" stroke-width="1"/>"#,
            x1 = PADDING,
            x2 = CARD_WIDTH - PADDING,
            y = self.y,
            stroke = self.palette.border,
        );
    }

    /// Icon on the left, wrapped body text indented next to it.
    fn icon_row(&mut self, icon: Icon, content: &str, fill: &str) {
        self.icon(icon, self.y);
        self.paragraph(content, fill);
    }

    fn time_row(&mut self, job: &Job) {
        self.icon(Icon::Clock, self.y);
        self.advance(BODY_SIZE + 1.0);
        let _ = write!(
            self.body,
            r#"<text x="{x}" y="{y}" font-size="{size}" fill="{fill}" xml:space="preserve"><tspan font-weight="bold">Time:</tspan> {range}</text>"#,
            x = TEXT_INDENT,
            y = self.y,
            size = BODY_SIZE,
            fill = self.palette.text,
            range = escape_xml(&format!("{} - {} ({})", job.time_in, job.time_out, job.duration())),
        );
        self.advance(LINE_HEIGHT - BODY_SIZE - 1.0);
    }

    fn section(&mut self, icon: Icon, heading: &str, content: &str) {
        self.advance(16.0);
        self.divider();
        self.advance(16.0);

        self.icon(icon, self.y);
        self.advance(BODY_SIZE + 1.0);
        let heading_fill = self.palette.heading;
        self.text(TEXT_INDENT, heading, BODY_SIZE, heading_fill, "bold");
        self.advance(LINE_HEIGHT - BODY_SIZE - 1.0 + 8.0);

        let body_fill = self.palette.body;
        self.paragraph(content, body_fill);
    }

    fn paragraph(&mut self, content: &str, fill: &str) {
        let lines = wrap_text(content, chars_per_line(CARD_WIDTH - TEXT_INDENT - PADDING, BODY_SIZE));
        for line in lines {
            self.advance(BODY_SIZE + 1.0);
            self.text(TEXT_INDENT, &line, BODY_SIZE, fill, "normal");
            self.advance(LINE_HEIGHT - BODY_SIZE - 1.0);
        }
    }

    fn finish(self, file_name: String) -> SummaryCard {
        let height = (self.y + PADDING).ceil();
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}"><rect x="0.5" y="0.5" width="{rw}" height="{rh}" rx="{r}" fill="{bg}" stroke="{border}"/>{body}</svg>"#,
            w = CARD_WIDTH,
            h = height,
            font = FONT_FAMILY,
            rw = CARD_WIDTH - 1.0,
            rh = height - 1.0,
            r = CORNER_RADIUS,
            bg = self.palette.background,
            border = self.palette.border,
            body = self.body,
        );

        SummaryCard {
            svg,
            width: CARD_WIDTH,
            height,
            file_name,
        }
    }
}

fn chars_per_line(available_width: f32, font_size: f32) -> usize {
    ((available_width / (font_size * GLYPH_WIDTH_RATIO)).floor() as usize).max(1)
}

/// Greedy word wrap that keeps explicit line breaks and spacing.
///
/// Runs of spaces and leading indentation are kept as typed. A line is only
/// broken where it would exceed `max_chars`; the whitespace at the break is
/// dropped. Words longer than `max_chars` are split across lines. Blank input
/// lines are kept as empty lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let raw = raw.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_len = 0;

        for token in tokens(raw) {
            let mut token: Vec<char> = token.chars().collect();
            let is_space = token[0].is_whitespace();

            if current_len + token.len() <= max_chars {
                current.extend(token.iter());
                current_len += token.len();
                continue;
            }

            if current_len > 0 {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_len = 0;
            }
            if is_space {
                continue;
            }

            while token.len() > max_chars {
                let rest = token.split_off(max_chars);
                lines.push(token.into_iter().collect());
                token = rest;
            }
            current.extend(token.iter());
            current_len = token.len();
        }

        lines.push(current);
    }

    lines
}

/// Splits a line into alternating runs of whitespace and non-whitespace.
fn tokens(line: &str) -> impl Iterator<Item = &str> {
    let mut rest = line;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let end = rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() != first.is_whitespace())
            .map_or(rest.len(), |(index, _)| index);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

/// Escapes the five XML special characters.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}
