//! Job summary PDF export.
//!
//! Turns a rendered [`SummaryCard`] into a one-page A4 PDF:
//!
//! 1. The card is rasterized at [`RASTER_SCALE`] (2x) so the text stays sharp
//!    when printed.
//! 2. The bitmap is scaled to fit the printable area of the page (page minus a
//!    15 mm margin on every side) while keeping its aspect ratio.
//! 3. It is centred horizontally, top-aligned at the margin, and embedded as a
//!    Flate-compressed RGB image.
//!
//! Export never hands back a partial file. [`PdfExporter::export`] logs any
//! failure and returns `None`; [`PdfExporter::try_export`] exposes the typed
//! [`ExportError`] for callers that want the reason.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tradelog::libs::{card::SummaryCard, export::PdfExporter};
//! # async fn run(job: tradelog::libs::job::Job) {
//! let exporter = PdfExporter::default();
//! if let Some(artifact) = exporter.export(&SummaryCard::render(&job)).await {
//!     std::fs::write(&artifact.file_name, &artifact.bytes).unwrap();
//! }
//! # }
//! ```

use super::card::SummaryCard;
use flate2::{write::ZlibEncoder, Compression};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use resvg::usvg::fontdb::{Database, Family, Query};
use resvg::{tiny_skia, usvg};
use std::io::Write;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// MIME type of the exported artifact.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Upscale applied when rasterizing the card.
pub const RASTER_SCALE: f32 = 2.0;

/// Title stored in the PDF document info.
pub const DOCUMENT_TITLE: &str = "Job Summary";

const POINTS_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("summary card has nothing to draw")]
    EmptyCard,
    #[error("no usable font for the summary card text")]
    NoFonts,
    #[error("failed to parse summary card: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to allocate a {width}x{height} bitmap")]
    Allocation { width: u32, height: u32 },
    #[error("bitmap data does not match {width}x{height} RGB")]
    BitmapSize { width: u32, height: u32 },
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("failed to compress page image: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque 8-bit RGB pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Bitmap {
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyCard);
        }
        if rgb.len() != width as usize * height as usize * 3 {
            return Err(ExportError::BitmapSize { width, height });
        }
        Ok(Self { width, height, rgb })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

}

/// Converts a summary card into pixels.
///
/// Implementations run on the blocking thread pool, hence the bounds.
pub trait Rasterizer: Send + Sync + 'static {
    fn rasterize(&self, card: &SummaryCard, scale: f32) -> Result<Bitmap, ExportError>;
}

/// Sans families tried, in order, for the card's `sans-serif` text.
const PREFERRED_SANS: [&str; 6] = ["Helvetica", "Arial", "Liberation Sans", "DejaVu Sans", "Noto Sans", "Roboto"];

/// Rasterizer backed by `resvg`.
///
/// System fonts are scanned on the first rasterization and reused after
/// that, so building a rasterizer costs nothing until a PDF is needed.
pub struct SvgRasterizer {
    fontdb: OnceLock<Arc<Database>>,
}

impl SvgRasterizer {
    pub fn new() -> Self {
        Self { fontdb: OnceLock::new() }
    }

    pub fn with_fonts(fontdb: Database) -> Self {
        let loaded = OnceLock::new();
        let _ = loaded.set(Arc::new(with_sans_family(fontdb)));
        Self { fontdb: loaded }
    }

    fn fonts(&self) -> Arc<Database> {
        let fontdb = self.fontdb.get_or_init(|| {
            let mut fontdb = Database::new();
            fontdb.load_system_fonts();
            tracing::debug!(faces = fontdb.len(), "loaded system fonts");
            Arc::new(with_sans_family(fontdb))
        });
        Arc::clone(fontdb)
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Points the generic `sans-serif` family at a face the database has.
///
/// fontdb maps `sans-serif` to Arial, which many Linux installs lack. The
/// first preferred family present wins, then any family with "Sans" in its
/// name, then the first face at all.
fn with_sans_family(mut fontdb: Database) -> Database {
    let has_family = |name: &str| fontdb.faces().any(|face| face.families.iter().any(|(family, _)| family == name));
    let family = PREFERRED_SANS
        .iter()
        .find(|name| has_family(**name))
        .map(|name| name.to_string())
        .or_else(|| {
            let names = || fontdb.faces().flat_map(|face| face.families.iter().map(|(family, _)| family));
            names()
                .find(|family| family.contains("Sans") && !family.contains("Mono"))
                .or_else(|| names().next())
                .cloned()
        });

    if let Some(family) = family {
        tracing::debug!(%family, "using sans-serif family");
        fontdb.set_sans_serif_family(family);
    }
    fontdb
}

impl Rasterizer for SvgRasterizer {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize(&self, card: &SummaryCard, scale: f32) -> Result<Bitmap, ExportError> {
        if card.svg.trim().is_empty() {
            return Err(ExportError::EmptyCard);
        }

        let fontdb = self.fonts();
        let sans = Query {
            families: &[Family::SansSerif],
            ..Default::default()
        };
        if fontdb.query(&sans).is_none() {
            return Err(ExportError::NoFonts);
        }

        let mut options = usvg::Options::default();
        options.fontdb = fontdb;
        let tree = usvg::Tree::from_str(&card.svg, &options)?;

        let size = tree.size().to_int_size().scale_by(scale).ok_or(ExportError::EmptyCard)?;
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(ExportError::Allocation {
            width: size.width(),
            height: size.height(),
        })?;

        // The card has rounded corners; paint the page colour underneath.
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            rgb.extend_from_slice(&[color.red(), color.green(), color.blue()]);
        }

        Bitmap::from_rgb(pixmap.width(), pixmap.height(), rgb)
    }
}

/// Page geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

/// Where the image lands on the page, in millimetres from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageLayout {
    /// A4 portrait with a 15 mm margin.
    pub const A4: PageLayout = PageLayout {
        width: 210.0,
        height: 297.0,
        margin: 15.0,
    };

    pub fn printable_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }

    pub fn printable_height(&self) -> f32 {
        self.height - self.margin * 2.0
    }

    /// Scales an image of the given pixel size into the printable area.
    ///
    /// The image takes the full printable width unless that would make it
    /// taller than the printable height, in which case it takes the full
    /// height instead. It is centred horizontally and starts at the top
    /// margin.
    pub fn fit(&self, image_width: f32, image_height: f32) -> Placement {
        let aspect_ratio = image_width / image_height;

        let mut width = self.printable_width();
        let mut height = width / aspect_ratio;
        if height > self.printable_height() {
            height = self.printable_height();
            width = height * aspect_ratio;
        }

        Placement {
            x: (self.width - width) / 2.0,
            y: self.margin,
            width,
            height,
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::A4
    }
}

fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Builds a single-page PDF with `bitmap` placed according to `layout`.
///
/// The output carries no timestamps, so identical input gives identical bytes.
pub fn compose_pdf(bitmap: &Bitmap, layout: &PageLayout, title: &str) -> Result<Vec<u8>, ExportError> {
    let placement = layout.fit(bitmap.width() as f32, bitmap.height() as f32);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let image_id = Ref::new(5);
    let info_id = Ref::new(6);
    let image_name = Name(b"Im1");

    let page_width = mm_to_pt(layout.width);
    let page_height = mm_to_pt(layout.height);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bitmap.rgb())?;
    let compressed = encoder.finish()?;

    let mut image = pdf.image_xobject(image_id, &compressed);
    image.filter(Filter::FlateDecode);
    image.width(bitmap.width() as i32);
    image.height(bitmap.height() as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    // PDF space has its origin at the bottom-left corner.
    let width = mm_to_pt(placement.width);
    let height = mm_to_pt(placement.height);
    let x = mm_to_pt(placement.x);
    let y = page_height - mm_to_pt(placement.y) - height;

    let mut content = Content::new();
    content.save_state();
    content.transform([width, 0.0, 0.0, height, x, y]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.document_info(info_id).title(TextStr(title)).producer(TextStr("tradelog"));

    Ok(pdf.finish())
}

/// The exported file, ready to save or share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `<client name with whitespace runs as dashes>-<YYYY-MM-DD>.pdf`
///
/// ```rust
/// use tradelog::libs::export::export_file_name;
///
/// assert_eq!(export_file_name("John  Smith", "2024-03-05"), "John-Smith-2024-03-05.pdf");
/// ```
pub fn export_file_name(client_name: &str, iso_date: &str) -> String {
    let mut name = String::with_capacity(client_name.len() + iso_date.len() + 5);
    let mut in_whitespace = false;
    for ch in client_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('-');
            }
            in_whitespace = true;
        } else {
            name.push(ch);
            in_whitespace = false;
        }
    }
    format!("{}-{}.pdf", name, iso_date)
}

/// Rasterizes summary cards and composes them into PDF artifacts.
///
/// Clones share one rasterizer, so its fonts are loaded at most once.
pub struct PdfExporter<R: Rasterizer = SvgRasterizer> {
    rasterizer: Arc<R>,
}

impl Default for PdfExporter<SvgRasterizer> {
    fn default() -> Self {
        Self::new(SvgRasterizer::new())
    }
}

impl<R: Rasterizer> Clone for PdfExporter<R> {
    fn clone(&self) -> Self {
        Self {
            rasterizer: Arc::clone(&self.rasterizer),
        }
    }
}

impl<R: Rasterizer> PdfExporter<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer: Arc::new(rasterizer),
        }
    }

    /// Exports the card, reporting why it failed if it did.
    pub async fn try_export(&self, card: &SummaryCard) -> Result<ExportedArtifact, ExportError> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let owned_card = card.clone();

        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ExportError> {
            let bitmap = rasterizer.rasterize(&owned_card, RASTER_SCALE)?;
            tracing::debug!(width = bitmap.width(), height = bitmap.height(), "rasterized summary card");
            compose_pdf(&bitmap, &PageLayout::A4, DOCUMENT_TITLE)
        })
        .await??;

        Ok(ExportedArtifact {
            file_name: card.file_name.clone(),
            mime_type: PDF_MIME_TYPE,
            bytes,
        })
    }

    /// Exports the card, or returns `None` after logging the failure.
    pub async fn export(&self, card: &SummaryCard) -> Option<ExportedArtifact> {
        match self.try_export(card).await {
            Ok(artifact) => {
                tracing::info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "generated job summary PDF");
                Some(artifact)
            }
            Err(e) => {
                tracing::error!(error = %e, file = %card.file_name, "error generating PDF file");
                None
            }
        }
    }
}
