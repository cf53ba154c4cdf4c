//! Design export to PNG, SVG, and PDF.
//!
//! Renders a [`Scene`] through an SVG intermediate representation and the
//! resvg/tiny-skia rasterization pipeline. Engraving fonts must be
//! registered with the exporter or text falls back to whatever the system
//! fontdb resolves.

use std::fmt::Write;

use constructor_core::{Element, ElementKind, Scene, TextAlign, TextAttrs};

use crate::error::{RasterError, RasterResult};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
    /// PDF document with the embedded raster image.
    Pdf,
}

/// Configuration for design export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// DPI for print export.
    pub dpi: f32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            // 3:4, the proportions of a standard vertical stele.
            width: 1200,
            height: 1600,
            dpi: 96.0,
            background: [255, 255, 255, 255],
            scale: 1.0,
        }
    }
}

/// Exports a [`Scene`] to image and document formats.
pub struct DesignExporter {
    config: ExportConfig,
    fonts: Vec<Vec<u8>>,
}

impl DesignExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            fonts: Vec::new(),
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Register a font file (TTF/OTF bytes) for text rasterization.
    pub fn register_font(&mut self, data: Vec<u8>) {
        self.fonts.push(data);
    }

    /// Export a scene to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be rendered or encoded.
    pub fn export(&self, scene: &Scene, format: ExportFormat) -> RasterResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(scene),
            ExportFormat::Svg => Ok(self.render_to_svg(scene).into_bytes()),
            ExportFormat::Pdf => self.render_to_pdf(scene),
        }
    }

    /// Export the scene to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, scene: &Scene) -> RasterResult<Vec<u8>> {
        let svg_string = self.render_to_svg(scene);
        let pixmap = self.rasterize_svg(&svg_string)?;
        pixmap
            .encode_png()
            .map_err(|e| RasterError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the scene to an SVG string.
    ///
    /// The drawing coordinates are the scene's canvas space; the output
    /// dimensions scale it up for print.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_svg(&self, scene: &Scene) -> String {
        let out_w = ((self.config.width as f32) * self.config.scale).max(1.0) as u32;
        let out_h = ((self.config.height as f32) * self.config.scale).max(1.0) as u32;
        let view_w = scene.canvas_width;
        let view_h = scene.canvas_height;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        // Background
        let bg = &self.config.background;
        let bg_alpha = f32::from(bg[3]) / 255.0;
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"rgba({},{},{},{bg_alpha})\"/>",
            bg[0], bg[1], bg[2],
        );

        // Monument background, letterboxed into the canvas.
        if !scene.monument_image.is_empty() {
            let href = escape_xml(&scene.monument_image);
            let _ = write!(
                svg,
                "<image x=\"0\" y=\"0\" width=\"{view_w}\" height=\"{view_h}\" href=\"{href}\" preserveAspectRatio=\"xMidYMid meet\"/>",
            );
        }

        // Elements paint in list order: later entries land on top.
        for element in scene.elements() {
            render_element_svg(&mut svg, element);
        }

        svg.push_str("</svg>");
        svg
    }

    /// Export the scene to PDF bytes.
    ///
    /// Renders the scene as a raster image and embeds it in a single PDF
    /// page sized from the configured DPI.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PDF generation fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn render_to_pdf(&self, scene: &Scene) -> RasterResult<Vec<u8>> {
        let png_data = self.render_to_png(scene)?;

        // Pixel dimensions to mm: pixels / dpi * 25.4
        let page_width_mm = self.config.width as f32 / self.config.dpi * 25.4;
        let page_height_mm = self.config.height as f32 / self.config.dpi * 25.4;

        let (doc, page1, layer1) = printpdf::PdfDocument::new(
            "Monument Design",
            printpdf::Mm(page_width_mm),
            printpdf::Mm(page_height_mm),
            "Layer 1",
        );
        let current_layer = doc.get_page(page1).get_layer(layer1);

        // Decode PNG using printpdf's bundled image crate for compatibility
        let dynamic_image = printpdf::image_crate::load_from_memory(&png_data)
            .map_err(|e| RasterError::Export(format!("Failed to decode PNG for PDF: {e}")))?;
        let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);

        let scale_x = page_width_mm / self.config.width as f32;
        let scale_y = page_height_mm / self.config.height as f32;
        let transform = printpdf::ImageTransform {
            translate_x: Some(printpdf::Mm(0.0)),
            translate_y: Some(printpdf::Mm(0.0)),
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            ..Default::default()
        };
        pdf_image.add_to_layer(current_layer, transform);

        doc.save_to_bytes()
            .map_err(|e| RasterError::Export(format!("PDF save failed: {e}")))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(&self, svg_string: &str) -> RasterResult<tiny_skia::Pixmap> {
        let mut opt = usvg::Options::default();
        for font in &self.fonts {
            opt.fontdb_mut().load_font_data(font.clone());
        }

        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RasterError::Export(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width() as u32;
        let px_h = tree.size().height() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RasterError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

/// Render a single element to SVG.
fn render_element_svg(svg: &mut String, element: &Element) {
    let tf = &element.transform;
    let (cx, cy) = tf.center();

    let rotated = tf.rotation.abs() > f32::EPSILON;
    if rotated {
        let _ = write!(svg, "<g transform=\"rotate({} {cx} {cy})\">", tf.rotation);
    }

    match &element.kind {
        ElementKind::Text(attrs)
        | ElementKind::Epitaph(attrs)
        | ElementKind::Fio(attrs)
        | ElementKind::Dates(attrs) => {
            render_text_svg(svg, element, attrs);
        }
        ElementKind::Image(attrs)
        | ElementKind::Cross(attrs)
        | ElementKind::Flower(attrs)
        | ElementKind::Photo(attrs) => {
            let href = escape_xml(attrs.render_src());
            if attrs.flip_horizontal {
                let _ = write!(
                    svg,
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{href}\" transform=\"translate({} 0) scale(-1 1)\"/>",
                    tf.x,
                    tf.y,
                    tf.width,
                    tf.height,
                    2.0f32.mul_add(tf.x, tf.width),
                );
            } else {
                let _ = write!(
                    svg,
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{href}\"/>",
                    tf.x, tf.y, tf.width, tf.height,
                );
            }
        }
    }

    if rotated {
        svg.push_str("</g>");
    }
}

/// Render a text-capable element line by line.
fn render_text_svg(svg: &mut String, element: &Element, attrs: &TextAttrs) {
    let tf = &element.transform;
    let font_size = attrs.font_size;
    let line_height = font_size * attrs.line_height;

    let (anchor, x) = match attrs.align {
        TextAlign::Left => ("start", tf.x),
        TextAlign::Center => ("middle", tf.x + tf.width / 2.0),
        TextAlign::Right => ("end", tf.x + tf.width),
    };

    let family = escape_xml(attrs.font.family());
    let color = escape_xml(&attrs.color);
    let style = if attrs.italic { " font-style=\"italic\"" } else { "" };
    let spacing = if attrs.letter_spacing.abs() > f32::EPSILON {
        format!(" letter-spacing=\"{}\"", attrs.letter_spacing)
    } else {
        String::new()
    };

    for (i, line) in attrs.content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let y = (i as f32).mul_add(line_height, tf.y + font_size);
        let _ = write!(
            svg,
            "<text x=\"{x}\" y=\"{y}\" font-size=\"{font_size}\" fill=\"{color}\" font-family=\"{family}\" font-weight=\"{}\" text-anchor=\"{anchor}\"{style}{spacing}>",
            attrs.font.weight(),
        );

        // Enlarged initial letters on memorial name lines, one per word.
        let enlarge_initials =
            attrs.initial_scale > 1.0 && matches!(element.kind, ElementKind::Fio(_));
        if enlarge_initials {
            let initial_size = font_size * attrs.initial_scale;
            for (w, word) in line.split_whitespace().enumerate() {
                if w > 0 {
                    svg.push(' ');
                }
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    let _ = write!(
                        svg,
                        "<tspan font-size=\"{initial_size}\">{}</tspan>{}",
                        escape_xml(&first.to_string()),
                        escape_xml(chars.as_str()),
                    );
                }
            }
        } else {
            svg.push_str(&escape_xml(line));
        }

        svg.push_str("</text>");
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
