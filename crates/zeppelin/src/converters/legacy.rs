//! Zeppelin 0.6.2 dialect
//!
//! Results live under `result`; charts are inline SVG that we rasterize.

use std::sync::LazyLock;

use regex::Regex;
use resvg::{tiny_skia, usvg};

use super::dialect::{ResultDialect, ResultRoute};
use crate::domain::{ConvertError, NotebookFormat, OutputType, Paragraph, ResultCode};

static SVG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<svg.*</svg>").expect("valid SVG pattern"));

/// Parser options with system fonts loaded; without fonts usvg drops `<text>`
static SVG_OPTIONS: LazyLock<usvg::Options<'static>> = LazyLock::new(|| {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    tracing::debug!(
        faces = options.fontdb.len(),
        "Loaded fonts for SVG rendering"
    );
    options
});

const EMPTY_SVG: &str = "<svg></svg>";
const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XML_HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\"\n",
    "  \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
);

/// Dialect for notebooks exported by Zeppelin 0.6.x
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDialect;

impl ResultDialect for LegacyDialect {
    fn format(&self) -> NotebookFormat {
        NotebookFormat::Legacy
    }

    fn route<'a>(&self, paragraph: &'a Paragraph) -> ResultRoute<'a> {
        let Some(result) = paragraph.result.as_ref() else {
            return ResultRoute::Skip;
        };

        match result.code {
            ResultCode::Success => {
                let msg = match result.msg.as_deref() {
                    Some(msg) if !msg.is_empty() => msg,
                    _ => return ResultRoute::Skip,
                };

                match result.output_type.as_deref().and_then(OutputType::from_tag) {
                    Some(output_type) => ResultRoute::Render(output_type, msg),
                    None => ResultRoute::Skip,
                }
            }
            ResultCode::Error => ResultRoute::Failed,
            _ => ResultRoute::Skip,
        }
    }

    fn find_image<'a>(&self, msg: &'a str) -> Option<&'a str> {
        let found = SVG_RE.find(msg)?.as_str();
        if found == EMPTY_SVG {
            return None;
        }
        Some(found)
    }

    fn decode_image(&self, found: &str) -> Result<Vec<u8>, ConvertError> {
        let document = format!("{}{}", XML_HEADER, with_svg_namespace(found));
        rasterize(&document)
    }
}

/// Zeppelin's nvd3 charts omit `xmlns`, which SVG parsers require
fn with_svg_namespace(svg: &str) -> String {
    let open_tag_end = svg.find('>').unwrap_or(svg.len());
    if svg[..open_tag_end].contains("xmlns=") {
        return svg.to_string();
    }
    svg.replacen("<svg", &format!("<svg xmlns=\"{}\"", SVG_NS), 1)
}

fn rasterize(svg: &str) -> Result<Vec<u8>, ConvertError> {
    render(svg)?
        .encode_png()
        .map_err(|e| ConvertError::ImageRender(format!("PNG encoding failed: {e}")))
}

fn render(svg: &str) -> Result<tiny_skia::Pixmap, ConvertError> {
    let tree = usvg::Tree::from_str(svg, &SVG_OPTIONS)
        .map_err(|e| ConvertError::ImageDecode(format!("Invalid SVG: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        ConvertError::ImageRender(format!(
            "Cannot allocate {}x{} canvas",
            size.width(),
            size.height()
        ))
    })?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LegacyResult;

    fn paragraph(code: ResultCode, output_type: &str, msg: &str) -> Paragraph {
        Paragraph {
            result: Some(LegacyResult {
                code,
                output_type: Some(output_type.to_string()),
                msg: Some(msg.to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_image() {
        let dialect = LegacyDialect;
        assert_eq!(dialect.find_image("nothing here"), None);

        let empty = "<div id=\"inline1\" style=\"height:400px\"><svg></svg></div>\n";
        assert_eq!(dialect.find_image(empty), None);

        let svg = "<svg><text x=\"0\" y=\"15\">Test SVG</text></svg>";
        assert_eq!(dialect.find_image(svg), Some(svg));
    }

    #[test]
    fn test_find_image_spans_lines() {
        let msg = "<div>\n<svg width=\"2\">\n<g/>\n</svg>\n</div>";
        assert_eq!(
            LegacyDialect.find_image(msg),
            Some("<svg width=\"2\">\n<g/>\n</svg>")
        );
    }

    #[test]
    fn test_route() {
        let dialect = LegacyDialect;

        assert_eq!(dialect.route(&Paragraph::default()), ResultRoute::Skip);
        assert_eq!(
            dialect.route(&paragraph(ResultCode::Success, "TEXT", "")),
            ResultRoute::Skip
        );
        assert_eq!(
            dialect.route(&paragraph(ResultCode::Success, "TEXT", "out")),
            ResultRoute::Render(OutputType::Text, "out")
        );
        assert_eq!(
            dialect.route(&paragraph(ResultCode::Success, "ANGULAR", "out")),
            ResultRoute::Skip
        );
        assert_eq!(
            dialect.route(&paragraph(ResultCode::Error, "TEXT", "boom")),
            ResultRoute::Failed
        );
    }

    #[test]
    fn test_namespace_injection() {
        assert_eq!(
            with_svg_namespace("<svg width=\"1\"></svg>"),
            format!("<svg xmlns=\"{}\" width=\"1\"></svg>", SVG_NS)
        );
        let namespaced = format!("<svg xmlns=\"{}\"></svg>", SVG_NS);
        assert_eq!(with_svg_namespace(&namespaced), namespaced);
    }

    #[test]
    fn test_decode_image_produces_png() {
        let svg = concat!(
            "<svg width=\"10\" height=\"10\">",
            "<rect width=\"10\" height=\"10\" fill=\"red\"/></svg>"
        );
        let png = LegacyDialect.decode_image(svg).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_text_is_rasterized() {
        let svg = concat!(
            "<svg width=\"200\" height=\"40\">",
            "<text x=\"0\" y=\"30\" font-size=\"30\" fill=\"black\">Test SVG</text>",
            "</svg>"
        );
        let document = format!("{}{}", XML_HEADER, with_svg_namespace(svg));

        let pixmap = render(&document).unwrap();
        let painted = pixmap.pixels().iter().filter(|p| p.alpha() > 0).count();

        assert!(painted > 0, "axis labels and legends must be drawn");
    }

    #[test]
    fn test_decode_invalid_svg() {
        let err = LegacyDialect.decode_image("<svg><g></svg>").unwrap_err();
        assert!(matches!(err, ConvertError::ImageDecode(_)));
    }
}
