use anyhow::{Context, Result};
use rust_embed::RustEmbed;

use crate::app::MapContext;

#[derive(RustEmbed)]
#[folder = "frontend/"]
pub struct Asset;

const STYLE_LINK: &str = r#"<link rel="stylesheet" href="/style.css" />"#;
const SCRIPT_TAG: &str = r#"<script src="/script.js"></script>"#;
const CONTEXT_PLACEHOLDER: &str = "<!-- CONTEXT_PLACEHOLDER -->";

pub fn asset_text(name: &str) -> Result<String> {
    let file = Asset::get(name).with_context(|| format!("Embedded asset {} is missing", name))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("Embedded asset {} is not UTF-8", name))
}

/// Self-contained page with styles, script and map context inlined,
/// so it opens straight from disk.
pub fn render_snapshot(ctx: &MapContext) -> Result<String> {
    let page = asset_text("index.html")?;
    let style = asset_text("style.css")?;
    let script = asset_text("script.js")?;

    let context_json = serde_json::to_string(ctx).context("Failed to serialize map context")?;
    // keep "</script>" inside strings from closing the tag
    let context_json = context_json.replace("</", "<\\/");

    Ok(page
        .replace(STYLE_LINK, &format!("<style>\n{}</style>", style))
        .replace(
            CONTEXT_PLACEHOLDER,
            &format!("<script>window.QUAKEMAP_CONTEXT = {};</script>", context_json),
        )
        .replace(SCRIPT_TAG, &format!("<script>\n{}</script>", script)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{LayerOutcome, MapContext};
    use crate::layers::{EarthquakeLayer, EarthquakeMarker, CircleStyle};
    use crate::tiles::BasemapSet;

    fn context() -> MapContext {
        let marker = EarthquakeMarker {
            position: Some([35.0, 139.0]),
            style: CircleStyle {
                radius: 18.0,
                fill_color: "#FFFF33",
                color: "#000",
                weight: 1.0,
                opacity: 1.0,
                fill_opacity: 0.8,
            },
            popup_html: "<h3>Tokyo</h3><hr><p>now</p><p>Magnitude: 4.5</p><p>Depth: 22</p>"
                .to_string(),
        };
        MapContext::compose(
            BasemapSet::default(),
            LayerOutcome::Loaded {
                layer: EarthquakeLayer { markers: vec![marker] },
            },
            LayerOutcome::Failed {
                reason: "offline".to_string(),
            },
        )
    }

    #[test]
    fn snapshot_inlines_everything() {
        let html = render_snapshot(&context()).unwrap();

        assert!(html.contains("window.QUAKEMAP_CONTEXT = {"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
        assert!(html.contains("function render(ctx)"));
        assert!(html.contains(".legend i"));
        assert!(!html.contains(STYLE_LINK));
        assert!(!html.contains(SCRIPT_TAG));
        assert!(!html.contains(CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn snapshot_escapes_closing_tags_in_context() {
        let html = render_snapshot(&context()).unwrap();
        assert!(html.contains(r"<h3>Tokyo<\/h3>"));
        assert!(html.contains(r#""status":"failed","reason":"offline""#));
        assert_eq!(html.matches("</script>").count(), 3);
    }

    #[test]
    fn missing_asset_is_an_error() {
        assert!(asset_text("favicon.ico").is_err());
    }
}
