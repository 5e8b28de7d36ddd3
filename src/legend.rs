use serde::Serialize;

use crate::constants::LEGEND_BREAKPOINTS;
use crate::encoder::marker_color;

pub const LEGEND_TITLE: &str = "Depth (km)";
pub const LEGEND_POSITION: &str = "bottomright";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub from_km: f64,
    /// `None` for the open-ended deepest row.
    pub to_km: Option<f64>,
    pub color: &'static str,
}

impl LegendRow {
    pub fn label(&self) -> String {
        match self.to_km {
            Some(to) => format!("{}&ndash;{}", self.from_km, to),
            None => format!("{}+", self.from_km),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub position: &'static str,
    pub rows: Vec<LegendRow>,
    pub html: String,
}

impl Legend {
    /// Static legend. The swatch color is sampled one km past each
    /// breakpoint so it shows the band above the boundary.
    pub fn new() -> Self {
        let rows: Vec<LegendRow> = LEGEND_BREAKPOINTS
            .iter()
            .enumerate()
            .map(|(i, &from_km)| LegendRow {
                from_km,
                to_km: LEGEND_BREAKPOINTS.get(i + 1).copied(),
                color: marker_color(from_km + 1.0),
            })
            .collect();
        let html = render_html(&rows);

        Legend {
            title: LEGEND_TITLE,
            position: LEGEND_POSITION,
            rows,
            html,
        }
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

fn render_html(rows: &[LegendRow]) -> String {
    let mut html = format!("<strong>{}</strong><br>", LEGEND_TITLE);
    for row in rows {
        html.push_str(&format!(
            "<i style=\"background:{}\"></i> {}",
            row.color,
            row.label()
        ));
        if row.to_km.is_some() {
            html.push_str("<br>");
        }
    }
    html
}
