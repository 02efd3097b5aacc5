use crate::stats::{HudStats, LanguageShare};

const CANVAS_WIDTH: u32 = 900;
const CANVAS_HEIGHT: u32 = 420;

const COLUMN_X: u32 = 250;

const BAR_WIDTH: u32 = 10;
const BAR_STEP: u32 = 14;
const BAR_BASELINE_Y: u32 = 232;

const LEGEND_ROW_START_Y: u32 = 288;
const LEGEND_ROW_STEP: u32 = 20;
const LEGEND_TRACK_X: u32 = 370;
const LEGEND_TRACK_WIDTH: u32 = 400;

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// One rect per repository, anchored to the shared baseline.
fn build_signal_bars(heights: &[u32]) -> String {
    let mut out = String::new();
    for (i, &h) in heights.iter().enumerate() {
        let x = COLUMN_X + i as u32 * BAR_STEP;
        let y = BAR_BASELINE_Y - h;
        out.push_str(&format!(
            "    <rect x=\"{x}\" y=\"{y}\" width=\"{BAR_WIDTH}\" height=\"{h}\" rx=\"2\" fill=\"white\" opacity=\"0.65\"/>\n"
        ));
    }
    out
}

/// Ranked legend rows: name, proportional bar on a faint track, rounded
/// percentage. An empty ranking renders the placeholder label instead.
fn build_language_legend(rows: &[LanguageShare]) -> String {
    if rows.is_empty() {
        let y = LEGEND_ROW_START_Y + LEGEND_ROW_STEP;
        return format!(
            "    <text x=\"{COLUMN_X}\" y=\"{y}\" font-size=\"12\" fill=\"white\" opacity=\"0.45\">NO LANGUAGE DATA</text>\n"
        );
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let text_y = LEGEND_ROW_START_Y + i as u32 * LEGEND_ROW_STEP;
        let track_y = text_y - 9;
        let fill_width = (row.share * f64::from(LEGEND_TRACK_WIDTH)).round() as u32;
        let percent = (row.share * 100.0).round() as u32;
        let pct_x = LEGEND_TRACK_X + LEGEND_TRACK_WIDTH + 12;

        out.push_str(&format!(
            "    <text x=\"{COLUMN_X}\" y=\"{text_y}\" font-size=\"12\" fill=\"white\" opacity=\"0.8\">{name}</text>\n",
            name = escape_xml(&row.name)
        ));
        out.push_str(&format!(
            "    <rect x=\"{LEGEND_TRACK_X}\" y=\"{track_y}\" width=\"{LEGEND_TRACK_WIDTH}\" height=\"8\" rx=\"4\" fill=\"white\" opacity=\"0.12\"/>\n"
        ));
        out.push_str(&format!(
            "    <rect x=\"{LEGEND_TRACK_X}\" y=\"{track_y}\" width=\"{fill_width}\" height=\"8\" rx=\"4\" fill=\"white\" opacity=\"0.6\"/>\n"
        ));
        out.push_str(&format!(
            "    <text x=\"{pct_x}\" y=\"{text_y}\" font-size=\"11\" fill=\"white\" opacity=\"0.7\">{percent}%</text>\n"
        ));
    }
    out
}

/// Main SVG generation function. Pure: the same stats and stamp always
/// produce the same bytes, and the canvas size never varies with input.
pub fn generate_svg(stats: &HudStats, stamp: &str) -> String {
    let handle = escape_xml(&stats.handle);
    let bars = build_signal_bars(&stats.signal_bars);
    let legend = build_language_legend(&stats.languages);

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg"
     font-family="ui-sans-serif, system-ui">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="#0b1021"/>
      <stop offset="100%" stop-color="#27345d"/>
    </linearGradient>
    <filter id="glow">
      <feGaussianBlur stdDeviation="3" result="b"/>
      <feMerge>
        <feMergeNode in="b"/>
        <feMergeNode in="SourceGraphic"/>
      </feMerge>
    </filter>
  </defs>

  <rect x="12" y="12" width="876" height="396" rx="18" fill="url(#g)" opacity="0.9"/>

  <!-- Radar ring -->
  <g transform="translate(140 210)" filter="url(#glow)">
    <circle r="62" fill="none" stroke="white" opacity="0.18" stroke-width="2"/>
    <circle r="44" fill="none" stroke="white" opacity="0.12" stroke-width="2"/>
    <circle r="26" fill="none" stroke="white" opacity="0.10" stroke-width="2"/>

    <path d="M0,0 L0,-62 A62,62 0 0 1 54,-31 Z" fill="white" opacity="0.10">
      <animateTransform attributeName="transform" type="rotate" from="0" to="360" dur="4s" repeatCount="indefinite"/>
    </path>
    <circle r="2.5" fill="white" opacity="0.7"/>
  </g>

  <!-- Text -->
  <text x="{col}" y="70" font-size="26" fill="white" opacity="0.92">
    {handle} // Mission Control
  </text>

  <text x="{col}" y="96" font-size="13" fill="white" opacity="0.6">
    github.com/{handle} // live telemetry
  </text>

  <text x="{col}" y="128" font-size="16" fill="white" opacity="0.75">
    Followers: {followers}   •   Public repos: {public_repos}   •   Stars: {stars}
  </text>

  <!-- tiny scanning line -->
  <rect x="{col}" y="146" width="600" height="2" fill="white" opacity="0.18">
    <animate attributeName="x" values="250;820;250" dur="3.2s" repeatCount="indefinite"/>
  </rect>

  <!-- Signal strip -->
  <text x="{col}" y="182" font-size="11" fill="white" opacity="0.5">SIGNAL // STARS OF RECENTLY PUSHED REPOS</text>
  <g>
{bars}  </g>

  <!-- Language legend -->
  <text x="{col}" y="268" font-size="11" fill="white" opacity="0.5">TOP LANGUAGES // BY BYTES</text>
  <g>
{legend}  </g>

  <text x="{col}" y="396" font-size="12" fill="white" opacity="0.55">
    Updated: {stamp}
  </text>
</svg>
"##,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT,
        col = COLUMN_X,
        handle = handle,
        followers = stats.followers,
        public_repos = stats.public_repos,
        stars = stats.total_stars,
        bars = bars,
        legend = legend,
        stamp = stamp,
    )
}
