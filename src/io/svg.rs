//! SVG rendering of a navigation run.

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::{Pose2D, WorldPoint};
use crate::error::Result;
use crate::grid::OccupancyGrid;

/// SVG color scheme
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Occupied cell color
    pub obstacle: &'static str,
    /// Free space color
    pub free: &'static str,
    /// Path polyline color
    pub path: &'static str,
    /// Start marker color
    pub start: &'static str,
    /// Goal marker and radius color
    pub goal: &'static str,
    /// Robot heading marker color
    pub robot: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            obstacle: "#333333",
            free: "#FFFFFF",
            path: "#2222AA",
            start: "#22AA22",
            goal: "#AA2222",
            robot: "#FF8800",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per world unit
    pub scale: f32,
    /// Path line width
    pub path_width: f32,
    /// Pose marker radius in pixels
    pub marker_radius: f32,
    /// Distance between heading markers along the path (0 = none)
    pub marker_interval: f32,
    /// Color scheme
    pub colors: SvgColorScheme,
    /// Padding around the map in pixels
    pub padding: f32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 6.0,
            path_width: 2.0,
            marker_radius: 4.0,
            marker_interval: 10.0,
            colors: SvgColorScheme::default(),
            padding: 20.0,
        }
    }
}

/// SVG visualization builder
pub struct SvgVisualizer<'a> {
    config: SvgConfig,
    grid: &'a OccupancyGrid,
    /// Path history, start pose first, robot pose last
    path: Vec<Pose2D>,
    goal: Option<(WorldPoint, f32)>,
    title: Option<String>,
}

impl<'a> SvgVisualizer<'a> {
    /// Create a new SVG visualizer over `grid`
    pub fn new(grid: &'a OccupancyGrid, config: SvgConfig) -> Self {
        Self {
            config,
            grid,
            path: Vec::new(),
            goal: None,
            title: None,
        }
    }

    /// Set a title to display
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the path history. The first pose is drawn as the start marker
    /// and the last as the robot.
    pub fn with_path(mut self, poses: Vec<Pose2D>) -> Self {
        self.path = poses;
        self
    }

    /// Set the goal marker and the radius drawn around it
    pub fn with_goal(mut self, goal: WorldPoint, radius: f32) -> Self {
        self.goal = Some((goal, radius));
        self
    }

    /// Render to SVG string
    pub fn render(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let (world_w, world_h) = self.grid.world_size();
        let map_width_px = world_w * self.config.scale;
        let map_height_px = world_h * self.config.scale;

        let padding = self.config.padding;
        let title_height = if self.title.is_some() { 30.0 } else { 0.0 };
        let legend_height = 110.0;

        let width = map_width_px + 2.0 * padding;
        let height = map_height_px + 2.0 * padding + title_height + legend_height;

        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
            width, height, width, height
        )?;
        writeln!(svg, r##"  <rect width="100%" height="100%" fill="#F8F8F8"/>"##)?;

        if let Some(ref title) = self.title {
            writeln!(
                svg,
                r##"  <text x="{:.0}" y="22" font-family="sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="#333">{}</text>"##,
                width / 2.0,
                escape_xml(title)
            )?;
        }

        let map_offset_y = padding + title_height;
        writeln!(
            svg,
            r#"  <g transform="translate({:.0}, {:.0})">"#,
            padding, map_offset_y
        )?;

        self.write_grid(svg, map_height_px)?;
        self.write_goal(svg, map_height_px)?;
        self.write_path(svg, map_height_px)?;
        self.write_endpoints(svg, map_height_px)?;

        writeln!(svg, "  </g>")?;

        self.write_legend(svg, width, map_offset_y + map_height_px + 10.0)?;

        writeln!(svg, "</svg>")
    }

    /// World point to map-group pixels (SVG Y axis points down)
    fn to_px(&self, point: WorldPoint, height_px: f32) -> (f32, f32) {
        let origin = self.grid.origin();
        (
            (point.x - origin.x) * self.config.scale,
            height_px - (point.y - origin.y) * self.config.scale,
        )
    }

    fn write_grid(&self, svg: &mut String, height_px: f32) -> fmt::Result {
        let cell_size = self.grid.resolution() * self.config.scale;

        writeln!(svg, r#"    <g id="grid">"#)?;
        writeln!(
            svg,
            r##"      <rect width="{:.0}" height="{:.0}" fill="{}" stroke="#CCC"/>"##,
            self.grid.width() as f32 * cell_size,
            self.grid.height() as f32 * cell_size,
            self.config.colors.free
        )?;

        for coord in self.grid.iter_occupied() {
            let px_x = coord.x as f32 * cell_size;
            let px_y = height_px - (coord.y + 1) as f32 * cell_size;
            writeln!(
                svg,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                px_x, px_y, cell_size, cell_size, self.config.colors.obstacle
            )?;
        }

        writeln!(svg, "    </g>")
    }

    fn write_goal(&self, svg: &mut String, height_px: f32) -> fmt::Result {
        let Some((goal, radius)) = self.goal else {
            return Ok(());
        };
        let (px, py) = self.to_px(goal, height_px);
        writeln!(
            svg,
            r#"    <circle id="goal-radius" cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" fill-opacity="0.1" stroke="{}" stroke-dasharray="4 3"/>"#,
            px,
            py,
            radius * self.config.scale,
            self.config.colors.goal,
            self.config.colors.goal
        )
    }

    fn write_path(&self, svg: &mut String, height_px: f32) -> fmt::Result {
        if self.path.is_empty() {
            return Ok(());
        }

        writeln!(svg, r#"    <g id="path">"#)?;

        let mut path_d = String::new();
        for (i, pose) in self.path.iter().enumerate() {
            let (px, py) = self.to_px(pose.position(), height_px);
            let cmd = if i == 0 { "M" } else { " L" };
            write!(&mut path_d, "{} {:.1} {:.1}", cmd, px, py)?;
        }
        writeln!(
            svg,
            r#"      <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" opacity="0.8"/>"#,
            path_d, self.config.colors.path, self.config.path_width
        )?;

        if self.config.marker_interval > 0.0 {
            for idx in markers_by_distance(&self.path, self.config.marker_interval) {
                self.write_heading(svg, &self.path[idx], self.config.colors.path, height_px)?;
            }
        }

        writeln!(svg, "    </g>")
    }

    fn write_endpoints(&self, svg: &mut String, height_px: f32) -> fmt::Result {
        let colors = &self.config.colors;

        if let Some(start) = self.path.first().copied() {
            self.write_heading(svg, &start, colors.start, height_px)?;
        }
        if let Some((goal, _)) = self.goal {
            let (px, py) = self.to_px(goal, height_px);
            writeln!(
                svg,
                r#"    <circle id="goal" cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
                px, py, self.config.marker_radius, colors.goal
            )?;
        }
        if let Some(robot) = self.path.last().copied() {
            self.write_heading(svg, &robot, colors.robot, height_px)?;
        }
        Ok(())
    }

    /// Circle with a direction line
    fn write_heading(
        &self,
        svg: &mut String,
        pose: &Pose2D,
        color: &str,
        height_px: f32,
    ) -> fmt::Result {
        let (px, py) = self.to_px(pose.position(), height_px);
        let arrow_len = self.config.marker_radius * 2.5;
        let dx = arrow_len * pose.theta.cos();
        let dy = -arrow_len * pose.theta.sin();

        writeln!(
            svg,
            r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="white" stroke-width="1"/>"#,
            px, py, self.config.marker_radius, color
        )?;
        writeln!(
            svg,
            r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"#,
            px,
            py,
            px + dx,
            py + dy,
            color
        )
    }

    fn write_legend(&self, svg: &mut String, svg_width: f32, y_offset: f32) -> fmt::Result {
        let colors = &self.config.colors;

        writeln!(
            svg,
            r#"  <g id="legend" font-family="sans-serif" font-size="12" transform="translate(0, {:.0})">"#,
            y_offset
        )?;
        writeln!(
            svg,
            r##"    <rect x="10" y="0" width="{:.0}" height="90" fill="white" stroke="#CCC" stroke-width="1" rx="4"/>"##,
            svg_width - 20.0
        )?;

        writeln!(
            svg,
            r#"    <line x1="20" y1="20" x2="50" y2="20" stroke="{}" stroke-width="3"/>"#,
            colors.path
        )?;
        writeln!(svg, r##"    <text x="60" y="24" fill="#333">Path</text>"##)?;

        let circles = [
            (40.0, colors.start, "Start"),
            (60.0, colors.goal, "Goal"),
            (80.0, colors.robot, "Robot"),
        ];
        for (y, color, label) in circles {
            writeln!(
                svg,
                r#"    <circle cx="35" cy="{:.0}" r="5" fill="{}" stroke="white" stroke-width="1"/>"#,
                y, color
            )?;
            writeln!(
                svg,
                r##"    <text x="60" y="{:.0}" fill="#333">{}</text>"##,
                y + 4.0,
                label
            )?;
        }

        let map_legend_x = svg_width - 150.0;
        writeln!(
            svg,
            r#"    <rect x="{:.0}" y="10" width="15" height="15" fill="{}"/>"#,
            map_legend_x, colors.obstacle
        )?;
        writeln!(
            svg,
            r##"    <text x="{:.0}" y="22" fill="#333">Obstacles</text>"##,
            map_legend_x + 20.0
        )?;
        writeln!(
            svg,
            r##"    <rect x="{:.0}" y="30" width="15" height="15" fill="{}" stroke="#CCC"/>"##,
            map_legend_x, colors.free
        )?;
        writeln!(
            svg,
            r##"    <text x="{:.0}" y="42" fill="#333">Free</text>"##,
            map_legend_x + 20.0
        )?;

        writeln!(svg, "  </g>")
    }
}

/// Escape text for use inside an XML element
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Indices of poses spaced roughly `interval` apart along the path.
///
/// Always includes the first and last pose.
pub fn markers_by_distance(poses: &[Pose2D], interval: f32) -> Vec<usize> {
    if poses.is_empty() {
        return vec![];
    }

    let mut markers = vec![0];
    let mut accumulated = 0.0f32;

    for i in 1..poses.len() {
        accumulated += poses[i].distance(&poses[i - 1]);
        if accumulated >= interval {
            markers.push(i);
            accumulated = 0.0;
        }
    }

    if poses.len() > 1 && markers.last() != Some(&(poses.len() - 1)) {
        markers.push(poses.len() - 1);
    }

    markers
}
