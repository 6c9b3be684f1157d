// This file is part of yaffchart.
//
// yaffchart is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// yaffchart is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with yaffchart.  If not, see <http://www.gnu.org/licenses/>.
use anyhow::{anyhow, bail, ensure, Result};
use image::{Rgb, RgbImage};
use log::debug;
use std::str::FromStr;
use yaff::{FontDocument, Glyph};

pub const DEFAULT_COLUMNS: u32 = 32;

// Keeps the RGB buffer under a gigabyte.
pub const MAX_SURFACE_PIXELS: u64 = 1 << 28;

/// Which way consecutive ordinals run through the chart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Order {
    RowMajor,
    ColumnMajor,
}

impl FromStr for Order {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with('r') {
            Ok(Order::RowMajor)
        } else if lower.starts_with('c') {
            Ok(Order::ColumnMajor)
        } else {
            bail!("order should start with one of `r`, `c`, not `{}`", s)
        }
    }
}

/// Traversal direction along each axis; a backward axis starts at the
/// right or bottom edge of the chart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Direction {
    pub forward_x: bool,
    pub forward_y: bool,
}

impl Default for Direction {
    fn default() -> Self {
        Self {
            forward_x: true,
            forward_y: true,
        }
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    // Written as two signed numbers, e.g. `1,-1`.
    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("direction should look like `1,-1`, not `{}`", s))?;
        let x = x.trim().parse::<i32>()?;
        let y = y.trim().parse::<i32>()?;
        ensure!(x != 0 && y != 0, "direction values must not be 0");
        Ok(Self {
            forward_x: x > 0,
            forward_y: y > 0,
        })
    }
}

/// Parse `N` or `X,Y` into a horizontal and vertical amount.
pub fn parse_pair(s: &str) -> Result<(u32, u32)> {
    Ok(match s.split_once(',') {
        Some((x, y)) => (x.trim().parse()?, y.trim().parse()?),
        None => {
            let n = s.trim().parse()?;
            (n, n)
        }
    })
}

/// Geometry and colors of a glyph chart. Margin and padding are (x, y)
/// amounts measured in font pixels and scaled along with the glyphs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChartConfig {
    pub columns: u32,
    pub scale: u32,
    pub grid: u32,
    pub margin: (u32, u32),
    pub padding: (u32, u32),
    pub order: Order,
    pub direction: Direction,
    pub ink: Rgb<u8>,
    pub paper: Rgb<u8>,
    pub border: Rgb<u8>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            scale: 4,
            grid: 1,
            margin: (1, 1),
            padding: (1, 1),
            order: Order::RowMajor,
            direction: Direction::default(),
            ink: Rgb([0x00, 0x00, 0x00]),
            paper: Rgb([0xFF, 0xFF, 0xFF]),
            border: Rgb([0x80, 0x80, 0x80]),
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.columns > 0, "a chart needs at least one column");
        ensure!(self.scale > 0, "scale must be at least 1");
        ensure!(
            self.grid < self.scale,
            "grid lines ({}) must be thinner than a scaled pixel ({})",
            self.grid,
            self.scale
        );
        Ok(())
    }
}

/// Parse any CSS color string into an opaque RGB color.
pub fn parse_color(s: &str) -> Result<Rgb<u8>> {
    let [r, g, b, _a] = csscolorparser::parse(s)?.to_rgba8();
    Ok(Rgb([r, g, b]))
}

fn too_large() -> anyhow::Error {
    anyhow!("chart is too large to draw")
}

// One axis of the surface: `cells` cells of `size` pixels, with `padding`
// between them and `margin` on both ends, all times `scale`.
fn extent(cells: u32, size: u32, margin: u32, padding: u32, scale: u32) -> Result<u32> {
    cells
        .checked_mul(size)
        .and_then(|v| v.checked_add(margin.checked_mul(2)?))
        .and_then(|v| v.checked_add(cells.saturating_sub(1).checked_mul(padding)?))
        .and_then(|v| v.checked_mul(scale))
        .ok_or_else(too_large)
}

/// Where each glyph cell lands in a chart. All positions handed out are in
/// surface pixels unless noted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChartLayout {
    columns: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
    margin: (u32, u32),
    padding: (u32, u32),
    scale: u32,
    order: Order,
    direction: Direction,
    width: u32,
    height: u32,
}

impl ChartLayout {
    pub fn new(doc: &FontDocument, config: &ChartConfig) -> Result<Self> {
        config.validate()?;
        let glyph_count = u32::try_from(doc.glyph_count())?;
        let columns = config.columns;
        let rows = glyph_count / columns + u32::from(glyph_count % columns != 0);
        let cell_width = u32::try_from(doc.cell_width())?;
        let cell_height = u32::try_from(doc.cell_height())?;

        let width = extent(columns, cell_width, config.margin.0, config.padding.0, config.scale)?;
        let height = extent(rows, cell_height, config.margin.1, config.padding.1, config.scale)?;
        ensure!(
            u64::from(width) * u64::from(height) <= MAX_SURFACE_PIXELS,
            "chart of {}x{} pixels is too large to draw",
            width,
            height
        );

        Ok(Self {
            columns,
            rows,
            cell_width,
            cell_height,
            margin: config.margin,
            padding: config.padding,
            scale: config.scale,
            order: config.order,
            direction: config.direction,
            width,
            height,
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// (column, row) of the cell for `ordinal`.
    pub fn cell_position(&self, ordinal: u32) -> (u32, u32) {
        let (col, row) = match self.order {
            Order::RowMajor => (ordinal % self.columns, ordinal / self.columns),
            Order::ColumnMajor => {
                let rows = self.rows.max(1);
                (ordinal / rows, ordinal % rows)
            }
        };
        let col = if self.direction.forward_x {
            col
        } else {
            (self.columns - 1).saturating_sub(col)
        };
        let row = if self.direction.forward_y {
            row
        } else {
            self.rows.saturating_sub(1).saturating_sub(row)
        };
        (col, row)
    }

    // Only ordinals below the glyph count land inside the surface, and the
    // surface size was checked when the layout was built.
    pub fn cell_origin(&self, ordinal: u32) -> (u32, u32) {
        let (col, row) = self.cell_position(ordinal);
        let x = self.margin.0 + col * (self.cell_width + self.padding.0);
        let y = self.margin.1 + row * (self.cell_height + self.padding.1);
        (x * self.scale, y * self.scale)
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Draw every glyph of `doc` into a fresh chart image. The surface starts out
/// in the border color; each glyph pixel is a scaled block of ink or paper
/// with the grid showing through along its right and bottom edges.
pub fn render(doc: &FontDocument, config: &ChartConfig) -> Result<RgbImage> {
    let layout = ChartLayout::new(doc, config)?;
    let (width, height) = layout.surface_size();
    debug!(
        "chart of {} glyphs: {}x{} cells, {}x{} pixels",
        doc.glyph_count(),
        layout.columns(),
        layout.rows(),
        width,
        height
    );
    let mut buf = RgbImage::from_pixel(width, height, config.border);
    for ordinal in 0..doc.glyph_count() {
        if let Some(glyph) = doc.glyph(ordinal) {
            let origin = layout.cell_origin(u32::try_from(ordinal)?);
            blit(&mut buf, doc, glyph, origin, config);
        }
    }
    Ok(buf)
}

fn blit(
    buf: &mut RgbImage,
    doc: &FontDocument,
    glyph: &Glyph,
    origin: (u32, u32),
    config: &ChartConfig,
) {
    let scale = config.scale;
    let inset = scale - config.grid;
    // The first row sets the glyph's width; anything past it stays unpainted.
    for (i, row) in glyph.rows().iter().enumerate() {
        for (j, c) in row.chars().take(glyph.width()).enumerate() {
            let x = origin.0 + j as u32 * scale;
            let y = origin.1 + i as u32 * scale;
            let color = if doc.dialect().is_paper(c) {
                config.paper
            } else {
                config.ink
            };
            fill(buf, x, y, scale, config.border);
            fill(buf, x, y, inset, color);
        }
    }
}

fn fill(buf: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            buf.put_pixel(x + dx, y + dy, color);
        }
    }
}
