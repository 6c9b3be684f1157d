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
use anyhow::{anyhow, Result};
use chart::{parse_color, parse_pair, ChartConfig, Direction, Order};
use log::info;
use std::{
    fs,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use yaff::{Dialect, FontCatalog, FontDocument, FontLoader};

/// Show plaintext bitmap fonts and render them as a glyph chart
#[derive(Debug, StructOpt)]
struct Opt {
    /// List the fonts found in the inputs and exit
    #[structopt(short, long)]
    list: bool,

    /// Only load the font at this position in the listing
    #[structopt(short, long)]
    select: Option<usize>,

    /// Print every glyph as text
    #[structopt(short = "a", long = "ascii")]
    show_ascii: bool,

    /// Write a chart of the last loaded font to the given PNG file
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    write_image: Option<PathBuf>,

    /// Character marking ink, instead of the dialect's
    #[structopt(long)]
    ink: Option<char>,

    /// Character marking paper, instead of the dialect's
    #[structopt(long)]
    paper: Option<char>,

    #[structopt(flatten)]
    chart_opts: ChartOpts,

    /// Font files, or directories of .yaff and .draw fonts
    #[structopt(parse(from_os_str))]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
struct ChartOpts {
    /// Glyphs per chart row
    #[structopt(long, default_value = "32")]
    columns: u32,

    /// Size of one font pixel in the chart
    #[structopt(long, default_value = "4")]
    scale: u32,

    /// Thickness of the grid between font pixels; 0 for none
    #[structopt(long, default_value = "1")]
    grid: u32,

    /// Space around the chart, in font pixels: N or X,Y
    #[structopt(long, default_value = "1", parse(try_from_str = parse_pair))]
    margin: (u32, u32),

    /// Space between cells, in font pixels: N or X,Y
    #[structopt(long, default_value = "1", parse(try_from_str = parse_pair))]
    padding: (u32, u32),

    /// Fill the chart by rows or by columns
    #[structopt(long, default_value = "row-major")]
    order: Order,

    /// Sign of the step along X and Y; -1 starts from the right or bottom
    #[structopt(long, default_value = "1,1", allow_hyphen_values = true)]
    direction: Direction,

    #[structopt(long, default_value = "#000000")]
    ink_color: String,

    #[structopt(long, default_value = "#ffffff")]
    paper_color: String,

    #[structopt(long, default_value = "#808080")]
    grid_color: String,
}

impl ChartOpts {
    fn config(&self) -> Result<ChartConfig> {
        let config = ChartConfig {
            columns: self.columns,
            scale: self.scale,
            grid: self.grid,
            margin: self.margin,
            padding: self.padding,
            order: self.order,
            direction: self.direction,
            ink: parse_color(&self.ink_color)?,
            paper: parse_color(&self.paper_color)?,
            border: parse_color(&self.grid_color)?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Opt {
    fn dialect_for(&self, path: &Path) -> Result<Dialect> {
        let mut dialect = Dialect::from_path(path);
        if let Some(ink) = self.ink {
            dialect = dialect.with_ink(ink);
        }
        if let Some(paper) = self.paper {
            dialect = dialect.with_paper(paper);
        }
        dialect.validate()?;
        Ok(dialect)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    let config = opt.chart_opts.config()?;

    let catalog = FontCatalog::from_inputs(&opt.inputs)?;
    if catalog.is_empty() {
        println!("No inputs found!");
        return Ok(());
    }

    if opt.list {
        for (i, path) in catalog.fonts().iter().enumerate() {
            println!("{:>3}: {}", i, path.display());
        }
        return Ok(());
    }

    let selected = if let Some(index) = opt.select {
        let path = catalog
            .get(index)
            .ok_or_else(|| anyhow!("no font at position {}", index))?;
        vec![path]
    } else {
        catalog.fonts().iter().map(PathBuf::as_path).collect()
    };

    // Each input is a new selection; whatever loads last is what gets drawn.
    let mut loader = FontLoader::default();
    for path in selected {
        let token = loader.begin();
        let dialect = opt.dialect_for(path)?;
        match fs::read_to_string(path) {
            Ok(text) => {
                if let Some(doc) = loader.complete(token, &text, &dialect) {
                    show(path, doc, opt.show_ascii);
                }
            }
            Err(e) => loader.fail(token, &e.into()),
        }
    }

    if let Some(target) = &opt.write_image {
        if let Some(doc) = loader.current() {
            let buf = chart::render(doc, &config)?;
            buf.save(target)?;
            info!("wrote {}x{} chart to {}", buf.width(), buf.height(), target.display());
        }
    }

    Ok(())
}

fn show(path: &Path, doc: &FontDocument, show_ascii: bool) {
    let title = path.display().to_string();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!("dialect: {}", doc.dialect().name);
    if let Some(name) = doc.name() {
        println!("name:    {}", name);
    }
    println!("glyphs:  {}", doc.glyph_count());
    println!("cell:    {}x{}", doc.cell_width(), doc.cell_height());

    if show_ascii {
        for (ordinal, glyph) in doc.glyphs().iter().enumerate() {
            let labels = glyph
                .labels()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            println!();
            println!("{:>4}: {}", ordinal, labels.join(", "));
            for row in glyph.rows() {
                println!("      {}", row);
            }
        }
    }
    println!();
}
