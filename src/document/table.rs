//! Tables built row by row.

use super::container::{Container, ContainerKind, ElementContainer};
use super::context::BuildContext;
use crate::common::Result;
use crate::media::MediaScope;
use crate::style::{CellStyle, RowStyle, StyleRef, StyleSpec, TableStyle};

/// A table.
///
/// # Examples
///
/// ```rust
/// use quillpack::document::{Document, ElementContainer};
///
/// let mut doc = Document::new();
/// let section = doc.add_section(None)?;
/// let table = section.add_table(None)?;
/// let row = table.add_row(None, None)?;
/// row.add_cell(Some(2000), None)?.add_text("A1", None, None)?;
/// row.add_cell(Some(2000), None)?.add_text("B1", None, None)?;
/// assert_eq!(table.column_count(), 2);
/// # Ok::<(), quillpack::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    pub style: StyleRef<TableStyle>,
    /// Preferred width in twips
    pub width: Option<u32>,
    rows: Vec<Row>,
    scope: MediaScope,
    root: ContainerKind,
    ctx: BuildContext,
}

impl Table {
    pub(crate) fn new(
        scope: MediaScope,
        root: ContainerKind,
        ctx: BuildContext,
        style: StyleRef<TableStyle>,
    ) -> Self {
        Self {
            style,
            width: None,
            rows: Vec::new(),
            scope,
            root,
            ctx,
        }
    }

    /// Append a row. `height` is in twips.
    pub fn add_row(&mut self, height: Option<u32>, style: impl Into<StyleSpec<RowStyle>>) -> Result<&mut Row> {
        let mut style = self.ctx.owned_style(style.into().into_ref()?, "row")?;
        if height.is_some() {
            style.height = height;
        }
        self.rows.push(Row {
            style,
            cells: Vec::new(),
            scope: self.scope,
            root: self.root,
            ctx: self.ctx.clone(),
        });
        let index = self.rows.len() - 1;
        Ok(&mut self.rows[index])
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Width of the widest row, counting spanned grid columns.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Row::span)
            .max()
            .unwrap_or(0)
    }

    /// Column widths in twips, one per grid column. Taken from the first row
    /// that spans every column with the most cells; a spanned cell's width
    /// is split evenly over its columns. Cells without a width get an equal
    /// share of 9000 twips per column.
    pub fn grid(&self) -> Vec<u32> {
        let count = self.column_count();
        let Some(row) = self
            .rows
            .iter()
            .filter(|row| row.span() == count)
            .rev()
            .max_by_key(|row| row.cells.len())
        else {
            return Vec::new();
        };
        let share = 9000 / count.max(1) as u32;
        row.cells
            .iter()
            .flat_map(|cell| {
                let span = cell.style.grid_span.unwrap_or(1).max(1);
                let width = cell.width.map_or(share, |width| width / span);
                std::iter::repeat_n(width, span as usize)
            })
            .collect()
    }
}

/// A table row.
#[derive(Debug, Clone)]
pub struct Row {
    pub style: RowStyle,
    cells: Vec<Cell>,
    scope: MediaScope,
    root: ContainerKind,
    ctx: BuildContext,
}

impl Row {
    /// Append a cell. `width` is in twips.
    pub fn add_cell(&mut self, width: Option<u32>, style: impl Into<StyleSpec<CellStyle>>) -> Result<&mut Cell> {
        let style = self.ctx.owned_style(style.into().into_ref()?, "cell")?;
        self.cells.push(Cell {
            width,
            style,
            container: Container::nested(ContainerKind::Cell, self.root, self.scope, self.ctx.clone()),
        });
        let index = self.cells.len() - 1;
        Ok(&mut self.cells[index])
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Grid columns covered by this row.
    pub fn span(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.style.grid_span.unwrap_or(1).max(1) as usize)
            .sum()
    }
}

/// A table cell. Holds paragraphs, runs, images and lists but no nested
/// tables or headings.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Width in twips
    pub width: Option<u32>,
    pub style: CellStyle,
    container: Container,
}

impl ElementContainer for Cell {
    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }
}
