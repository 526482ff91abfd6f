//! The board graph: validated, immutable cell lookup.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::cell::{Cell, CellId, CellKind, DreamDefinition, DreamId};
use crate::core::{GameError, Result};

/// Directed graph of board cells plus the dream catalogue.
///
/// ## Example
///
/// ```
/// use finboard::board::{BoardGraph, Cell, CellId, CellKind};
///
/// let board = BoardGraph::new(
///     CellId::new(0),
///     vec![
///         Cell::new(CellId::new(0), CellKind::Start, CellId::new(1)),
///         Cell::new(CellId::new(1), CellKind::Money, CellId::new(0)),
///     ],
///     vec![],
/// )
/// .unwrap();
///
/// assert_eq!(board.cell(CellId::new(0)).unwrap().next(), CellId::new(1));
/// ```
#[derive(Clone, Debug)]
pub struct BoardGraph {
    start: CellId,
    cells: FxHashMap<CellId, Cell>,
    dreams: Vec<DreamDefinition>,
}

#[derive(Deserialize)]
struct RawBoard {
    start: CellId,
    cells: Vec<Cell>,
    #[serde(default)]
    dreams: Vec<DreamDefinition>,
}

impl BoardGraph {
    /// Build and validate a board.
    ///
    /// Fails if a cell id repeats, an edge points nowhere, a fork does not
    /// have exactly two edges, another cell does not have exactly one, or a
    /// dream cell names a dream missing from the catalogue.
    pub fn new(start: CellId, cells: Vec<Cell>, dreams: Vec<DreamDefinition>) -> Result<Self> {
        let mut map = FxHashMap::default();
        for cell in cells {
            let id = cell.id;
            if map.insert(id, cell).is_some() {
                return Err(GameError::InvalidBoard(format!("duplicate cell {id}")));
            }
        }

        match map.get(&start) {
            None => return Err(GameError::InvalidBoard(format!("start {start} does not exist"))),
            Some(cell) if cell.kind != CellKind::Start => {
                return Err(GameError::InvalidBoard(format!("start {start} is not a start cell")));
            }
            Some(_) => {}
        }

        for cell in map.values() {
            let expected = if cell.is_fork() { 2 } else { 1 };
            if cell.edges.len() != expected {
                return Err(GameError::InvalidBoard(format!(
                    "{} has {} edges, expected {expected}",
                    cell.id,
                    cell.edges.len()
                )));
            }
            if let Some(missing) = cell.edges.iter().find(|e| !map.contains_key(*e)) {
                return Err(GameError::InvalidBoard(format!(
                    "{} points to missing {missing}",
                    cell.id
                )));
            }
            if let Some(dream) = cell.dream {
                if !dreams.iter().any(|d| d.id == dream) {
                    return Err(GameError::InvalidBoard(format!(
                        "{} sells unknown {dream}",
                        cell.id
                    )));
                }
            }
        }

        Ok(Self {
            start,
            cells: map,
            dreams,
        })
    }

    /// Parse a board from JSON: `{ "start": 0, "cells": [...], "dreams": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawBoard = serde_json::from_str(json).map_err(|e| GameError::parse("board", e))?;
        Self::new(raw.start, raw.cells, raw.dreams)
    }

    /// The start cell id.
    #[must_use]
    pub fn start(&self) -> CellId {
        self.start
    }

    /// Look up a cell.
    pub fn cell(&self, id: CellId) -> Result<&Cell> {
        self.cells.get(&id).ok_or(GameError::UnknownCell(id))
    }

    #[must_use]
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all cells (unordered).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Look up a dream in the catalogue.
    #[must_use]
    pub fn dream(&self, id: DreamId) -> Option<&DreamDefinition> {
        self.dreams.iter().find(|d| d.id == id)
    }

    /// The full dream catalogue.
    #[must_use]
    pub fn dreams(&self) -> &[DreamDefinition] {
        &self.dreams
    }
}
