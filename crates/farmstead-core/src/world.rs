//! The world: dweller arena, occupancy authority, and signal routing.
//!
//! `World` owns the grid and every dweller. It is the only place occupancy
//! mutates, and its per-tick update is the only place production signals
//! turn into scene and counter effects. Interaction code resolves picked
//! scene handles back to dwellers through the owner map kept here, so no
//! caller ever walks the scene graph to find out what it clicked.

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::dweller::{Dweller, DwellerKind, ProductSignal, growth_scale};
use crate::event::{Event, Events};
use crate::fixed::Seconds;
use crate::grid::{CellCoord, Grid, Occupancy};
use crate::id::{DwellerId, SceneHandle};
use crate::indicator::IndicatorMode;
use crate::services::{Scene, ScoreBoard};

/// Result of a committed drag move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The dweller now occupies the destination cell.
    Relocated,
    /// The destination held a consumer; the product was delivered and the
    /// dweller stays on its source cell.
    Consumed,
}

pub struct World {
    grid: Grid,
    dwellers: SlotMap<DwellerId, Dweller>,
    /// Scene model handle back to its owning dweller.
    owners: HashMap<SceneHandle, DwellerId>,
    /// Which cell each dweller occupies. Kept in lockstep with the grid.
    cells: SecondaryMap<DwellerId, CellCoord>,
    /// Dwellers currently in the starved-paused display state, tracked so
    /// the pause event fires on the transition only.
    paused: SecondaryMap<DwellerId, ()>,
    events: Events,
}

impl World {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            dwellers: SlotMap::with_key(),
            owners: HashMap::new(),
            cells: SecondaryMap::new(),
            paused: SecondaryMap::new(),
            events: Events::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn dweller(&self, id: DwellerId) -> Option<&Dweller> {
        self.dwellers.get(id)
    }

    pub fn dweller_mut(&mut self, id: DwellerId) -> Option<&mut Dweller> {
        self.dwellers.get_mut(id)
    }

    pub fn dwellers(&self) -> impl Iterator<Item = (DwellerId, &Dweller)> {
        self.dwellers.iter()
    }

    /// The dweller whose model is `handle`, if any. Ground and environ
    /// objects have no owner.
    pub fn owner_of(&self, handle: SceneHandle) -> Option<DwellerId> {
        self.owners.get(&handle).copied()
    }

    pub fn cell_of(&self, id: DwellerId) -> Option<CellCoord> {
        self.cells.get(id).copied()
    }

    /// Place a dweller on an empty cell. Panics if the cell is occupied;
    /// spawn sites come from emptiness queries, so collision is a bug.
    pub fn spawn(&mut self, cell: CellCoord, dweller: Dweller) -> DwellerId {
        assert_eq!(
            self.grid.occupant(cell),
            Occupancy::Empty,
            "spawn on occupied cell ({}, {})",
            cell.x,
            cell.y
        );
        let kind = dweller.kind();
        let model = dweller.model();
        let id = self.dwellers.insert(dweller);
        self.grid.set_occupant(cell, Occupancy::Dweller { id, kind });
        self.owners.insert(model, id);
        self.cells.insert(id, cell);
        self.events.push(Event::DwellerSpawned {
            dweller: id,
            kind,
            cell,
        });
        id
    }

    /// Advance every production cycle to `now` and route the resulting
    /// signals to indicators, counters, and the scene.
    pub fn update(&mut self, now: Seconds, scene: &mut dyn Scene, scores: &mut dyn ScoreBoard) {
        for (id, dweller) in self.dwellers.iter_mut() {
            let signal = dweller.update(now);
            let kind = dweller.kind();

            if !matches!(signal, ProductSignal::Paused) {
                self.paused.remove(id);
            }

            match signal {
                ProductSignal::Parked | ProductSignal::Baseline => {}
                ProductSignal::Producing { progress } => {
                    dweller.indicator_mut().show_progress(progress);
                    scene.set_indicator(
                        dweller.indicator().handle(),
                        IndicatorMode::Active { progress },
                    );
                    if kind == DwellerKind::Corn {
                        // A growing crop scales up with progress and cannot
                        // be picked until its product is ready.
                        scene.set_uniform_scale(dweller.model(), growth_scale(progress));
                        scene.set_pickable(dweller.model(), false);
                    }
                }
                ProductSignal::Ready => {
                    if dweller.indicator_mut().hide() {
                        scene.set_indicator(dweller.indicator().handle(), IndicatorMode::Hidden);
                    }
                    if kind == DwellerKind::Corn {
                        scene.set_uniform_scale(dweller.model(), 1.0);
                        scene.set_pickable(dweller.model(), true);
                    }
                    if let Some(counter) = kind.tally() {
                        scores.increment(counter);
                    }
                    self.events.push(Event::ProductReady { dweller: id, kind });
                }
                ProductSignal::Paused => {
                    if dweller.indicator_mut().pause() {
                        scene.set_indicator(dweller.indicator().handle(), IndicatorMode::Paused);
                    }
                    if self.paused.insert(id, ()).is_none() {
                        self.events
                            .push(Event::ProductionPaused { dweller: id, kind });
                    }
                }
                ProductSignal::Hidden => {
                    if dweller.indicator_mut().hide() {
                        scene.set_indicator(dweller.indicator().handle(), IndicatorMode::Hidden);
                    }
                }
            }
        }
    }

    /// Legal drag destinations for a dweller: empty cells plus cells whose
    /// occupant the dragged kind feeds.
    pub fn permitted_cells(&self, id: DwellerId) -> Vec<CellCoord> {
        let kind = self.dwellers[id].kind();
        self.grid.empty_cells(kind.feeds())
    }

    /// Commit a drag: relocate onto an empty destination, or deliver the
    /// product when the destination holds a consumer.
    ///
    /// The destination must come from [`World::permitted_cells`]; anything
    /// else is a controller bug and panics via the occupancy assertions.
    pub fn move_dweller(&mut self, id: DwellerId, dst: CellCoord) -> MoveOutcome {
        let src = self.cells[id];
        match self.grid.occupant(dst) {
            Occupancy::Empty => {
                self.grid.move_occupant(src, dst);
                self.cells.insert(id, dst);
                self.events.push(Event::DwellerMoved {
                    dweller: id,
                    src,
                    dst,
                });
                MoveOutcome::Relocated
            }
            Occupancy::Dweller {
                id: occupant,
                kind: occupant_kind,
            } => {
                if self.dwellers[id].kind().feeds().contains(&occupant_kind) {
                    // Only a producer holding a ready unit is pickable in
                    // the first place.
                    if self.dwellers[id].take_ready() {
                        self.dwellers[occupant].refill();
                        self.events.push(Event::ProductConsumed {
                            producer: id,
                            consumer: occupant,
                        });
                    }
                    MoveOutcome::Consumed
                } else {
                    // Plain move onto a cell the permission filter should
                    // have excluded: the destination occupant is displaced
                    // off the board, source still cleared.
                    self.cells.remove(occupant);
                    self.grid.move_occupant(src, dst);
                    self.cells.insert(id, dst);
                    self.events.push(Event::DwellerMoved {
                        dweller: id,
                        src,
                        dst,
                    });
                    MoveOutcome::Relocated
                }
            }
            Occupancy::Environ => {
                panic!("drag destination ({}, {}) is terrain", dst.x, dst.y)
            }
        }
    }

    /// Scene handles visible on the given cells: ground decoration plus
    /// any occupant model. Used by the drag controller to highlight
    /// permitted destinations.
    pub fn tile_scene_handles(&self, cells: &[CellCoord]) -> Vec<SceneHandle> {
        let mut handles = Vec::new();
        for &cell in cells {
            if let Some(ground) = self.grid.ground(cell) {
                handles.push(ground);
            }
            if let Some(id) = self.grid.occupant(cell).dweller() {
                handles.push(self.dwellers[id].model());
            }
        }
        handles
    }

    /// Drain this frame's events in mutation order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain().collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
