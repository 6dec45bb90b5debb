//! Observable simulation events.
//!
//! The world pushes events as it mutates state; the embedder drains them
//! once per frame for logging or UI updates. The buffer is plain and
//! allocation-cheap; ordering within a frame matches mutation order.

use crate::dweller::DwellerKind;
use crate::grid::CellCoord;
use crate::id::DwellerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    DwellerSpawned {
        dweller: DwellerId,
        kind: DwellerKind,
        cell: CellCoord,
    },
    DwellerMoved {
        dweller: DwellerId,
        src: CellCoord,
        dst: CellCoord,
    },
    /// A production cycle completed.
    ProductReady {
        dweller: DwellerId,
        kind: DwellerKind,
    },
    /// A mid-cycle starve froze the cycle. Emitted on the transition only,
    /// not on every starved tick.
    ProductionPaused {
        dweller: DwellerId,
        kind: DwellerKind,
    },
    /// A crop was dropped onto an animal and consumed.
    ProductConsumed {
        producer: DwellerId,
        consumer: DwellerId,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::DwellerSpawned { .. } => "dweller_spawned",
            Event::DwellerMoved { .. } => "dweller_moved",
            Event::ProductReady { .. } => "product_ready",
            Event::ProductionPaused { .. } => "production_paused",
            Event::ProductConsumed { .. } => "product_consumed",
        }
    }
}

/// FIFO event buffer drained by the embedder.
#[derive(Debug, Default)]
pub struct Events {
    buf: Vec<Event>,
}

impl Events {
    pub fn push(&mut self, event: Event) {
        self.buf.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.buf.drain(..)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn some_id() -> DwellerId {
        let mut sm: SlotMap<DwellerId, ()> = SlotMap::with_key();
        sm.insert(())
    }

    #[test]
    fn drain_empties_in_push_order() {
        let id = some_id();
        let mut events = Events::default();
        events.push(Event::ProductReady {
            dweller: id,
            kind: DwellerKind::Chicken,
        });
        events.push(Event::ProductionPaused {
            dweller: id,
            kind: DwellerKind::Cow,
        });
        assert_eq!(events.len(), 2);

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(drained[0].kind(), "product_ready");
        assert_eq!(drained[1].kind(), "production_paused");
        assert!(events.is_empty());
    }
}
