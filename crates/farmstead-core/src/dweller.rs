//! The per-dweller production state machine.
//!
//! Every occupant runs one accumulate -> produce -> ready -> collect cycle,
//! driven by elapsed wall-clock seconds. Each dweller tracks its own last
//! observed timestamp: the first tick after a park or starve records the
//! new baseline without advancing progress, so resuming never applies a
//! stale elapsed-time jump.

use serde::{Deserialize, Serialize};

use crate::config::KindParams;
use crate::fixed::{Fixed64, Seconds, secs, to_f32};
use crate::id::SceneHandle;
use crate::indicator::Indicator;
use crate::services::Counter;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// The closed set of placeable kinds. Compared by value everywhere; there
/// is no runtime type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DwellerKind {
    Corn,
    Chicken,
    Cow,
}

impl DwellerKind {
    pub const ALL: [DwellerKind; 3] = [DwellerKind::Corn, DwellerKind::Chicken, DwellerKind::Cow];

    /// Consumer kinds this producer's product may be delivered to. Empty
    /// for kinds whose products leave the board through counters instead.
    pub fn feeds(self) -> &'static [DwellerKind] {
        match self {
            DwellerKind::Corn => &[DwellerKind::Chicken, DwellerKind::Cow],
            DwellerKind::Chicken | DwellerKind::Cow => &[],
        }
    }

    /// Whether this kind consumes a finite resource refilled by deliveries.
    pub fn is_animal(self) -> bool {
        matches!(self, DwellerKind::Chicken | DwellerKind::Cow)
    }

    /// The external tally incremented when a unit completes, if any.
    pub fn tally(self) -> Option<Counter> {
        match self {
            DwellerKind::Chicken => Some(Counter::Eggs),
            DwellerKind::Cow => Some(Counter::Milk),
            DwellerKind::Corn => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DwellerKind::Corn => "corn",
            DwellerKind::Chicken => "chicken",
            DwellerKind::Cow => "cow",
        }
    }

    pub fn from_name(name: &str) -> Option<DwellerKind> {
        DwellerKind::ALL.into_iter().find(|k| k.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Resource and limits
// ---------------------------------------------------------------------------

/// Fuel driving production. Animals burn a finite reserve refilled by
/// deliveries; crops never run out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resource {
    Infinite,
    Finite(Seconds),
}

impl Resource {
    pub fn has_fuel(&self) -> bool {
        match self {
            Resource::Infinite => true,
            Resource::Finite(v) => *v > Seconds::ZERO,
        }
    }

    /// Consume elapsed time, floored at zero.
    fn drain(&mut self, delta: Seconds) {
        if let Resource::Finite(v) = self {
            *v = (*v - delta).max(Seconds::ZERO);
        }
    }

    /// Add fuel. Deliberately unclamped: deliveries may exceed one cycle's
    /// consumption, building a backlog.
    fn add(&mut self, amount: Seconds) {
        if let Resource::Finite(v) = self {
            *v += amount;
        }
    }
}

/// How many ready units may pile up before the cycle parks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionLimit {
    Unbounded,
    AtMost(u32),
}

impl ProductionLimit {
    fn reached(&self, ready: u32) -> bool {
        match self {
            ProductionLimit::Unbounded => false,
            ProductionLimit::AtMost(n) => ready >= *n,
        }
    }
}

/// Ready units and the in-flight cycle fraction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Products {
    pub ready: u32,
    pub progress: Fixed64,
}

// ---------------------------------------------------------------------------
// Tick outcome
// ---------------------------------------------------------------------------

/// What a single update did, routed by the world to indicators, counters,
/// and the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSignal {
    /// Ready units at the limit; cycle not advancing.
    Parked,
    /// First observed tick after a park/starve: baseline recorded, no
    /// progress applied, display unchanged.
    Baseline,
    /// Cycle advancing; indicator shows the arc.
    Producing { progress: Fixed64 },
    /// A unit completed; ready incremented, progress reset.
    Ready,
    /// Starved mid-cycle; indicator frozen in the neutral color.
    Paused,
    /// Starved with a barely-started cycle; indicator hidden.
    Hidden,
}

// ---------------------------------------------------------------------------
// Dweller
// ---------------------------------------------------------------------------

/// Visual footprint scale of a growing crop: 30% when freshly planted,
/// full size at completion.
pub fn growth_scale(progress: Fixed64) -> f32 {
    0.3 + 0.7 * to_f32(progress)
}

/// A placeable, simulated entity bound to exactly one cell.
///
/// Owns its scene model handle and its indicator; both are created with the
/// dweller and live for the process lifetime (no removal in scope).
#[derive(Debug, Clone)]
pub struct Dweller {
    kind: DwellerKind,
    resource: Resource,
    limit: ProductionLimit,
    products: Products,
    params: KindParams,
    /// Timestamp of the last tick that advanced the cycle. `None` after a
    /// park or starve so the next fueled tick only records a baseline.
    last_seen: Option<Seconds>,
    model: SceneHandle,
    indicator: Indicator,
}

impl Dweller {
    pub fn new(kind: DwellerKind, params: KindParams, model: SceneHandle, indicator: Indicator) -> Self {
        let (resource, limit) = if kind.is_animal() {
            // Animals start hungry and never park: every completed unit
            // goes straight to an external tally.
            (Resource::Finite(Seconds::ZERO), ProductionLimit::Unbounded)
        } else {
            // Crops grow from sunlight but hold at most one ready unit.
            (Resource::Infinite, ProductionLimit::AtMost(1))
        };
        Self {
            kind,
            resource,
            limit,
            products: Products::default(),
            params,
            last_seen: None,
            model,
            indicator,
        }
    }

    pub fn kind(&self) -> DwellerKind {
        self.kind
    }

    pub fn products(&self) -> Products {
        self.products
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn model(&self) -> SceneHandle {
        self.model
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut Indicator {
        &mut self.indicator
    }

    pub fn sell_price(&self) -> u32 {
        self.params.sell_price
    }

    /// Add this dweller's configured refill amount to its resource.
    pub fn refill(&mut self) {
        self.resource.add(self.params.refill_add);
    }

    /// Remove one ready unit, if there is one.
    pub fn take_ready(&mut self) -> bool {
        if self.products.ready > 0 {
            self.products.ready -= 1;
            true
        } else {
            false
        }
    }

    /// Advance the cycle to the monotonic timestamp `now`.
    pub fn update(&mut self, now: Seconds) -> ProductSignal {
        if self.limit.reached(self.products.ready) {
            self.last_seen = None;
            return ProductSignal::Parked;
        }

        if self.resource.has_fuel() {
            let signal = match self.last_seen {
                Some(prev) => {
                    // Clamped defensively: the clock is nondecreasing, but
                    // progress must never run backwards.
                    let delta = (now - prev).max(Seconds::ZERO);
                    self.resource.drain(delta);
                    self.products.progress += delta / self.params.production_cost;

                    if self.products.progress >= secs(1.0) {
                        self.complete_unit();
                        ProductSignal::Ready
                    } else {
                        ProductSignal::Producing {
                            progress: self.products.progress,
                        }
                    }
                }
                None => ProductSignal::Baseline,
            };
            self.last_seen = Some(now);
            signal
        } else {
            // Starved. No baseline kept: the next delivery starts clean.
            self.last_seen = None;
            if self.products.progress > self.params.thresholds.ready_grace {
                self.complete_unit();
                ProductSignal::Ready
            } else if self.products.progress > self.params.thresholds.pause_visible {
                ProductSignal::Paused
            } else {
                ProductSignal::Hidden
            }
        }
    }

    fn complete_unit(&mut self) {
        self.products.ready += 1;
        self.products.progress = Fixed64::ZERO;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::indicator::IndicatorStyle;

    fn style() -> IndicatorStyle {
        IndicatorStyle {
            elevation: 4.3,
            radius: 0.55,
            width: 0.2,
            opacity: 0.5,
            color: 0x0136F3,
            segments: 32,
        }
    }

    fn params(cost: f64, refill: f64) -> KindParams {
        KindParams {
            production_cost: secs(cost),
            refill_add: secs(refill),
            sell_price: 0,
            thresholds: Thresholds::default(),
        }
    }

    fn corn(cost: f64) -> Dweller {
        Dweller::new(
            DwellerKind::Corn,
            params(cost, 0.0),
            SceneHandle(0),
            Indicator::new(SceneHandle(1), style()),
        )
    }

    fn chicken(cost: f64, refill: f64) -> Dweller {
        Dweller::new(
            DwellerKind::Chicken,
            params(cost, refill),
            SceneHandle(0),
            Indicator::new(SceneHandle(1), style()),
        )
    }

    // -----------------------------------------------------------------------
    // Kinds
    // -----------------------------------------------------------------------

    #[test]
    fn corn_feeds_animals_only() {
        assert_eq!(
            DwellerKind::Corn.feeds(),
            &[DwellerKind::Chicken, DwellerKind::Cow]
        );
        assert!(DwellerKind::Chicken.feeds().is_empty());
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in DwellerKind::ALL {
            assert_eq!(DwellerKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(DwellerKind::from_name("goat"), None);
    }

    #[test]
    fn tallies_map_to_counters() {
        assert_eq!(DwellerKind::Chicken.tally(), Some(Counter::Eggs));
        assert_eq!(DwellerKind::Cow.tally(), Some(Counter::Milk));
        assert_eq!(DwellerKind::Corn.tally(), None);
    }

    // -----------------------------------------------------------------------
    // Fueled production
    // -----------------------------------------------------------------------

    #[test]
    fn first_tick_records_baseline_only() {
        let mut d = corn(10.0);
        assert_eq!(d.update(secs(5.0)), ProductSignal::Baseline);
        assert_eq!(d.products().progress, Fixed64::ZERO);
    }

    #[test]
    fn progress_accumulates_and_completes() {
        // Dyadic cost: every per-tick quotient is exactly representable.
        let mut d = corn(8.0);
        d.update(secs(0.0));

        // 1-second ticks: progress 1/8, 2/8, ... 7/8, then complete.
        for i in 1..8 {
            let signal = d.update(secs(i as f64));
            let expected = secs(i as f64) / secs(8.0);
            assert_eq!(signal, ProductSignal::Producing { progress: expected });
        }

        assert_eq!(d.update(secs(8.0)), ProductSignal::Ready);
        assert_eq!(d.products().ready, 1);
        assert_eq!(d.products().progress, Fixed64::ZERO);
    }

    #[test]
    fn progress_strictly_increases_and_stays_below_one() {
        let mut d = corn(7.0);
        d.update(secs(0.0));

        let mut prev = Fixed64::ZERO;
        let mut t = secs(0.0);
        loop {
            t += secs(0.25);
            match d.update(t) {
                ProductSignal::Producing { progress } => {
                    assert!(progress > prev);
                    assert!(progress < secs(1.0));
                    prev = progress;
                }
                ProductSignal::Ready => break,
                other => panic!("unexpected signal {other:?}"),
            }
        }
    }

    #[test]
    fn corn_parks_at_one_ready_unit() {
        let mut d = corn(1.0);
        d.update(secs(0.0));
        assert_eq!(d.update(secs(1.0)), ProductSignal::Ready);

        // Parked: no progress while the unit is uncollected.
        assert_eq!(d.update(secs(2.0)), ProductSignal::Parked);
        assert_eq!(d.update(secs(50.0)), ProductSignal::Parked);
        assert_eq!(d.products().ready, 1);

        // Collecting un-parks, and the first tick after is a baseline, so
        // the next cycle takes a full second despite the 48-second park.
        assert!(d.take_ready());
        assert_eq!(d.update(secs(51.0)), ProductSignal::Baseline);
        assert_eq!(d.update(secs(52.0)), ProductSignal::Ready);
        assert_eq!(d.products().ready, 1);
    }

    #[test]
    fn chicken_never_parks() {
        let mut d = chicken(1.0, 10.0);
        d.refill();
        d.update(secs(0.0));
        for i in 1..=5 {
            assert_eq!(d.update(secs(i as f64)), ProductSignal::Ready);
        }
        assert_eq!(d.products().ready, 5);
    }

    // -----------------------------------------------------------------------
    // Starvation
    // -----------------------------------------------------------------------

    #[test]
    fn unfed_animal_hides_indicator() {
        let mut d = chicken(10.0, 30.0);
        assert_eq!(d.update(secs(0.0)), ProductSignal::Hidden);
    }

    #[test]
    fn starved_mid_cycle_pauses() {
        // Refill 3 seconds of fuel against an 8-second cycle.
        let mut d = chicken(8.0, 3.0);
        d.refill();
        d.update(secs(0.0));
        for i in 1..=3 {
            d.update(secs(i as f64));
        }
        // Fuel exhausted at progress 3/8.
        assert!(!d.resource().has_fuel());
        assert_eq!(d.update(secs(4.0)), ProductSignal::Paused);
        assert_eq!(d.products().progress, secs(3.0) / secs(8.0));
    }

    #[test]
    fn resume_after_starve_does_not_jump() {
        let mut d = chicken(10.0, 5.0);
        d.refill();
        d.update(secs(0.0));
        for i in 1..=5 {
            d.update(secs(i as f64));
        }
        assert_eq!(d.update(secs(6.0)), ProductSignal::Paused);
        let frozen = d.products().progress;

        // Refill much later: the first tick only re-baselines.
        d.refill();
        assert_eq!(d.update(secs(100.0)), ProductSignal::Baseline);
        assert_eq!(d.products().progress, frozen);

        // The next tick advances by one second, not by the 94-second gap.
        let signal = d.update(secs(101.0));
        let expected = frozen + secs(1.0) / secs(10.0);
        assert_eq!(signal, ProductSignal::Producing { progress: expected });
    }

    #[test]
    fn near_complete_cycle_finishes_without_fuel() {
        let mut d = chicken(10.0, 9.6);
        d.refill();
        d.update(secs(0.0));
        // Burn all 9.6 seconds of fuel in 0.8-second ticks.
        for i in 1..=12 {
            d.update(secs(i as f64 * 0.8));
        }
        assert!(!d.resource().has_fuel());
        assert!(d.products().progress > secs(0.95));

        assert_eq!(d.update(secs(20.0)), ProductSignal::Ready);
        assert_eq!(d.products().ready, 1);
    }

    #[test]
    fn barely_started_cycle_hides_instead_of_pausing() {
        let mut d = chicken(100.0, 4.0);
        d.refill();
        d.update(secs(0.0));
        d.update(secs(4.0));
        // Progress 0.04 < pause threshold; fuel gone.
        assert_eq!(d.update(secs(5.0)), ProductSignal::Hidden);
    }

    // -----------------------------------------------------------------------
    // Resource semantics
    // -----------------------------------------------------------------------

    #[test]
    fn resource_floors_at_zero() {
        let mut d = chicken(100.0, 2.0);
        d.refill();
        d.update(secs(0.0));
        // A 50-second gap drains far more than the 2 seconds available.
        d.update(secs(50.0));
        assert_eq!(d.resource(), Resource::Finite(Seconds::ZERO));
    }

    #[test]
    fn refill_is_unclamped() {
        let mut d = chicken(10.0, 30.0);
        d.refill();
        d.refill();
        d.refill();
        assert_eq!(d.resource(), Resource::Finite(secs(90.0)));
    }

    #[test]
    fn growth_scale_spans_configured_range() {
        assert!((growth_scale(Fixed64::ZERO) - 0.3).abs() < 1e-6);
        assert!((growth_scale(secs(0.5)) - 0.65).abs() < 1e-6);
        assert!((growth_scale(secs(1.0)) - 1.0).abs() < 1e-6);
    }
}
