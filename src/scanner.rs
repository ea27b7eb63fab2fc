//! Fleet scan: picks the most critical part of the tick.
//!
//! One pass over the parts, in caller order. Excluded parts are skipped, every
//! other part feeds the rate estimator and is scored. The highest finite index
//! wins; on ties the first part encountered is kept.

use crate::criticality::evaluate;
use crate::exclusion::{is_excluded, ExclusionConfig};
use crate::rate::RateEstimator;
use crate::types::{CriticalityResult, PartSnapshot};

/// Counters of the last scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Parts that were scored.
    pub considered: usize,
    /// Parts skipped by the exclusion list.
    pub excluded: usize,
    /// Scored parts dropped for a non-finite index.
    pub disqualified: usize,
    /// Rate states dropped because their part vanished.
    pub pruned: usize,
}

/// Stateless selector of the critical part.
///
/// All cross-tick state lives in the [`RateEstimator`] passed to [`scan`](Self::scan).
#[derive(Debug, Clone, Default)]
pub struct FleetScanner {
    last_stats: ScanStats,
}

impl FleetScanner {
    /// Creates a scanner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters of the most recent scan.
    #[must_use]
    pub fn last_stats(&self) -> ScanStats {
        self.last_stats
    }

    /// Scores every eligible part and returns the most critical one.
    ///
    /// Returns `None` when there are no parts, all are excluded, or none has a
    /// finite index.
    pub fn scan(
        &mut self,
        parts: &[PartSnapshot],
        exclusion: &ExclusionConfig,
        rates: &mut RateEstimator,
    ) -> Option<CriticalityResult> {
        let mut stats = ScanStats::default();
        let mut best: Option<CriticalityResult> = None;

        rates.begin_pass();
        for part in parts {
            if is_excluded(part, exclusion) {
                stats.excluded += 1;
                continue;
            }

            let sample = part.sample();
            let part_rates =
                rates.update(sample.entity_id, sample.timestamp, sample.core_temperature, sample.skin_temperature);
            let result = evaluate(&sample, part_rates);
            stats.considered += 1;

            if !result.is_finite() {
                stats.disqualified += 1;
                crate::warn!("scanner", "part {} has non-finite index {}, skipped", part.id, result.index);
                continue;
            }

            crate::trace!("scanner", "part {} index {:.4} ({})", part.id, result.index, result.side().label());
            if best.map_or(true, |b| result.index > b.index) {
                best = Some(result);
            }
        }
        stats.pruned = rates.end_pass();

        crate::debug!(
            "scanner",
            "considered={} excluded={} disqualified={} pruned={}",
            stats.considered,
            stats.excluded,
            stats.disqualified,
            stats.pruned
        );
        self.last_stats = stats;
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;

    fn part(id: u32, core: f64, skin: f64) -> PartSnapshot {
        PartSnapshot::new(EntityId(id), 0.0, (core, 1000.0), (skin, 1000.0))
    }

    #[test]
    fn test_empty_fleet() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();

        assert_eq!(scanner.scan(&[], &ExclusionConfig::new(), &mut rates), None);
        assert_eq!(scanner.last_stats(), ScanStats::default());
    }

    #[test]
    fn test_selects_maximum() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let parts = vec![part(1, 300.0, 100.0), part(2, 100.0, 700.0), part(3, 500.0, 200.0)];

        let best = scanner.scan(&parts, &ExclusionConfig::new(), &mut rates).unwrap();
        assert_eq!(best.entity_id, EntityId(2));
        assert!(best.is_skin_critical);
        assert_eq!(scanner.last_stats().considered, 3);
    }

    #[test]
    fn test_ties_keep_first() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let parts = vec![part(5, 600.0, 0.0), part(4, 600.0, 0.0), part(6, 0.0, 600.0)];

        let best = scanner.scan(&parts, &ExclusionConfig::new(), &mut rates).unwrap();
        assert_eq!(best.entity_id, EntityId(5));
    }

    #[test]
    fn test_excluded_parts_are_skipped() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let parts = vec![part(1, 900.0, 0.0).with_name("shield"), part(2, 300.0, 0.0)];
        let exclusion = ExclusionConfig::from_lists(true, "shield", "");

        let best = scanner.scan(&parts, &exclusion, &mut rates).unwrap();
        assert_eq!(best.entity_id, EntityId(2));
        assert_eq!(scanner.last_stats().excluded, 1);
        assert!(rates.rate(EntityId(1)).is_none());
    }

    #[test]
    fn test_all_excluded_is_none() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let parts = vec![part(1, 900.0, 0.0).with_module("ModuleAblator")];
        let exclusion = ExclusionConfig::from_lists(true, "", "ablator");

        assert_eq!(scanner.scan(&parts, &exclusion, &mut rates), None);
    }

    #[test]
    fn test_non_finite_index_is_disqualified() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let broken = PartSnapshot::new(EntityId(1), 0.0, (500.0, 0.0), (0.0, 1000.0));
        let parts = vec![broken, part(2, 100.0, 0.0)];

        let best = scanner.scan(&parts, &ExclusionConfig::new(), &mut rates).unwrap();
        assert_eq!(best.entity_id, EntityId(2));
        assert_eq!(scanner.last_stats().disqualified, 1);
    }

    #[test]
    fn test_only_non_finite_is_none() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let parts = vec![PartSnapshot::new(EntityId(1), 0.0, (0.0, 0.0), (0.0, 0.0))];

        assert_eq!(scanner.scan(&parts, &ExclusionConfig::new(), &mut rates), None);
    }

    #[test]
    fn test_rates_flow_into_result() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let exclusion = ExclusionConfig::new();

        let first = PartSnapshot::new(EntityId(1), 0.0, (300.0, 1000.0), (0.0, 1000.0));
        let second = PartSnapshot::new(EntityId(1), 1.0, (310.0, 1000.0), (0.0, 1000.0));

        assert_eq!(scanner.scan(&[first], &exclusion, &mut rates).unwrap().critical_rate, 0.0);
        assert_eq!(scanner.scan(&[second], &exclusion, &mut rates).unwrap().critical_rate, 2.5);
    }

    #[test]
    fn test_vanished_parts_are_pruned() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let exclusion = ExclusionConfig::new();

        scanner.scan(&[part(1, 1.0, 1.0), part(2, 1.0, 1.0)], &exclusion, &mut rates);
        scanner.scan(&[part(1, 1.0, 1.0)], &exclusion, &mut rates);

        assert_eq!(scanner.last_stats().pruned, 1);
        assert_eq!(rates.len(), 1);
    }

    #[test]
    fn test_repeated_scans_are_deterministic() {
        let mut scanner = FleetScanner::new();
        let mut rates = RateEstimator::new();
        let parts = vec![part(1, 400.0, 0.0), part(2, 400.0, 0.0), part(3, 100.0, 0.0)];

        let picks: Vec<EntityId> = (0..5)
            .filter_map(|_| scanner.scan(&parts, &ExclusionConfig::new(), &mut rates))
            .map(|r| r.entity_id)
            .collect();
        assert_eq!(picks, vec![EntityId(1); 5]);
    }
}
