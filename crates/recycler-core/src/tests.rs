#[cfg(test)]
mod tests {
    use crate::*;
    use web_time::{Duration, Instant};

    fn ids<'a>(it: impl Iterator<Item = &'a Record>) -> Vec<i64> {
        it.map(|r| r.id.0).collect()
    }

    #[test]
    fn test_synthetic_traversal_skips_invalid() {
        let src = OrderedSource::synthetic(100);
        assert_eq!(src.len(), 100);
        assert_eq!(src.next(0).map(|r| r.id), Some(ItemId(2)));
        assert_eq!(src.previous(2).map(|r| r.id), Some(ItemId(0)));
        assert_eq!(src.next(1).map(|r| r.id), Some(ItemId(2)));
        assert!(src.previous(0).is_none());
        assert!(src.next(98).is_none());
        assert_eq!(src.last_valid().map(|r| r.id), Some(ItemId(98)));
        assert_eq!(src.first_valid().map(|r| r.id), Some(ItemId(0)));
    }

    #[test]
    fn test_traversal_from_absent_id() {
        let src: OrderedSource = [0, 10, 20].into_iter().map(Record::new).collect();
        assert_eq!(src.next(5).map(|r| r.id), Some(ItemId(10)));
        assert_eq!(src.previous(5).map(|r| r.id), Some(ItemId(0)));
        assert_eq!(src.next(-100).map(|r| r.id), Some(ItemId(0)));
        assert_eq!(src.previous(100).map(|r| r.id), Some(ItemId(20)));
    }

    #[test]
    fn test_add_keeps_order_and_replaces() {
        let mut src = OrderedSource::new();
        src.add(Record::new(5));
        src.add(Record::new(-3));
        src.add(Record::new(1));
        assert_eq!(ids(src.all().iter()), vec![-3, 1, 5]);

        src.add(Record::invalid(1));
        assert_eq!(src.len(), 3);
        assert!(!src.get(1).unwrap().valid);
        assert_eq!(src.next(-3).map(|r| r.id), Some(ItemId(5)));
    }

    #[test]
    fn test_remove() {
        let mut src = OrderedSource::synthetic(6);
        let removed = src.remove(2).unwrap();
        assert_eq!(removed.id, ItemId(2));
        assert_eq!(src.next(0).map(|r| r.id), Some(ItemId(4)));
        // walking from the removed id still works
        assert_eq!(src.next(2).map(|r| r.id), Some(ItemId(4)));
        assert_eq!(src.remove(2), Err(SourceError::UnknownId(ItemId(2))));
    }

    #[test]
    fn test_modify_resorts_on_id_change() {
        let mut src: OrderedSource = (0..4).map(Record::new).collect();
        let r = src.modify(0, &RecordPatch::new().id(10)).unwrap();
        assert_eq!(r.id, ItemId(10));
        assert_eq!(ids(src.all().iter()), vec![1, 2, 3, 10]);
        assert!(src.get(0).is_none());
        assert_eq!(src.next(3).map(|r| r.id), Some(ItemId(10)));
    }

    #[test]
    fn test_modify_rejects_duplicate_id() {
        let mut src: OrderedSource = (0..4).map(Record::new).collect();
        let err = src.modify(0, &RecordPatch::new().id(3)).unwrap_err();
        assert_eq!(err, SourceError::DuplicateId(ItemId(3)));
        assert_eq!(ids(src.all().iter()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_modify_can_invalidate() {
        let mut src: OrderedSource = (0..3).map(Record::new).collect();
        src.modify(1, &RecordPatch::new().valid(false).height(Some(12.0)))
            .unwrap();
        assert_eq!(src.next(0).map(|r| r.id), Some(ItemId(2)));
        assert_eq!(src.get(1).unwrap().height, Some(12.0));
        assert_eq!(ids(src.valid()), vec![0, 2]);
    }

    #[test]
    fn test_span_ops() {
        let s = Span::centered(0.0, 40.0);
        assert_eq!(s, Span::new(20.0, -20.0));
        assert_eq!(s.height(), 40.0);
        assert!(s.contains(20.0));
        assert!(s.intersects(&Span::new(60.0, 20.0)));
        assert!(!s.intersects(&Span::new(60.0, 20.5)));
        assert_eq!(s.expand(5.0), Span::new(25.0, -25.0));
    }

    #[test]
    fn test_extent_grow_and_shrink() {
        let mut e = Extent::new(-100.0);
        assert!(e.is_empty());
        e.grow_top(40.0);
        e.grow_bottom(10.0);
        assert_eq!((e.top(), e.bottom()), (-60.0, -110.0));
        assert_eq!(e.height(), 50.0);
        e.shrink_bottom(10.0);
        e.shrink_top(40.0);
        assert!(e.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "extent inverted")]
    fn test_extent_inversion_is_fatal() {
        let mut e = Extent::new(0.0);
        e.shrink_top(10.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(ListConfig::default().validate().is_ok());
        assert_eq!(
            ListConfig::default()
                .with_keep_alive_margin(-1.0)
                .validate(),
            Err(ConfigError::InvalidKeepAlive(-1.0))
        );
        assert_eq!(
            ListConfig::default().with_nav_step(0.0).validate(),
            Err(ConfigError::InvalidStep(0.0))
        );
        assert_eq!(
            ListConfig::default()
                .with_nav_interval(Duration::ZERO)
                .validate(),
            Err(ConfigError::InvalidInterval)
        );
        assert_eq!(
            ListConfig::default()
                .with_max_scroll_materializations(0)
                .validate(),
            Err(ConfigError::InvalidBudget)
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_config_json_partial() {
        let cfg: ListConfig = serde_json::from_str(r#"{ "nav_step": 48.0 }"#).unwrap();
        assert_eq!(cfg.nav_step, 48.0);
        assert_eq!(cfg.keep_alive_margin, ListConfig::default().keep_alive_margin);
    }

    #[test]
    fn test_manual_clock_is_shared() {
        let t0 = Instant::now();
        let clock = ManualClock::new(t0);
        let other = clock.clone();
        clock.advance(Duration::from_millis(250));
        assert_eq!(other.now(), t0 + Duration::from_millis(250));
    }
}
