//! Unit tests for mp-place.

#[cfg(test)]
mod place {
    use mp_core::{AgentId, CoreError, PlaceId};

    use crate::{Place, PlaceCategory};

    #[test]
    fn contamination_never_negative() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::HOME);
        p.increase_contamination(0.5);
        p.increase_contamination(-2.0);
        assert_eq!(p.contamination(), 0.0);
    }

    #[test]
    fn decays_only_when_cleaning() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::WORK);
        p.increase_contamination(1.0);
        p.update_contamination(1.0);
        assert_eq!(p.contamination(), 1.0);

        p.set_clean_every_step(true);
        let mut last = p.contamination();
        for _ in 0..10 {
            p.update_contamination(1.0);
            assert!(p.contamination() < last);
            last = p.contamination();
        }
        assert!((last - (-10.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn decay_scales_with_step_length() {
        let mut a = Place::new(PlaceId(0), PlaceCategory::GENERIC);
        let mut b = Place::new(PlaceId(1), PlaceCategory::GENERIC);
        for p in [&mut a, &mut b] {
            p.set_clean_every_step(true);
            p.set_fractional_decrement(0.5).unwrap();
            p.increase_contamination(2.0);
        }
        a.update_contamination(1.0);
        for _ in 0..4 {
            b.update_contamination(0.25);
        }
        assert!((a.contamination() - b.contamination()).abs() < 1e-12);
    }

    #[test]
    fn clean_resets() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::TRANSPORT);
        p.increase_contamination(3.0);
        p.clean();
        assert_eq!(p.contamination(), 0.0);
    }

    #[test]
    fn rejects_bad_decrement() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::HOME);
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                p.set_fractional_decrement(bad),
                Err(CoreError::InvalidParameter { .. })
            ));
        }
        assert_eq!(p.fractional_decrement(), 1.0);
    }

    #[test]
    fn show_does_not_mutate() {
        let mut p = Place::new(PlaceId(3), PlaceCategory::HOME);
        p.increase_contamination(0.25);
        p.insert(AgentId(2));
        p.insert(AgentId(1));
        let brief = p.show(false);
        assert_eq!(brief.occupant_count, 2);
        assert_eq!(brief.occupants, None);
        let full = p.show(true);
        assert_eq!(full.occupants, Some(vec![AgentId(1), AgentId(2)]));
        assert_eq!(full.contamination, 0.25);
        assert_eq!(p.occupant_count(), 2);
        assert!(full.to_string().starts_with("PlaceId(3) [home] occupants=2"));
    }

    #[test]
    fn category_labels() {
        assert_eq!(PlaceCategory::WORK.to_string(), "work");
        assert_eq!(PlaceCategory(42).to_string(), "category-42");
    }
}

#[cfg(test)]
mod store {
    use mp_core::{AgentId, PlaceId};

    use crate::{PlaceCategory, PlaceError, PlaceStore};

    fn two_places() -> PlaceStore {
        let mut s = PlaceStore::new();
        s.add(PlaceCategory::HOME);
        s.add(PlaceCategory::WORK);
        s
    }

    #[test]
    fn ids_are_dense() {
        let mut s = PlaceStore::new();
        assert_eq!(s.add(PlaceCategory::HOME), PlaceId(0));
        assert_eq!(s.add(PlaceCategory::HOME), PlaceId(1));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn relocate_moves_between_sets() {
        let mut s = two_places();
        let a = AgentId(0);
        s.relocate(a, PlaceId::INVALID, PlaceId(0)).unwrap();
        assert!(s.get(PlaceId(0)).unwrap().contains(a));
        s.relocate(a, PlaceId(0), PlaceId(1)).unwrap();
        assert!(!s.get(PlaceId(0)).unwrap().contains(a));
        assert!(s.get(PlaceId(1)).unwrap().contains(a));
        assert_eq!(s.total_occupants(), 1);
    }

    #[test]
    fn relocate_validates_before_mutating() {
        let mut s = two_places();
        let a = AgentId(0);
        s.relocate(a, PlaceId::INVALID, PlaceId(0)).unwrap();
        assert!(matches!(
            s.relocate(a, PlaceId(0), PlaceId(7)),
            Err(PlaceError::UnknownPlace(PlaceId(7)))
        ));
        assert!(matches!(
            s.relocate(a, PlaceId(1), PlaceId(0)),
            Err(PlaceError::NotAnOccupant { .. })
        ));
        assert!(s.get(PlaceId(0)).unwrap().contains(a));
        assert_eq!(s.total_occupants(), 1);
    }

    #[test]
    fn relocate_to_same_place_is_noop() {
        let mut s = two_places();
        s.relocate(AgentId(4), PlaceId::INVALID, PlaceId(1)).unwrap();
        s.relocate(AgentId(4), PlaceId(1), PlaceId(1)).unwrap();
        assert_eq!(s.get(PlaceId(1)).unwrap().occupant_count(), 1);
    }

    #[test]
    fn bulk_settings_apply_to_all() {
        let mut s = two_places();
        s.set_clean_every_step(true);
        s.set_fractional_decrement(0.0).unwrap();
        assert!(s.set_fractional_decrement(-1.0).is_err());
        for p in s.iter_mut() {
            p.increase_contamination(1.0);
        }
        s.update_contamination(1.0);
        assert_eq!(s.total_contamination(), 2.0);
        s.clean_all();
        assert_eq!(s.total_contamination(), 0.0);
    }

    #[test]
    fn snapshots_in_id_order() {
        let s = two_places();
        let snaps = s.snapshots(false);
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[1].id, PlaceId(1));
        assert_eq!(snaps[1].category, PlaceCategory::WORK);
    }
}
