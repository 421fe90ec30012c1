// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory marker list with write-through persistence.
//!
//! The store is the single source of truth for what the map renders. Every
//! mutation is written to the persistence adapter before it returns; when
//! the write fails the mutation is undone, so the list in memory always
//! equals the last list successfully stored.

use super::persistence::{KeyValueStore, MarkerPersistence};
use crate::models::marker::{Marker, MarkerId, Pin};
use anyhow::Result;

/// Ordered list of pins backed by a [`MarkerPersistence`].
#[derive(Debug)]
pub struct MarkerStore<S> {
    pins: Vec<Pin>,
    persistence: MarkerPersistence<S>,
    next_id: u64,
}

impl<S: KeyValueStore> MarkerStore<S> {
    /// Create the store from whatever the adapter holds. Never fails.
    pub fn load_initial(persistence: MarkerPersistence<S>) -> Self {
        let mut store = Self {
            pins: Vec::new(),
            persistence,
            next_id: 0,
        };
        let markers = store.persistence.load();
        let pins: Vec<Pin> = markers.into_iter().map(|m| store.pin(m)).collect();
        store.pins = pins;
        store
    }

    fn pin(&mut self, marker: Marker) -> Pin {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        Pin { id, marker }
    }

    /// Current pins in display order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Current markers in display order.
    pub fn markers(&self) -> Vec<Marker> {
        self.pins.iter().map(|p| p.marker.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Position of a pin in the list.
    pub fn index_of(&self, id: MarkerId) -> Option<usize> {
        self.pins.iter().position(|p| p.id == id)
    }

    #[cfg(test)]
    pub fn persistence(&self) -> &MarkerPersistence<S> {
        &self.persistence
    }

    #[cfg(test)]
    pub fn persistence_mut(&mut self) -> &mut MarkerPersistence<S> {
        &mut self.persistence
    }

    fn write_through(&mut self) -> Result<()> {
        let markers = self.markers();
        self.persistence.save(&markers)
    }

    /// Append a marker.
    ///
    /// The label is trimmed; an empty label creates nothing and returns
    /// `Ok(None)`.
    pub fn add(&mut self, longitude: f64, latitude: f64, label: &str) -> Result<Option<MarkerId>> {
        let label = label.trim();
        if label.is_empty() {
            log::debug!("Discarding marker without a label");
            return Ok(None);
        }

        let pin = self.pin(Marker::new(longitude, latitude, label));
        let id = pin.id;
        self.pins.push(pin);

        if let Err(e) = self.write_through() {
            self.pins.pop();
            return Err(e);
        }

        log::info!("Added marker '{}', total: {}", label, self.pins.len());
        Ok(Some(id))
    }

    /// Remove the marker at `index`. Out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<Pin>> {
        if index >= self.pins.len() {
            log::debug!("Ignoring removal of index {} (len {})", index, self.pins.len());
            return Ok(None);
        }

        let pin = self.pins.remove(index);
        if let Err(e) = self.write_through() {
            self.pins.insert(index, pin);
            return Err(e);
        }

        log::info!("Removed marker '{}', total: {}", pin.marker.label, self.pins.len());
        Ok(Some(pin))
    }

    /// Remove the marker with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: MarkerId) -> Result<Option<Pin>> {
        match self.index_of(id) {
            Some(index) => self.remove_at(index),
            None => Ok(None),
        }
    }

    /// Replace the whole list, e.g. after an import.
    pub fn replace_all(&mut self, markers: Vec<Marker>) -> Result<()> {
        let pins: Vec<Pin> = markers.into_iter().map(|m| self.pin(m)).collect();
        let previous = std::mem::replace(&mut self.pins, pins);

        if let Err(e) = self.write_through() {
            self.pins = previous;
            return Err(e);
        }

        log::info!("Replaced markers, total: {}", self.pins.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persistence::MemoryStore;

    const SLOT: &str = "markers";

    fn empty_store() -> MarkerStore<MemoryStore> {
        MarkerStore::load_initial(MarkerPersistence::new(MemoryStore::new(), SLOT))
    }

    fn stored(store: &MarkerStore<MemoryStore>) -> Vec<Marker> {
        let text = store.persistence().backend().slot(SLOT).unwrap_or("[]");
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_load_initial_reads_existing_markers() {
        let backend = MemoryStore::new()
            .with_slot(SLOT, r#"[{"longitude": 1.0, "latitude": 2.0, "label": "A"}]"#);
        let store = MarkerStore::load_initial(MarkerPersistence::new(backend, SLOT));

        assert_eq!(store.markers(), vec![Marker::new(1.0, 2.0, "A")]);
    }

    #[test]
    fn test_write_through_after_every_mutation() {
        let mut store = empty_store();

        store.add(1.0, 1.0, "a").unwrap();
        assert_eq!(store.markers(), stored(&store));
        store.add(2.0, 2.0, "b").unwrap();
        assert_eq!(store.markers(), stored(&store));
        store.add(3.0, 3.0, "c").unwrap();
        assert_eq!(store.markers(), stored(&store));
        store.remove_at(1).unwrap();
        assert_eq!(store.markers(), stored(&store));
        store.remove_at(0).unwrap();
        assert_eq!(store.markers(), stored(&store));
        store.add(4.0, 4.0, "d").unwrap();
        assert_eq!(store.markers(), stored(&store));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_generated_sequences_keep_memory_and_storage_equal() {
        for seed in 1..=32u64 {
            let mut state = seed;
            let mut next = move || {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                state >> 33
            };

            let mut store = empty_store();
            for step in 0..64 {
                let roll = next();
                if roll % 3 == 0 {
                    // Sometimes out of range on purpose
                    let index = (next() as usize) % (store.len() + 2);
                    store.remove_at(index).unwrap();
                } else {
                    let label = if roll % 7 == 0 {
                        String::from("  ")
                    } else {
                        format!("p{}", step)
                    };
                    let lng = (next() % 360) as f64 - 180.0;
                    let lat = (next() % 170) as f64 - 85.0;
                    store.add(lng, lat, &label).unwrap();
                }
                assert_eq!(store.markers(), stored(&store), "seed {} step {}", seed, step);
            }
        }
    }

    #[test]
    fn test_add_with_empty_label_is_noop() {
        let mut store = empty_store();
        store.add(1.0, 1.0, "kept").unwrap();

        assert_eq!(store.add(5.0, 5.0, "").unwrap(), None);
        assert_eq!(store.add(5.0, 5.0, "   ").unwrap(), None);
        assert_eq!(store.len(), 1);
        assert_eq!(stored(&store).len(), 1);
    }

    #[test]
    fn test_add_trims_label() {
        let mut store = empty_store();
        store.add(1.0, 1.0, "  Home \n").unwrap();
        assert_eq!(store.markers()[0].label, "Home");
    }

    #[test]
    fn test_remove_at_preserves_order() {
        let mut store = empty_store();
        for label in ["a", "b", "c", "d"] {
            store.add(0.0, 0.0, label).unwrap();
        }

        let removed = store.remove_at(1).unwrap().unwrap();
        assert_eq!(removed.marker.label, "b");

        let labels: Vec<String> = store.markers().into_iter().map(|m| m.label).collect();
        assert_eq!(labels, ["a", "c", "d"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut store = empty_store();
        store.add(0.0, 0.0, "only").unwrap();

        assert!(store.remove_at(1).unwrap().is_none());
        assert!(store.remove_at(usize::MAX).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_by_id_survives_earlier_removals() {
        let mut store = empty_store();
        let a = store.add(0.0, 0.0, "a").unwrap().unwrap();
        let b = store.add(0.0, 0.0, "b").unwrap().unwrap();
        let c = store.add(0.0, 0.0, "c").unwrap().unwrap();

        store.remove(a).unwrap();
        let removed = store.remove(c).unwrap().unwrap();
        assert_eq!(removed.marker.label, "c");
        assert_eq!(store.pins()[0].id, b);
        assert!(store.remove(a).unwrap().is_none());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = empty_store();
        store.add(0.0, 0.0, "a").unwrap();
        store.persistence_mut().backend_mut().fail_writes(true);

        assert!(store.add(1.0, 1.0, "b").is_err());
        assert!(store.remove_at(0).is_err());
        assert!(store.replace_all(Vec::new()).is_err());

        assert_eq!(store.markers(), vec![Marker::new(0.0, 0.0, "a")]);
        assert_eq!(store.markers(), stored(&store));
    }

    #[test]
    fn test_replace_all_writes_through() {
        let mut store = empty_store();
        store.add(0.0, 0.0, "old").unwrap();

        let imported = vec![Marker::new(1.0, 2.0, "x"), Marker::new(3.0, 4.0, "y")];
        store.replace_all(imported.clone()).unwrap();

        assert_eq!(store.markers(), imported);
        assert_eq!(stored(&store), imported);
    }
}
