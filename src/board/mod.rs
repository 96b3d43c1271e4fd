//! In-memory board state: the ordered listing collection, the search filter
//! and the per-column views derived from them.

pub mod drag;
pub mod form;

pub use drag::DragState;
pub use form::ListingForm;

use crate::models::{Column, House, MediaItem, Status, COLUMNS};
use tracing::debug;

/// Listings of one column after filtering
#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    pub column: &'static Column,
    pub houses: Vec<&'a House>,
}

impl ColumnView<'_> {
    pub fn count(&self) -> usize {
        self.houses.len()
    }
}

/// Board state container
///
/// Every derived view is recomputed from the full collection; there is no
/// index to keep in sync.
#[derive(Debug, Clone, Default)]
pub struct Board {
    houses: Vec<House>,
    query: String,
    drag: DragState,
}

impl Board {
    pub fn new(houses: Vec<House>) -> Self {
        Self {
            houses,
            query: String::new(),
            drag: DragState::default(),
        }
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&House> {
        self.houses.iter().find(|h| h.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// New listings go to the front of the collection
    /// Returns false, leaving the board untouched, when the id is taken
    pub fn add(&mut self, house: House) -> bool {
        if self.contains(&house.id) {
            return false;
        }
        debug!("Adding listing {}", house.id);
        self.houses.insert(0, house);
        true
    }

    /// Replace the listing with the same id. Returns false when absent.
    pub fn update(&mut self, house: House) -> bool {
        match self.houses.iter_mut().find(|h| h.id == house.id) {
            Some(slot) => {
                *slot = house;
                true
            }
            None => false,
        }
    }

    /// Change only the status field of a listing
    pub fn move_house(&mut self, id: &str, status: Status) -> bool {
        match self.houses.iter_mut().find(|h| h.id == id) {
            Some(house) => {
                debug!("Moving listing {} from {} to {}", id, house.status, status);
                house.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove a listing by id, returning it when it was present
    pub fn remove(&mut self, id: &str) -> Option<House> {
        let pos = self.houses.iter().position(|h| h.id == id)?;
        if self.drag.dragged() == Some(id) {
            self.drag.cancel();
        }
        Some(self.houses.remove(pos))
    }

    /// Swap a listing's id for one assigned by the store.
    /// Refuses an id another listing already has.
    pub fn rekey(&mut self, old_id: &str, new_id: &str) -> bool {
        if old_id != new_id && self.contains(new_id) {
            return false;
        }
        match self.houses.iter_mut().find(|h| h.id == old_id) {
            Some(house) => {
                house.id = new_id.to_string();
                true
            }
            None => false,
        }
    }

    /// Append media to a listing's gallery
    pub fn add_media(&mut self, id: &str, items: Vec<MediaItem>) -> Option<House> {
        let mut house = self.get(id)?.clone();
        house.gallery.extend(items);
        self.update(house.clone());
        Some(house)
    }

    /// Drop one media item from a listing's gallery; `None` when either the
    /// listing or the media item is absent
    pub fn remove_media(&mut self, id: &str, media_id: &str) -> Option<House> {
        let mut house = self.get(id)?.clone();
        let before = house.gallery.len();
        house.gallery.retain(|m| m.id != media_id);
        if house.gallery.len() == before {
            return None;
        }
        self.update(house.clone());
        Some(house)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Listings whose name or address contains the query, ignoring case
    pub fn filtered(&self) -> Vec<&House> {
        let needle = self.query.to_lowercase();
        self.houses
            .iter()
            .filter(|h| {
                needle.is_empty()
                    || h.name.to_lowercase().contains(&needle)
                    || h.address.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Filtered listings grouped by column, in board order
    pub fn columns(&self) -> Vec<ColumnView<'_>> {
        let filtered = self.filtered();
        COLUMNS
            .iter()
            .map(|column| ColumnView {
                column,
                houses: filtered
                    .iter()
                    .copied()
                    .filter(|h| h.status == column.status)
                    .collect(),
            })
            .collect()
    }

    pub fn count_in(&self, status: Status) -> usize {
        self.filtered()
            .into_iter()
            .filter(|h| h.status == status)
            .count()
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn begin_drag(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.drag.begin(id);
        true
    }

    pub fn drag_over(&mut self, status: Status) {
        self.drag.hover(status);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Finish a drag on a column, moving the dragged listing there
    pub fn drop_on(&mut self, status: Status) -> Option<String> {
        let id = self.drag.finish()?;
        if self.move_house(&id, status) {
            Some(id)
        } else {
            None
        }
    }
}
