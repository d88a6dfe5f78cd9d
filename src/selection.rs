//! Ordered thumbnail lists for both image sources.
//!
//! The lists are authoritative: the page renders them in order and a
//! drag-and-drop gesture becomes a [`OrderedList::move_before`] call.

pub type ItemId = u64;

pub trait Keyed {
    fn id(&self) -> ItemId;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> OrderedList<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Keyed::id).collect()
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    /// Moves `dragged` so it sits immediately before `target`.
    ///
    /// Returns false (and leaves the list alone) when either id is unknown or
    /// both are the same item.
    pub fn move_before(&mut self, dragged: ItemId, target: ItemId) -> bool {
        if dragged == target {
            return false;
        }
        let Some(from) = self.position(dragged) else {
            return false;
        };
        if self.position(target).is_none() {
            return false;
        }
        let item = self.items.remove(from);
        // after removal, indices past `from` shift left
        let to = self.position(target).unwrap_or(self.items.len());
        self.items.insert(to, item);
        true
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// A locally picked file with its decoded preview.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadItem<F> {
    pub id: ItemId,
    pub name: String,
    /// `data:` URL of the file contents.
    pub preview: String,
    pub file: F,
}

impl<F> Keyed for UploadItem<F> {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// One image name from a server folder listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerThumb {
    pub id: ItemId,
    pub name: String,
    pub thumb_url: String,
    pub selected: bool,
}

impl Keyed for ServerThumb {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// Thumbnails of the folder that was listed last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerListing {
    pub folder: String,
    pub thumbs: OrderedList<ServerThumb>,
}

impl ServerListing {
    /// Flips the selected flag; returns the new state.
    pub fn toggle(&mut self, id: ItemId) -> Option<bool> {
        let thumb = self.thumbs.get_mut(id)?;
        thumb.selected = !thumb.selected;
        Some(thumb.selected)
    }

    /// Names of the selected thumbs, in list order.
    pub fn selected_names(&self) -> Vec<String> {
        self.thumbs
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.folder.clear();
        self.thumbs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(id: ItemId, name: &str) -> ServerThumb {
        ServerThumb {
            id,
            name: name.to_string(),
            thumb_url: format!("/thumbnail/f/{name}"),
            selected: false,
        }
    }

    fn listing(names: &[&str]) -> ServerListing {
        ServerListing {
            folder: "f".into(),
            thumbs: OrderedList::from_vec(
                names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| thumb(i as ItemId + 1, n))
                    .collect(),
            ),
        }
    }

    #[test]
    fn move_before_places_item_ahead_of_target() {
        let mut l = listing(&["a", "b", "c", "d"]);
        assert!(l.thumbs.move_before(4, 2));
        assert_eq!(l.thumbs.ids(), vec![1, 4, 2, 3]);

        // moving forward: removal shifts the target left
        assert!(l.thumbs.move_before(1, 3));
        assert_eq!(l.thumbs.ids(), vec![4, 2, 1, 3]);
    }

    #[test]
    fn move_before_onto_direct_successor_is_a_no_op_in_order() {
        let mut l = listing(&["a", "b", "c"]);
        assert!(l.thumbs.move_before(1, 2));
        assert_eq!(l.thumbs.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn move_before_rejects_self_and_unknown_ids() {
        let mut l = listing(&["a", "b"]);
        assert!(!l.thumbs.move_before(1, 1));
        assert!(!l.thumbs.move_before(9, 1));
        assert!(!l.thumbs.move_before(1, 9));
        assert_eq!(l.thumbs.ids(), vec![1, 2]);
    }

    #[test]
    fn selection_follows_list_order_not_click_order() {
        let mut l = listing(&["x.png", "y.png", "z.png"]);
        l.toggle(3);
        l.toggle(1);
        assert_eq!(l.selected_names(), vec!["x.png", "z.png"]);

        l.thumbs.move_before(3, 1);
        assert_eq!(l.selected_names(), vec!["z.png", "x.png"]);
    }

    #[test]
    fn repeated_toggles_settle_on_parity() {
        let mut l = listing(&["x.png", "y.png"]);
        for _ in 0..5 {
            l.toggle(2);
        }
        l.toggle(1);
        l.toggle(1);
        assert_eq!(l.selected_names(), vec!["y.png"]);
        assert_eq!(l.toggle(42), None);
    }

    #[test]
    fn unselected_thumbs_still_reorder_the_selection() {
        let mut l = listing(&["a", "b", "c"]);
        l.toggle(1);
        l.toggle(3);
        // drag an unselected thumb around; selected order is unaffected
        l.thumbs.move_before(2, 1);
        assert_eq!(l.selected_names(), vec!["a", "c"]);
        l.thumbs.move_before(3, 2);
        assert_eq!(l.selected_names(), vec!["c", "a"]);
    }
}
