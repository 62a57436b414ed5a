use crate::catalog::Item;

/// One line of the user's selection: an item, an optional color
/// variant, and how many of it. `count` is always at least 1 —
/// entries that reach zero are pruned from the [`Selection`].
#[derive(Clone, Copy, Debug)]
pub struct SelectionEntry {
    pub item: Item,
    pub variant: Option<usize>,
    pub count: u32,
}

/// A single unit of a selection entry, produced by
/// [`Selection::flatten`]. The placement algorithm positions one
/// entity per instance.
#[derive(Clone, Copy, Debug)]
pub struct Instance {
    pub item: Item,
    pub variant: Option<usize>,
}

/// Ordered list of selected items with quantities.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds one unit of `item`: bumps the count of an existing entry
    /// for the same item id, or appends a fresh entry with count 1.
    pub fn add(&mut self, item: Item) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item.id) {
            entry.count += 1;
        } else {
            self.entries.push(SelectionEntry {
                item,
                variant: None,
                count: 1,
            });
        }
    }

    /// Adjusts the count of the entry for `item_id` by `delta`
    /// (saturating at zero). An entry whose count reaches zero is
    /// removed immediately, keeping the `count >= 1` invariant.
    pub fn adjust(&mut self, item_id: &str, delta: i32) {
        for entry in &mut self.entries {
            if entry.item.id == item_id {
                entry.count = entry.count.saturating_add_signed(delta);
            }
        }
        self.entries.retain(|e| e.count > 0);
    }

    /// Pins a color variant for the entry matching `item_id`.
    pub fn set_variant(&mut self, item_id: &str, variant: Option<usize>) {
        for entry in &mut self.entries {
            if entry.item.id == item_id {
                entry.variant = variant;
            }
        }
    }

    /// Total price of the selection: Σ unit price × count.
    pub fn total_price(&self) -> u32 {
        self.entries.iter().map(|e| e.item.price * e.count).sum()
    }

    /// Total number of units across all entries.
    pub fn total_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Expands the selection into one [`Instance`] per unit of count,
    /// in entry order.
    pub fn flatten(&self) -> Vec<Instance> {
        let mut instances = Vec::with_capacity(self.total_count() as usize);
        for entry in &self.entries {
            for _ in 0..entry.count {
                instances.push(Instance {
                    item: entry.item,
                    variant: entry.variant,
                });
            }
        }
        instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tier;

    fn rose() -> Item {
        Item {
            id: "rose",
            name: "Rose",
            price: 150,
            tier: Tier::Focal,
            colors: &[[255, 107, 157], [255, 23, 68]],
        }
    }

    fn tulip() -> Item {
        Item {
            id: "tulip",
            name: "Tulip",
            price: 120,
            tier: Tier::Secondary,
            colors: &[[255, 215, 0]],
        }
    }

    #[test]
    fn add_merges_entries_for_the_same_item() {
        let mut sel = Selection::new();
        sel.add(rose());
        sel.add(rose());
        sel.add(tulip());

        assert_eq!(sel.entries().len(), 2);
        assert_eq!(sel.entries()[0].count, 2);
        assert_eq!(sel.entries()[1].count, 1);
    }

    #[test]
    fn adjust_to_zero_prunes_the_entry() {
        let mut sel = Selection::new();
        sel.add(rose());
        sel.add(tulip());

        sel.adjust("rose", -1);

        assert_eq!(sel.entries().len(), 1);
        assert_eq!(sel.entries()[0].item.id, "tulip");

        // Further negative deltas on a pruned id are a no-op.
        sel.adjust("rose", -1);
        assert_eq!(sel.entries().len(), 1);
    }

    #[test]
    fn totals_sum_price_and_count() {
        let mut sel = Selection::new();
        sel.add(rose());
        sel.add(rose());
        sel.add(tulip());

        assert_eq!(sel.total_price(), 150 * 2 + 120);
        assert_eq!(sel.total_count(), 3);
    }

    #[test]
    fn flatten_yields_one_instance_per_unit_in_entry_order() {
        let mut sel = Selection::new();
        sel.add(rose());
        sel.adjust("rose", 2); // count 3
        sel.add(tulip());
        sel.set_variant("tulip", Some(0));

        let instances = sel.flatten();
        assert_eq!(instances.len(), 4);
        assert!(instances[..3].iter().all(|i| i.item.id == "rose"));
        assert_eq!(instances[3].item.id, "tulip");
        assert_eq!(instances[3].variant, Some(0));
    }
}
