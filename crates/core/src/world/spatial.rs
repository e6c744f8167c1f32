use crate::{
    error::{GeoMapError, GeoMapResult},
    world::{generate::noise::hash2d, hex::GridCoord},
};
use log::debug;

/// Seed for the slot hash. Fixed, so that slot assignment is stable between
/// runs.
const HASH_SEED: u32 = 0x5EED_5107;

/// One node per possible item. `next` is the item after this one in the same
/// slot's chain.
#[derive(Copy, Clone, Debug, Default)]
struct Link {
    next: Option<usize>,
    stored: bool,
}

/// An open hash table of item indexes, keyed by grid coordinate. Use this to
/// answer "which entities are on or near this cell" without scanning every
/// entity.
///
/// Items are plain indexes into some external list (e.g. a pool of units).
/// Every possible item gets exactly one link node, allocated up front, so an
/// item can only be stored at one coordinate at a time. Each hash slot holds
/// the head of a singly-linked chain of items.
///
/// **The coordinate is not stored.** Different coordinates can hash to the
/// same slot, so anything returned from a lookup may actually be somewhere
/// else. Callers need to check each returned item's real position against
/// their own records. Coordinates are also not wrapped; pass coordinates
/// that have already been through [ChunkMap::wrap](crate::ChunkMap::wrap) so
/// equivalent positions land in the same slot.
#[derive(Clone, Debug)]
pub struct SpatialStorage {
    links: Vec<Link>,
    slots: Vec<Option<usize>>,
    hash_bit_mask: u32,
}

impl SpatialStorage {
    /// Largest supported capacity. Slot indexes come from a 32-bit hash.
    pub const MAX_ITEM_COUNT: usize = 1 << 31;

    /// Create storage with room for item indexes `0..max_item_count`. The
    /// slot count is `max_item_count` rounded up to a power of two.
    pub fn new(max_item_count: usize) -> GeoMapResult<Self> {
        if max_item_count == 0 {
            return Err(GeoMapError::InvalidParameter {
                name: "max_item_count",
                reason: "must be at least 1",
            });
        }
        if max_item_count > Self::MAX_ITEM_COUNT {
            return Err(GeoMapError::InvalidParameter {
                name: "max_item_count",
                reason: "must be at most 2^31",
            });
        }

        let slot_count = max_item_count.next_power_of_two();
        debug!(
            "Created spatial storage for {} items in {} slots",
            max_item_count, slot_count
        );
        Ok(Self {
            links: vec![Link::default(); max_item_count],
            slots: vec![None; slot_count],
            hash_bit_mask: (slot_count - 1) as u32,
        })
    }

    pub fn max_item_count(&self) -> usize {
        self.links.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, coord: GridCoord) -> usize {
        let hash = hash2d(HASH_SEED, coord.x as u32, coord.y as u32);
        (hash & self.hash_bit_mask) as usize
    }

    fn check_capacity(&self, item_index: usize) -> GeoMapResult<()> {
        if item_index < self.links.len() {
            Ok(())
        } else {
            Err(GeoMapError::OutOfCapacity {
                item_index,
                max_item_count: self.links.len(),
            })
        }
    }

    /// Is this item stored anywhere?
    pub fn contains(&self, item_index: usize) -> bool {
        self.links.get(item_index).map_or(false, |link| link.stored)
    }

    /// Store an item at a coordinate. The item must not already be stored
    /// anywhere; use [Self::move_item] to relocate it.
    pub fn insert(
        &mut self,
        coord: GridCoord,
        item_index: usize,
    ) -> GeoMapResult<()> {
        self.check_capacity(item_index)?;
        if self.links[item_index].stored {
            return Err(GeoMapError::ItemAlreadyStored { item_index });
        }

        let slot = self.slot(coord);
        self.links[item_index] = Link {
            next: self.slots[slot],
            stored: true,
        };
        self.slots[slot] = Some(item_index);
        Ok(())
    }

    /// Unlink an item from the chain that its coordinate hashes to
    pub fn remove(
        &mut self,
        coord: GridCoord,
        item_index: usize,
    ) -> GeoMapResult<()> {
        self.check_capacity(item_index)?;
        let slot = self.slot(coord);

        let mut previous: Option<usize> = None;
        let mut current = self.slots[slot];
        while let Some(index) = current {
            let next = self.links[index].next;
            if index == item_index {
                match previous {
                    None => self.slots[slot] = next,
                    Some(previous) => self.links[previous].next = next,
                }
                self.links[index] = Link::default();
                return Ok(());
            }
            previous = current;
            current = next;
        }

        Err(GeoMapError::ItemNotFound {
            item_index,
            x: coord.x,
            y: coord.y,
        })
    }

    /// Move an item from one coordinate to another. This is a removal
    /// followed by an insertion; if the removal fails, nothing changes.
    pub fn move_item(
        &mut self,
        old_coord: GridCoord,
        new_coord: GridCoord,
        item_index: usize,
    ) -> GeoMapResult<()> {
        self.remove(old_coord, item_index)?;
        self.insert(new_coord, item_index)
    }

    /// All items in the slot that a coordinate hashes to, most recently
    /// inserted first
    pub fn items_at(
        &self,
        coord: GridCoord,
    ) -> impl Iterator<Item = usize> + '_ {
        Chain {
            links: &self.links,
            next: self.slots[self.slot(coord)],
        }
    }

    pub fn item_count_at(&self, coord: GridCoord) -> usize {
        self.items_at(coord).count()
    }

    /// The most recently inserted item in the slot a coordinate hashes to, or
    /// `None` if the slot is empty
    pub fn first_index(&self, coord: GridCoord) -> Option<usize> {
        self.slots[self.slot(coord)]
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.links.fill(Link::default());
        self.slots.fill(None);
    }
}

/// Walks one slot's chain
struct Chain<'a> {
    links: &'a [Link],
    next: Option<usize>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.links[current].next;
        Some(current)
    }
}
