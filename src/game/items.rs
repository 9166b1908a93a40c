//! # Items
//!
//! Immutable item values stored once in an [`ItemCatalog`] and referenced
//! from unit inventories by [`ItemId`].

use crate::{Action, Coord, ItemId, Terrain, UnitId};
use serde::{Deserialize, Serialize};

/// A ranged or melee weapon. Attacks with it roll against `accuracy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Hit points removed on a hit
    pub damage: i32,
    /// Hit chance in percent, 0 to 100
    pub accuracy: u32,
    /// Maximum Euclidean distance to the target
    pub range: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: i32, accuracy: u32, range: u32) -> Self {
        Self {
            name: name.into(),
            damage,
            accuracy: accuracy.min(100),
            range,
        }
    }
}

/// Restores hit points to a unit in reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingItem {
    pub name: String,
    pub heal_amount: i32,
    pub range: u32,
}

impl HealingItem {
    /// Creates a healing item usable on the holder or an adjacent unit.
    pub fn new(name: impl Into<String>, heal_amount: i32) -> Self {
        Self {
            name: name.into(),
            heal_amount,
            range: 1,
        }
    }
}

/// Places a piece of terrain (a wall, a barricade) on a buildable cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPart {
    pub name: String,
    pub terrain: Terrain,
    pub range: u32,
}

impl BuildingPart {
    /// Creates a building part usable on adjacent cells.
    pub fn new(name: impl Into<String>, terrain: Terrain) -> Self {
        Self {
            name: name.into(),
            terrain,
            range: 1,
        }
    }
}

/// Every kind of item a unit can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Weapon(Weapon),
    Healing(HealingItem),
    Building(BuildingPart),
    /// Carried for flavour, produces no action
    Misc { name: String },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(weapon) => &weapon.name,
            Item::Healing(healing) => &healing.name,
            Item::Building(part) => &part.name,
            Item::Misc { name } => name,
        }
    }

    /// Maximum distance the item can be used at, if it can be used at all.
    pub fn range(&self) -> Option<u32> {
        match self {
            Item::Weapon(weapon) => Some(weapon.range),
            Item::Healing(healing) => Some(healing.range),
            Item::Building(part) => Some(part.range),
            Item::Misc { .. } => None,
        }
    }

    /// Returns true if `target` is within the item's own range of `origin`.
    pub fn reaches(&self, origin: Coord, target: Coord) -> bool {
        self.range()
            .is_some_and(|range| origin.within_range(target, range))
    }

    /// Builds the action of `unit`, standing on `origin`, using this item on
    /// `target`.
    ///
    /// Returns `None` for items without an action or when the target is
    /// beyond the item's range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tactica::{Coord, Item, UnitId, Weapon};
    ///
    /// let rifle = Item::Weapon(Weapon::new("Rifle", 30, 70, 4));
    /// let action = rifle.get_action(Coord::new(3, 0), UnitId(1), Coord::new(0, 0)).unwrap();
    /// assert!(action.contains_randomness());
    /// assert!(rifle.get_action(Coord::new(9, 0), UnitId(1), Coord::new(0, 0)).is_none());
    /// ```
    pub fn get_action(&self, target: Coord, unit: UnitId, origin: Coord) -> Option<Action> {
        if !self.reaches(origin, target) {
            return None;
        }
        match self {
            Item::Weapon(weapon) => Some(Action::attack(
                unit,
                origin,
                target,
                weapon.damage,
                weapon.accuracy,
            )),
            Item::Healing(healing) => {
                Some(Action::heal(unit, origin, target, healing.heal_amount))
            }
            Item::Building(part) => Some(Action::build(unit, origin, target, part.terrain)),
            Item::Misc { .. } => None,
        }
    }

    /// Human-readable preview of using the item from `origin` on `target`.
    pub fn get_info(&self, origin: Coord, target: Coord) -> String {
        let distance = origin.euclidean_distance(target);
        match self {
            Item::Weapon(weapon) => format!(
                "{}: {} damage, {}% to hit, distance {:.1}/{}\n",
                weapon.name, weapon.damage, weapon.accuracy, distance, weapon.range
            ),
            Item::Healing(healing) => format!(
                "{}: heals up to {} HP, distance {:.1}/{}\n",
                healing.name, healing.heal_amount, distance, healing.range
            ),
            Item::Building(part) => format!(
                "{}: builds '{}', distance {:.1}/{}\n",
                part.name,
                part.terrain.symbol(),
                distance,
                part.range
            ),
            Item::Misc { name } => format!("{}\n", name),
        }
    }
}

/// Arena holding every item of a game.
///
/// Units store [`ItemId`] handles, so one item value can sit in many
/// inventories at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an item and returns its handle.
    pub fn add(&mut self, item: Item) -> ItemId {
        self.items.push(item);
        ItemId(self.items.len() - 1)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn weapon(&self, id: ItemId) -> Option<&Weapon> {
        match self.get(id)? {
            Item::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }

    pub fn healing_item(&self, id: ItemId) -> Option<&HealingItem> {
        match self.get(id)? {
            Item::Healing(healing) => Some(healing),
            _ => None,
        }
    }

    pub fn building_part(&self, id: ItemId) -> Option<&BuildingPart> {
        match self.get(id)? {
            Item::Building(part) => Some(part),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemId(index), item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionKind;

    #[test]
    fn test_catalog_handles_are_stable() {
        let mut catalog = ItemCatalog::new();
        let rifle = catalog.add(Item::Weapon(Weapon::new("Rifle", 30, 70, 5)));
        let medkit = catalog.add(Item::Healing(HealingItem::new("Medkit", 25)));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(rifle).unwrap().name(), "Rifle");
        assert!(catalog.weapon(rifle).is_some());
        assert!(catalog.weapon(medkit).is_none());
        assert_eq!(catalog.healing_item(medkit).unwrap().heal_amount, 25);
        assert!(catalog.get(ItemId(99)).is_none());
    }

    #[test]
    fn test_accuracy_is_capped() {
        assert_eq!(Weapon::new("Laser", 10, 250, 3).accuracy, 100);
    }

    #[test]
    fn test_item_actions_by_kind() {
        let unit = UnitId(3);
        let origin = Coord::new(2, 2);
        let adjacent = Coord::new(2, 3);

        let heal = Item::Healing(HealingItem::new("Medkit", 20))
            .get_action(adjacent, unit, origin)
            .unwrap();
        assert!(!heal.contains_randomness());
        assert!(!heal.is_movement());
        assert!(matches!(heal.kind(), ActionKind::Heal { amount: 20, .. }));

        let wall = Terrain::with_properties('#', false, false, false, false);
        let build = Item::Building(BuildingPart::new("Sandbags", wall))
            .get_action(adjacent, unit, origin)
            .unwrap();
        assert!(matches!(build.kind(), ActionKind::Build { .. }));
        assert_eq!(build.target(), adjacent);

        let misc = Item::Misc {
            name: "Lucky coin".to_string(),
        };
        assert!(misc.get_action(adjacent, unit, origin).is_none());
    }

    #[test]
    fn test_short_range_items_refuse_far_targets() {
        let medkit = Item::Healing(HealingItem::new("Medkit", 20));
        assert!(medkit
            .get_action(Coord::new(4, 4), UnitId(1), Coord::new(2, 2))
            .is_none());
        assert!(medkit
            .get_action(Coord::new(2, 2), UnitId(1), Coord::new(2, 2))
            .is_some());
    }

    #[test]
    fn test_far_out_of_map_target_is_out_of_range() {
        let rifle = Item::Weapon(Weapon::new("Rifle", 30, 70, 5));
        let far = Coord::new(usize::MAX / 2, 0);
        assert!(!rifle.reaches(Coord::new(0, 0), far));
        assert!(rifle.get_action(far, UnitId(1), Coord::new(0, 0)).is_none());
        assert!(rifle.get_info(Coord::new(0, 0), far).starts_with("Rifle: 30 damage"));
    }

    #[test]
    fn test_get_info_mentions_stats() {
        let rifle = Item::Weapon(Weapon::new("Rifle", 30, 70, 5));
        let info = rifle.get_info(Coord::new(0, 0), Coord::new(3, 4));
        assert_eq!(info, "Rifle: 30 damage, 70% to hit, distance 5.0/5\n");
    }
}
