//! # Units
//!
//! Playable units: hit points, inventory and per-turn action flags.

use crate::{BuildingPart, HealingItem, ItemCatalog, ItemId, RulesConfig, UnitId, Weapon};
use serde::{Deserialize, Serialize};

/// A unit on the battlefield.
///
/// Each unit belongs to exactly one [`crate::Team`] for its whole life. The
/// map and the game refer to it only by [`UnitId`].
///
/// # Examples
///
/// ```
/// use tactica::{RulesConfig, Unit, UnitId};
///
/// let mut unit = Unit::new(UnitId(0), "Scout", &RulesConfig::default());
/// assert_eq!(unit.hp(), 100);
/// assert_eq!(unit.change_hp_by(-30), -30);
/// assert_eq!(unit.change_hp_by(50), 30);
/// assert_eq!(unit.hp(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    name: String,
    hp: i32,
    max_hp: i32,
    inventory: Vec<ItemId>,
    inventory_size: usize,
    /// Set once the unit submitted a movement this turn
    pub has_moved: bool,
    /// Set once the unit submitted an item action this turn
    pub has_added_action: bool,
}

impl Unit {
    /// Creates a unit at full health with an empty inventory.
    pub fn new(id: UnitId, name: impl Into<String>, config: &RulesConfig) -> Self {
        Self {
            id,
            name: name.into(),
            hp: config.max_hp,
            max_hp: config.max_hp,
            inventory: Vec::new(),
            inventory_size: config.inventory_size,
            has_moved: false,
            has_added_action: false,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Adds an item handle if a slot is free.
    pub fn add_item(&mut self, item: ItemId) -> bool {
        if self.inventory.len() >= self.inventory_size {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Removes one occurrence of an item handle.
    pub fn remove_item(&mut self, item: ItemId) -> bool {
        match self.inventory.iter().position(|&held| held == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_item(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }

    /// Changes hit points by `amount`, clamped to `0..=max_hp`.
    ///
    /// Positive amounts heal, negative amounts damage. Returns the change
    /// that actually happened, so applying its negation restores the
    /// previous value exactly.
    pub fn change_hp_by(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).clamp(0, self.max_hp);
        self.hp - before
    }

    /// Heals by the item's amount. Returns how much was actually healed.
    pub fn heal(&mut self, item: &HealingItem) -> i32 {
        self.change_hp_by(item.heal_amount)
    }

    /// Removes `damage` hit points. Returns how much was actually removed.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        -self.change_hp_by(-damage.max(0))
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn clear_action_flags(&mut self) {
        self.has_moved = false;
        self.has_added_action = false;
    }

    pub fn weapons<'a>(&self, catalog: &'a ItemCatalog) -> Vec<(ItemId, &'a Weapon)> {
        self.inventory
            .iter()
            .filter_map(|&id| catalog.weapon(id).map(|weapon| (id, weapon)))
            .collect()
    }

    pub fn healing_items<'a>(&self, catalog: &'a ItemCatalog) -> Vec<(ItemId, &'a HealingItem)> {
        self.inventory
            .iter()
            .filter_map(|&id| catalog.healing_item(id).map(|item| (id, item)))
            .collect()
    }

    pub fn building_parts<'a>(
        &self,
        catalog: &'a ItemCatalog,
    ) -> Vec<(ItemId, &'a BuildingPart)> {
        self.inventory
            .iter()
            .filter_map(|&id| catalog.building_part(id).map(|part| (id, part)))
            .collect()
    }

    pub fn has_weapon(&self, catalog: &ItemCatalog) -> bool {
        !self.weapons(catalog).is_empty()
    }

    pub fn has_healing_item(&self, catalog: &ItemCatalog) -> bool {
        !self.healing_items(catalog).is_empty()
    }

    pub fn has_building_part(&self, catalog: &ItemCatalog) -> bool {
        !self.building_parts(catalog).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, Terrain};

    fn unit() -> Unit {
        Unit::new(UnitId(1), "Tester", &RulesConfig::default())
    }

    #[test]
    fn test_hp_never_leaves_bounds() {
        let mut unit = unit();
        assert_eq!(unit.take_damage(250), 100);
        assert_eq!(unit.hp(), 0);
        assert!(unit.is_dead());
        assert_eq!(unit.take_damage(10), 0);
    }

    #[test]
    fn test_extreme_hp_changes_clamp_without_overflow() {
        let mut unit = unit();
        unit.change_hp_by(-50);
        assert_eq!(unit.change_hp_by(i32::MAX), 50);
        assert_eq!(unit.hp(), 100);
        assert_eq!(unit.change_hp_by(i32::MIN), -100);
        assert_eq!(unit.hp(), 0);
        assert_eq!(unit.heal(&HealingItem::new("Elixir", i32::MAX)), 100);
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut unit = unit();
        unit.change_hp_by(-40);
        assert_eq!(unit.take_damage(-20), 0);
        assert_eq!(unit.hp(), 60);
    }

    #[test]
    fn test_heal_reports_actual_amount() {
        let mut unit = unit();
        unit.change_hp_by(-10);
        assert_eq!(unit.heal(&HealingItem::new("Medkit", 25)), 10);
        assert_eq!(unit.hp(), unit.max_hp());
    }

    #[test]
    fn test_inventory_is_capped() {
        let config = RulesConfig {
            inventory_size: 2,
            ..RulesConfig::default()
        };
        let mut unit = Unit::new(UnitId(1), "Packer", &config);
        assert!(unit.add_item(ItemId(0)));
        assert!(unit.add_item(ItemId(0)));
        assert!(!unit.add_item(ItemId(1)));

        assert!(unit.remove_item(ItemId(0)));
        assert_eq!(unit.inventory(), &[ItemId(0)]);
        assert!(!unit.remove_item(ItemId(5)));
    }

    #[test]
    fn test_typed_item_queries() {
        let mut catalog = ItemCatalog::new();
        let rifle = catalog.add(Item::Weapon(Weapon::new("Rifle", 30, 70, 5)));
        let wall = Terrain::with_properties('#', false, false, false, false);
        let sandbags = catalog.add(Item::Building(BuildingPart::new("Sandbags", wall)));

        let mut unit = unit();
        unit.add_item(rifle);
        unit.add_item(sandbags);

        assert!(unit.has_weapon(&catalog));
        assert!(unit.has_building_part(&catalog));
        assert!(!unit.has_healing_item(&catalog));
        assert_eq!(unit.weapons(&catalog)[0].0, rifle);
    }

    #[test]
    fn test_clear_action_flags() {
        let mut unit = unit();
        unit.has_moved = true;
        unit.has_added_action = true;
        unit.clear_action_flags();
        assert!(!unit.has_moved);
        assert!(!unit.has_added_action);
    }
}
