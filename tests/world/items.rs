//! Item location tests.

use mudcore_world::{CharacterTemplate, HoldsItems, ItemLocation, ItemTemplate, World};

#[test]
fn items_move_between_room_inventory_and_equipment() {
    let mut world = World::new();
    let zone = world.add_zone("z", "Z").unwrap();
    let room = world.add_room(zone, "r", "R", "").unwrap();
    let who = world.spawn_character(room, CharacterTemplate::player("p", "P")).unwrap();
    let helm = world
        .spawn_item(ItemLocation::Room(room), ItemTemplate::new("helm", "a helm"))
        .unwrap();
    assert!(world.room(room).unwrap().has_item(helm));

    world.move_item(helm, ItemLocation::Inventory(who)).unwrap();
    assert!(!world.room(room).unwrap().has_item(helm));
    assert!(world.character(who).unwrap().has_item(helm));

    world
        .move_item(helm, ItemLocation::Equipped(who, "head".to_string()))
        .unwrap();
    assert!(!world.character(who).unwrap().has_item(helm));
    assert_eq!(world.equipped_items(who), [helm]);
    assert_eq!(
        world.item(helm).unwrap().location(),
        Some(&ItemLocation::Equipped(who, "head".to_string()))
    );
}

#[test]
fn items_nest_in_containers() {
    let mut world = World::new();
    let zone = world.add_zone("z", "Z").unwrap();
    let room = world.add_room(zone, "r", "R", "").unwrap();
    let bag = world
        .spawn_item(ItemLocation::Room(room), ItemTemplate::new("bag", "a bag"))
        .unwrap();
    let coin = world
        .spawn_item(ItemLocation::Container(bag), ItemTemplate::new("coin", "a coin"))
        .unwrap();
    assert_eq!(world.item(bag).unwrap().item_count(), 1);
    assert!(world.move_item(bag, ItemLocation::Container(bag)).is_err());

    world.move_item(coin, ItemLocation::Room(room)).unwrap();
    assert_eq!(world.item(bag).unwrap().item_count(), 0);
    assert_eq!(world.room(room).unwrap().item_count(), 2);
}

#[test]
fn despawn_drops_carried_items() {
    let mut world = World::new();
    let zone = world.add_zone("z", "Z").unwrap();
    let room = world.add_room(zone, "r", "R", "").unwrap();
    let who = world.spawn_character(room, CharacterTemplate::npc("n", "N")).unwrap();
    let rock = world
        .spawn_item(ItemLocation::Inventory(who), ItemTemplate::new("rock", "a rock"))
        .unwrap();
    world.despawn_character(who).unwrap();
    assert!(world.room(room).unwrap().has_item(rock));
}
