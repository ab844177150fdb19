use rankboard_core::{
    append_to_group, group_and_sort, items_in_group, key_between_items, move_to_group,
    move_within_group, normalize_group, slot_to_key_inter_group, slot_to_key_intra_group,
    sort_by_key, GroupId, Item, ItemKind, Key,
};

fn item(group: &GroupId, key: &str) -> Item {
    Item::new(ItemKind::Note, group.clone(), Key::parse(key).unwrap())
}

fn keys(items: &[&Item]) -> Vec<String> {
    items.iter().map(|item| item.key.to_string()).collect()
}

#[test]
fn normalize_group_maps_missing_to_default() {
    assert_eq!(normalize_group(None), GroupId::Default);
    assert_eq!(normalize_group(Some("t1")), GroupId::named("t1"));
}

#[test]
fn items_in_group_filters_and_keeps_input_order() {
    let t1 = GroupId::named("t1");
    let items = vec![
        item(&t1, "q"),
        item(&GroupId::Default, "b"),
        item(&t1, "c"),
    ];
    let members = items_in_group(&items, &t1);
    assert_eq!(keys(&members), vec!["q", "c"]);
    assert_eq!(items_in_group(&items, &normalize_group(None)).len(), 1);
}

#[test]
fn sort_by_key_is_stable_for_equal_keys() {
    let group = GroupId::Default;
    let mut items = vec![
        item(&group, "b"),
        item(&group, "a"),
        item(&group, "b"),
        item(&group, "a"),
    ];
    let original: Vec<_> = items.iter().map(|item| item.uuid).collect();

    sort_by_key(&mut items);

    let sorted: Vec<_> = items.iter().map(|item| item.uuid).collect();
    assert_eq!(
        sorted,
        vec![original[1], original[3], original[0], original[2]]
    );
}

#[test]
fn sort_by_key_uses_ordinal_comparison() {
    let group = GroupId::Default;
    let mut items = vec![item(&group, "b"), item(&group, "Z"), item(&group, "a")];
    sort_by_key(&mut items);
    let sorted: Vec<&str> = items.iter().map(|item| item.key.as_str()).collect();
    assert_eq!(sorted, vec!["Z", "a", "b"]);
}

#[test]
fn group_and_sort_partitions_every_group() {
    let t1 = GroupId::named("t1");
    let t2 = GroupId::named("t2");
    let items = vec![
        item(&t1, "q"),
        item(&t2, "m"),
        item(&GroupId::Default, "c"),
        item(&t1, "b"),
        item(&GroupId::Default, "a"),
    ];

    let groups = group_and_sort(&items);

    assert_eq!(groups.len(), 3);
    let order: Vec<&GroupId> = groups.keys().collect();
    assert_eq!(order, vec![&GroupId::Default, &t1, &t2]);
    assert_eq!(keys(&groups[&GroupId::Default]), vec!["a", "c"]);
    assert_eq!(keys(&groups[&t1]), vec!["b", "q"]);
    assert_eq!(keys(&groups[&t2]), vec!["m"]);
}

#[test]
fn key_between_items_delegates_to_key_algebra() {
    let group = GroupId::Default;
    let a = item(&group, "a");
    let c = item(&group, "c");
    assert_eq!(key_between_items(Some(&a), Some(&c)).unwrap().as_str(), "b");
    assert_eq!(key_between_items::<Item>(None, None).unwrap().as_str(), "m");
    assert!(key_between_items(Some(&c), Some(&a)).is_err());
}

#[test]
fn append_to_group_starts_at_initial_key_and_ignores_other_groups() {
    let t1 = GroupId::named("t1");
    let t2 = GroupId::named("t2");
    let empty: Vec<Item> = Vec::new();
    let first = append_to_group(ItemKind::Task, t1.clone(), &empty);
    assert_eq!(first.key.as_str(), "m");
    assert_eq!(first.kind, ItemKind::Task);
    assert_eq!(first.group, t1);

    let items = vec![first.clone(), item(&t2, "y"), item(&t1, "f")];
    let second = append_to_group(ItemKind::Note, t1.clone(), &items);
    assert_eq!(second.key.as_str(), "n");
}

#[test]
fn move_within_group_clamps_and_excludes_moving_item() {
    let group = GroupId::named("col");
    let items = vec![item(&group, "b"), item(&group, "d"), item(&group, "f")];
    let moving = &items[2];

    assert_eq!(move_within_group(moving, 0, &items).key.as_str(), "a");
    assert_eq!(move_within_group(moving, -5, &items).key.as_str(), "a");
    assert_eq!(move_within_group(moving, 1, &items).key.as_str(), "c");
    assert_eq!(move_within_group(moving, 2, &items).key.as_str(), "e");
    assert_eq!(move_within_group(moving, 99, &items).key.as_str(), "e");

    let moved = move_within_group(moving, 0, &items);
    assert_eq!(moved.uuid, moving.uuid);
    assert_eq!(moved.group, group);
    assert_eq!(items[2].key.as_str(), "f");
}

#[test]
fn move_to_group_rewrites_membership_and_key() {
    let source = GroupId::named("todo");
    let destination = GroupId::named("done");
    let items = vec![
        item(&source, "m"),
        item(&destination, "c"),
        item(&destination, "g"),
    ];

    let moved = move_to_group(&items[0], destination.clone(), 1, &items);

    assert_eq!(moved.group, destination);
    assert_eq!(moved.key.as_str(), "e");
    assert_eq!(moved.uuid, items[0].uuid);
}

#[test]
fn moves_in_one_group_leave_other_groups_untouched() {
    let g1 = GroupId::named("g1");
    let g2 = GroupId::named("g2");
    let mut items = vec![
        item(&g1, "b"),
        item(&g1, "d"),
        item(&g2, "b"),
        item(&g2, "c"),
        item(&GroupId::Default, "m"),
    ];
    let untouched: Vec<(uuid::Uuid, Key)> = items[2..]
        .iter()
        .map(|item| (item.uuid, item.key.clone()))
        .collect();

    let moved = move_within_group(&items[1], 0, &items);
    items[1] = moved;
    let appended = append_to_group(ItemKind::Note, g1.clone(), &items);
    items.push(appended);

    for (uuid, key) in untouched {
        let current = items.iter().find(|item| item.uuid == uuid).unwrap();
        assert_eq!(current.key, key);
    }
}

#[test]
fn intra_group_slot_appends_on_last_visible_item() {
    let group = GroupId::named("col");
    let items = vec![
        item(&group, "b"),
        item(&group, "d"),
        item(&group, "f"),
        item(&group, "h"),
    ];
    let sorted: Vec<&Item> = items.iter().collect();
    let first = items[0].uuid;
    let last = items[3].uuid;

    assert_eq!(slot_to_key_intra_group(&sorted, first, 3).as_str(), "i");
    assert_eq!(slot_to_key_intra_group(&sorted, first, 10).as_str(), "i");
    assert_eq!(slot_to_key_intra_group(&sorted, first, 2).as_str(), "g");
    assert_eq!(slot_to_key_intra_group(&sorted, last, 0).as_str(), "a");
}

#[test]
fn intra_group_slot_keeps_key_of_lone_item() {
    let group = GroupId::named("col");
    let items = vec![item(&group, "q")];
    let key = slot_to_key_intra_group(&items, items[0].uuid, 0);
    assert_eq!(key.as_str(), "q");
}

#[test]
fn inter_group_slot_biases_toward_append_at_list_end() {
    let group = GroupId::named("dest");
    let empty: Vec<Item> = Vec::new();
    assert_eq!(slot_to_key_inter_group(&empty, 0).as_str(), "m");

    let two = vec![item(&group, "b"), item(&group, "d")];
    assert_eq!(slot_to_key_inter_group(&two, 0).as_str(), "a");
    // Dropping on the last visible item appends instead of inserting before it.
    assert_eq!(slot_to_key_inter_group(&two, 1).as_str(), "e");
    assert_eq!(slot_to_key_inter_group(&two, 7).as_str(), "e");

    let three = vec![item(&group, "b"), item(&group, "d"), item(&group, "f")];
    assert_eq!(slot_to_key_inter_group(&three, 1).as_str(), "c");
}

#[test]
fn end_to_end_append_sort_and_move_to_front() {
    let topic = GroupId::named("t1");
    let mut items = vec![item(&topic, "m")];

    let second = append_to_group(ItemKind::Note, topic.clone(), &items);
    assert!(second.key.as_str() > "m");
    items.push(second.clone());

    let groups = group_and_sort(&items);
    assert_eq!(keys(&groups[&topic]), vec!["m".to_string(), second.key.to_string()]);

    let moved = move_within_group(&second, 0, &items);
    assert!(moved.key.as_str() < "m");
}
