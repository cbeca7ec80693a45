use cfgnorm_dialect_ios::parse_ios;
use cfgnorm_ir::{Key, Node, Value};

/// Expected document with one route-map entry.
fn entry_doc(name: &str, seq: i64, entries: Vec<(&str, Value)>) -> Node {
    let mut with_action = vec![("action", Value::str("permit"))];
    with_action.extend(entries);
    Node::from_entries([(
        "route-map",
        Value::node([(
            Key::from(name),
            Value::node([(seq, Value::node(with_action))]),
        )]),
    )])
}

#[test]
fn entry_records_its_action() {
    let doc = parse_ios("route-map TestRtMap permit 10\n").expect("parse");
    assert_eq!(*doc.root(), entry_doc("TestRtMap", 10, vec![]));
}

#[test]
fn match_community_is_additive_and_preserves_exact_match() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match community 100:1 200:1 exact-match\n\
         \x20match community 300:1\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "match",
                Value::node([(
                    "community",
                    Value::node([
                        ("communities", Value::set(["100:1", "200:1", "300:1"])),
                        ("exact-match", Value::Bool(true)),
                    ]),
                )]),
            )],
        )
    );
}

#[test]
fn match_community_union_is_idempotent() {
    let once = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match community 100:1\n",
    )
    .expect("parse");
    let twice = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match community 100:1\n\
         \x20match community 100:1\n",
    )
    .expect("parse");

    assert_eq!(once, twice);
}

#[test]
fn match_ip_address_is_additive() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match ip address 10.0.0.1 20.0.0.1\n\
         \x20match ip address 30.0.0.1\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "match",
                Value::node([(
                    "ip-address",
                    Value::set(["10.0.0.1", "20.0.0.1", "30.0.0.1"]),
                )]),
            )],
        )
    );
}

#[test]
fn match_ip_address_prefix_list_is_additive() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match ip address prefix-list TestPfxList1 TestPfxList2\n\
         \x20match ip address prefix-list TestPfxList3\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "match",
                Value::node([(
                    "ip-prefix-list",
                    Value::set(["TestPfxList1", "TestPfxList2", "TestPfxList3"]),
                )]),
            )],
        )
    );
}

#[test]
fn match_ipv6_address_is_additive() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match ipv6 address 10::1 20::1\n\
         \x20match ipv6 address 30::1\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "match",
                Value::node([("ipv6-address", Value::set(["10::1", "20::1", "30::1"]))]),
            )],
        )
    );
}

#[test]
fn match_ipv6_address_prefix_list_is_additive() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match ipv6 address prefix-list TestPfxList1 TestPfxList2\n\
         \x20match ipv6 address prefix-list TestPfxList3\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "match",
                Value::node([(
                    "ipv6-prefix-list",
                    Value::set(["TestPfxList1", "TestPfxList2", "TestPfxList3"]),
                )]),
            )],
        )
    );
}

#[test]
fn match_tag_collects_integers() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match tag 10 20\n\
         \x20match tag 30\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "match",
                Value::node([("tag", Value::set([10i64, 20, 30]))]),
            )],
        )
    );
}

#[test]
fn set_community_is_additive_and_preserves_additive_flag() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set community 100:1 200:1 additive\n\
         \x20set community 300:1\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "set",
                Value::node([(
                    "community",
                    Value::node([
                        ("communities", Value::set(["100:1", "200:1", "300:1"])),
                        ("additive", Value::Bool(true)),
                    ]),
                )]),
            )],
        )
    );
}

#[test]
fn set_ip_next_hop_appends_in_order() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set ip next-hop 10.0.0.1 20.0.0.1\n\
         \x20set ip next-hop 30.0.0.1\n\
         \x20set ip vrf TestVRF next-hop 40.0.0.1\n\
         \x20set ip next-hop 50.0.0.1 60.0.0.1\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "set",
                Value::node([(
                    "ip-next-hop",
                    Value::List(vec![
                        Value::node([("addr", Value::str("10.0.0.1"))]),
                        Value::node([("addr", Value::str("20.0.0.1"))]),
                        Value::node([("addr", Value::str("30.0.0.1"))]),
                        Value::node([
                            ("addr", Value::str("40.0.0.1")),
                            ("vrf", Value::str("TestVRF")),
                        ]),
                        Value::node([("addr", Value::str("50.0.0.1"))]),
                        Value::node([("addr", Value::str("60.0.0.1"))]),
                    ]),
                )]),
            )],
        )
    );
}

#[test]
fn set_ip_next_hop_verify_availability_flag() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set ip next-hop verify-availability\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "set",
                Value::node([("ip-next-hop-verify-availability", Value::Bool(true))]),
            )],
        )
    );
}

#[test]
fn set_ip_next_hop_verify_availability_track_keys_by_sequence() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set ip next-hop verify-availability 10.0.0.1 200 track 20\n\
         \x20set ip next-hop verify-availability 20.0.0.1 100 track 30\n\
         \x20set ip next-hop verify-availability 30.0.0.1 300 track 10\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "set",
                Value::node([(
                    "ip-next-hop-verify-availability-track",
                    Value::node([
                        (
                            100i64,
                            Value::node([
                                ("addr", Value::str("20.0.0.1")),
                                ("track-obj", Value::Int(30)),
                            ]),
                        ),
                        (
                            200,
                            Value::node([
                                ("addr", Value::str("10.0.0.1")),
                                ("track-obj", Value::Int(20)),
                            ]),
                        ),
                        (
                            300,
                            Value::node([
                                ("addr", Value::str("30.0.0.1")),
                                ("track-obj", Value::Int(10)),
                            ]),
                        ),
                    ]),
                )]),
            )],
        )
    );
}

#[test]
fn set_ipv6_next_hop_appends_in_order() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set ipv6 next-hop 10::1 20::1\n\
         \x20set ipv6 next-hop 30::1\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![(
                "set",
                Value::node([(
                    "ipv6-next-hop",
                    Value::List(vec![
                        Value::node([("addr", Value::str("10::1"))]),
                        Value::node([("addr", Value::str("20::1"))]),
                        Value::node([("addr", Value::str("30::1"))]),
                    ]),
                )]),
            )],
        )
    );
}

#[test]
fn set_local_preference_replaces() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set local-preference 10\n\
         \x20set local-preference 20\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![("set", Value::node([("local-preference", Value::Int(20))]))],
        )
    );
}

#[test]
fn set_global_stores_the_empty_vrf_name() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set global\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![("set", Value::node([("vrf", Value::str(""))]))],
        )
    );
}

#[test]
fn set_vrf_stores_the_name() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20set vrf TestVRF\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        entry_doc(
            "TestRtMap",
            10,
            vec![("set", Value::node([("vrf", Value::str("TestVRF"))]))],
        )
    );
}

#[test]
fn entries_with_distinct_sequence_numbers_coexist() {
    let doc = parse_ios(
        "route-map TestRtMap permit 10\n\
         \x20match tag 10\n\
         route-map TestRtMap deny 20\n\
         \x20match tag 20\n",
    )
    .expect("parse");

    assert_eq!(
        *doc.root(),
        Node::from_entries([(
            "route-map",
            Value::node([(
                "TestRtMap",
                Value::node([
                    (
                        10i64,
                        Value::node([
                            ("action", Value::str("permit")),
                            ("match", Value::node([("tag", Value::set([10i64]))])),
                        ]),
                    ),
                    (
                        20,
                        Value::node([
                            ("action", Value::str("deny")),
                            ("match", Value::node([("tag", Value::set([20i64]))])),
                        ]),
                    ),
                ]),
            )]),
        )])
    );
}
