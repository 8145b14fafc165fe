use vaply_player::{
    check_config, parse_player_config_json, AnnotationType, NodePlayer, NodePlayerConfig,
    PlayerEvent,
};

fn demo() -> NodePlayerConfig {
    let json = vaply_test_fixtures::players::json("demo").expect("load demo fixture");
    parse_player_config_json(&json).expect("parse demo config")
}

fn shown(code: &str) -> PlayerEvent {
    PlayerEvent::AnnotationShown { code: code.into() }
}

fn hidden(code: &str) -> PlayerEvent {
    PlayerEvent::AnnotationHidden { code: code.into() }
}

#[test]
fn demo_fixture_is_clean() {
    let cfg = demo();
    assert_eq!(cfg.id, "package-1");
    assert!(check_config(&cfg).is_empty());

    let node = cfg.node("node-1").expect("node-1");
    let types: Vec<_> = node.annotations.iter().map(|a| a.annotation_type()).collect();
    assert_eq!(
        types,
        vec![
            AnnotationType::Card,
            AnnotationType::Card,
            AnnotationType::ExternalContent
        ]
    );
    let full = node.annotations[1].layout();
    assert_eq!(full.width.as_deref(), Some("100%"));
    assert_eq!(full.left.as_deref(), Some("0px"));
}

#[test]
fn demo_playthrough() {
    let mut player = NodePlayer::new(demo(), None).expect("player");
    assert_eq!(player.address(), "node-1@");

    // [1, 5): dismissible card
    assert_eq!(player.time_update(1.0).unwrap().events, vec![shown("annot-1")]);
    assert!(player.time_update(4.9).unwrap().is_empty());
    assert_eq!(player.time_update(5.0).unwrap().events, vec![hidden("annot-1")]);

    // 7+: blocking card pauses playback
    let out = player.time_update(7.0).unwrap();
    assert_eq!(
        out.events,
        vec![shown("annot-2"), PlayerEvent::PlaybackBlocked]
    );
    assert!(player.frame().blocked);

    // dismissing it lets playback resume
    let out = player.close_annotation("annot-2");
    assert!(out.contains(&PlayerEvent::PlaybackUnblocked));
    assert!(!player.is_blocked());

    // 11+: external content blocks again; annot-2 stays closed
    let out = player.time_update(11.0).unwrap();
    assert_eq!(
        out.events,
        vec![shown("annot-3"), PlayerEvent::PlaybackBlocked]
    );
    assert_eq!(player.snapshot().available, vec!["annot-2", "annot-3"]);
    assert_eq!(player.snapshot().active, vec!["annot-3"]);

    let frame = player.frame();
    assert_eq!(frame.annotations.len(), 1);
    assert_eq!(frame.annotations[0].annotation_type, AnnotationType::ExternalContent);
    assert_eq!(frame.annotations[0].layout.top.as_deref(), Some("50%"));
}

#[test]
fn single_node_flow_has_no_neighbours() {
    let mut player = NodePlayer::new(demo(), Some("node-1@NEXT_NODE")).expect("player");
    assert_eq!(player.address(), "node-1@NEXT_NODE");
    assert_eq!(player.seek_time(&120.0), Some(0.0));

    player.set_address(Some("node-1@PREVIOUS_NODE")).unwrap();
    assert_eq!(player.route().node_code, "node-1");
}

#[test]
fn deep_link_props_seek_to_annotation() {
    let json = vaply_test_fixtures::props::json("demo-annotated").expect("load props fixture");
    let props = vaply_player::parse_player_props_json(&json).expect("parse props");
    let mut player = NodePlayer::from_props(props).expect("player");
    assert_eq!(player.pending_seek(), Some("7"));
    let time = player.seek_time(&60.0).expect("seek");
    let out = player.time_update(time).unwrap();
    assert!(out.contains(&PlayerEvent::PlaybackBlocked));
}
