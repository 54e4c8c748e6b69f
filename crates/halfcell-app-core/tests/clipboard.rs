// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Copy/paste between sessions and prefs round trips.
#![allow(clippy::unwrap_used)]

use std::time::Instant;

use halfcell_app_core::config::{ConfigService, ConfigStore, MemoryConfigStore};
use halfcell_app_core::notice::NoticeKind;
use halfcell_app_core::prefs::{EditorPrefs, PREFS_KEY};
use halfcell_app_core::Session;
use halfcell_core::{
    encode, Bounds, Color, EdgeSpec, Halfcell, Head, MockRenderer, ObjectKind, Payload,
};

fn session() -> Session<MockRenderer> {
    Session::new(MockRenderer::new(), EditorPrefs::default())
}

fn sketch(s: &mut Session<MockRenderer>) {
    s.place(Halfcell::cell_center(0, 0), Payload::surface(1));
    s.place(Halfcell::cell_center(1, 0), Payload::surface(1));
    s.place(
        Halfcell::new(2, 1),
        Payload::Edge {
            spec: EdgeSpec {
                is_edge: true,
                color: Color(0),
                thickness: 1,
                head: Head::Arrow,
            },
            reversed: false,
        },
    );
    s.place(Halfcell::cell_center(0, 0), Payload::text("A"));
}

#[test]
fn paste_with_extreme_offset_wraps_onto_the_grid() {
    let now = Instant::now();
    let mut source = session();
    source.place(Halfcell::new(3, 5), Payload::surface(1));
    let bytes = source
        .copy(Bounds::spanning(Halfcell::new(3, 5), Halfcell::new(3, 5)), now)
        .unwrap();

    let mut target = session();
    assert_eq!(target.paste(&bytes, i32::MAX, 0, now), 1);
    // 3 + i32::MAX keeps 2 in its low 16 bits
    assert_eq!(
        target.document().get(encode(2, 5), ObjectKind::Surface),
        Some(&Payload::surface(1))
    );
    assert!(target.undo());
    assert!(target.document().store().is_empty());
}

#[test]
fn paste_reproduces_the_copied_region_at_an_offset() {
    let now = Instant::now();
    let mut source = session();
    sketch(&mut source);
    let bytes = source
        .copy(Bounds::spanning(Halfcell::new(0, 0), Halfcell::new(4, 2)), now)
        .unwrap();

    let mut target = session();
    assert_eq!(target.paste(&bytes, 4, 2, now), 4);
    let moved = Halfcell::cell_center(2, 1).key();
    assert_eq!(
        target.document().get(moved, ObjectKind::Surface),
        Some(&Payload::surface(1))
    );
    assert_eq!(
        target.document().get(moved, ObjectKind::Text),
        Some(&Payload::text("A"))
    );
    assert_eq!(target.document().renderer().live_count(), 4);
}

#[test]
fn one_undo_removes_a_whole_paste() {
    let now = Instant::now();
    let mut source = session();
    sketch(&mut source);
    let bytes = source
        .copy(Bounds::spanning(Halfcell::new(0, 0), Halfcell::new(4, 2)), now)
        .unwrap();

    let mut target = session();
    target.place(Halfcell::cell_center(9, 9), Payload::line(0));
    target.paste(&bytes, 0, 0, now);
    assert_eq!(target.document().store().placement_count(), 5);

    assert!(target.undo());
    assert_eq!(target.document().store().placement_count(), 1);
    assert!(target.redo());
    assert_eq!(target.document().store().placement_count(), 5);
}

#[test]
fn pasting_the_same_stamp_twice_adds_nothing_the_second_time() {
    let now = Instant::now();
    let mut s = session();
    sketch(&mut s);
    let bytes = s
        .copy(Bounds::spanning(Halfcell::new(0, 0), Halfcell::new(4, 2)), now)
        .unwrap();
    let history = s.document().log().len();
    assert_eq!(s.paste(&bytes, 0, 0, now), 0);
    assert_eq!(s.document().log().len(), history);
}

#[test]
fn corrupt_version_surfaces_one_error_notice() {
    let now = Instant::now();
    let mut s = session();
    s.paste(&[0xFF; 8], 0, 0, now);
    s.paste(&[0xFF; 8], 0, 0, now);
    assert_eq!(s.notices().len(), 1);
    assert_eq!(s.notices().latest().unwrap().kind, NoticeKind::Error);
    assert!(s.document().store().is_empty());
}

#[test]
fn prefs_survive_a_config_round_trip() {
    let config = ConfigService::new(MemoryConfigStore::new());
    let mut s = Session::load(MockRenderer::new(), &config, Instant::now());
    assert_eq!(s.prefs(), &EditorPrefs::default());

    let mut prefs = EditorPrefs::default();
    prefs.palette.push("#c00000".into());
    prefs.grid.halfcell_px = 12;
    s.set_prefs(prefs.clone());
    s.save_prefs(&config).unwrap();

    let reloaded = Session::load(MockRenderer::new(), &config, Instant::now());
    assert_eq!(reloaded.prefs(), &prefs);
    assert!(reloaded.notices().is_empty());
}

#[test]
fn unreadable_prefs_fall_back_with_a_warning() {
    let config = ConfigService::new(MemoryConfigStore::new());
    config.store().save_raw(PREFS_KEY, b"[1, 2").unwrap();
    let s = Session::load(MockRenderer::new(), &config, Instant::now());
    assert_eq!(s.prefs(), &EditorPrefs::default());
    assert_eq!(s.notices().latest().unwrap().kind, NoticeKind::Warn);
}
