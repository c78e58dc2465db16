// Wire-format stability and serialize/deserialize round-trips

use swara_editor::models::core::{BeatSignature, LyricsAlign, LyricsWidth, SongComposition};
use swara_editor::persistence::{export_json, import_from_text};
use swara_editor::store::CompositionStore;

/// A document with ragged line lengths, mixed box counts, and styled lyrics.
fn sample_doc() -> SongComposition {
    let mut store = CompositionStore::new();
    store.set_title("Raag Yaman Sthayi");
    store.set_bpm(120);
    store.add_line(BeatSignature::ThreeFour, 2);
    store.add_line(BeatSignature::FourFour, 4);

    store.set_notation(0, 0, 0, "सा", false);
    store.set_notation(0, 0, 0, "रे", true);
    store.set_notation(1, 3, 2, "नि", false);
    store.set_lyrics(0, 1, "je-te");
    store.cycle_lyrics_width(0, 1);
    store.cycle_lyrics_width(0, 1);
    store.set_lyrics_align_from_pointer(0, 1, 5.0, 100.0);
    store.document().clone()
}

#[test]
fn test_round_trip_preserves_document() {
    let doc = sample_doc();
    let export = export_json(&doc).expect("export should succeed");
    let imported = import_from_text(&export.contents).expect("import should succeed");
    assert_eq!(imported, doc);
}

#[test]
fn test_round_trip_empty_document() {
    let doc = SongComposition::new();
    let export = export_json(&doc).expect("export should succeed");
    let imported = import_from_text(&export.contents).expect("import should succeed");
    assert_eq!(imported, doc);
    assert!(imported.lines.is_empty());
}

#[test]
fn test_wire_field_names_are_stable() {
    let doc = sample_doc();
    let json: serde_json::Value =
        serde_json::from_str(&export_json(&doc).unwrap().contents).unwrap();

    assert_eq!(json["title"], "Raag Yaman Sthayi");
    assert_eq!(json["beat"], "4/4");
    assert_eq!(json["columns"], 4);
    assert_eq!(json["bpm"], 120);
    assert!(json["Song"].is_array());

    // Lines are plain arrays of column objects
    let first_col = &json["Song"][0][0];
    assert!(first_col["column"].is_array());
    assert_eq!(first_col["column"][0]["notation"][0]["note"], "सारे");
    assert_eq!(first_col["lyrics"], "");

    // Styled column carries the legacy width/align spellings
    let styled = &json["Song"][0][1];
    assert_eq!(styled["lyricsWidth"], "1/2");
    assert_eq!(styled["lyricsAlign"], "start");

    // Default width is omitted entirely, not serialized as null
    assert!(first_col.get("lyricsWidth").is_none());
}

#[test]
fn test_export_filename_is_slugged_title() {
    let doc = sample_doc();
    assert_eq!(
        export_json(&doc).unwrap().filename,
        "raag-yaman-sthayi.json"
    );
}

#[test]
fn test_import_accepts_legacy_export_without_styling_fields() {
    // The shape the legacy editor exported: no title, no lyricsWidth/Align
    let text = r#"{
        "beat": "3/4",
        "columns": 1,
        "bpm": 180,
        "Song": [[{ "column": [{ "notation": [{ "note": "ग" }] },
                               { "notation": [{ "note": "" }] },
                               { "notation": [{ "note": "" }] }],
                    "lyrics": "man" }]]
    }"#;
    let doc = import_from_text(text).expect("legacy import should succeed");
    assert_eq!(doc.title, "Imported Song");
    assert_eq!(doc.beat, BeatSignature::ThreeFour);
    assert_eq!(doc.lines[0].columns[0].boxes[0].note(), "ग");
    assert_eq!(doc.lines[0].columns[0].lyrics_width, None);
    assert_eq!(doc.lines[0].columns[0].lyrics_align, LyricsAlign::Center);
}

#[test]
fn test_ragged_line_lengths_survive_round_trip() {
    let mut store = CompositionStore::new();
    store.add_line(BeatSignature::TwoFour, 1);
    store.add_line(BeatSignature::TwoFour, 4);
    store.add_line(BeatSignature::ThreeFour, 2);
    let doc = store.document().clone();

    let imported = import_from_text(&export_json(&doc).unwrap().contents).unwrap();
    let lengths: Vec<usize> = imported.lines.iter().map(|l| l.len()).collect();
    assert_eq!(lengths, vec![1, 4, 2]);
}

#[test]
fn test_width_cycle_spellings_round_trip() {
    let mut store = CompositionStore::new();
    store.add_line(BeatSignature::TwoFour, 4);
    let widths = [
        Some(LyricsWidth::Quarter),
        Some(LyricsWidth::Half),
        Some(LyricsWidth::ThreeQuarter),
        Some(LyricsWidth::Full),
    ];
    for (i, _) in widths.iter().enumerate() {
        for _ in 0..=i {
            store.cycle_lyrics_width(0, i);
        }
    }
    let doc = store.document().clone();
    let imported = import_from_text(&export_json(&doc).unwrap().contents).unwrap();
    for (i, expected) in widths.iter().enumerate() {
        assert_eq!(imported.lines[0].columns[i].lyrics_width, *expected);
    }
}
