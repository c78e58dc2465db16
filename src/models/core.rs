//! Core data structures for the swara notation grid
//!
//! This module defines the composition document: lines of beat columns,
//! each column holding notation boxes and a lyric fragment. Serde renames
//! pin the JSON field names to the stable wire schema used by export,
//! import, and local storage.

use serde::{Deserialize, Serialize};

/// Rhythmic signature selecting how many notation boxes populate each
/// newly created column.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeatSignature {
    #[serde(rename = "2/4")]
    TwoFour,
    #[serde(rename = "3/4")]
    ThreeFour,
    #[serde(rename = "4/4")]
    FourFour,
}

impl BeatSignature {
    /// Number of notation boxes a new column gets under this signature.
    ///
    /// Fixed product mapping: 2/4 and 4/4 both produce four boxes, 3/4
    /// produces three. Intentional, not derived from the signature.
    pub fn boxes_per_column(self) -> usize {
        match self {
            BeatSignature::TwoFour => 4,
            BeatSignature::ThreeFour => 3,
            BeatSignature::FourFour => 4,
        }
    }

    /// The signature as its display/wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            BeatSignature::TwoFour => "2/4",
            BeatSignature::ThreeFour => "3/4",
            BeatSignature::FourFour => "4/4",
        }
    }
}

impl Default for BeatSignature {
    fn default() -> Self {
        BeatSignature::TwoFour
    }
}

impl std::fmt::Display for BeatSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered width of a lyrics field. Absence (`None` at the `Column` level)
/// means the default full-flow width; the field is omitted from JSON in
/// that case.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LyricsWidth {
    #[serde(rename = "1/4")]
    Quarter,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "3/4")]
    ThreeQuarter,
    #[serde(rename = "full")]
    Full,
}

impl LyricsWidth {
    /// Advance one step through the fixed cycle
    /// none → 1/4 → 1/2 → 3/4 → full → none.
    pub fn cycle_next(current: Option<LyricsWidth>) -> Option<LyricsWidth> {
        match current {
            None => Some(LyricsWidth::Quarter),
            Some(LyricsWidth::Quarter) => Some(LyricsWidth::Half),
            Some(LyricsWidth::Half) => Some(LyricsWidth::ThreeQuarter),
            Some(LyricsWidth::ThreeQuarter) => Some(LyricsWidth::Full),
            Some(LyricsWidth::Full) => None,
        }
    }
}

/// Horizontal alignment of a lyrics field within its column.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LyricsAlign {
    Start,
    #[default]
    Center,
    End,
}

impl LyricsAlign {
    /// Map a horizontal pointer offset within the field to an alignment.
    ///
    /// The left 30% of the field selects `Start`, the right 30% selects
    /// `End`, the middle band selects `Center`. This is the only alignment
    /// control; there is no explicit picker.
    pub fn from_pointer(relative_x: f64, field_width: f64) -> LyricsAlign {
        if relative_x < field_width * 0.3 {
            LyricsAlign::Start
        } else if relative_x > field_width * 0.7 {
            LyricsAlign::End
        } else {
            LyricsAlign::Center
        }
    }
}

/// One editable note string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub note: String,
}

/// A single notation box.
///
/// Modeled as a one-element container of [`Note`] for forward compatibility
/// with multi-symbol boxes; the engine only ever reads and writes index 0.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotationBox {
    pub notation: Vec<Note>,
}

impl NotationBox {
    /// Create an empty box.
    pub fn new() -> Self {
        Self {
            notation: vec![Note {
                note: String::new(),
            }],
        }
    }

    /// The box's note text.
    pub fn note(&self) -> &str {
        &self.notation[0].note
    }

    /// Replace the box's note text.
    pub fn set_note(&mut self, value: impl Into<String>) {
        self.notation[0].note = value.into();
    }
}

impl Default for NotationBox {
    fn default() -> Self {
        Self::new()
    }
}

/// One beat-group: notation boxes plus one lyric fragment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// The notation boxes. Box count is fixed at creation and never changes.
    #[serde(rename = "column")]
    pub boxes: Vec<NotationBox>,

    /// Lyric fragment shown under the boxes.
    pub lyrics: String,

    /// Rendered lyrics width; `None` (field absent in JSON) is the default.
    #[serde(
        rename = "lyricsWidth",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lyrics_width: Option<LyricsWidth>,

    /// Lyrics alignment; defaults to center when absent.
    #[serde(rename = "lyricsAlign", default)]
    pub lyrics_align: LyricsAlign,
}

impl Column {
    /// Create a fresh column with the box count dictated by `beat`.
    pub fn new(beat: BeatSignature) -> Self {
        Self {
            boxes: (0..beat.boxes_per_column())
                .map(|_| NotationBox::new())
                .collect(),
            lyrics: String::new(),
            lyrics_width: None,
            lyrics_align: LyricsAlign::Center,
        }
    }

    /// Reset notes, lyrics, width, and alignment to creation defaults.
    /// Box count is untouched.
    pub fn clear(&mut self) {
        for b in &mut self.boxes {
            b.set_note("");
        }
        self.lyrics.clear();
        self.lyrics_width = None;
        self.lyrics_align = LyricsAlign::Center;
    }
}

/// An ordered row of columns, representing one musical phrase.
///
/// Length is fixed at creation to the columns-per-line setting in force at
/// that moment; lines created under different settings may have different
/// lengths. Serializes as a plain JSON array of columns.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct Line {
    pub columns: Vec<Column>,
}

impl Line {
    /// Create a line of `columns_per_line` fresh columns for `beat`.
    pub fn new(beat: BeatSignature, columns_per_line: usize) -> Self {
        Self {
            columns: (0..columns_per_line).map(|_| Column::new(beat)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The composition document: a grid of notation lines plus the settings
/// snapshot taken when the most recent line was added.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SongComposition {
    /// Title of the composition.
    pub title: String,

    /// Beat signature used for the most recently added line.
    pub beat: BeatSignature,

    /// Column count used for the most recently added line.
    #[serde(rename = "columns")]
    pub columns_per_line: usize,

    /// Tempo in beats per minute.
    pub bpm: u32,

    /// The notation lines.
    #[serde(rename = "Song")]
    pub lines: Vec<Line>,
}

impl SongComposition {
    /// Create an empty composition with the session defaults.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            beat: BeatSignature::TwoFour,
            columns_per_line: 1,
            bpm: 180,
            lines: Vec::new(),
        }
    }

    /// Total number of notation boxes across the whole grid.
    pub fn total_box_count(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|line| line.columns.iter())
            .map(|col| col.boxes.len())
            .sum()
    }
}

impl Default for SongComposition {
    fn default() -> Self {
        Self::new()
    }
}
