// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional analysis of paragraphs.
//!
//! Glyphs are stored in logical order together with their embedding level.
//! Visual order is rebuilt per line with [`reorder_visual`], after line
//! breaking, so the breaker never has to deal with reordered text.

use crate::format::{BaseDirection, ParagraphDirection};
use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;
use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Direction, Level};

/// Embedding levels and base direction of one paragraph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BidiAnalysis {
    /// One embedding level per codepoint, in logical order.
    pub levels: Vec<u8>,
    /// Resolved base direction.
    pub direction: BaseDirection,
}

/// Strategy that assigns embedding levels to the codepoints of a paragraph.
pub trait ParagraphShaper: core::fmt::Debug + Send + Sync {
    /// Analyzes one paragraph.
    ///
    /// `previous` is the resolved direction of the paragraph before this one,
    /// used by [`ParagraphDirection::Automatic`] when the text has no strong
    /// character.
    fn analyze(
        &self,
        text: &[char],
        direction: ParagraphDirection,
        previous: BaseDirection,
    ) -> BidiAnalysis;
}

/// Full Unicode Bidirectional Algorithm.
#[derive(Copy, Clone, Default, Debug)]
pub struct UnicodeBidi;

impl ParagraphShaper for UnicodeBidi {
    fn analyze(
        &self,
        text: &[char],
        direction: ParagraphDirection,
        previous: BaseDirection,
    ) -> BidiAnalysis {
        let source: String = text.iter().collect();
        let direction = match direction {
            ParagraphDirection::LeftToRight => BaseDirection::Ltr,
            ParagraphDirection::RightToLeft => BaseDirection::Rtl,
            ParagraphDirection::Automatic => match unicode_bidi::get_base_direction(source.as_str())
            {
                Direction::Ltr => BaseDirection::Ltr,
                Direction::Rtl => BaseDirection::Rtl,
                Direction::Mixed => previous,
            },
        };

        let base = match direction {
            BaseDirection::Ltr => Level::ltr(),
            BaseDirection::Rtl => Level::rtl(),
        };
        let info = BidiInfo::new(&source, Some(base));
        let mut levels: Vec<u8> = source
            .char_indices()
            .map(|(byte, _)| {
                info.levels
                    .get(byte)
                    .map_or(direction.level(), |level| level.number())
            })
            .collect();
        reset_segment_separators(text, &mut levels, direction.level());

        BidiAnalysis { levels, direction }
    }
}

/// No reordering: every codepoint is left-to-right.
///
/// The base direction still follows the request, so right-to-left paragraphs
/// keep their caret conventions.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoBidi;

impl ParagraphShaper for NoBidi {
    fn analyze(
        &self,
        text: &[char],
        direction: ParagraphDirection,
        previous: BaseDirection,
    ) -> BidiAnalysis {
        let direction = match direction {
            ParagraphDirection::LeftToRight => BaseDirection::Ltr,
            ParagraphDirection::RightToLeft => BaseDirection::Rtl,
            ParagraphDirection::Automatic => previous,
        };
        BidiAnalysis {
            levels: alloc::vec![0; text.len()],
            direction,
        }
    }
}

/// Resets segment separators, and the whitespace before them, to the
/// paragraph level (rule L1). Whitespace at the end of a line depends on line
/// breaking and is reset when the line is placed.
fn reset_segment_separators(text: &[char], levels: &mut [u8], paragraph_level: u8) {
    let mut before_separator = false;
    for (level, &ch) in levels.iter_mut().zip(text).rev() {
        match bidi_class(ch) {
            BidiClass::S | BidiClass::B => {
                before_separator = true;
                *level = paragraph_level;
            }
            BidiClass::WS | BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI
                if before_separator =>
            {
                *level = paragraph_level;
            }
            _ => before_separator = false,
        }
    }
}

/// Computes the visual order of a line from its logical embedding levels.
///
/// Returns logical indices in visual order (rule L2 of UAX #9).
pub(crate) fn reorder_visual(levels: &[u8]) -> SmallVec<[usize; 32]> {
    let mut order: SmallVec<[usize; 32]> = (0..levels.len()).collect();
    let Some(&max) = levels.iter().max() else {
        return order;
    };
    let Some(min_odd) = levels.iter().copied().filter(|level| level & 1 == 1).min() else {
        return order;
    };

    let mut level = max;
    while level >= min_odd {
        let mut i = 0;
        while i < order.len() {
            if levels[order[i]] >= level {
                let start = i;
                while i < order.len() && levels[order[i]] >= level {
                    i += 1;
                }
                order[start..i].reverse();
            } else {
                i += 1;
            }
        }
        if level == 0 {
            break;
        }
        level -= 1;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::{reorder_visual, NoBidi, ParagraphShaper, UnicodeBidi};
    use crate::format::{BaseDirection, ParagraphDirection};
    use alloc::vec::Vec;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn ltr_levels_are_zero() {
        let analysis = UnicodeBidi.analyze(
            &chars("abc"),
            ParagraphDirection::LeftToRight,
            BaseDirection::Ltr,
        );
        assert_eq!(analysis.levels, [0, 0, 0]);
        assert_eq!(analysis.direction, BaseDirection::Ltr);
    }

    #[test]
    fn automatic_detects_hebrew() {
        let analysis = UnicodeBidi.analyze(
            &chars("\u{05D0}\u{05D1} ab"),
            ParagraphDirection::Automatic,
            BaseDirection::Ltr,
        );
        assert_eq!(analysis.direction, BaseDirection::Rtl);
        assert_eq!(analysis.levels[0], 1);
        assert_eq!(analysis.levels[3], 2, "latin inside rtl is at level 2");
    }

    #[test]
    fn segment_separators_take_the_paragraph_level() {
        let analyze = |text: &str| {
            UnicodeBidi
                .analyze(&chars(text), ParagraphDirection::LeftToRight, BaseDirection::Ltr)
                .levels
        };
        assert_eq!(analyze("\u{05D0}\u{05D1} \u{05D2}"), [1, 1, 1, 1]);
        assert_eq!(analyze("\u{05D0}\u{05D1}\t\u{05D2}"), [1, 1, 0, 1]);
        assert_eq!(
            analyze("\u{05D0}  \t\u{05D2}"),
            [1, 0, 0, 0, 1],
            "whitespace before a tab is reset too"
        );
    }

    #[test]
    fn automatic_neutral_inherits_previous() {
        let analysis = UnicodeBidi.analyze(
            &chars("123 ..."),
            ParagraphDirection::Automatic,
            BaseDirection::Rtl,
        );
        assert_eq!(analysis.direction, BaseDirection::Rtl);
        let analysis = NoBidi.analyze(
            &chars("abc"),
            ParagraphDirection::Automatic,
            BaseDirection::Rtl,
        );
        assert_eq!(analysis.direction, BaseDirection::Rtl);
        assert_eq!(analysis.levels, [0, 0, 0]);
    }

    #[test]
    fn reorders_runs() {
        assert_eq!(reorder_visual(&[0, 0, 0]).as_slice(), &[0, 1, 2]);
        assert_eq!(reorder_visual(&[1, 1, 1]).as_slice(), &[2, 1, 0]);
        assert_eq!(reorder_visual(&[0, 1, 1, 0]).as_slice(), &[0, 2, 1, 3]);
        assert_eq!(reorder_visual(&[1, 2, 2, 1]).as_slice(), &[3, 1, 2, 0]);
    }
}
