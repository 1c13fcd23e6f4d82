// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{ParsedText, ParserConfig, TextParser};
use crate::error::Error;
use crate::resources::ResourceProvider;
use alloc::sync::Arc;

/// Parser for `[tag='value']` markup.
///
/// Tags change the cumulative style until another tag changes it again.
/// `[br]` emits a line break; `[image='name']` and `[window='name']` embed
/// objects. A backslash escapes `[` and `\`, and `\n`, `\r` and `\t` produce
/// the corresponding control characters.
#[derive(Clone, Debug, Default)]
pub struct LegacyTextParser {
    config: ParserConfig,
}

impl LegacyTextParser {
    /// A parser without named fonts or images.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser resolving `font` and `image` tags through `resources`.
    pub fn with_resources(resources: Arc<dyn ResourceProvider>) -> Self {
        let mut parser = Self::default();
        parser.config.resources = Some(resources);
        parser
    }
}

impl TextParser for LegacyTextParser {
    fn parse(&self, input: &str) -> Result<ParsedText, Error> {
        let mut writer = self.config.writer();
        let mut chars = input.char_indices();
        let mut tag_start = None;

        while let Some((pos, ch)) = chars.next() {
            if let Some(start) = tag_start {
                if ch == ']' {
                    writer.apply_tag(&input[start + 1..pos], start..pos + 1)?;
                    tag_start = None;
                }
                continue;
            }
            match ch {
                '[' => tag_start = Some(pos),
                '\\' => match chars.next() {
                    Some((next_pos, next)) => {
                        let span = pos..next_pos + next.len_utf8();
                        match next {
                            '[' | '\\' => writer.push_char(next, span)?,
                            'n' | '\n' => writer.push_char('\n', span)?,
                            'r' | '\r' => writer.push_char('\r', span)?,
                            't' => writer.push_char('\t', span)?,
                            _ => {
                                writer.push_char('\\', pos..next_pos)?;
                                writer.push_char(next, next_pos..span.end)?;
                            }
                        }
                    }
                    None => writer.push_char('\\', pos..pos + 1)?,
                },
                _ => writer.push_char(ch, pos..pos + ch.len_utf8())?,
            }
        }

        if let Some(start) = tag_start {
            log::warn!("unterminated tag at byte {start}");
            return Err(Error::unterminated_tag(start));
        }
        Ok(writer.finish(input.len()))
    }
}
