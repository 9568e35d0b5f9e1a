//! Single-pass tokenizer for message segments.
//!
//! The scanner walks a segment once, left to right, and splits it into residual
//! text, command output slots and side-channel directives. Paired markers take
//! everything up to the next marker of the same kind as their payload, so other
//! markers inside a payload are plain text. A marker without a partner is kept
//! as literal text.

use super::{CMD, CMDOUT, EMBED, FILE, REACT, REPLY};

/// Markers that enclose a payload between two occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairedMarker {
    Cmd,
    React,
    File,
    Embed,
}

impl PairedMarker {
    pub fn token(self) -> &'static str {
        match self {
            PairedMarker::Cmd => CMD,
            PairedMarker::React => REACT,
            PairedMarker::File => FILE,
            PairedMarker::Embed => EMBED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Paired(PairedMarker),
    CommandOutput,
    Reply,
}

impl Token {
    fn text(self) -> &'static str {
        match self {
            Token::Paired(marker) => marker.token(),
            Token::CommandOutput => CMDOUT,
            Token::Reply => REPLY,
        }
    }
}

const TOKENS: [Token; 6] = [
    Token::Paired(PairedMarker::Cmd),
    Token::Paired(PairedMarker::React),
    Token::Paired(PairedMarker::File),
    Token::Paired(PairedMarker::Embed),
    Token::CommandOutput,
    Token::Reply,
];

/// A run of residual output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    /// Where the captured standard output of the shell directive goes.
    CommandOutput,
}

/// Result of tokenizing one segment, before placeholders are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSegment {
    pub pieces: Vec<Piece>,
    pub shell: Option<String>,
    pub reaction: Option<String>,
    pub file: Option<String>,
    pub embed_title: Option<String>,
    pub reply: bool,
}

impl ParsedSegment {
    /// True when the text asks for the shell directive's output.
    pub fn wants_output(&self) -> bool {
        self.pieces.iter().any(|p| matches!(p, Piece::CommandOutput))
    }

    fn directive_slot(&mut self, marker: PairedMarker) -> &mut Option<String> {
        match marker {
            PairedMarker::Cmd => &mut self.shell,
            PairedMarker::React => &mut self.reaction,
            PairedMarker::File => &mut self.file,
            PairedMarker::Embed => &mut self.embed_title,
        }
    }
}

/// Finds the earliest known token in `input`.
fn next_token(input: &str) -> Option<(usize, Token)> {
    input.match_indices('$').find_map(|(index, _)| {
        let rest = &input[index..];
        TOKENS
            .iter()
            .find(|token| rest.starts_with(token.text()))
            .map(|token| (index, *token))
    })
}

/// Splits a segment into text pieces and directives.
///
/// Each directive kind yields at most one payload: the first complete pair
/// wins and later complete pairs are removed without effect. Payloads are
/// trimmed; an empty payload counts as no directive.
pub fn parse_segment(segment: &str) -> ParsedSegment {
    let mut parsed = ParsedSegment::default();
    let mut text = String::new();
    let mut rest = segment;

    while let Some((start, token)) = next_token(rest) {
        text.push_str(&rest[..start]);
        let after = &rest[start + token.text().len()..];

        match token {
            Token::Reply => {
                parsed.reply = true;
                rest = after;
            }
            Token::CommandOutput => {
                parsed.pieces.push(Piece::Text(std::mem::take(&mut text)));
                parsed.pieces.push(Piece::CommandOutput);
                rest = after;
            }
            Token::Paired(marker) => match after.find(marker.token()) {
                Some(end) => {
                    let payload = after[..end].trim();
                    let slot = parsed.directive_slot(marker);
                    if slot.is_none() && !payload.is_empty() {
                        *slot = Some(payload.to_string());
                    }
                    rest = &after[end + marker.token().len()..];
                }
                None => {
                    text.push_str(marker.token());
                    rest = after;
                }
            },
        }
    }
    text.push_str(rest);
    parsed.pieces.push(Piece::Text(text));

    parsed
}
