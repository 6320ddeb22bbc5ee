//! Text formats for move lists: logfiles, Little Golem transcripts and
//! the two-column dvonner layout

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::field::Player;
use crate::game::{next_player_for, Move};
use crate::hex::{field_table, Coord, FIELD_COUNT};

/// Output selector for tools that print a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    State,
    Plain,
    Transcript,
    Logfile,
    Dvonner,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "state" => Ok(OutputFormat::State),
            "plain" => Ok(OutputFormat::Plain),
            "transcript" => Ok(OutputFormat::Transcript),
            "logfile" => Ok(OutputFormat::Logfile),
            "dvonner" => Ok(OutputFormat::Dvonner),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ParseError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::State => "state",
            OutputFormat::Plain => "plain",
            OutputFormat::Transcript => "transcript",
            OutputFormat::Logfile => "logfile",
            OutputFormat::Dvonner => "dvonner",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

// ============================================================================
// LOGFILES
// ============================================================================

/// Parse whitespace-separated move tokens; lines starting with `#` are
/// comments.
pub fn parse_logfile(data: &str) -> Result<Vec<Move>, ParseError> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(str::parse)
        .collect()
}

/// One line for the first 24 placements, one for the rest of placement,
/// then 16 moves per line.
pub fn format_logfile(moves: &[Move]) -> String {
    let mut out = String::new();
    let mut line = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&mv.to_string());
        if i == 23 || i == FIELD_COUNT - 1 || (i >= FIELD_COUNT && (i - FIELD_COUNT) % 16 == 15) {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
    }
    if !line.is_empty() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

// ============================================================================
// TRANSCRIPTS
// ============================================================================

/// A game record with `Key [value]` metadata, as exported by Little Golem
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    pub metadata: Vec<(String, String)>,
    pub moves: Vec<Move>,
}

/// Split into bracketed values and whitespace-separated words
fn tokenize(data: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = data.trim_start();
    while !rest.is_empty() {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let end = if rest.starts_with('[') {
            rest.find(']').map_or(word_end, |i| i + 1)
        } else {
            word_end
        };
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    tokens
}

/// Parse a transcript. The last placement is implied in this format and is
/// added back to the move list.
pub fn parse_transcript(data: &str) -> Result<Transcript, ParseError> {
    let tokens = tokenize(data);
    let mut metadata = Vec::new();
    let mut pos = 0;

    while pos + 1 < tokens.len() && tokens[pos + 1].starts_with('[') {
        let value = tokens[pos + 1];
        let value = value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(&value[1..]);
        metadata.push((tokens[pos].to_string(), value.to_string()));
        pos += 2;
    }

    let mut moves: Vec<Move> = Vec::new();
    while pos < tokens.len() {
        let mut token = tokens[pos];
        pos += 1;

        if next_player_for(moves.len()) == Player::White {
            let expected = format!("{}.", 1 + moves.len() / 2);
            if token != expected {
                return Err(ParseError::MoveNumber {
                    expected,
                    found: token.to_string(),
                });
            }
            token = tokens
                .get(pos)
                .ok_or_else(|| ParseError::UnexpectedEnd(expected.clone()))?;
            pos += 1;
        }

        moves.push(token.parse()?);

        if moves.len() + 1 == FIELD_COUNT {
            moves.push(Move::Place(last_open_field(&moves)?));
        }
    }

    Ok(Transcript { metadata, moves })
}

fn last_open_field(moves: &[Move]) -> Result<Coord, ParseError> {
    let open: Vec<Coord> = field_table()
        .cells()
        .iter()
        .copied()
        .filter(|&c| !moves.contains(&Move::Place(c)))
        .collect();
    match open.as_slice() {
        [only] => Ok(*only),
        _ => Err(ParseError::PlacementMismatch(open.len())),
    }
}

/// Format as a transcript. The implied last placement is left out, and
/// when `complete` a trailing pass is written as a resignation.
pub fn format_transcript(transcript: &Transcript, complete: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (key, value) in &transcript.metadata {
        let key: String = key.chars().filter(|c| c.is_alphanumeric()).collect();
        if key.is_empty() {
            continue;
        }
        let value: String = value.chars().filter(|&c| c != '[' && c != ']').collect();
        parts.push(format!("{} [{}]", key, value));
    }

    let moves = &transcript.moves;
    for (i, mv) in moves.iter().enumerate() {
        if i + 1 == FIELD_COUNT {
            continue;
        }
        let token = match mv {
            Move::Pass if i + 1 == moves.len() && complete => "resign".to_string(),
            Move::Pass => "pass".to_string(),
            Move::Resign => "resign".to_string(),
            other => other.to_string().to_lowercase(),
        };
        if next_player_for(i) == Player::White {
            parts.push(format!("{}. {}", i / 2 + 1, token));
        } else {
            parts.push(token);
        }
    }

    parts.join(" ")
}

// ============================================================================
// DVONNER
// ============================================================================

/// Two moves per line, aligned so that the movement phase starts on a fresh
/// line, followed by a `BREAK` marker.
pub fn format_dvonner(moves: &[Move]) -> String {
    let tokens: Vec<String> = moves
        .iter()
        .map(Move::to_string)
        .chain(std::iter::once("BREAK".to_string()))
        .collect();

    let mut out = String::new();
    let mut line = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if !line.is_empty() {
            line.push_str("  ");
        }
        line.push_str(token);
        if (i + 1 < FIELD_COUNT && i % 2 == 1) || (i + 1 >= FIELD_COUNT && i % 2 == 0) {
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
    }
    if !line.is_empty() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
