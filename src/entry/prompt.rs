//! Interactive game entry.

use std::io::{self, BufRead, Write};

use tracing::debug;

use super::{parse_place, parse_players, parse_rounds, parse_scores, EntryError, GameEntry};

/// Read one trimmed line, failing on end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while waiting for an answer",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask `prompt` until `parse` accepts the answer.
pub fn prompt_until_valid<R, W, T, F>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    parse: F,
) -> io::Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, EntryError>,
{
    loop {
        writeln!(output, "{}", prompt)?;
        output.flush()?;
        let line = read_line(input)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("Rejected input {:?}: {}", line, e);
                writeln!(output, "Input not valid ({}), please try again.", e)?;
            }
        }
    }
}

/// Walk through all fields of a game and ask for confirmation.
///
/// A rejected confirmation starts over with the player names.
pub fn prompt_game_entry<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<GameEntry> {
    loop {
        let players = prompt_until_valid(
            input,
            output,
            "Please enter the players' names (comma-separated):",
            parse_players,
        )?;
        let rounds = prompt_until_valid(
            input,
            output,
            "Please enter the number of rounds:",
            parse_rounds,
        )?;
        let player_count = players.len();
        let scores = prompt_until_valid(
            input,
            output,
            "Please enter the scores (comma-separated):",
            |s| parse_scores(s, player_count),
        )?;
        let place = prompt_until_valid(
            input,
            output,
            "Please enter the place of the game:",
            parse_place,
        )?;

        let entry = GameEntry::new(players, rounds, scores, place)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(output, "Is the following entry correct?")?;
        writeln!(output, "{}", entry)?;
        writeln!(output, "Is this correct? (y/n):")?;
        output.flush()?;

        if read_line(input)?.trim().eq_ignore_ascii_case("y") {
            return Ok(entry);
        }
        writeln!(output, "Entry not correct, please try again.")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_until_valid_reprompts() {
        let mut input = Cursor::new("0\nabc\n7\n");
        let mut output = Vec::new();

        let rounds = prompt_until_valid(&mut input, &mut output, "Rounds?", parse_rounds).unwrap();

        assert_eq!(rounds, 7);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Rounds?").count(), 3);
        assert_eq!(text.matches("please try again").count(), 2);
    }

    #[test]
    fn test_prompt_until_valid_eof() {
        let mut input = Cursor::new("0\n");
        let mut output = Vec::new();

        let err = prompt_until_valid(&mut input, &mut output, "Rounds?", parse_rounds).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_prompt_game_entry() {
        let mut input = Cursor::new("A, B, C, D\n3\n10, -10, 5, -6\n10, -10, 5, -5\nX\ny\n");
        let mut output = Vec::new();

        let entry = prompt_game_entry(&mut input, &mut output).unwrap();

        assert_eq!(entry.players(), ["A", "B", "C", "D"]);
        assert_eq!(entry.rounds(), 3);
        assert_eq!(entry.scores(), [10, -10, 5, -5]);
        assert_eq!(entry.place(), "X");
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Scores must sum to zero, got -1"));
    }

    #[test]
    fn test_prompt_game_entry_restarts_when_not_confirmed() {
        let mut input = Cursor::new(
            "A, B, C, D\n3\n1, -1, 0, 0\nX\nn\nE, F, G, H\n2\n2, -2, 0, 0\nY\nY\n",
        );
        let mut output = Vec::new();

        let entry = prompt_game_entry(&mut input, &mut output).unwrap();

        assert_eq!(entry.players(), ["E", "F", "G", "H"]);
        assert_eq!(entry.place(), "Y");
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Entry not correct"));
    }
}
