use rand::{thread_rng, Rng};

use crate::constants::*;
use crate::error::Error;
use crate::moves::{layer_count, MoveSequence, Turn};

/// Parse a whitespace separated move string such as `"R U2 F' 2L"`.
///
/// A `2` suffix is expanded into two identical quarter turns, `2'` is accepted as a synonym.
pub fn scramble_from_str(s: &str) -> Result<MoveSequence, Error> {
    let mut seq = Vec::new();
    for word in s.split_whitespace() {
        let quarter = word
            .strip_suffix("2'")
            .or_else(|| word.strip_suffix('2'))
            // a bare number such as "2" is a layer prefix with no face, leave it to the parser
            .filter(|rest| rest.ends_with(|c: char| c.is_ascii_alphabetic()));
        match quarter {
            Some(rest) => {
                let turn: Turn = rest.parse()?;
                seq.push(turn);
                seq.push(turn);
            }
            None => seq.push(word.parse()?),
        }
    }
    Ok(seq)
}

/// Print a sequence in move notation, folding two identical neighbouring quarter turns into `X2`.
pub fn scramble_to_str(s: &[Turn]) -> String {
    let mut words = Vec::new();
    let mut i = 0;
    while i < s.len() {
        if i + 1 < s.len() && s[i] == s[i + 1] {
            let mut half = s[i];
            half.inverted = false;
            words.push(format!("{}2", half));
            i += 2;
        } else {
            words.push(s[i].to_string());
            i += 1;
        }
    }
    words.join(" ")
}

/// Random scramble of quarter turns for a cube of the given dimension.
pub fn gen_scramble(dimension: usize, length: usize) -> Result<MoveSequence, Error> {
    gen_scramble_with(&mut thread_rng(), dimension, length)
}

/// Random scramble drawn from `rng`. Never turns the same face twice in a row.
pub fn gen_scramble_with<R: Rng + ?Sized>(
    rng: &mut R,
    dimension: usize,
    length: usize,
) -> Result<MoveSequence, Error> {
    let layers = layer_count(dimension);
    if layers == 0 {
        return Err(Error::InvalidDimension(dimension));
    }
    let mut seq: MoveSequence = Vec::with_capacity(length);
    while seq.len() < length {
        let face = ALL_FACES[rng.gen_range(0..ALL_FACES.len())];
        if seq.last().map_or(false, |t| t.mv.face == face) {
            continue;
        }
        let layer = rng.gen_range(0..layers);
        seq.push(Turn::layered(face, layer, rng.gen_bool(0.5)));
    }
    Ok(seq)
}
