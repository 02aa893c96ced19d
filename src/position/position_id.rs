//! GNU Backgammon position IDs.
//!
//! The ID is 14 base64 characters holding an 80-bit key. The key is read from the least
//! significant bit of each byte: for both players in turn and for each of their 25 slots,
//! a `1` for every checker followed by a single `0`.

use thiserror::Error;

use crate::position::{Position, NUM_SLOTS};

pub const POSITION_ID_LENGTH: usize = 14;
const KEY_LENGTH: usize = 10;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionIdError {
    #[error("empty position id")]
    Empty,
    #[error("position id must be {len} characters, got {0}", len = POSITION_ID_LENGTH)]
    WrongLength(usize),
    #[error("invalid character '{0}' in position id")]
    InvalidCharacter(char),
    #[error("position id has checkers after both players are complete")]
    TrailingCheckers,
    #[error("position id ends before both players are complete")]
    Truncated,
    #[error("position id decodes to an invalid position: {0}")]
    InvalidPosition(String),
}

fn base64_value(ch: char) -> Option<u8> {
    BASE64_ALPHABET
        .iter()
        .position(|&c| c as char == ch)
        .map(|i| i as u8)
}

fn decode_key(id: &str) -> Result<[u8; KEY_LENGTH], PositionIdError> {
    if id.is_empty() {
        return Err(PositionIdError::Empty);
    }
    let num_chars = id.chars().count();
    if num_chars != POSITION_ID_LENGTH {
        return Err(PositionIdError::WrongLength(num_chars));
    }
    let values = id
        .chars()
        .map(|ch| base64_value(ch).ok_or(PositionIdError::InvalidCharacter(ch)))
        .collect::<Result<Vec<u8>, _>>()?;

    let mut key = [0; KEY_LENGTH];
    for (group, chunk) in values[..12].chunks_exact(4).enumerate() {
        key[3 * group] = (chunk[0] << 2) | (chunk[1] >> 4);
        key[3 * group + 1] = (chunk[1] << 4) | (chunk[2] >> 2);
        key[3 * group + 2] = (chunk[2] << 6) | chunk[3];
    }
    key[9] = (values[12] << 2) | (values[13] >> 4);
    Ok(key)
}

fn encode_key(key: &[u8; KEY_LENGTH]) -> String {
    let mut id = String::with_capacity(POSITION_ID_LENGTH);
    let mut push = |value: u8| id.push(BASE64_ALPHABET[value as usize & 0x3f] as char);
    for group in key[..9].chunks_exact(3) {
        push(group[0] >> 2);
        push(((group[0] & 0x3) << 4) | (group[1] >> 4));
        push(((group[1] & 0xf) << 2) | (group[2] >> 6));
        push(group[2]);
    }
    push(key[9] >> 2);
    push((key[9] & 0x3) << 4);
    id
}

impl Position {
    /// Decode a position ID. The first player in the ID is the player on roll.
    pub fn from_position_id(id: &str) -> Result<Self, PositionIdError> {
        let key = decode_key(id)?;

        let mut checkers = [[0u8; NUM_SLOTS]; 2];
        let mut player = 0;
        let mut slot = 0;
        for byte in key {
            for bit in 0..8 {
                if (byte >> bit) & 1 == 1 {
                    if player >= 2 {
                        return Err(PositionIdError::TrailingCheckers);
                    }
                    checkers[player][slot] += 1;
                } else if player < 2 {
                    slot += 1;
                    if slot == NUM_SLOTS {
                        player += 1;
                        slot = 0;
                    }
                }
            }
        }
        if player < 2 {
            return Err(PositionIdError::Truncated);
        }
        Position::from_checkers(checkers).map_err(PositionIdError::InvalidPosition)
    }

    pub fn position_id(&self) -> String {
        let mut key = [0u8; KEY_LENGTH];
        let mut bit_index = 0;
        for side in self.checkers() {
            for &count in side {
                for _ in 0..count {
                    key[bit_index / 8] |= 1 << (bit_index % 8);
                    bit_index += 1;
                }
                bit_index += 1;
            }
        }
        encode_key(&key)
    }
}
